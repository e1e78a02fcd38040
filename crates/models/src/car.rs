use serde::{Deserialize, Serialize};

/// Earliest model year accepted for a car.
pub const MIN_YEAR: i32 = 1886;
/// Latest model year accepted for a car.
pub const MAX_YEAR: i32 = 2100;

/// A car inventory record.
///
/// `id` is assigned by storage on insert. Values decoded from a request may
/// violate the validation rules; missing JSON fields fall back to zero values
/// so validation reports them instead of the decoder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Car {
    pub id: i64,
    pub inventory_id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub vin: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_every_field() {
        let car = Car {
            id: 3,
            inventory_id: 1,
            make: "Ford".into(),
            model: "Fiesta".into(),
            year: 2018,
            color: "Blue".into(),
            vin: "VIN-1".into(),
        };
        let v = serde_json::to_value(&car).unwrap();
        assert_eq!(
            v,
            json!({"id": 3, "inventory_id": 1, "make": "Ford", "model": "Fiesta", "year": 2018, "color": "Blue", "vin": "VIN-1"})
        );
    }

    #[test]
    fn missing_fields_decode_to_zero_values() {
        let car: Car = serde_json::from_value(json!({"make": "Ford"})).unwrap();
        assert_eq!(car.id, 0);
        assert_eq!(car.inventory_id, 0);
        assert_eq!(car.make, "Ford");
        assert!(car.vin.is_empty());
    }
}
