use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Car payload accepted by create and update. `id` is ignored on create and
/// replaced by the path id on update.
#[derive(ToSchema)]
pub struct CarInputDoc {
    pub inventory_id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub vin: String,
}

#[derive(ToSchema)]
pub struct CarDoc {
    pub id: i64,
    pub inventory_id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub vin: String,
}

/// `status` is one of `success`, `fail`, `error`.
#[derive(ToSchema)]
pub struct EnvelopeDoc {
    pub status: String,
    pub data: Option<CarDoc>,
    pub message: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cars::list_cars,
        crate::routes::cars::create_car,
        crate::routes::cars::get_car,
        crate::routes::cars::update_car,
        crate::routes::cars::delete_car,
    ),
    components(
        schemas(
            HealthResponse,
            CarInputDoc,
            CarDoc,
            EnvelopeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cars")
    )
)]
pub struct ApiDoc;
