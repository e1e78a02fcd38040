use thiserror::Error;

pub mod types;
pub mod utils;
pub mod env;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("environment error: {0}")]
    Env(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn core_error_display() {
        let e = CoreError::Env("missing data dir".into());
        assert_eq!(e.to_string(), "environment error: missing data dir");
    }
}
