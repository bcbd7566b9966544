//! Project-wide constants.

use std::time::Duration;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Base address of the risk service when none is configured.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

/// Path of the assessment endpoint, relative to the base address.
pub const RIESGO_PATH: &str = "/riesgo";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bounds (inclusive) for the numeric inputs. Lower bound is always 0, exclusive.
pub const MAX_HEIGHT_CM: f64 = 220.0;
pub const MAX_WEIGHT_KG: f64 = 400.0;
pub const MAX_AGE_YEARS: f64 = 110.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!AUTHOR.is_empty());
        assert!(!HOMEPAGE.is_empty());
        assert!(!REPO.is_empty());
        assert!(!DEFAULT_SERVICE_URL.is_empty());
    }

    #[test]
    fn consts_from_cargo_toml() {
        assert!(AUTHOR.contains("Equipo Difuso"));
        assert!(HOMEPAGE.contains("imc-riesgo.dev"));
        assert!(REPO.contains("github.com/imc-riesgo/difuso"));
    }

    #[test]
    fn riesgo_path_is_absolute() {
        assert!(RIESGO_PATH.starts_with('/'));
        assert!(!DEFAULT_SERVICE_URL.ends_with('/'));
    }
}
