//! Request validation helpers

use validator::ValidationError;

use crate::domain::RouteCode;

/// Clamp raw pagination query values to sane bounds.
pub fn validate_pagination(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

/// `validator` hook for six-digit route codes on request DTOs.
pub fn validate_route_code(code: &str) -> Result<(), ValidationError> {
    RouteCode::parse(code).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("route_code");
        err.message = Some("must be exactly 6 digits".into());
        err
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_bounds() {
        assert_eq!(validate_pagination(None, None), (1, 20));
        assert_eq!(validate_pagination(Some(0), Some(0)), (1, 1));
        assert_eq!(validate_pagination(Some(3), Some(500)), (3, 100));
    }

    #[test]
    fn route_code_hook() {
        assert!(validate_route_code("110001").is_ok());
        assert!(validate_route_code("1100").is_err());
        assert!(validate_route_code("11000a").is_err());
    }
}
