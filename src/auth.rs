use axum::http::StatusCode;

/// Check the `key` form field against the configured upload key.
pub fn verify_upload_key(provided: Option<&str>, expected: &str) -> Result<(), (StatusCode, String)> {
    let provided = provided
        .filter(|key| !key.is_empty())
        .ok_or_else(|| (StatusCode::UNAUTHORIZED, "Missing 'key' parameter.".to_string()))?;

    if provided != expected {
        return Err((
            StatusCode::UNAUTHORIZED,
            "You're not authorized to access this API.".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_key() {
        assert!(verify_upload_key(Some("secret"), "secret").is_ok());
    }

    #[test]
    fn missing_or_empty_key() {
        for provided in [None, Some("")] {
            let (status, message) = verify_upload_key(provided, "secret").unwrap_err();
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Missing 'key' parameter.");
        }
    }

    #[test]
    fn wrong_key() {
        let (status, message) = verify_upload_key(Some("guess"), "secret").unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "You're not authorized to access this API.");
    }
}
