use super::error::SigningError;
use super::model::SigningRequest;

/// Rejects requests that no provider can act on: blank payloads and blank
/// caller tokens.
pub(super) fn validate_request(request: &SigningRequest) -> Result<(), SigningError> {
    if request.data.trim().is_empty() {
        return Err(SigningError::InvalidRequest(
            "data must not be blank".to_string(),
        ));
    }
    if request.context.token.trim().is_empty() {
        return Err(SigningError::InvalidRequest(
            "token must not be blank".to_string(),
        ));
    }
    Ok(())
}
