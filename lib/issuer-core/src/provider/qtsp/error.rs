use thiserror::Error;

use crate::provider::http_client;
use crate::util::retry::Recoverable;

#[derive(Debug, Error)]
pub enum QtspError {
    #[error("unauthorized: invalid QTSP credentials")]
    Unauthorized,
    #[error("access token missing in response")]
    AccessTokenMissing,
    #[error("SAD missing in response")]
    SadMissing,
    #[error("signHash response missing signatures")]
    SignaturesMissing,
    #[error("no signature found in signDoc response")]
    DocumentWithSignatureMissing,
    #[error("signed payload received does not match the original data")]
    PayloadMismatch,
    #[error("signature service unreachable: {0}")]
    Unreachable(String),
    #[error("invalid QTSP response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Transport(http_client::Error),
}

impl Recoverable for QtspError {
    fn is_recoverable(&self) -> bool {
        match self {
            QtspError::Transport(error) => match error {
                http_client::Error::Timeout(_) | http_client::Error::ConnectionFailed(_) => true,
                http_client::Error::StatusCodeIsError(status) => status.is_server_error(),
                _ => false,
            },
            _ => false,
        }
    }
}

/// Maps a transport failure onto the QTSP error taxonomy. 401 is surfaced as
/// a dedicated unauthorized error, a DNS failure as unreachable (fatal, per
/// the retry policy); everything else keeps its transport classification.
pub(crate) fn transport_error(error: http_client::Error) -> QtspError {
    match error {
        http_client::Error::StatusCodeIsError(status) if status.0 == 401 => QtspError::Unauthorized,
        http_client::Error::DnsFailure(message) => QtspError::Unreachable(message),
        other => QtspError::Transport(other),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::provider::http_client::StatusCode;

    #[test]
    fn test_server_errors_and_transport_failures_are_recoverable() {
        for status in [500, 502, 503, 599] {
            let error =
                QtspError::Transport(http_client::Error::StatusCodeIsError(StatusCode(status)));
            assert!(error.is_recoverable(), "HTTP {status} should be recoverable");
        }
        assert!(
            QtspError::Transport(http_client::Error::Timeout("deadline".to_string()))
                .is_recoverable()
        );
        assert!(
            QtspError::Transport(http_client::Error::ConnectionFailed("refused".to_string()))
                .is_recoverable()
        );
    }

    #[test]
    fn test_client_errors_and_protocol_violations_are_fatal() {
        for status in [400, 401, 404, 422, 499] {
            let error =
                QtspError::Transport(http_client::Error::StatusCodeIsError(StatusCode(status)));
            assert!(!error.is_recoverable(), "HTTP {status} should be fatal");
        }
        assert!(!QtspError::Unauthorized.is_recoverable());
        assert!(!QtspError::SadMissing.is_recoverable());
        assert!(!QtspError::PayloadMismatch.is_recoverable());
        assert!(!QtspError::Unreachable("dns".to_string()).is_recoverable());
    }

    #[test]
    fn test_transport_error_mapping() {
        assert!(matches!(
            transport_error(http_client::Error::StatusCodeIsError(StatusCode(401))),
            QtspError::Unauthorized
        ));
        assert!(matches!(
            transport_error(http_client::Error::DnsFailure("no host".to_string())),
            QtspError::Unreachable(_)
        ));
        assert!(matches!(
            transport_error(http_client::Error::StatusCodeIsError(StatusCode(500))),
            QtspError::Transport(_)
        ));
    }
}
