//! Bounded retry with exponential backoff and jitter for QTSP calls.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(5);
const JITTER: f64 = 0.5;

/// Classifies failures of remote calls. Connection failures, timeouts and
/// HTTP 5xx responses are worth retrying; everything else surfaces immediately.
pub trait Recoverable {
    fn is_recoverable(&self) -> bool;
}

#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("`{operation}` failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
        #[source]
        source: E,
    },
    #[error(transparent)]
    Fatal(E),
}

/// Runs `action` until it succeeds, fails with a non-recoverable error, or the
/// retry budget is spent. Each retry waits for an exponentially growing delay
/// (1s initial, 5s cap) with ±50% jitter.
pub(crate) async fn retry_with_backoff<T, E, F, Fut>(
    operation: &'static str,
    mut action: F,
) -> Result<T, RetryError<E>>
where
    E: Recoverable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut retries = 0;
    loop {
        match action().await {
            Ok(value) => return Ok(value),
            Err(error) if !error.is_recoverable() => return Err(RetryError::Fatal(error)),
            Err(error) => {
                if retries >= MAX_RETRIES {
                    return Err(RetryError::RetriesExhausted {
                        operation,
                        attempts: retries + 1,
                        source: error,
                    });
                }
                let delay = backoff_delay(retries);
                retries += 1;
                tracing::warn!(
                    "retrying `{operation}`, attempt {retries} of {MAX_RETRIES}, reason: {error}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn backoff_delay(retry: u32) -> Duration {
    let exponential = INITIAL_BACKOFF.saturating_mul(1 << retry.min(16));
    let capped = exponential.min(MAX_BACKOFF);
    capped.mul_f64(rand::thread_rng().gen_range(1.0 - JITTER..=1.0 + JITTER))
}
