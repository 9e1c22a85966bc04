//! Deadline wrapper shared by every outbound catalog call

use std::future::Future;
use std::time::Duration;

use crate::domain::SourceError;

/// Await `call` for at most `deadline`.
///
/// On expiry the pending call is dropped and `SourceError::Timeout` is
/// returned so the caller can move on to the next query or source.
pub async fn with_timeout<T, F>(deadline: Duration, call: F) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(deadline)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let res =
            with_timeout(Duration::from_millis(200), async { Ok::<_, SourceError>(42) }).await;
        assert_eq!(res.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_inner_error_is_preserved() {
        let res: Result<(), _> =
            with_timeout(Duration::from_millis(200), async { Err(SourceError::NoData) }).await;
        assert!(matches!(res, Err(SourceError::NoData)));
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let res = with_timeout(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, SourceError>(())
        })
        .await;
        assert!(matches!(res, Err(SourceError::Timeout(d)) if d == Duration::from_millis(20)));
    }
}
