use std::future::Future;
use std::time::Duration;

use anyhow::{Result, bail};

/// Polls `condition` until it returns true or `timeout` elapses.
///
/// The target site gives no readiness signal for a couple of its UI state
/// transitions, so the pipeline falls back to polling for those. Keeping the
/// polling in one place makes the brittleness explicit and tunable.
pub async fn wait_until<F, Fut>(
    mut condition: F,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition().await {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            bail!("condition not met within {:?}", timeout);
        }
        tokio::time::sleep(poll_interval).await;
    }
}

/// Convert a question id to a safe sidecar filename stem.
pub fn sanitize_filename(id: &str) -> String {
    let mut name: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Limit filename length
    if name.len() > 100 {
        name.truncate(100);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn wait_until_resolves_once_condition_holds() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let result = wait_until(
            move || {
                let calls = calls_clone.clone();
                async move { calls.fetch_add(1, Ordering::SeqCst) >= 2 }
            },
            Duration::from_secs(1),
            Duration::from_millis(1),
        )
        .await;

        assert!(result.is_ok());
        assert!(calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn wait_until_errors_after_timeout() {
        let result = wait_until(
            || async { false },
            Duration::from_millis(10),
            Duration::from_millis(2),
        )
        .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a1b2c3"), "a1b2c3");
        assert_eq!(sanitize_filename("ab/..\\cd"), "ab____cd");

        let long = "x".repeat(200);
        assert_eq!(sanitize_filename(&long).len(), 100);
    }
}
