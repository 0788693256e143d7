use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use crate::condition::Condition;
use crate::errors::WaitError;
use crate::policy::PollPolicy;

/// Summary of a poll whose condition held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOutcome {
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Poll `condition` with the default interval until it holds or `timeout` elapses.
pub async fn wait_until<C>(
    condition: &C,
    timeout: Duration,
) -> Result<PollOutcome, WaitError<C::Error>>
where
    C: Condition + ?Sized,
{
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    let policy = PollPolicy::default().with_timeout_ms(timeout_ms);
    wait_until_with(condition, &policy).await
}

/// Poll `condition` according to `policy`.
///
/// The first attempt always runs and its result always counts, whatever the
/// timeout. Attempts start at most once per interval. An attempt that is still
/// running at the deadline is awaited, never dropped; a truthy result that
/// arrives after the deadline still reports a timeout. Condition errors are
/// returned as soon as they are observed.
pub async fn wait_until_with<C>(
    condition: &C,
    policy: &PollPolicy,
) -> Result<PollOutcome, WaitError<C::Error>>
where
    C: Condition + ?Sized,
{
    let timeout = policy.timeout();
    let interval = policy.interval();
    let started = Instant::now();
    let deadline = started + timeout;
    let mut attempts: u32 = 0;

    loop {
        let attempt_started = Instant::now();
        attempts += 1;
        trace!(attempt = attempts, "evaluating wait condition");

        let met = match condition.check().await {
            Ok(met) => met,
            Err(err) => {
                debug!(attempt = attempts, "wait condition failed; stop polling");
                return Err(WaitError::Condition(err));
            }
        };

        let now = Instant::now();
        if met {
            if attempts == 1 || now <= deadline {
                let elapsed = now.saturating_duration_since(started);
                debug!(
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "wait condition met"
                );
                return Ok(PollOutcome { attempts, elapsed });
            }
            debug!(attempts, "wait condition met after the deadline");
            return Err(WaitError::Timeout { timeout, attempts });
        }

        if now >= deadline {
            return Err(WaitError::Timeout { timeout, attempts });
        }

        let next_attempt = attempt_started + interval;
        if next_attempt >= deadline {
            sleep_until(deadline).await;
            debug!(attempts, "wait deadline reached before next attempt");
            return Err(WaitError::Timeout { timeout, attempts });
        }
        sleep_until(next_attempt).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::condition_fn;
    use crate::errors::is_timeout_error;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn resolves_on_first_truthy_attempt() {
        let ready = condition_fn(|| async { Ok::<_, String>(true) });
        let outcome = wait_until(&ready, Duration::from_millis(1000))
            .await
            .expect("condition holds");
        assert_eq!(outcome.attempts, 1);
    }

    #[tokio::test]
    async fn keeps_polling_until_condition_holds() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let condition = condition_fn(move || {
            let counter = counter.clone();
            async move { Ok::<_, String>(counter.fetch_add(1, Ordering::SeqCst) + 1 >= 3) }
        });
        let policy = PollPolicy::new(10, 2000);

        let outcome = wait_until_with(&condition, &policy)
            .await
            .expect("condition holds on third attempt");
        assert_eq!(outcome.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(outcome.elapsed >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn condition_error_stops_polling() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let condition = condition_fn(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<bool, _>("NetworkError".to_string())
            }
        });

        let err = wait_until_with(&condition, &PollPolicy::new(5, 500))
            .await
            .unwrap_err();
        assert!(!is_timeout_error(&err));
        assert_eq!(err.into_condition_error(), Some("NetworkError".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn times_out_after_budget() {
        let never = condition_fn(|| async { Ok::<_, String>(false) });
        let start = std::time::Instant::now();

        let err = wait_until_with(&never, &PollPolicy::new(10, 50))
            .await
            .unwrap_err();
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(is_timeout_error(&err));
        assert_eq!(err.timeout(), Some(Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn timeout_shorter_than_interval_checks_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let condition = condition_fn(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(false)
            }
        });
        let start = std::time::Instant::now();

        let err = wait_until(&condition, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(is_timeout_error(&err));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_timeout_still_checks_once() {
        let ready = condition_fn(|| async { Ok::<_, String>(true) });
        let outcome = wait_until(&ready, Duration::ZERO)
            .await
            .expect("first attempt always counts");
        assert_eq!(outcome.attempts, 1);

        let never = condition_fn(|| async { Ok::<_, String>(false) });
        match wait_until(&never, Duration::ZERO).await {
            Err(WaitError::Timeout { attempts, .. }) => assert_eq!(attempts, 1),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn late_truthy_attempt_reports_timeout() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let condition = condition_fn(move || {
            let counter = counter.clone();
            async move {
                let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt == 1 {
                    return Ok::<_, String>(false);
                }
                tokio::time::sleep(Duration::from_millis(80)).await;
                Ok(true)
            }
        });

        let err = wait_until_with(&condition, &PollPolicy::new(10, 50))
            .await
            .unwrap_err();
        assert!(is_timeout_error(&err));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
