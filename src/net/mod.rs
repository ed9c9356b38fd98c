// PiezoWatch - Networking
//
// Station bring-up and the telemetry report.  The ESP-IDF specific halves
// (`wifi`, `http`) only build for the device; the polling and URL logic here
// and in `telemetry` is shared with the host.

use std::time::Duration;

use anyhow::bail;

pub mod telemetry;

#[cfg(target_os = "espidf")]
pub mod http;
#[cfg(target_os = "espidf")]
pub mod wifi;

/// Poll `ready` every `interval` until it reports true.
///
/// `ready` receives the 1-based attempt number.  With `max_attempts` set to
/// `None` this only returns once `ready` succeeds.  Returns the attempt on
/// which it did.
pub fn poll_until<S, F>(
    max_attempts: Option<u32>,
    interval: Duration,
    mut sleep: S,
    mut ready: F,
) -> anyhow::Result<u32>
where
    S: FnMut(Duration),
    F: FnMut(u32) -> bool,
{
    let mut attempt: u32 = 0;
    loop {
        attempt = attempt.saturating_add(1);
        if ready(attempt) {
            return Ok(attempt);
        }
        if let Some(max) = max_attempts {
            if attempt >= max {
                bail!("not ready after {} attempt(s)", attempt);
            }
        }
        sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_first_successful_attempt() {
        let mut sleeps = Vec::new();
        let attempt = poll_until(None, Duration::from_secs(1), |d| sleeps.push(d), |n| n == 4).unwrap();
        assert_eq!(attempt, 4);
        assert_eq!(sleeps, vec![Duration::from_secs(1); 3]);
    }

    #[test]
    fn ready_immediately_never_sleeps() {
        let mut slept = false;
        let attempt = poll_until(Some(3), Duration::from_secs(1), |_| slept = true, |_| true).unwrap();
        assert_eq!(attempt, 1);
        assert!(!slept);
    }

    #[test]
    fn bounded_polling_gives_up() {
        let mut calls = 0;
        let mut sleeps = 0;
        let err = poll_until(
            Some(5),
            Duration::from_millis(10),
            |_| sleeps += 1,
            |_| {
                calls += 1;
                false
            },
        )
        .unwrap_err();
        assert_eq!(calls, 5);
        assert_eq!(sleeps, 4);
        assert!(err.to_string().contains("5 attempt"));
    }
}
