use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Address used when no peer address is known (e.g. the router is driven
/// in-process). All such requests share one window.
pub const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

struct Window {
    started: Instant,
    attempts: u32,
}

/// Fixed-window attempt counter keyed by client address. Every call counts
/// as an attempt; once a window holds `max_attempts` the rest of the window
/// is rejected uniformly, regardless of what the request carries.
pub struct FixedWindowLimiter {
    max_attempts: u32,
    window: Duration,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl FixedWindowLimiter {
    #[must_use]
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records an attempt for `addr` and reports whether it is allowed.
    pub async fn check(&self, addr: IpAddr) -> bool {
        self.check_at(addr, Instant::now()).await
    }

    async fn check_at(&self, addr: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().await;

        // Drop windows that have lapsed so idle clients do not accumulate.
        windows.retain(|_, w| now.duration_since(w.started) < self.window);

        let window = windows.entry(addr).or_insert(Window {
            started: now,
            attempts: 0,
        });

        window.attempts += 1;
        window.attempts <= self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT_A: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const CLIENT_B: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[tokio::test]
    async fn allows_up_to_max_then_rejects() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(900));
        let now = Instant::now();

        for _ in 0..3 {
            assert!(limiter.check_at(CLIENT_A, now).await);
        }
        assert!(!limiter.check_at(CLIENT_A, now).await);
        assert!(!limiter.check_at(CLIENT_A, now).await);
    }

    #[tokio::test]
    async fn windows_are_per_client() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(900));
        let now = Instant::now();

        assert!(limiter.check_at(CLIENT_A, now).await);
        assert!(!limiter.check_at(CLIENT_A, now).await);
        assert!(limiter.check_at(CLIENT_B, now).await);
    }

    #[tokio::test]
    async fn window_resets_after_it_lapses() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(900));
        let start = Instant::now();

        assert!(limiter.check_at(CLIENT_A, start).await);
        assert!(!limiter.check_at(CLIENT_A, start + Duration::from_secs(899)).await);
        assert!(limiter.check_at(CLIENT_A, start + Duration::from_secs(901)).await);
    }
}
