//! Wall clock, fixed UI delays, and token randomness.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Pause between a successful sign-in and the dashboard redirect.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(1000);
/// Pause before the dashboard reads storage, so a just-written session is visible.
pub const AUTH_CHECK_DELAY: Duration = Duration::from_millis(100);

/// Current time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let now = js_sys::Date::now() as i64;
        now
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}

/// Wait `delay` on the browser event loop. Resolves immediately on the server.
pub async fn sleep(delay: Duration) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::sleep(delay).await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = delay;
    }
}

/// RNG for session tokens. Tokens are presence markers, so a fast
/// non-cryptographic generator is enough.
pub fn token_rng() -> SmallRng {
    SmallRng::seed_from_u64(seed_from(now_ms(), entropy()))
}

fn entropy() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Math::random().to_bits()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        u64::from(std::process::id())
    }
}

fn seed_from(now_ms: i64, entropy: u64) -> u64 {
    now_ms.cast_unsigned().rotate_left(32) ^ entropy
}
