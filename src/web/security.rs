use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Sliding-window attempt counter, keyed by caller (e.g. `login:<ip>`).
pub struct RateLimiter {
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Records an attempt. Returns false once `max_attempts` have been
    /// made within `window`.
    pub fn check(&self, key: &str, max_attempts: usize, window: Duration) -> bool {
        let now = Instant::now();
        let mut attempts = self.attempts.lock();

        // Age out every caller, not just this one, so idle keys are dropped.
        attempts.retain(|_, times| {
            times.retain(|&at| now.duration_since(at) < window);
            !times.is_empty()
        });

        let entry = attempts.entry(key.to_string()).or_default();
        if entry.len() >= max_attempts {
            return false;
        }
        entry.push(now);
        true
    }

    /// Forgets a key, e.g. after a successful login.
    pub fn reset(&self, key: &str) {
        self.attempts.lock().remove(key);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && local.len() <= 64
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Lowercase letters, digits and hyphens, as the public URLs use them.
pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 255
        && !slug.starts_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub fn generic_error_message(context: &str) -> String {
    format!(
        "Something went wrong while {}. Please try again.",
        context
    )
}
