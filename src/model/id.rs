use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh identifier: a one-letter kind prefix, the current
/// millisecond clock, and a process-wide counter so rapid successive
/// calls within the same millisecond never collide.
pub fn fresh_id(prefix: char) -> String {
    let millis = Utc::now().timestamp_millis();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{}-{}", prefix, millis, seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_carry_their_prefix() {
        assert!(fresh_id('p').starts_with('p'));
        assert!(fresh_id('t').starts_with('t'));
        assert!(fresh_id('c').starts_with('c'));
    }

    #[test]
    fn ids_are_unique_under_rapid_calls() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(fresh_id('t')));
        }
    }
}
