use std::sync::Mutex;

use itertools::Itertools;
use lecture_datastore::Utterance;

const MICROS_PER_MINUTE: i64 = 60 * 1_000_000;

/// Append-only in-memory sequence of transcript utterances.
///
/// Insertion order is arrival order. Timestamps are client-supplied and are
/// not assumed to be sorted, so window queries filter linearly.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    utterances: Mutex<Vec<Utterance>>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, utterance: Utterance) {
        self.lock().push(utterance);
    }

    /// Utterances whose timestamp falls within the trailing `minutes`
    /// window, in insertion order. Empty when nothing qualifies.
    pub fn window(&self, minutes: u64) -> Vec<Utterance> {
        self.window_at(now_micros(), minutes)
    }

    /// Window query against an explicit `now`, for deterministic reads.
    ///
    /// Durations beyond the representable microsecond range saturate to
    /// "everything"; a window query never fails.
    pub fn window_at(&self, now_micros: i64, minutes: u64) -> Vec<Utterance> {
        let span = i64::try_from(minutes)
            .unwrap_or(i64::MAX)
            .saturating_mul(MICROS_PER_MINUTE);
        let cutoff = now_micros.saturating_sub(span);
        self.lock()
            .iter()
            .filter(|u| u.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Utterance>> {
        // A writer panicking mid-append cannot leave the Vec in a torn
        // state, so a poisoned lock is still safe to recover.
        self.utterances.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Wall-clock time in microseconds since the Unix epoch.
pub fn now_micros() -> i64 {
    chrono::Utc::now().timestamp_micros()
}

/// Renders a window as newline-joined `"user_name: data"` lines in store
/// order. An empty window renders the empty string.
pub fn render(utterances: &[Utterance]) -> String {
    utterances
        .iter()
        .map(|u| format!("{}: {}", u.user_name, u.data))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(user_name: &str, data: &str, timestamp: i64) -> Utterance {
        Utterance {
            user_name: user_name.to_string(),
            data: data.to_string(),
            timestamp,
        }
    }

    #[test]
    fn window_filters_by_timestamp_and_keeps_insertion_order() {
        let store = TranscriptStore::new();
        let now = 10 * MICROS_PER_MINUTE;

        store.append(utterance("alice", "old", 2 * MICROS_PER_MINUTE));
        store.append(utterance("bob", "recent", 9 * MICROS_PER_MINUTE));
        // Out-of-order timestamp, still within the window.
        store.append(utterance("carol", "earlier but recent", 8 * MICROS_PER_MINUTE));

        let window = store.window_at(now, 5);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].user_name, "bob");
        assert_eq!(window[1].user_name, "carol");
    }

    #[test]
    fn window_is_idempotent_for_fixed_now() {
        let store = TranscriptStore::new();
        let now = 10 * MICROS_PER_MINUTE;
        store.append(utterance("alice", "hi", 9 * MICROS_PER_MINUTE));

        let first = store.window_at(now, 5);
        let second = store.window_at(now, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn window_with_huge_duration_saturates_instead_of_overflowing() {
        let store = TranscriptStore::new();
        store.append(utterance("alice", "hi", 1));
        store.append(utterance("bob", "hello", 5 * MICROS_PER_MINUTE));

        for minutes in [u64::MAX, 1u64 << 63, i64::MAX as u64] {
            let window = store.window_at(now_micros(), minutes);
            assert_eq!(window.len(), 2, "window of {minutes} minutes covers everything");
        }
    }

    #[test]
    fn window_returns_empty_when_nothing_qualifies() {
        let store = TranscriptStore::new();
        store.append(utterance("alice", "hi", 1));

        let window = store.window_at(100 * MICROS_PER_MINUTE, 5);
        assert!(window.is_empty());
    }

    #[test]
    fn render_empty_window_is_empty_string() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn render_single_utterance() {
        let window = [utterance("alice", "hi", 1)];
        assert_eq!(render(&window), "alice: hi");
    }

    #[test]
    fn render_joins_lines_in_store_order() {
        let window = [
            utterance("alice", "hi", 1),
            utterance("bob", "hello there", 2),
        ];
        assert_eq!(render(&window), "alice: hi\nbob: hello there");
    }
}
