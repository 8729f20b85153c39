use std::collections::VecDeque;

use crate::{Exercise, Kind};

/// One remembered exercise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Entry {
    pub kind: Kind,
    pub details: String,
}

impl From<&Exercise> for Entry {
    fn from(exercise: &Exercise) -> Self {
        Self {
            kind: exercise.kind(),
            details: exercise.to_string(),
        }
    }
}

/// The most recent exercises, oldest first.
///
/// Holds at most [`History::CAPACITY`] entries; pushing onto a full history
/// drops the oldest one. Saving and loading are left to the caller.
///
/// A deserialized history is held to the same bound: when more than
/// `CAPACITY` entries are loaded, only the newest are kept.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawHistory")
)]
pub struct History {
    entries: VecDeque<Entry>,
}

#[cfg(feature = "serde-derive")]
#[derive(serde::Deserialize)]
struct RawHistory {
    entries: Vec<Entry>,
}

#[cfg(feature = "serde-derive")]
impl From<RawHistory> for History {
    fn from(raw: RawHistory) -> Self {
        let mut history = Self::new();
        for entry in raw.entries {
            history.push(entry);
        }
        history
    }
}

impl History {
    pub const CAPACITY: usize = 8;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, returning the one it pushed out, if any.
    pub fn push(&mut self, entry: Entry) -> Option<Entry> {
        let evicted = if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Records an exercise.
    pub fn record(&mut self, exercise: &Exercise) -> Option<Entry> {
        self.push(Entry::from(exercise))
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn latest(&self) -> Option<&Entry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> Entry {
        Entry {
            kind: Kind::Secant,
            details: format!("exercise {n}"),
        }
    }

    #[test]
    fn keeps_the_last_eight() {
        let mut history = History::new();
        for n in 0..History::CAPACITY {
            assert_eq!(history.push(entry(n)), None);
        }
        assert_eq!(history.push(entry(8)), Some(entry(0)));
        assert_eq!(history.push(entry(9)), Some(entry(1)));

        let details: Vec<&str> = history.iter().map(|e| e.details.as_str()).collect();
        assert_eq!(details.len(), 8);
        assert_eq!(details.first(), Some(&"exercise 2"));
        assert_eq!(history.latest(), Some(&entry(9)));
    }

    #[test]
    fn records_exercises_by_kind() {
        use crate::BracketExercise;

        let mut history = History::new();
        assert!(history.is_empty());

        let exercise = Exercise::FalsePosition(BracketExercise {
            function: "x^2 - 5".to_owned(),
            a: 1.0,
            b: 3.0,
            tol: 1e-3,
            max_iters: 100,
        });
        history.record(&exercise);

        let latest = history.latest().unwrap();
        assert_eq!(latest.kind, Kind::FalsePosition);
        assert_eq!(latest.details, "f(x) = x^2 - 5 on [1.000000, 3.000000], tol = 1e-3");

        history.clear();
        assert_eq!(history.len(), 0);
    }

    #[cfg(feature = "serde-derive")]
    #[test]
    fn loading_keeps_the_newest() {
        let mut history = History::new();
        history.push(entry(0));
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(serde_json::from_str::<History>(&json).unwrap(), history);

        let entries: Vec<String> = (0..20)
            .map(|n| format!(r#"{{"kind":"Secant","details":"exercise {n}"}}"#))
            .collect();
        let json = format!(r#"{{"entries":[{}]}}"#, entries.join(","));
        let loaded: History = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.len(), History::CAPACITY);
        assert_eq!(loaded.iter().next(), Some(&entry(12)));
        assert_eq!(loaded.latest(), Some(&entry(19)));
    }
}
