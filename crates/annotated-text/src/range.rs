//! Tagged half-open ranges over char indices

use serde::{Deserialize, Serialize};

/// `[start, end)` over char indices, tagged with an item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanRange<T> {
    pub item: T,
    pub start: usize,
    pub end: usize,
}

impl<T> SpanRange<T> {
    pub fn new(item: T, start: usize, end: usize) -> Self {
        Self { item, start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `index` falls inside the range
    pub fn covers(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// Drop the range if it starts past `length`, clamp its end otherwise
    pub fn limit(self, length: usize) -> Option<Self> {
        if self.start > length || self.end < self.start {
            return None;
        }
        Some(Self {
            end: self.end.min(length),
            ..self
        })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SpanRange<U> {
        SpanRange {
            item: f(self.item),
            start: self.start,
            end: self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit() {
        assert_eq!(SpanRange::new('a', 2, 10).limit(5), Some(SpanRange::new('a', 2, 5)));
        assert_eq!(SpanRange::new('a', 5, 5).limit(5), Some(SpanRange::new('a', 5, 5)));
        assert_eq!(SpanRange::new('a', 6, 8).limit(5), None);
        assert_eq!(SpanRange::new('a', 3, 1).limit(5), None);
    }

    #[test]
    fn test_covers() {
        let range = SpanRange::new((), 1, 3);
        assert!(!range.covers(0));
        assert!(range.covers(1));
        assert!(range.covers(2));
        assert!(!range.covers(3));
        assert!(!SpanRange::new((), 2, 2).covers(2));
    }
}
