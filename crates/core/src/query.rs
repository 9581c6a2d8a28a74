//! Listing primitives: offset/limit windows and inclusive value bounds.
//!
//! Listing is a single pass over the store in iteration order. The window is
//! applied to the *raw* iteration position of every stored entry, and the
//! filters are applied to whatever falls inside the window. An entry that sits
//! inside the window but fails a filter still uses up its slot, so a page can
//! come back shorter than `limit` even when later entries would match.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Default page size used when a caller does not specify one.
pub const DEFAULT_LIMIT: usize = 10;

/// Half-open window `[offset, offset + limit)` over raw iteration positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    offset: usize,
    limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Build a window; `limit` must be positive.
    pub fn new(offset: usize, limit: usize) -> StoreResult<Self> {
        if limit == 0 {
            return Err(StoreError::validation("limit must be greater than zero"));
        }
        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether the raw iteration position `index` falls inside the window.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset.saturating_add(self.limit)
    }

    /// Restrict `entries` to the window. Filters must be applied afterwards.
    pub fn window<I>(&self, entries: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        entries.into_iter().skip(self.offset).take(self.limit)
    }
}

/// Inclusive range filter; a missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Pass-through when neither side is set, one-sided when only one is.
    pub fn contains(&self, value: &T) -> bool {
        let above_min = self.min.as_ref().is_none_or(|min| value >= min);
        let below_max = self.max.as_ref().is_none_or(|max| value <= max);
        above_min && below_max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_is_rejected() {
        let err = Pagination::new(0, 0).unwrap_err();
        match err {
            StoreError::Validation(_) => {}
            _ => panic!("Expected Validation error for zero limit"),
        }
    }

    #[test]
    fn default_pagination_is_first_ten() {
        let page = Pagination::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn window_is_half_open() {
        let page = Pagination::new(2, 3).unwrap();
        let seen: Vec<u32> = page.window(0..10).collect();
        assert_eq!(seen, vec![2, 3, 4]);
        assert!(page.contains(2));
        assert!(page.contains(4));
        assert!(!page.contains(1));
        assert!(!page.contains(5));
    }

    #[test]
    fn window_past_the_end_is_empty() {
        let page = Pagination::new(50, 10).unwrap();
        assert_eq!(page.window(0..10).count(), 0);
    }

    #[test]
    fn huge_offset_does_not_overflow() {
        let page = Pagination::new(usize::MAX, usize::MAX).unwrap();
        assert!(!page.contains(usize::MAX - 1));
        assert_eq!(page.window(0..3).count(), 0);
    }

    #[test]
    fn bounds_are_inclusive_on_both_sides() {
        let b = Bounds::new(Some(1.0), Some(2.0));
        assert!(b.contains(&1.0));
        assert!(b.contains(&2.0));
        assert!(!b.contains(&0.99));
        assert!(!b.contains(&2.01));
    }

    #[test]
    fn one_sided_bounds() {
        let min_only = Bounds::new(Some(5u64), None);
        assert!(min_only.contains(&5));
        assert!(min_only.contains(&u64::MAX));
        assert!(!min_only.contains(&4));

        let max_only = Bounds::new(None, Some(5u64));
        assert!(max_only.contains(&0));
        assert!(!max_only.contains(&6));
    }

    #[test]
    fn unbounded_passes_everything() {
        let b = Bounds::<f64>::default();
        assert!(b.is_unbounded());
        assert!(b.contains(&-1.0e9));
        assert!(b.contains(&1.0e9));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the window yields exactly the raw positions in [offset, offset + limit).
            #[test]
            fn window_matches_contains(len in 0usize..200, offset in 0usize..250, limit in 1usize..50) {
                let page = Pagination::new(offset, limit).unwrap();
                let windowed: Vec<usize> = page.window(0..len).collect();
                let expected: Vec<usize> = (0..len).filter(|i| page.contains(*i)).collect();

                prop_assert!(windowed.len() <= limit);
                prop_assert_eq!(windowed, expected);
            }
        }
    }
}
