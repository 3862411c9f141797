//! Element ordering strategies
//!
//! Every component that compares elements (buffer construction, the weighted
//! merge, min/max tracking) receives an explicit [`ElementOrder`] instead of
//! capturing a comparison closure. The order is a strict total order chosen
//! by the caller; it is not validated, and an inconsistent order produces
//! unspecified (but memory safe) summaries.
//!
//! # Example
//!
//! ```rust
//! use mrl_core::order::{key_order, ElementOrder, NaturalOrder};
//!
//! let mut values = vec![3, 1, 2];
//! NaturalOrder.sort(&mut values);
//! assert_eq!(values, vec![1, 2, 3]);
//!
//! <NaturalOrder as ElementOrder<i32>>::reversed(NaturalOrder).sort(&mut values);
//! assert_eq!(values, vec![3, 2, 1]);
//!
//! let mut words = vec!["ccc", "a", "bb"];
//! key_order(|w: &&str| w.len(), false).sort(&mut words);
//! assert_eq!(words, vec!["a", "bb", "ccc"]);
//! ```

use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

/// Strategy object defining how elements of type `T` are ordered
pub trait ElementOrder<T>: Clone {
    /// Compare two elements
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// `true` if `a` sorts strictly before `b`
    fn is_less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// `true` if `a` sorts strictly after `b`
    fn is_greater(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// The smaller of two elements, preferring `a` on ties
    fn min_of<'a>(&self, a: &'a T, b: &'a T) -> &'a T {
        if self.is_greater(a, b) {
            b
        } else {
            a
        }
    }

    /// The larger of two elements, preferring `a` on ties
    fn max_of<'a>(&self, a: &'a T, b: &'a T) -> &'a T {
        if self.is_less(a, b) {
            b
        } else {
            a
        }
    }

    /// Stable sort of a slice under this order
    fn sort(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    /// Invert this order
    fn reversed(self) -> Reversed<Self>
    where
        Self: Sized,
    {
        Reversed(self)
    }
}

/// The natural order of `T: Ord`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> ElementOrder<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Total order over floating point values
///
/// Uses [`OrderedFloat`] semantics: `-0.0 == 0.0` and NaN sorts above
/// positive infinity, so streams containing NaN still produce a consistent
/// summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatOrder;

impl<T: FloatCore> ElementOrder<T> for FloatOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        OrderedFloat(*a).cmp(&OrderedFloat(*b))
    }
}

/// Orders elements by an extracted key
#[derive(Clone, Copy)]
pub struct KeyOrder<F> {
    key: F,
}

impl<F> KeyOrder<F> {
    /// Create a key order from a key extraction function
    pub fn new(key: F) -> Self {
        Self { key }
    }
}

impl<F> std::fmt::Debug for KeyOrder<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyOrder").finish_non_exhaustive()
    }
}

impl<T, K, F> ElementOrder<T> for KeyOrder<F>
where
    F: Fn(&T) -> K + Clone,
    K: Ord,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.key)(a).cmp(&(self.key)(b))
    }
}

/// Inverse of another order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<O>(pub O);

impl<T, O: ElementOrder<T>> ElementOrder<T> for Reversed<O> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(a, b).reverse()
    }
}

/// An order whose direction is chosen at runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Direction<O> {
    inner: O,
    reverse: bool,
}

impl<O> Direction<O> {
    /// Wrap `inner`, inverting it when `reverse` is set
    pub fn new(inner: O, reverse: bool) -> Self {
        Self { inner, reverse }
    }

    /// Whether the wrapped order is inverted
    pub fn is_reversed(&self) -> bool {
        self.reverse
    }
}

impl<T, O: ElementOrder<T>> ElementOrder<T> for Direction<O> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        let ord = self.inner.compare(a, b);
        if self.reverse {
            ord.reverse()
        } else {
            ord
        }
    }
}

/// Order by `key`, largest first when `reverse` is set
pub fn key_order<F>(key: F, reverse: bool) -> Direction<KeyOrder<F>> {
    Direction::new(KeyOrder::new(key), reverse)
}

/// Natural order, largest first when `reverse` is set
pub fn natural_order(reverse: bool) -> Direction<NaturalOrder> {
    Direction::new(NaturalOrder, reverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_natural_and_reversed() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(<NaturalOrder as ElementOrder<i32>>::reversed(NaturalOrder).compare(&1, &2), Ordering::Greater);
        assert_eq!(natural_order(true).compare(&1, &2), Ordering::Greater);
        assert_eq!(natural_order(false).compare(&2, &2), Ordering::Equal);
    }

    #[test]
    fn test_float_order_handles_nan() {
        let mut values = vec![2.0, f64::NAN, -1.0, f64::INFINITY, 0.5];
        FloatOrder.sort(&mut values);
        assert_eq!(&values[..4], &[-1.0, 0.5, 2.0, f64::INFINITY]);
        assert!(values[4].is_nan());
    }

    #[test]
    fn test_key_order() {
        let by_abs = key_order(|x: &i32| x.abs(), false);
        assert!(by_abs.is_less(&-1, &2));
        assert!(by_abs.is_greater(&-3, &2));

        let by_abs_desc = key_order(|x: &i32| x.abs(), true);
        assert!(by_abs_desc.is_less(&-3, &2));
        assert!(by_abs_desc.is_reversed());
    }

    #[test]
    fn test_min_max_prefer_first_on_ties() {
        let by_len = KeyOrder::new(|s: &&str| s.len());
        let a = "ab";
        let b = "cd";
        assert!(std::ptr::eq(by_len.min_of(&a, &b), &a));
        assert!(std::ptr::eq(by_len.max_of(&a, &b), &a));
        assert_eq!(*by_len.min_of(&"abc", &"x"), "x");
        assert_eq!(*by_len.max_of(&"abc", &"x"), "abc");
    }

    proptest! {
        #[test]
        fn prop_sort_matches_std(mut values in prop::collection::vec(any::<i64>(), 0..200)) {
            let mut expected = values.clone();
            expected.sort();
            NaturalOrder.sort(&mut values);
            prop_assert_eq!(&values, &expected);

            expected.reverse();
            natural_order(true).sort(&mut values);
            prop_assert_eq!(values, expected);
        }
    }
}
