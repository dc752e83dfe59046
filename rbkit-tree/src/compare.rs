//! Pluggable ordering for tree values.
//!
//! A tree holds exactly one comparator and hands it by reference to the
//! navigation and fixup routines; nodes never carry their own copy.

use std::fmt;

/// Value equality and strict ordering used by a tree.
///
/// `less` must be a strict weak order consistent with `equal_to`:
/// `less(a, b)` implies `!equal_to(a, b)`.
pub trait Comparator<T: ?Sized> {
    /// Whether `a` and `b` denote the same element.
    fn equal_to(&self, a: &T, b: &T) -> bool;

    /// Whether `a` orders strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;
}

/// The `==` and `<` of the value type itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: PartialOrd + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn equal_to(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Comparator assembled from two closures, see [`comparator`].
#[derive(Clone, Copy)]
pub struct FnComparator<E, L> {
    equal_to: E,
    less: L,
}

impl<E, L> fmt::Debug for FnComparator<E, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComparator").finish_non_exhaustive()
    }
}

impl<T, E, L> Comparator<T> for FnComparator<E, L>
where
    T: ?Sized,
    E: Fn(&T, &T) -> bool,
    L: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equal_to(&self, a: &T, b: &T) -> bool {
        (self.equal_to)(a, b)
    }

    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (self.less)(a, b)
    }
}

/// Build a comparator from an equality and a strict less-than closure.
///
/// ```
/// use rbkit_tree::{comparator, RBTree};
///
/// // Case-insensitive set of words.
/// let cmp = comparator(
///     |a: &String, b: &String| a.eq_ignore_ascii_case(b),
///     |a: &String, b: &String| a.to_lowercase() < b.to_lowercase(),
/// );
/// let mut tree = RBTree::with_comparator(cmp);
/// tree.add("Apple".to_string()).unwrap();
/// assert!(tree.add("APPLE".to_string()).is_err());
/// ```
pub fn comparator<T, E, L>(equal_to: E, less: L) -> FnComparator<E, L>
where
    T: ?Sized,
    E: Fn(&T, &T) -> bool,
    L: Fn(&T, &T) -> bool,
{
    FnComparator { equal_to, less }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert!(Comparator::<i32>::less(&NaturalOrder, &1, &2));
        assert!(!Comparator::<i32>::less(&NaturalOrder, &2, &2));
        assert!(Comparator::<f64>::equal_to(&NaturalOrder, &7.5, &7.5));
    }

    #[test]
    fn test_fn_comparator_reversed() {
        let cmp = comparator(|a: &i32, b: &i32| a == b, |a: &i32, b: &i32| a > b);
        assert!(cmp.less(&3, &1));
        assert!(!cmp.less(&1, &3));
        assert!(cmp.equal_to(&4, &4));
    }
}
