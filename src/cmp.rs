use std::cmp::Ordering;

/// Total order over keys used by the list's descent.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, left: &K, right: &K) -> Ordering;

    fn name(&self) -> &'static str;
}

/// Orders keys by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }

    fn name(&self) -> &'static str {
        "rskiplist.NaturalOrder"
    }
}

/// Lexicographic byte order for anything viewable as bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitWiseComparator {}

impl<K: AsRef<[u8]> + ?Sized> Comparator<K> for BitWiseComparator {
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.as_ref().cmp(right.as_ref())
    }

    fn name(&self) -> &'static str {
        "rskiplist.BitwiseComparator"
    }
}

/// Flips the order of the wrapped comparator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self.0.compare(left, right).reverse()
    }

    fn name(&self) -> &'static str {
        "rskiplist.Reverse"
    }
}
