//! Union-find with path compression and union by rank.
//!
//! `UnionFind<K>` tracks set membership of *n* elements indexed `0..n`.
//! Used by spanning-forest construction, blossom contraction in general
//! matching, and basis-subtree bookkeeping in the network simplex.

use std::cmp::Ordering;

/// An index type usable as the element type of a [`UnionFind`].
pub trait UnionIndex: Copy + Eq {
    fn from_usize(x: usize) -> Self;
    fn index(self) -> usize;
}

impl UnionIndex for u32 {
    #[inline]
    fn from_usize(x: usize) -> Self {
        x as u32
    }
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl UnionIndex for usize {
    #[inline]
    fn from_usize(x: usize) -> Self {
        x
    }
    #[inline]
    fn index(self) -> usize {
        self
    }
}

/// A disjoint-set ("union-find") data structure.
///
/// <http://en.wikipedia.org/wiki/Disjoint-set_data_structure>
#[derive(Debug, Clone)]
pub struct UnionFind<K = u32> {
    parent: Vec<K>,
    rank: Vec<u8>,
}

impl<K> UnionFind<K>
where
    K: UnionIndex,
{
    /// Create a new `UnionFind` of `n` singleton sets.
    pub fn new(n: usize) -> Self {
        let parent = (0..n).map(K::from_usize).collect::<Vec<K>>();
        let rank = vec![0u8; n];
        UnionFind { parent, rank }
    }

    /// Number of elements tracked (not the number of distinct sets).
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Return the representative for `x` without compressing paths.
    ///
    /// Panics if `x` is out of bounds.
    pub fn find(&self, x: K) -> K {
        let mut x = x;
        loop {
            let parent = self.parent[x.index()];
            if parent.index() == x.index() {
                return x;
            }
            x = parent;
        }
    }

    /// Return the representative for `x`, flattening the path to it.
    ///
    /// Panics if `x` is out of bounds.
    pub fn find_mut(&mut self, x: K) -> K {
        let mut x = x;
        let mut parent = self.parent[x.index()];
        while parent.index() != x.index() {
            let grandparent = self.parent[parent.index()];
            self.parent[x.index()] = grandparent;
            x = parent;
            parent = grandparent;
        }
        x
    }

    /// Whether `x` and `y` belong to the same set.
    pub fn equiv(&self, x: K, y: K) -> bool {
        self.find(x).index() == self.find(y).index()
    }

    /// Unify the sets containing `x` and `y`.
    ///
    /// Returns `false` if they were already the same set, `true` if they
    /// were unified by this call.
    pub fn union(&mut self, x: K, y: K) -> bool {
        if x.index() == y.index() {
            return false;
        }
        let xrep = self.find_mut(x);
        let yrep = self.find_mut(y);
        if xrep.index() == yrep.index() {
            return false;
        }

        let (xi, yi) = (xrep.index(), yrep.index());
        match self.rank[xi].cmp(&self.rank[yi]) {
            Ordering::Less => self.parent[xi] = yrep,
            Ordering::Greater => self.parent[yi] = xrep,
            Ordering::Equal => {
                self.parent[yi] = xrep;
                self.rank[xi] += 1;
            }
        }
        true
    }

    /// Consume the structure, returning a dense representative-per-element
    /// table in a single pass. Used by `Contracted` graph construction and
    /// by connected-components reporting.
    pub fn into_labeling(mut self) -> Vec<K> {
        for i in 0..self.parent.len() {
            let k = self.parent[i];
            let xrep = self.find_mut(k);
            self.parent[i] = xrep;
        }
        self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_find() {
        let mut u: UnionFind<u32> = UnionFind::new(8);
        for i in 0..8u32 {
            assert_eq!(u.find(i), i);
            assert!(!u.union(i, i));
        }
        u.union(0, 1);
        assert_eq!(u.find(0), u.find(1));
        u.union(1, 3);
        assert_eq!(u.find(0), u.find(3));
        u.union(1, 4);
        u.union(4, 7);
        assert_ne!(u.find(0), u.find(2));
        assert_eq!(u.find(7), u.find(0));
        u.union(5, 6);
        assert_eq!(u.find(6), u.find(5));
        assert_ne!(u.find(6), u.find(7));
    }

    #[test]
    fn labeling_groups_everything() {
        let mut u: UnionFind<u32> = UnionFind::new(6);
        u.union(0, 1);
        u.union(1, 2);
        u.union(3, 4);
        let labels = u.into_labeling();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_ne!(labels[0], labels[3]);
        assert_ne!(labels[5], labels[0]);
    }

    mod props {
        use proptest::{collection::vec, prelude::*};

        use super::*;

        const N: u32 = 64;

        proptest! {
            #[test]
            fn union_return_matches_prior_equiv(pairs in vec((0..N, 0..N), 1..256)) {
                let mut u: UnionFind<u32> = UnionFind::new(N as usize);
                for (a, b) in pairs {
                    let were_equiv = u.equiv(a, b);
                    let unified = u.union(a, b);
                    prop_assert_eq!(unified, !were_equiv);
                    prop_assert!(u.equiv(a, b));
                }
            }

            #[test]
            fn labeling_agrees_with_equiv_before_consuming(pairs in vec((0..N, 0..N), 1..256)) {
                let mut u: UnionFind<u32> = UnionFind::new(N as usize);
                for (a, b) in &pairs {
                    u.union(*a, *b);
                }
                let equiv_before: Vec<bool> = pairs.iter().map(|&(a, b)| u.equiv(a, b)).collect();
                let labels = u.into_labeling();
                for ((a, b), was_equiv) in pairs.into_iter().zip(equiv_before) {
                    prop_assert_eq!(labels[a as usize] == labels[b as usize], was_equiv);
                }
            }
        }
    }
}
