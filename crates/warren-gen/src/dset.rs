//! Disjoint-set (union-find) over open cells.
//!
//! Membership is explicit: a cell joins the structure the first time the
//! generator sees it ([`insert`](DisjointSet::insert)), which is what lets a
//! carve "introduce a previously-unseen component". Walls never enter.

use std::collections::HashMap;

use warren_core::Point;

/// Union-find keyed by cell position, with union by rank and iterative
/// path-compressing `find`.
#[derive(Debug, Default)]
pub struct DisjointSet {
    index: HashMap<Point, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells ever inserted.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct components among inserted cells.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Whether `p` has been inserted.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.index.contains_key(&p)
    }

    /// Insert `p` as its own singleton component (no-op if already present)
    /// and return its current representative.
    pub fn insert(&mut self, p: Point) -> usize {
        if let Some(&i) = self.index.get(&p) {
            return self.find_idx(i);
        }
        let i = self.parent.len();
        self.index.insert(p, i);
        self.parent.push(i);
        self.rank.push(0);
        self.components += 1;
        i
    }

    /// The representative of `p`'s component, or `None` if never inserted.
    pub fn find(&mut self, p: Point) -> Option<usize> {
        let &i = self.index.get(&p)?;
        Some(self.find_idx(i))
    }

    // Iterative root chase, then a second pass pointing the whole chain at
    // the root. No recursion, so deep chains on large grids are safe.
    fn find_idx(&mut self, mut i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[i] != root {
            let next = self.parent[i];
            self.parent[i] = root;
            i = next;
        }
        root
    }

    /// Merge the components of `a` and `b`, inserting either if unseen.
    ///
    /// Returns `true` if two distinct components were joined.
    pub fn union(&mut self, a: Point, b: Point) -> bool {
        let ra = self.insert(a);
        let rb = self.insert(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.components -= 1;
        true
    }

    /// Whether `a` and `b` are in the same component (both inserted).
    pub fn connected(&mut self, a: Point, b: Point) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn singletons_then_union() {
        let mut ds = DisjointSet::new();
        ds.insert(p(1, 1));
        ds.insert(p(3, 1));
        ds.insert(p(5, 1));
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.components(), 3);
        assert!(!ds.connected(p(1, 1), p(3, 1)));

        assert!(ds.union(p(1, 1), p(3, 1)));
        assert!(ds.connected(p(1, 1), p(3, 1)));
        assert_eq!(ds.components(), 2);

        // Union of already-joined cells is a no-op.
        assert!(!ds.union(p(3, 1), p(1, 1)));
        assert_eq!(ds.components(), 2);
    }

    #[test]
    fn union_inserts_unseen_members() {
        let mut ds = DisjointSet::new();
        assert!(!ds.union(p(0, 0), p(0, 0)));
        assert_eq!(ds.len(), 1);
        assert!(ds.union(p(1, 1), p(1, 3)));
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.components(), 2);
    }

    #[test]
    fn find_unseen_is_none() {
        let mut ds = DisjointSet::new();
        assert_eq!(ds.find(p(9, 9)), None);
        assert!(!ds.connected(p(9, 9), p(9, 9)));
    }

    #[test]
    fn transitive_connectivity() {
        let mut ds = DisjointSet::new();
        ds.union(p(1, 1), p(1, 3));
        ds.union(p(1, 3), p(3, 3));
        ds.union(p(5, 5), p(5, 3));
        assert!(ds.connected(p(1, 1), p(3, 3)));
        assert!(!ds.connected(p(1, 1), p(5, 5)));
        assert_eq!(ds.components(), 2);

        ds.union(p(3, 3), p(5, 3));
        assert!(ds.connected(p(1, 1), p(5, 5)));
        assert_eq!(ds.components(), 1);
    }

    #[test]
    fn long_chain_compresses() {
        let mut ds = DisjointSet::new();
        for x in 1..200 {
            ds.union(p(x, 1), p(x + 1, 1));
        }
        assert_eq!(ds.components(), 1);
        assert!(ds.connected(p(1, 1), p(200, 1)));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut ds = DisjointSet::new();
        let a = ds.insert(p(2, 2));
        let b = ds.insert(p(2, 2));
        assert_eq!(a, b);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.components(), 1);
    }
}
