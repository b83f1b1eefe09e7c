mod arena;
mod iter;

use std::cmp::Ordering;

use crate::{
    cmp::{Comparator, NaturalOrder},
    error::{Error, Result},
    options::{DuplicatePolicy, Options, DEFAULT_MAX_LEVEL, MAX_LEVEL_LIMIT},
    random::{GeometricLevelGenerator, LevelGenerator},
};

use arena::{Arena, Node, NodeId};
pub use iter::{Iter, Towers};

/// Where a forward link starts: the key-less head tower or a real node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Head,
    Node(NodeId),
}

/// An ordered multiset of keys kept in a skip list.
///
/// Nodes live in an arena and refer to each other by index. The head tower
/// spans `max_level` links and carries no key, so it can never be found,
/// returned or deleted.
pub struct SkipList<K, C = NaturalOrder, G = GeometricLevelGenerator> {
    head: Vec<Option<NodeId>>,
    nodes: Arena<K>,
    // Highest level occupied by any node, at least 1.
    level: usize,
    comparator: C,
    generator: G,
    duplicates: DuplicatePolicy,
}

impl<K: Ord> SkipList<K> {
    pub fn new() -> Self {
        SkipList::from_parts(
            DEFAULT_MAX_LEVEL,
            DuplicatePolicy::Allow,
            NaturalOrder,
            GeometricLevelGenerator::default(),
        )
    }

    pub fn with_options(options: Options) -> Result<Self> {
        SkipList::with_comparator(options, NaturalOrder)
    }
}

impl<K: Ord> Default for SkipList<K> {
    fn default() -> Self {
        SkipList::new()
    }
}

impl<K, C: Comparator<K>> SkipList<K, C> {
    pub fn with_comparator(options: Options, comparator: C) -> Result<Self> {
        let generator = GeometricLevelGenerator::from_options(&options)?;
        SkipList::with_generator(options, comparator, generator)
    }
}

impl<K, C, G> SkipList<K, C, G> {
    fn from_parts(max_level: usize, duplicates: DuplicatePolicy, comparator: C, generator: G) -> Self {
        SkipList {
            head: vec![None; max_level],
            nodes: Arena::new(),
            level: 1,
            comparator,
            generator,
            duplicates,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    pub fn current_level(&self) -> usize {
        self.level
    }

    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn clear(&mut self) {
        self.head.iter_mut().for_each(|link| *link = None);
        self.nodes.clear();
        self.level = 1;
    }

    /// Level-0 keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        self.level_iter(0)
    }

    /// Keys linked at `level`, in ascending order. Empty above the
    /// current level.
    pub fn level_iter(&self, level: usize) -> Iter<'_, K> {
        let first = if level < self.level { self.head[level] } else { None };
        Iter::new(&self.nodes, level, first)
    }

    pub fn towers(&self) -> Towers<'_, K> {
        Towers::new(&self.nodes, self.head[0])
    }

    pub fn first(&self) -> Option<&K> {
        self.head[0].map(|id| &self.nodes.get(id).key)
    }

    pub fn last(&self) -> Option<&K> {
        let mut current = Link::Head;
        for level in (0..self.level).rev() {
            while let Some(next) = self.next(current, level) {
                current = Link::Node(next);
            }
        }
        match current {
            Link::Head => None,
            Link::Node(id) => Some(&self.nodes.get(id).key),
        }
    }

    fn next(&self, link: Link, level: usize) -> Option<NodeId> {
        match link {
            Link::Head => self.head[level],
            Link::Node(id) => self.nodes.get(id).tower[level],
        }
    }

    fn set_next(&mut self, link: Link, level: usize, next: Option<NodeId>) {
        match link {
            Link::Head => self.head[level] = next,
            Link::Node(id) => self.nodes.get_mut(id).tower[level] = next,
        }
    }
}

impl<K, C: Comparator<K>, G> SkipList<K, C, G> {
    /// Walks down from the top level, moving right while the next key is
    /// less than `key`. `visit` sees the last link reached on every level;
    /// the level-0 one is returned.
    fn descend<F: FnMut(usize, Link)>(&self, key: &K, mut visit: F) -> Link {
        let mut current = Link::Head;
        for level in (0..self.level).rev() {
            while let Some(next) = self.next(current, level) {
                if self.comparator.compare(&self.nodes.get(next).key, key) != Ordering::Less {
                    break;
                }
                current = Link::Node(next);
            }
            visit(level, current);
        }
        current
    }

    fn matching(&self, pred: Link, key: &K) -> Option<NodeId> {
        let candidate = self.next(pred, 0)?;
        match self.comparator.compare(&self.nodes.get(candidate).key, key) {
            Ordering::Equal => Some(candidate),
            _ => None,
        }
    }

    pub fn search(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    /// The stored key equal to `key`, if any.
    pub fn get(&self, key: &K) -> Option<&K> {
        let pred = self.descend(key, |_, _| {});
        self.matching(pred, key).map(|id| &self.nodes.get(id).key)
    }

    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Unlinks one node equal to `key` and returns its key. Missing keys
    /// leave the list untouched.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let mut prevs = [Link::Head; MAX_LEVEL_LIMIT];
        let pred = self.descend(key, |level, link| prevs[level] = link);
        let target = self.matching(pred, key)?;

        for (level, &prev) in prevs.iter().enumerate().take(self.level) {
            // A node is linked on a prefix of levels, so the first level
            // that skips it ends the splice.
            if self.next(prev, level) != Some(target) {
                break;
            }
            let next = self.nodes.get(target).tower[level];
            self.set_next(prev, level, next);
        }

        while self.level > 1 && self.head[self.level - 1].is_none() {
            self.level -= 1;
        }

        Some(self.nodes.release(target).key)
    }

    /// Verifies ordering, tower shape, level bookkeeping and length.
    pub fn check_invariants(&self) -> Result<()> {
        let max_level = self.max_level();
        if self.level == 0 || self.level > max_level {
            return Err(Error::Corruption(format!(
                "current level {} outside 1..={}",
                self.level, max_level
            )));
        }

        let mut chain = Vec::with_capacity(self.nodes.len());
        let mut current = self.head[0];
        while let Some(id) = current {
            if chain.len() >= self.nodes.len() {
                return Err(Error::Corruption("level 0 chain is longer than the list".into()));
            }
            let node = self.nodes.get(id);
            if node.height() == 0 || node.height() > max_level {
                return Err(Error::Corruption(format!("node {} has height {}", id, node.height())));
            }
            if let Some(&prev) = chain.last() {
                let ord = self.comparator.compare(&self.nodes.get(prev).key, &node.key);
                let sorted = match self.duplicates {
                    DuplicatePolicy::Allow => ord != Ordering::Greater,
                    DuplicatePolicy::Reject => ord == Ordering::Less,
                };
                if !sorted {
                    return Err(Error::Corruption(format!(
                        "node {} is out of order under {}",
                        id,
                        self.comparator.name()
                    )));
                }
            }
            chain.push(id);
            current = node.tower[0];
        }
        if chain.len() != self.nodes.len() {
            return Err(Error::Corruption(format!(
                "level 0 reaches {} of {} nodes",
                chain.len(),
                self.nodes.len()
            )));
        }

        let tallest = chain
            .iter()
            .map(|&id| self.nodes.get(id).height())
            .max()
            .unwrap_or(1);
        if tallest != self.level {
            return Err(Error::Corruption(format!(
                "current level {} but tallest tower is {}",
                self.level, tallest
            )));
        }

        // Each level must link exactly the nodes tall enough for it, in
        // level-0 order.
        for level in 1..max_level {
            let expected: Vec<NodeId> = chain
                .iter()
                .copied()
                .filter(|&id| self.nodes.get(id).height() > level)
                .collect();
            let mut linked = Vec::with_capacity(expected.len());
            let mut current = self.head[level];
            while let Some(id) = current {
                if linked.len() >= expected.len() {
                    return Err(Error::Corruption(format!("level {} has extra links", level)));
                }
                linked.push(id);
                let node = self.nodes.get(id);
                if node.height() <= level {
                    return Err(Error::Corruption(format!(
                        "node {} linked at level {} above its height {}",
                        id,
                        level,
                        node.height()
                    )));
                }
                current = node.tower[level];
            }
            if linked != expected {
                return Err(Error::Corruption(format!("level {} chain mismatch", level)));
            }
        }
        Ok(())
    }
}

impl<K, C: Comparator<K>, G: LevelGenerator> SkipList<K, C, G> {
    pub fn with_generator(options: Options, comparator: C, generator: G) -> Result<Self> {
        options.validate()?;
        if generator.max_level() != options.max_level {
            return Err(Error::InvalidArgument(format!(
                "generator max level {} does not match options max level {}",
                generator.max_level(),
                options.max_level
            )));
        }
        Ok(SkipList::from_parts(
            options.max_level,
            options.duplicates,
            comparator,
            generator,
        ))
    }

    /// Adds `key`. Always succeeds unless duplicates are rejected and an
    /// equal key is present.
    pub fn insert(&mut self, key: K) -> bool {
        // Levels above the current one keep the head as predecessor.
        let mut prevs = [Link::Head; MAX_LEVEL_LIMIT];
        let pred = self.descend(&key, |level, link| prevs[level] = link);

        if self.duplicates == DuplicatePolicy::Reject && self.matching(pred, &key).is_some() {
            return false;
        }

        let height = self.generator.random_level().clamp(1, self.max_level());
        if height > self.level {
            self.level = height;
        }

        let id = self.nodes.alloc(Node::new(key, height));
        for (level, &prev) in prevs.iter().enumerate().take(height) {
            let next = self.next(prev, level);
            self.nodes.get_mut(id).tower[level] = next;
            self.set_next(prev, level, Some(id));
        }
        true
    }
}
