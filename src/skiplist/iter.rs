use super::arena::{Arena, NodeId};

/// Keys linked at one level, in list order.
pub struct Iter<'a, K> {
    nodes: &'a Arena<K>,
    level: usize,
    next: Option<NodeId>,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(nodes: &'a Arena<K>, level: usize, first: Option<NodeId>) -> Self {
        Iter { nodes, level, next: first }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node = self.nodes.get(self.next?);
        self.next = node.tower[self.level];
        Some(&node.key)
    }
}

/// Every node in level-0 order together with its tower height.
pub struct Towers<'a, K> {
    nodes: &'a Arena<K>,
    next: Option<NodeId>,
}

impl<'a, K> Towers<'a, K> {
    pub(super) fn new(nodes: &'a Arena<K>, first: Option<NodeId>) -> Self {
        Towers { nodes, next: first }
    }
}

impl<'a, K> Iterator for Towers<'a, K> {
    type Item = (&'a K, usize);

    fn next(&mut self) -> Option<(&'a K, usize)> {
        let node = self.nodes.get(self.next?);
        self.next = node.tower[0];
        Some((&node.key, node.height()))
    }
}
