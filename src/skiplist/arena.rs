use std::mem;

/// Stable index of a node inside an `Arena`.
pub(crate) type NodeId = usize;

pub(crate) struct Node<K> {
    pub(crate) key: K,
    /// Forward links, one per level the node occupies. The length is the
    /// node's height and never changes after allocation.
    pub(crate) tower: Vec<Option<NodeId>>,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K, height: usize) -> Self {
        Node {
            key,
            tower: vec![None; height],
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.tower.len()
    }
}

enum Slot<K> {
    Occupied(Node<K>),
    Vacant(Option<NodeId>),
}

/// Owns every node of a list. Released slots are chained into a free list
/// and handed out again before the slot vector grows.
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    free: Option<NodeId>,
    len: usize,
}

impl<K> Default for Arena<K> {
    fn default() -> Self {
        Arena::new()
    }
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of slots ever allocated, live or free.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn alloc(&mut self, node: Node<K>) -> NodeId {
        self.len += 1;
        match self.free {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id], Slot::Occupied(node));
                self.free = match slot {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(_) => unreachable!("free list points at live node {}", id),
                };
                id
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Node<K> {
        match mem::replace(&mut self.slots[id], Slot::Vacant(self.free)) {
            Slot::Occupied(node) => {
                self.free = Some(id);
                self.len -= 1;
                node
            }
            Slot::Vacant(_) => panic!("node {} released twice", id),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<K> {
        match &self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("dangling node id {}", id),
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<K> {
        match &mut self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("dangling node id {}", id),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}
