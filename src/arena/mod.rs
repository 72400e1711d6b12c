use std::fmt;
use std::ops::{Index, IndexMut};

pub mod prelude {
    use super::Id;

    pub trait HasId {
        fn get_id(&self) -> Id;
    }

    pub trait IsMemoryArena {
        type Node: HasId;

        fn get_node(&self, id: Id) -> Option<&Self::Node>;
        fn get_node_mut(&mut self, id: Id) -> Option<&mut Self::Node>;

        /// Allocates the next Id and stores the node built from it.
        fn add_node<F>(&mut self, build: F) -> Id
        where
            F: FnOnce(Id) -> Self::Node;

        /// Returns the number of nodes stored in the arena.
        fn len(&self) -> usize;

        fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }
}

use prelude::*;

/// A handle to a node stored in an [`Arena`]. Handles are handed out in order and never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(usize);

impl Id {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only node storage. Nodes refer to each other by [`Id`] instead of by pointer, so a
/// tree built on top of it never needs shared ownership or back-references.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    storage: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { storage: Vec::new() }
    }
}

impl<T: HasId> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every node. Ids handed out before this call must not be used again.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.storage.iter()
    }
}

impl<T: HasId> IsMemoryArena for Arena<T> {
    type Node = T;

    fn get_node(&self, id: Id) -> Option<&T> {
        self.storage.get(id.0)
    }

    fn get_node_mut(&mut self, id: Id) -> Option<&mut T> {
        self.storage.get_mut(id.0)
    }

    fn add_node<F>(&mut self, build: F) -> Id
    where
        F: FnOnce(Id) -> T,
    {
        let id = Id(self.storage.len());
        let node = build(id);
        debug_assert_eq!(node.get_id(), id, "node built with a foreign id");
        self.storage.push(node);
        id
    }

    fn len(&self) -> usize {
        self.storage.len()
    }
}

impl<T> Index<Id> for Arena<T> {
    type Output = T;

    fn index(&self, id: Id) -> &T {
        &self.storage[id.0]
    }
}

impl<T> IndexMut<Id> for Arena<T> {
    fn index_mut(&mut self, id: Id) -> &mut T {
        &mut self.storage[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::*;

    #[derive(Debug)]
    struct Leaf {
        id: Id,
        label: &'static str,
    }

    impl HasId for Leaf {
        fn get_id(&self) -> Id {
            self.id
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut arena = Arena::<Leaf>::new();
        assert!(arena.is_empty());

        let a = arena.add_node(|id| Leaf { id, label: "a" });
        let b = arena.add_node(|id| Leaf { id, label: "b" });

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[b].label, "b");
        assert_eq!(arena.get_node(a).map(|n| n.label), Some("a"));
    }

    #[test]
    fn test_get_node_mut() {
        let mut arena = Arena::<Leaf>::new();
        let a = arena.add_node(|id| Leaf { id, label: "a" });

        if let Some(node) = arena.get_node_mut(a) {
            node.label = "changed";
        }
        assert_eq!(arena[a].label, "changed");

        arena.clear();
        assert!(arena.get_node(a).is_none());
    }
}
