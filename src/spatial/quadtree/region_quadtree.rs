use tracing::{debug, trace};

use crate::arena::prelude::{HasId, IsMemoryArena};
use crate::arena::{Arena, Id};
use crate::config::QuadtreeConfig;
use crate::error::QuadtreeError;
use crate::spatial::quadtree::prelude::*;

/// A quad covers one region of the plane. It stores up to `capacity` points directly and, once
/// it has overflowed, owns exactly 4 children covering its quadrants.
#[derive(Clone, Debug)]
struct Quad {
    pub id: Id,

    pub depth: usize,

    pub boundary: Boundary,

    pub points: Vec<Point>,

    // The ordering goes NW, NE, SW, SE
    pub children: Option<[Id; 4]>,
}

impl Quad {
    pub fn new(id: Id, depth: usize, boundary: Boundary) -> Self {
        Self {
            id,
            depth,
            boundary,
            points: Vec::new(),
            children: None,
        }
    }

    fn children(&self) -> &[Id] {
        match &self.children {
            Some(children) => children.as_slice(),
            None => &[],
        }
    }

    fn view(&self) -> NodeView<'_> {
        NodeView {
            id: self.id,
            depth: self.depth,
            boundary: &self.boundary,
            points: &self.points,
            is_leaf: self.children.is_none(),
        }
    }
}

impl HasId for Quad {
    fn get_id(&self) -> Id {
        self.id
    }
}

/// A read-only look at one node of the tree, as handed out by [`RegionQuadtree::nodes`].
#[derive(Copy, Clone, Debug)]
pub struct NodeView<'a> {
    pub id: Id,
    /// Distance from the root, which has depth 0.
    pub depth: usize,
    pub boundary: &'a Boundary,
    /// Points stored directly on this node.
    pub points: &'a [Point],
    pub is_leaf: bool,
}

/// Hook called by [`RegionQuadtree::query_observed`] for every node the query descends into.
/// Nodes whose boundary does not intersect the search window are skipped and never reported.
pub trait QueryObserver {
    fn visit(&mut self, node: &NodeView<'_>);
}

impl QueryObserver for () {
    fn visit(&mut self, _node: &NodeView<'_>) {}
}

/// A region quadtree recursively splits a fixed rectangle into quadrants as points accumulate,
/// so that rectangular range queries only descend into the parts of the plane they overlap.
///
/// Points stored on a node before it subdivides stay on that node; only points arriving
/// afterwards are handed down to the children.
#[derive(Clone, Debug)]
pub struct RegionQuadtree {
    arena: Arena<Quad>,
    root_id: Id,
    capacity: usize,
    size: usize,
}

impl RegionQuadtree {
    /// Returns a new, empty tree covering `boundary` whose nodes subdivide after `capacity`
    /// points.
    pub fn new(boundary: Boundary, capacity: usize) -> Result<Self, QuadtreeError> {
        Self::validate(&boundary, capacity)?;

        let mut arena = Arena::new();
        let root_id = arena.add_node(|id| Quad::new(id, 0, boundary));

        Ok(Self {
            arena,
            root_id,
            capacity,
            size: 0,
        })
    }

    /// Rejects a zero capacity and a root boundary without a finite center and a finite,
    /// positive area.
    pub fn validate(boundary: &Boundary, capacity: usize) -> Result<(), QuadtreeError> {
        if capacity == 0 {
            return Err(QuadtreeError::InvalidCapacity(capacity));
        }
        if !boundary.is_valid() {
            return Err(QuadtreeError::InvalidBoundary {
                x: boundary.x(),
                y: boundary.y(),
                h: boundary.h(),
                w: boundary.w(),
            });
        }
        Ok(())
    }

    /// Returns a new tree over the rectangle described by `params`.
    pub fn create(params: BoundaryParams, capacity: usize) -> Result<Self, QuadtreeError> {
        Self::new(params.into(), capacity)
    }

    pub fn from_config(config: &QuadtreeConfig) -> Result<Self, QuadtreeError> {
        Self::create(config.boundary, config.capacity)
    }

    pub fn root(&self) -> Id {
        self.root_id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the area covered by the root node.
    pub fn boundary(&self) -> &Boundary {
        &self.arena[self.root_id].boundary
    }

    /// Returns the number of points stored in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of nodes, leaves and internal nodes alike.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns the depth of the deepest node; a tree that never subdivided has depth 0.
    pub fn depth(&self) -> usize {
        self.arena.iter().map(|q| q.depth).max().unwrap_or(0)
    }

    pub fn node(&self, id: Id) -> Option<NodeView<'_>> {
        self.arena.get_node(id).map(Quad::view)
    }

    /// Returns the 0 or 4 children of the node, in NW, NE, SW, SE order. Unknown ids have no
    /// children.
    pub fn children(&self, id: Id) -> &[Id] {
        self.arena.get_node(id).map(Quad::children).unwrap_or(&[])
    }

    /// Drops every point and node, leaving an empty root over the same boundary.
    pub fn clear(&mut self) {
        let boundary = *self.boundary();

        self.arena.clear();
        self.root_id = self.arena.add_node(|id| Quad::new(id, 0, boundary));
        self.size = 0;
    }

    /// Inserts `point`, returning false if it lies outside the tree's boundary.
    pub fn insert(&mut self, point: Point) -> bool {
        if !self.arena[self.root_id].boundary.contains(&point) {
            trace!("Rejected point ({}, {}) outside the root boundary", point.x, point.y);
            return false;
        }

        let mut quad_id = self.root_id;
        loop {
            let quad = &self.arena[quad_id];

            if quad.children.is_none() && quad.points.len() < self.capacity {
                self.arena[quad_id].points.push(point);
                self.size += 1;
                return true;
            }

            if quad.children.is_none() {
                self.subdivide(quad_id);
            }

            // The first child (NW, NE, SW, SE) to contain the point takes it, which settles
            // points lying on an edge shared by two quadrants.
            let mut next = None;
            self.for_each_child(quad_id, |child| {
                if next.is_none() && child.boundary.contains(&point) {
                    next = Some(child.id);
                }
            });

            match next {
                Some(child_id) => quad_id = child_id,
                // Children cover their parent exactly, so this only happens if that breaks.
                None => return false,
            }
        }
    }

    /// Returns every point in the tree that lies inside `search`, edges included.
    ///
    /// A node's own points come before those of its children, and children are searched in NW,
    /// NE, SW, SE order.
    pub fn query(&self, search: &Boundary) -> Vec<Point> {
        self.query_observed(search, &mut ())
    }

    /// Same as [`query`](Self::query), reporting each visited node to `observer`.
    pub fn query_observed<O: QueryObserver>(
        &self,
        search: &Boundary,
        observer: &mut O,
    ) -> Vec<Point> {
        let mut result = vec![];
        let mut stack = vec![self.root_id];

        while let Some(quad_id) = stack.pop() {
            let quad = &self.arena[quad_id];

            if !quad.boundary.intersects(search) {
                continue;
            }
            observer.visit(&quad.view());

            result.extend(quad.points.iter().filter(|p| search.contains(p)));

            // Pushed in reverse so the NW subtree is searched first.
            stack.extend(quad.children().iter().rev());
        }

        result
    }

    /// Iterates over every node in pre-order: a node, then each child subtree in NW, NE, SW, SE
    /// order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            tree: self,
            stack: vec![self.root_id],
        }
    }

    /// Applies `f` to each child of the node in NW, NE, SW, SE order. Leaves have nothing to visit.
    fn for_each_child<F>(&self, quad_id: Id, mut f: F)
    where
        F: FnMut(&Quad),
    {
        for &child_id in self.arena[quad_id].children() {
            f(&self.arena[child_id]);
        }
    }

    /// Creates the 4 children of a leaf. Points already on the node stay where they are.
    fn subdivide(&mut self, quad_id: Id) {
        let parent = &self.arena[quad_id];
        let boundary = parent.boundary;
        let depth = parent.depth + 1;

        let children = Quadrant::ALL.map(|quadrant| {
            let child = boundary.child(quadrant);
            self.arena.add_node(|id| Quad::new(id, depth, child))
        });
        self.arena[quad_id].children = Some(children);

        debug!(
            "Subdivided node {} at depth {} ({}, {}, {}x{})",
            quad_id, depth - 1, boundary.x(), boundary.y(), boundary.w(), boundary.h()
        );
    }
}

/// Pre-order iterator over the nodes of a [`RegionQuadtree`].
pub struct Nodes<'a> {
    tree: &'a RegionQuadtree,
    stack: Vec<Id>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let quad = &self.tree.arena[self.stack.pop()?];

        // Pushed in reverse so NW comes off the stack first.
        self.stack.extend(quad.children().iter().rev());

        Some(quad.view())
    }
}
