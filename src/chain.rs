//! The fixed row of figure nodes.
//!
//! Nodes live in a fixed array and refer to their neighbours by index, so
//! walking forward from the root and backward from the last node visits
//! every node exactly once.

use crate::animation::ScaleState;
use crate::constants::NODE_COUNT;
use crate::geometry::draw_node_figure;
use crate::surface::{Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub index: usize,
    pub state: ScaleState,
    next: Option<usize>,
    prev: Option<usize>,
}

impl Node {
    fn new(index: usize) -> Self {
        Self {
            index,
            state: ScaleState::new(),
            next: (index + 1 < NODE_COUNT).then_some(index + 1),
            prev: index.checked_sub(1),
        }
    }

    /// Index of the following node, `None` for the last one.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Index of the preceding node, `None` for the root.
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }
}

#[derive(Debug, Clone)]
pub struct NodeChain {
    nodes: [Node; NODE_COUNT],
}

impl NodeChain {
    pub fn new() -> Self {
        Self {
            nodes: std::array::from_fn(Node::new),
        }
    }

    pub const ROOT: usize = 0;

    /// Panics if `index` is not a node of this chain.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Walk from the root following `next` links.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(Some(&self.nodes[Self::ROOT]), move |node| {
            node.next.map(|i| &self.nodes[i])
        })
    }

    /// Current scale of every node, in index order.
    pub fn scales(&self) -> [f32; NODE_COUNT] {
        std::array::from_fn(|i| self.nodes[i].state.scale)
    }

    /// Draw every node's figure at its current scale.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, paint: &Paint) {
        for node in self.iter() {
            draw_node_figure(surface, node.index, node.state.scale, paint);
        }
    }
}

impl Default for NodeChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TRIS;
    use crate::renderer::{DrawCommand, RecordingSurface};

    #[test]
    fn test_construction() {
        let chain = NodeChain::new();
        let indices: Vec<usize> = chain.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_single_root_and_tail() {
        let chain = NodeChain::new();
        let nodes: Vec<&Node> = (0..NODE_COUNT).map(|i| chain.node(i)).collect();
        assert_eq!(nodes.iter().filter(|n| n.prev().is_none()).count(), 1);
        assert_eq!(nodes.iter().filter(|n| n.next().is_none()).count(), 1);
        assert_eq!(chain.node(NodeChain::ROOT).prev(), None);
        assert_eq!(chain.node(NODE_COUNT - 1).next(), None);
    }

    #[test]
    fn test_backward_reachability() {
        let chain = NodeChain::new();
        let mut visited = vec![NODE_COUNT - 1];
        let mut current = chain.node(NODE_COUNT - 1);
        while let Some(prev) = current.prev() {
            visited.push(prev);
            current = chain.node(prev);
        }
        assert_eq!(visited, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_draw_every_node() {
        let chain = NodeChain::new();
        let mut surface = RecordingSurface::new(600.0, 300.0);
        chain.draw(&mut surface, &Paint::default());
        let paths = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Path { .. }))
            .count();
        assert_eq!(paths, NODE_COUNT);
        assert_eq!(surface.commands().len(), NODE_COUNT * (1 + TRIS));
        assert_eq!(surface.save_depth(), 0);
    }
}
