//! Which node animates next.
//!
//! The cursor starts on the root moving forward. Each completed transition
//! moves it one node in the current direction; at either end of the chain
//! the direction flips and the cursor stays put, so the row is swept back
//! and forth.

use crate::chain::{Node, NodeChain};
use crate::constants::NODE_COUNT;
use crate::surface::{Paint, Surface};

/// Result of looking up the neighbour in a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub node: usize,
    /// The lookup ran off the chain and returned the current node
    pub hit_boundary: bool,
}

/// Reported when the node under the cursor settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionComplete {
    pub index: usize,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct Traversal {
    chain: NodeChain,
    current: usize,
    direction: i32,
    bounces: usize,
}

impl Traversal {
    pub fn new() -> Self {
        Self {
            chain: NodeChain::new(),
            current: NodeChain::ROOT,
            direction: 1,
            bounces: 0,
        }
    }

    pub fn chain(&self) -> &NodeChain {
        &self.chain
    }

    pub fn current(&self) -> &Node {
        self.chain.node(self.current)
    }

    /// `1` while sweeping toward the last node, `-1` on the way back.
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// How many times the cursor has bounced off an end of the chain.
    pub fn bounces(&self) -> usize {
        self.bounces
    }

    /// Neighbour of the current node in `direction`, or the current node
    /// itself when there is none.
    pub fn get_next(&self, direction: i32) -> Step {
        let node = self.current();
        let neighbour = if direction == 1 { node.next() } else { node.prev() };
        match neighbour {
            Some(index) => Step {
                node: index,
                hit_boundary: false,
            },
            None => Step {
                node: self.current,
                hit_boundary: true,
            },
        }
    }

    /// Advance the current node by one tick. When its transition completes
    /// the cursor moves on (bouncing at the ends) and the completion is
    /// returned.
    pub fn update(&mut self) -> Option<TransitionComplete> {
        let index = self.current;
        let scale = self.chain.node_mut(index).state.advance()?;

        let step = self.get_next(self.direction);
        if step.hit_boundary {
            self.on_boundary();
        }
        self.current = step.node;
        Some(TransitionComplete { index, scale })
    }

    /// Start the current node's transition. Returns `false` while the node is
    /// still moving.
    pub fn start_updating(&mut self) -> bool {
        self.chain.node_mut(self.current).state.start_updating()
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, paint: &Paint) {
        self.chain.draw(surface, paint);
    }

    /// Current scale of every node.
    pub fn scales(&self) -> [f32; NODE_COUNT] {
        self.chain.scales()
    }

    fn on_boundary(&mut self) {
        self.direction *= -1;
        self.bounces += 1;
        log::debug!(
            "Traversal bounced at node {}, direction now {}",
            self.current,
            self.direction
        );
    }
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_one(traversal: &mut Traversal) -> TransitionComplete {
        assert!(traversal.start_updating());
        for _ in 0..1000 {
            if let Some(done) = traversal.update() {
                return done;
            }
        }
        panic!("transition never completed");
    }

    #[test]
    fn test_initial_cursor() {
        let traversal = Traversal::new();
        assert_eq!(traversal.current().index, 0);
        assert_eq!(traversal.direction(), 1);
    }

    #[test]
    fn test_get_next_at_root() {
        let traversal = Traversal::new();
        assert_eq!(
            traversal.get_next(1),
            Step {
                node: 1,
                hit_boundary: false
            }
        );
        assert_eq!(
            traversal.get_next(-1),
            Step {
                node: 0,
                hit_boundary: true
            }
        );
    }

    #[test]
    fn test_update_reports_completion() {
        let mut traversal = Traversal::new();
        let done = complete_one(&mut traversal);
        assert_eq!(done, TransitionComplete { index: 0, scale: 1.0 });
        assert_eq!(traversal.current().index, 1);
        assert_eq!(traversal.chain().node(0).state.prev_scale, 1.0);
    }

    #[test]
    fn test_update_without_start_does_nothing() {
        let mut traversal = Traversal::new();
        assert_eq!(traversal.update(), None);
        assert_eq!(traversal.current().index, 0);
        assert_eq!(traversal.scales(), [0.0; NODE_COUNT]);
    }

    #[test]
    fn test_bounce_at_last_node() {
        let mut traversal = Traversal::new();
        for expected in 1..NODE_COUNT {
            complete_one(&mut traversal);
            assert_eq!(traversal.current().index, expected);
            assert_eq!(traversal.direction(), 1);
        }
        assert_eq!(traversal.bounces(), 0);

        // Last node settles, cursor stays and turns around
        let done = complete_one(&mut traversal);
        assert_eq!(done.index, NODE_COUNT - 1);
        assert_eq!(traversal.current().index, NODE_COUNT - 1);
        assert_eq!(traversal.direction(), -1);
        assert_eq!(traversal.bounces(), 1);

        // Same node now animates back to zero
        let done = complete_one(&mut traversal);
        assert_eq!(done, TransitionComplete { index: 4, scale: 0.0 });
        assert_eq!(traversal.current().index, 3);
    }
}
