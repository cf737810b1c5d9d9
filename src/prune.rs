use crate::tree::{MaybeTree, Node, Node::*, Tree};
use log::debug;

/// Removes nodes that can't be reached from a root.
///
/// The buffers used for marking and remapping the nodes are owned by this
/// instance, so reusing the same pruner avoids repeated allocations.
pub struct Pruner {
    keep: Vec<bool>,
    index_map: Vec<usize>,
    stack: Vec<usize>,
}

impl Default for Pruner {
    fn default() -> Self {
        Self::new()
    }
}

impl Pruner {
    pub fn new() -> Pruner {
        Pruner {
            keep: Vec::new(),
            index_map: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Keep only the nodes reachable from `root`, in their original relative
    /// order, and return them. `nodes` must be in topological order, in which
    /// case `root` ends up as the last node of the output.
    pub fn run(&mut self, nodes: Vec<Node>, root: usize) -> Vec<Node> {
        let before = nodes.len();
        self.keep.clear();
        self.keep.resize(nodes.len(), false);
        self.stack.clear();
        self.stack.push(root);
        while let Some(index) = self.stack.pop() {
            if self.keep[index] {
                continue;
            }
            self.keep[index] = true;
            match &nodes[index] {
                Number(_) | Symbol(_) => {}
                Binary(_, lhs, rhs) => {
                    self.stack.push(*rhs);
                    self.stack.push(*lhs);
                }
            }
        }
        self.index_map.clear();
        self.index_map.resize(nodes.len(), 0);
        let mut pruned = Vec::with_capacity(self.keep.iter().filter(|k| **k).count());
        for (index, node) in nodes.into_iter().enumerate() {
            if !self.keep[index] {
                continue;
            }
            self.index_map[index] = pruned.len();
            pruned.push(match node {
                Number(_) | Symbol(_) => node,
                // Inputs come earlier, so they are already remapped.
                Binary(op, lhs, rhs) => Binary(op, self.index_map[lhs], self.index_map[rhs]),
            });
        }
        if pruned.len() < before {
            debug!("Pruned {} of {} nodes", before - pruned.len(), before);
        }
        pruned
    }
}

impl Tree {
    /// Remove the nodes that can't be reached from the root.
    pub fn prune(self, pruner: &mut Pruner) -> MaybeTree {
        let root = self.root_index();
        Tree::from_nodes(pruner.run(self.take(), root))
    }
}
