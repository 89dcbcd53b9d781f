use std::collections::VecDeque;
use std::iter::Iterator;

use super::{DecisionTree, TreeNode};
use thicket::Float;

/// Level-order (BFT) iterator of nodes in a decision tree
pub struct NodeIter<'a, F> {
    tree: &'a DecisionTree<F>,
    queue: VecDeque<&'a TreeNode<F>>,
}

impl<'a, F: Float> NodeIter<'a, F> {
    pub fn new(tree: &'a DecisionTree<F>) -> Self {
        let mut queue = VecDeque::with_capacity(tree.num_nodes());
        queue.push_back(tree.root_node());

        NodeIter { tree, queue }
    }
}

impl<'a, F: Float> Iterator for NodeIter<'a, F> {
    type Item = &'a TreeNode<F>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|node| {
            if let Some((left, right)) = node.children() {
                self.queue.push_back(self.tree.node(left));
                self.queue.push_back(self.tree.node(right));
            }

            node
        })
    }
}
