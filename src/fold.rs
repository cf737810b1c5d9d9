use crate::tree::{Node, Node::*, Tree};
use log::trace;

impl Tree {
    /// Fold the tree bottom up, starting from the root. See `fold_from`.
    pub fn fold<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnMut(usize, &Node, &[&T]) -> Result<T, E>,
    {
        self.fold_from(self.root_index(), f)
    }

    /// Fold the sub-expression rooted at the node at `root` bottom up, and
    /// return the value computed for `root`. Panics if `root` is out of
    /// bounds.
    ///
    /// `f` is called with the index of the node, the node and the values
    /// already computed for its inputs, in order. Every node reachable from
    /// `root` is passed to `f` exactly once, after all of its inputs, no matter
    /// how many parents share it. Values are cached by node index, not by
    /// structure, so identical looking nodes at different indices are folded
    /// separately.
    ///
    /// The traversal uses an explicit stack instead of recursion, so very
    /// deep trees don't overflow the call stack. The first error returned by
    /// `f` aborts the traversal and is returned as is. Nothing is cached
    /// between calls.
    pub fn fold_from<T, E, F>(&self, root: usize, mut f: F) -> Result<T, E>
    where
        F: FnMut(usize, &Node, &[&T]) -> Result<T, E>,
    {
        trace!("Folding from node {} of a tree with {} nodes", root, self.len());
        let mut memo: Vec<Option<T>> = Vec::with_capacity(self.len());
        memo.resize_with(self.len(), || None);
        let mut stack: Vec<usize> = vec![root];
        while let Some(index) = stack.pop() {
            if memo[index].is_some() {
                // Pushed more than once via different parents.
                continue;
            }
            let node = self.node(index);
            let value = match node {
                Number(_) | Symbol(_) => f(index, node, &[])?,
                Binary(_, lhs, rhs) => match (&memo[*lhs], &memo[*rhs]) {
                    (Some(l), Some(r)) => f(index, node, &[l, r])?,
                    (l, r) => {
                        // Revisit this node after the inputs. Pushing rhs
                        // first because last in first out.
                        stack.push(index);
                        if r.is_none() {
                            stack.push(*rhs);
                        }
                        if l.is_none() {
                            stack.push(*lhs);
                        }
                        continue;
                    }
                },
            };
            memo[index] = Some(value);
        }
        match memo[root].take() {
            Some(value) => Ok(value),
            // The root is the first node pushed, so it is resolved last.
            None => unreachable!("Fold finished without a value for the root"),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::Error,
        expr,
        tree::{BinaryOp::*, Node, Node::*, Tree},
    };
    use std::convert::Infallible;

    fn shared_tree() -> Tree {
        // s = x + 1 is used by four parents.
        Tree::from_nodes(vec![
            Symbol("x".to_string()),
            Number(1.),
            Binary(Add, 0, 1),
            Binary(Multiply, 2, 2),
            Binary(Subtract, 2, 3),
            Binary(Add, 4, 2),
        ])
        .unwrap()
    }

    fn count_nodes(tree: &Tree) -> usize {
        let Ok(count) = tree.fold(|_, _, inputs: &[&usize]| -> Result<usize, Infallible> {
            Ok(1 + inputs.iter().map(|c| **c).sum::<usize>())
        });
        count
    }

    #[test]
    fn t_visits_shared_nodes_once() {
        let tree = shared_tree();
        let mut visits = vec![0usize; tree.len()];
        tree.fold(|index, _, _: &[&()]| -> Result<(), Infallible> {
            visits[index] += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(visits, vec![1; tree.len()]);
    }

    #[test]
    fn t_inputs_before_parents() {
        let tree = shared_tree();
        let mut order = Vec::new();
        tree.fold(|index, node: &Node, _: &[&()]| -> Result<(), Infallible> {
            if let Binary(_, lhs, rhs) = node {
                assert!(order.contains(lhs) && order.contains(rhs));
            }
            order.push(index);
            Ok(())
        })
        .unwrap();
        assert_eq!(order.len(), tree.len());
        assert_eq!(order.last(), Some(&tree.root_index()));
        // The left input resolves first.
        assert_eq!(&order[..3], &[0, 1, 2]);
    }

    #[test]
    fn t_shared_values_are_reused() {
        // Counting nodes as a tree, the shared node contributes to each parent.
        assert_eq!(count_nodes(&shared_tree()), 15);
        assert_eq!(count_nodes(&expr!(+ (* x 2) y).unwrap()), 5);
    }

    #[test]
    fn t_identical_nodes_are_distinct() {
        let tree = expr!(+ (* x x) (* x x)).unwrap();
        let mut calls = 0;
        tree.fold(|_, _, _: &[&()]| -> Result<(), Infallible> {
            calls += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, tree.len());
        assert_eq!(calls, 7);
    }

    #[test]
    fn t_unreachable_nodes_are_skipped() {
        let tree = Tree::from_nodes(vec![
            Symbol("unused".to_string()),
            Number(2.),
            Symbol("x".to_string()),
            Binary(Pow, 2, 1),
        ])
        .unwrap();
        let mut visited = Vec::new();
        tree.fold(|index, _, _: &[&()]| -> Result<(), Infallible> {
            visited.push(index);
            Ok(())
        })
        .unwrap();
        visited.sort();
        assert_eq!(visited, vec![1, 2, 3]);
    }

    #[test]
    fn t_fold_from_subexpression() {
        let tree = shared_tree();
        let mut visited = Vec::new();
        tree.fold_from(3, |index, _, _: &[&()]| -> Result<(), Infallible> {
            visited.push(index);
            Ok(())
        })
        .unwrap();
        assert_eq!(visited, vec![0, 1, 2, 3]);
    }

    #[test]
    fn t_errors_abort() {
        let tree = expr!(+ (* x 2) (- y 3)).unwrap();
        let mut calls = 0;
        let result = tree.fold(|_, node, _: &[&()]| {
            calls += 1;
            match node {
                Symbol(name) if name == "y" => Err(Error::VariableNotFound(name.clone())),
                Number(_) | Symbol(_) | Binary(..) => Ok(()),
            }
        });
        assert_eq!(result, Err(Error::VariableNotFound("y".to_string())));
        // x, 2, (* x 2) and then y.
        assert_eq!(calls, 4);
    }

    #[test]
    fn t_refold_is_idempotent() {
        let tree = shared_tree();
        let render = |tree: &Tree| {
            tree.fold(|_, node, inputs: &[&String]| -> Result<String, Infallible> {
                Ok(match node {
                    Number(val) => val.to_string(),
                    Symbol(name) => name.clone(),
                    Binary(op, ..) => format!("({} {} {})", op.glyph(), inputs[0], inputs[1]),
                })
            })
        };
        let first = render(&tree).unwrap();
        let second = render(&tree).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "(+ (- (+ x 1) (* (+ x 1) (+ x 1))) (+ x 1))");
    }

    #[test]
    fn t_concurrent_folds() {
        let tree = shared_tree();
        let counts: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| count_nodes(&tree))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(counts, vec![15; 4]);
    }

    #[test]
    fn t_deep_tree() {
        const DEPTH: usize = 100_000;
        let mut nodes = Vec::with_capacity(2 * DEPTH + 1);
        nodes.push(Symbol("x".to_string()));
        for i in 0..DEPTH {
            nodes.push(Number(1.));
            // Alternate sides so both inputs get deep chains.
            let prev = 2 * i;
            let one = nodes.len() - 1;
            nodes.push(if i % 2 == 0 {
                Binary(Add, prev, one)
            } else {
                Binary(Add, one, prev)
            });
        }
        let tree = Tree::from_nodes(nodes).unwrap();
        assert_eq!(count_nodes(&tree), 2 * DEPTH + 1);
    }
}
