use crate::{
    error::Error,
    prune::Pruner,
    tree::{BinaryOp::*, MaybeTree, Node, Node::*, Tree},
};
use log::debug;

/// Compute the symbolic derivative of `tree` with respect to the symbol
/// `var`.
pub fn differentiate(tree: MaybeTree, var: &str) -> MaybeTree {
    tree?.differentiate(var)
}

/// What the fold knows about one node while differentiating.
#[derive(Debug, Copy, Clone)]
struct Partial {
    /// Index of the node holding the derivative.
    deriv: usize,
    /// Whether the sub-expression contains the variable.
    depends: bool,
}

impl Tree {
    /// Compute the symbolic derivative of the tree with respect to the symbol
    /// `var`. The result is a new tree, so it can be differentiated again.
    ///
    /// The rules are applied as is and nothing is simplified: the derivative
    /// of `x * x` is `1 * x + 1 * x`. The derivative refers back to the
    /// operands of the original expression, and these are shared rather than
    /// copied. A power is only differentiated when its exponent doesn't
    /// depend on `var`, otherwise `Error::VariableExponent` is returned.
    /// Operators without a rule return `Error::UnsupportedVariant`.
    pub fn differentiate(&self, var: &str) -> MaybeTree {
        debug!(
            "Differentiating a tree of {} nodes with respect to '{}'",
            self.len(),
            var
        );
        // New nodes are appended to a copy of the original nodes, so the
        // rules can refer to the operands by their index.
        let mut nodes = self.nodes().to_vec();
        let root = self.fold(|_index, node, inputs: &[&Partial]| {
            derivative_rule(node, inputs, var, &mut nodes)
        })?;
        let mut pruner = Pruner::new();
        Tree::from_nodes(pruner.run(nodes, root.deriv))
    }
}

/// Push the nodes for the derivative of `node` into `dst`, given the partials
/// of its inputs.
fn derivative_rule(
    node: &Node,
    inputs: &[&Partial],
    var: &str,
    dst: &mut Vec<Node>,
) -> Result<Partial, Error> {
    Ok(match node {
        Number(_) => Partial {
            deriv: push_node(Number(0.), dst),
            depends: false,
        },
        Symbol(name) => {
            let depends = name == var;
            Partial {
                deriv: push_node(Number(if depends { 1. } else { 0. }), dst),
                depends,
            }
        }
        Binary(op, a, b) => {
            let (a, b) = (*a, *b);
            let (da, db) = (*inputs[0], *inputs[1]);
            let deriv = match op {
                Add => push_node(Binary(Add, da.deriv, db.deriv), dst),
                Subtract => push_node(Binary(Subtract, da.deriv, db.deriv), dst),
                Multiply => {
                    let lhs = push_node(Binary(Multiply, da.deriv, b), dst);
                    let rhs = push_node(Binary(Multiply, db.deriv, a), dst);
                    push_node(Binary(Add, lhs, rhs), dst)
                }
                Divide => {
                    let lhs = push_node(Binary(Multiply, da.deriv, b), dst);
                    let rhs = push_node(Binary(Multiply, a, db.deriv), dst);
                    let numerator = push_node(Binary(Subtract, lhs, rhs), dst);
                    let two = push_node(Number(2.), dst);
                    let denominator = push_node(Binary(Pow, b, two), dst);
                    push_node(Binary(Divide, numerator, denominator), dst)
                }
                Pow => {
                    if db.depends {
                        return Err(Error::VariableExponent(var.to_string()));
                    }
                    let one = push_node(Number(1.), dst);
                    let exponent = push_node(Binary(Subtract, b, one), dst);
                    let power = push_node(Binary(Pow, a, exponent), dst);
                    let scaled = push_node(Binary(Multiply, b, power), dst);
                    push_node(Binary(Multiply, scaled, da.deriv), dst) // Chain rule.
                }
                Remainder => return Err(Error::UnsupportedVariant(op.name())),
            };
            Partial {
                deriv,
                depends: da.depends || db.depends,
            }
        }
    })
}

fn push_node(node: Node, dst: &mut Vec<Node>) -> usize {
    let idx = dst.len();
    dst.push(node);
    idx
}
