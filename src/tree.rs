use crate::error::Error;
use std::{collections::HashSet, convert::Infallible};

/// Precedence of terminal nodes. Terminals are never parenthesized.
pub const TERMINAL_PRECEDENCE: u8 = 3;

/// Represents an operation with two inputs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,
    Remainder, // Floored remainder
}

impl BinaryOp {
    /// The binding strength of the operator when rendered infix. Higher binds
    /// tighter.
    pub fn precedence(&self) -> u8 {
        use BinaryOp::*;
        match self {
            Add | Subtract => 0,
            Multiply | Divide | Remainder => 1,
            Pow => 2,
        }
    }

    /// The glyph used when rendering the operator.
    pub fn glyph(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Pow => "^",
            Remainder => "%",
        }
    }

    pub fn name(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "Add",
            Subtract => "Subtract",
            Multiply => "Multiply",
            Divide => "Divide",
            Pow => "Pow",
            Remainder => "Remainder",
        }
    }
}

use BinaryOp::*;

/// Represents a node in an expression `Tree`. Operator nodes refer to their
/// inputs by their index in the tree.
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Number(f64),
    Symbol(String),
    Binary(BinaryOp, usize, usize),
}

use Node::*;

impl Node {
    pub fn precedence(&self) -> u8 {
        match self {
            Number(_) | Symbol(_) => TERMINAL_PRECEDENCE,
            Binary(op, ..) => op.precedence(),
        }
    }

    /// Name of the variant, as reported in errors.
    pub fn name(&self) -> &'static str {
        match self {
            Number(_) => "Number",
            Symbol(_) => "Symbol",
            Binary(op, ..) => op.name(),
        }
    }
}

pub(crate) fn is_topological_order(nodes: &[Node]) -> bool {
    nodes.iter().enumerate().all(|(i, node)| match node {
        Number(_) | Symbol(_) => true,
        Binary(_, l, r) => *l < i && *r < i,
    })
}

/// Represents an arithmetic expression.
///
/// The nodes are stored in a flat vector, in topological order, with the
/// root as the last node. The index of a node is its identity: two nodes
/// that look the same but live at different indices are different nodes. A
/// node referred to by more than one parent is shared, and every fold over the
/// tree visits it once.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

pub type MaybeTree = Result<Tree, Error>;

impl Tree {
    /// Create a tree from `nodes`. This is how callers share sub-expressions
    /// between several parents. The nodes are checked, and the first problem
    /// found is returned as an error.
    pub fn from_nodes(nodes: Vec<Node>) -> MaybeTree {
        Tree { nodes }.validated()
    }

    /// Create a tree representing a number.
    pub fn number(value: f64) -> MaybeTree {
        if value.is_nan() {
            return Err(Error::ContainsNaN);
        }
        Ok(Tree {
            nodes: vec![Number(value)],
        })
    }

    /// Create a tree representing a symbol called `name`.
    pub fn symbol(name: &str) -> MaybeTree {
        if name.is_empty() {
            return Err(Error::EmptySymbolName);
        }
        Ok(Tree {
            nodes: vec![Symbol(name.to_string())],
        })
    }

    /// The number of nodes in this tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the root node. This is always the last node.
    pub fn root_index(&self) -> usize {
        // Never underflows, an empty tree cannot be constructed.
        self.nodes.len() - 1
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root_index()]
    }

    /// Get a reference to the node at `index`.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Reference to the nodes of this tree.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Take ownership of the nodes, dropping the tree.
    ///
    /// A tree is immutable once constructed. Algorithms that want to
    /// rearrange nodes take them, do their work and build a new tree with
    /// `from_nodes`, which checks the result.
    pub fn take(self) -> Vec<Node> {
        self.nodes
    }

    /// Get a unique list of the symbols reachable from the root. The symbols
    /// will appear in the same order as they first appear in the tree.
    pub fn symbols(&self) -> Vec<&str> {
        let mut reachable = vec![false; self.len()];
        let Ok(()) = self.fold(|index, _, _: &[&()]| -> Result<(), Infallible> {
            reachable[index] = true;
            Ok(())
        });
        let symbols: Vec<&str> = self
            .nodes
            .iter()
            .zip(reachable)
            .filter_map(|(n, reached)| match n {
                Symbol(name) if reached => Some(name.as_str()),
                Number(_) | Symbol(_) | Binary(..) => None,
            })
            .collect();
        let mut indices: Vec<usize> = (0..symbols.len()).collect();
        // Stable sort, so the first occurrence of each name survives the dedup.
        indices.sort_by(|a, b| symbols[*a].cmp(symbols[*b]));
        indices.dedup_by(|a, b| symbols[*a] == symbols[*b]);
        indices.sort();
        indices.iter().map(|i| symbols[*i]).collect()
    }

    /// Check the tree for errors and return a Result that contains the tree if
    /// no errors were found, or the first error encountered with the tree.
    fn validated(self) -> MaybeTree {
        if self.nodes.is_empty() {
            return Err(Error::EmptyTree);
        }
        for node in self.nodes.iter() {
            match node {
                Number(val) if val.is_nan() => return Err(Error::ContainsNaN),
                Symbol(name) if name.is_empty() => return Err(Error::EmptySymbolName),
                Number(_) | Symbol(_) | Binary(..) => {}
            }
        }
        // Inputs appearing before the node also rules out cycles.
        if !is_topological_order(&self.nodes) {
            return Err(Error::WrongNodeOrder);
        }
        Ok(self)
    }

    fn binary_op(mut self, other: Tree, op: BinaryOp) -> MaybeTree {
        let lroot = self.root_index();
        self.nodes.reserve(other.len() + 1);
        self.push_nodes(other);
        let rroot = self.root_index();
        self.nodes.push(Binary(op, lroot, rroot));
        Ok(self)
    }

    /// Append the nodes of `other`, shifting its indices past the existing nodes.
    fn push_nodes(&mut self, other: Tree) {
        let offset: usize = self.nodes.len();
        self.nodes.extend(other.nodes.into_iter().map(|node| match node {
            Number(_) | Symbol(_) => node,
            Binary(op, lhs, rhs) => Binary(op, lhs + offset, rhs + offset),
        }));
    }
}

/// Either side of a combinator. Raw numbers are wrapped into number nodes.
#[derive(Debug)]
pub enum Operand {
    Tree(MaybeTree),
    Number(f64),
}

impl Operand {
    fn into_tree(self) -> MaybeTree {
        match self {
            Operand::Tree(tree) => tree,
            Operand::Number(value) if value.is_nan() => {
                Err(Error::InvalidOperand(value.to_string()))
            }
            Operand::Number(value) => Tree::number(value),
        }
    }
}

impl From<Tree> for Operand {
    fn from(tree: Tree) -> Self {
        Operand::Tree(Ok(tree))
    }
}

impl From<MaybeTree> for Operand {
    fn from(tree: MaybeTree) -> Self {
        Operand::Tree(tree)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Number(value as f64)
    }
}

macro_rules! binary_func {
    ($name:ident, $op:ident) => {
        pub fn $name(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> MaybeTree {
            let lhs = lhs.into().into_tree()?;
            lhs.binary_op(rhs.into().into_tree()?, $op)
        }
    };
}

binary_func!(add, Add);
binary_func!(sub, Subtract);
binary_func!(mul, Multiply);
binary_func!(div, Divide);
binary_func!(pow, Pow);
binary_func!(rem, Remainder);

impl PartialEq for Tree {
    /// Structural comparison of the expressions rooted at the two roots. The
    /// layout of the nodes, sharing and unreachable nodes are ignored.
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self.root_index(), other.root_index())];
        // Pairs already compared, so shared subtrees aren't compared over and over.
        let mut seen = HashSet::new();
        while let Some((li, ri)) = stack.pop() {
            if !seen.insert((li, ri)) {
                continue;
            }
            match (&self.nodes[li], &other.nodes[ri]) {
                (Number(a), Number(b)) if a == b => {}
                (Symbol(a), Symbol(b)) if a == b => {}
                (Binary(lop, ll, lr), Binary(rop, rl, rr)) if lop == rop => {
                    stack.push((*lr, *rr));
                    stack.push((*ll, *rl));
                }
                _ => return false,
            }
        }
        true
    }
}
