use crate::{
    error::Error,
    tree::{
        BinaryOp::{self, *},
        Node::*,
        Tree,
    },
};

/// Values a tree can be evaluated to.
pub trait ValueType: Sized + Copy {
    fn from_scalar(val: f64) -> Result<Self, Error>;

    /// Compute the result of `op` on `lhs` and `rhs`.
    fn binary_op(op: BinaryOp, lhs: Self, rhs: Self) -> Result<Self, Error>;
}

impl ValueType for f64 {
    fn from_scalar(val: f64) -> Result<Self, Error> {
        Ok(val)
    }

    fn binary_op(op: BinaryOp, lhs: Self, rhs: Self) -> Result<Self, Error> {
        Ok(match op {
            Add => lhs + rhs,
            Subtract => lhs - rhs,
            Multiply => lhs * rhs,
            Divide => lhs / rhs,
            Pow => f64::powf(lhs, rhs),
            Remainder => lhs - rhs * f64::floor(lhs / rhs),
        })
    }
}

/// This can be used to compute the value of a tree, after assigning values to
/// its symbols.
pub struct Evaluator<'a, T: ValueType> {
    tree: &'a Tree,
    vars: Vec<(String, T)>,
}

impl<'a, T: ValueType> Evaluator<'a, T> {
    pub fn new(tree: &'a Tree) -> Self {
        Evaluator {
            tree,
            vars: Vec::new(),
        }
    }

    /// Set the value of the symbol called `label`. You'd do this for all the
    /// symbols before running the evaluator.
    pub fn set_value(&mut self, label: &str, value: T) {
        for (l, v) in self.vars.iter_mut() {
            if *l == label {
                *v = value;
                return;
            }
        }
        self.vars.push((label.to_string(), value));
    }

    /// Run the evaluator and return the result. `VariableNotFound(label)`
    /// means the symbol `label` hasn't been assigned a value using
    /// `set_value`.
    pub fn run(&self) -> Result<T, Error> {
        self.tree.fold(|_index, node, inputs: &[&T]| match node {
            Number(val) => T::from_scalar(*val),
            Symbol(label) => match self.vars.iter().find(|(l, _v)| l == label) {
                Some((_l, v)) => Ok(*v),
                None => Err(Error::VariableNotFound(label.clone())),
            },
            Binary(op, ..) => T::binary_op(*op, *inputs[0], *inputs[1]),
        })
    }
}

pub type ValueEvaluator<'a> = Evaluator<'a, f64>;
