pub mod derivative;
pub mod error;
pub mod eval;
pub mod interval;
pub mod prune;
pub mod tree;

mod fold;
mod io;
mod macros;


pub use derivative::differentiate;
pub use error::Error;
pub use eval::{Evaluator, ValueEvaluator, ValueType};
pub use interval::{IntervalEvaluator, interval};
pub use prune::Pruner;
pub use tree::{BinaryOp, MaybeTree, Node, Operand, Tree, add, div, mul, pow, rem, sub};
