use crate::{
    error::Error,
    eval::{Evaluator, ValueType},
    tree::BinaryOp::{self, *},
};
use inari::Interval;

/// Evaluates a tree over intervals. The result encloses every value the tree
/// can take when each symbol takes any value in its interval.
pub type IntervalEvaluator<'a> = Evaluator<'a, Interval>;

/// Create an interval from two bounds, in either order.
pub fn interval(mut lower: f64, mut upper: f64) -> Result<Interval, Error> {
    if upper < lower {
        (lower, upper) = (upper, lower);
    }
    inari::interval!(lower, upper).map_err(|_| Error::InvalidInterval)
}

fn integer_exponent(exponent: Interval) -> Option<i32> {
    let value = exponent.inf();
    if exponent.is_singleton()
        && value.fract() == 0.
        && value >= i32::MIN as f64
        && value <= i32::MAX as f64
    {
        Some(value as i32)
    } else {
        None
    }
}

impl ValueType for Interval {
    fn from_scalar(val: f64) -> Result<Self, Error> {
        interval(val, val)
    }

    fn binary_op(op: BinaryOp, lhs: Self, rhs: Self) -> Result<Self, Error> {
        Ok(match op {
            Add => lhs + rhs,
            Subtract => lhs - rhs,
            Multiply => lhs * rhs,
            Divide => lhs / rhs,
            Pow => match integer_exponent(rhs) {
                // Special case for squaring to get tighter intervals.
                Some(2) => lhs.sqr(),
                // `pow` is only defined for non-negative bases.
                Some(n) => lhs.powi(n),
                None => lhs.pow(rhs),
            },
            Remainder => lhs - rhs * (lhs / rhs).floor(),
        })
    }
}
