/// Construct a tree from the lisp expression.
///
/// Identifiers become symbols and literals become numbers. `(deriv tree x)`
/// differentiates `tree` with respect to `x`, and `(const value)` turns any
/// numeric Rust expression into a number.
#[macro_export]
macro_rules! expr {
    () => {}; // empty;
    (($($a:tt)*)) => { // Unwrap redundant parens.
        $crate::expr!($($a)*)
    };
    ($a:block) => { // Block expressions.
        $a
    };
    // Derivatives.
    (deriv $tree:tt $var:ident) => {
        $crate::derivative::differentiate($crate::expr!($tree), stringify!($var))
    };
    // Numbers.
    (const $tt:expr) => {
        $crate::tree::Tree::number(($tt) as f64)
    };
    // Binary ops with function names.
    ($binary_op:ident $a:tt $b:tt) => {
        $crate::tree::$binary_op($crate::expr!($a), $crate::expr!($b))
    };
    // Operators.
    (+ $a:tt $b:tt) => {
        $crate::tree::add($crate::expr!($a), $crate::expr!($b))
    };
    (- $a:tt $b:tt) => {
        $crate::tree::sub($crate::expr!($a), $crate::expr!($b))
    };
    (* $a:tt $b:tt) => {
        $crate::tree::mul($crate::expr!($a), $crate::expr!($b))
    };
    (/ $a:tt $b:tt) => {
        $crate::tree::div($crate::expr!($a), $crate::expr!($b))
    };
    (^ $a:tt $b:tt) => {
        $crate::tree::pow($crate::expr!($a), $crate::expr!($b))
    };
    (% $a:tt $b:tt) => {
        $crate::tree::rem($crate::expr!($a), $crate::expr!($b))
    };
    // Numbers
    ($a:literal) => {
        $crate::tree::Tree::number(($a) as f64)
    };
    // Symbols
    ($a:ident) => {
        $crate::tree::Tree::symbol(stringify!($a))
    };
}

/// Assert that the floating point numbers are equal within the given epsilon.
#[macro_export]
macro_rules! assert_float_eq {
    ($a:expr, $b:expr, $eps:expr, $debug:expr) => {{
        // Make variables to avoid evaluating experssions multiple times.
        let a = $a;
        let b = $b;
        let eps = $eps;
        let error = f64::abs(a - b);
        if error > eps {
            eprintln!("{:?}", $debug);
        }
        assert!(
            error <= eps,
            "Assertion failed: |({}) - ({})| = {:e} <= {:e}",
            a,
            b,
            error,
            eps
        );
    }};
    ($a:expr, $b:expr, $eps:expr) => {
        $crate::assert_float_eq!($a, $b, $eps, "")
    };
    ($a:expr, $b:expr) => {
        $crate::assert_float_eq!($a, $b, f64::EPSILON)
    };
}
