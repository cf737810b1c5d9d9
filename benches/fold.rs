use criterion::{Criterion, criterion_group, criterion_main};
use std::{convert::Infallible, hint::black_box};
use symfold::{BinaryOp, Error, MaybeTree, Node, Tree, ValueEvaluator, add, expr, mul};

/// A long chain of alternating sums and products over `x` and `y`.
fn polynomial_chain(len: usize) -> Tree {
    let mut tree: MaybeTree = expr!(x);
    for i in 0..len {
        tree = if i % 2 == 0 {
            add(tree, expr!(* y (const i as f64)))
        } else {
            mul(tree, expr!(+ x 1))
        };
    }
    tree.unwrap()
}

/// A tower of squares, where every level is shared by both inputs of the next.
fn shared_tower(height: usize) -> Tree {
    let mut nodes = vec![Node::Symbol("x".to_string()), Node::Number(1.)];
    for _ in 0..height {
        let prev = nodes.len() - 1;
        nodes.push(Node::Binary(BinaryOp::Multiply, prev, prev));
        let square = nodes.len() - 1;
        nodes.push(Node::Binary(BinaryOp::Add, square, 0));
    }
    Tree::from_nodes(nodes).unwrap()
}

fn b_differentiate(c: &mut Criterion) {
    let tree = polynomial_chain(2048);
    c.bench_function("differentiate-chain", |b| {
        b.iter(|| -> Result<Tree, Error> { black_box(&tree).differentiate("x") })
    });
    let tree = shared_tower(512);
    c.bench_function("differentiate-shared", |b| {
        b.iter(|| -> Result<Tree, Error> { black_box(&tree).differentiate("x") })
    });
}

fn b_evaluate(c: &mut Criterion) {
    let tree = polynomial_chain(2048).differentiate("y").unwrap();
    let mut eval = ValueEvaluator::new(&tree);
    c.bench_function("evaluate-derivative", |b| {
        b.iter(|| {
            eval.set_value("x", black_box(0.5));
            eval.set_value("y", black_box(0.25));
            eval.run().unwrap()
        })
    });
}

fn b_count(c: &mut Criterion) {
    let tree = shared_tower(512);
    c.bench_function("fold-count-shared", |b| {
        b.iter(|| {
            black_box(&tree).fold(|_, _, inputs: &[&f64]| -> Result<f64, Infallible> {
                Ok(1. + inputs.iter().map(|v| **v).sum::<f64>())
            })
        })
    });
}

criterion_group!(benches, b_differentiate, b_evaluate, b_count);
criterion_main!(benches);
