use crate::tree::{BinaryOp, Node::*, Tree};

impl std::fmt::Display for Tree {
    /// Render the expression infix. An input is wrapped in parentheses only
    /// when it binds strictly weaker than its parent operator, so inputs of
    /// equal precedence are never wrapped, even when the parent isn't
    /// associative: `a - (b - c)` renders as `a - b - c`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        enum Token {
            Open,
            Close,
            Glyph(BinaryOp),
            NodeIndex(usize),
        }
        use Token::*;
        // Tokens are popped in the order they are written, so the inputs of
        // an operator are pushed in reverse.
        let mut stack = vec![NodeIndex(self.root_index())];
        let push_input = |stack: &mut Vec<Token>, parent: BinaryOp, input: usize| {
            if self.node(input).precedence() < parent.precedence() {
                stack.push(Close);
                stack.push(NodeIndex(input));
                stack.push(Open);
            } else {
                stack.push(NodeIndex(input));
            }
        };
        while let Some(token) = stack.pop() {
            match token {
                Open => write!(f, "(")?,
                Close => write!(f, ")")?,
                Glyph(op) => write!(f, " {} ", op.glyph())?,
                NodeIndex(index) => match self.node(index) {
                    Number(val) => write!(f, "{}", val)?,
                    Symbol(name) => write!(f, "{}", name)?,
                    Binary(op, lhs, rhs) => {
                        push_input(&mut stack, *op, *rhs);
                        stack.push(Glyph(*op));
                        push_input(&mut stack, *op, *lhs);
                    }
                },
            }
        }
        Ok(())
    }
}
