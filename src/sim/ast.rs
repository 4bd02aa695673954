//! Syntax tree of the circuit description language

/// A signal expression as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalExpr {
    /// A named signal and its byte offset in the source
    Signal(String, usize),
    /// `0` or `1`
    Const(bool),
    Not(Box<SignalExpr>),
    And(Box<SignalExpr>, Box<SignalExpr>),
    Or(Box<SignalExpr>, Box<SignalExpr>),
}

/// One `;`-terminated statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `input a, b, c;`
    Inputs(Vec<(String, usize)>),
    /// `state q = 1;` (initial value defaults to 0)
    State { name: String, at: usize, init: bool },
    /// `output y = expr;`
    Output {
        name: String,
        at: usize,
        expr: SignalExpr,
    },
    /// `jk q = j_expr, k_expr;`
    Jk {
        name: String,
        at: usize,
        j: SignalExpr,
        k: SignalExpr,
    },
}
