//! Evaluation and equivalence checking for expressions

use super::Expr;

impl Expr {
    /// Evaluate under an assignment where bit `i` holds the value of variable `i`
    ///
    /// Variables at index 64 and above read as `false`.
    pub fn evaluate(&self, assignment: u64) -> bool {
        match self {
            Expr::Literal(l) => l.evaluate(assignment),
            Expr::And(children) => children.iter().all(|c| c.evaluate(assignment)),
            Expr::Or(children) => children.iter().any(|c| c.evaluate(assignment)),
        }
    }

    /// Exhaustively compare two expressions over the first `num_vars` variables
    ///
    /// Runs in `O(2^num_vars)`; meant for the small functions this crate deals with
    /// and for tests.
    pub fn equivalent_to(&self, other: &Expr, num_vars: usize) -> bool {
        let rows = 1u64 << num_vars.min(63);
        (0..rows).all(|assignment| self.evaluate(assignment) == other.evaluate(assignment))
    }
}
