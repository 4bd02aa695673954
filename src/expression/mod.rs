//! Boolean expression trees over numbered variables
//!
//! An [`Expr`] is kept in negation normal form: negation only ever appears on a
//! [`Literal`], and the only compound nodes are n-ary [`Expr::And`] and [`Expr::Or`].
//! The empty conjunction is the constant `true` and the empty disjunction is the
//! constant `false`, so constants need no variant of their own.
//!
//! Variables are plain indices. Variable `i` is bit `i` of the assignment passed to
//! [`Expr::evaluate`]; the solver numbers primary inputs first and state bits after
//! them, and callers give them names only when printing (see [`Expr::display_with`]).
//!
//! # Example
//!
//! ```
//! use logic_probe::expression::{Expr, Literal};
//!
//! let a = Expr::from(Literal::positive(0));
//! let b = Expr::from(Literal::negative(1));
//! let expr = Expr::or(vec![Expr::and(vec![a.clone(), b]), Expr::FALSE]);
//!
//! assert_eq!(expr.to_string(), "v0 * ~v1");
//! assert!(expr.evaluate(0b01));
//! assert!(!expr.evaluate(0b11));
//! ```

mod display;
mod eval;
pub mod factorization;

pub use display::ExprDisplay;
pub use factorization::{factor, factor_with, FactorOptions};

use std::collections::BTreeSet;

/// A variable or its complement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    /// Variable index
    pub var: usize,
    /// `false` for the complemented variable
    pub positive: bool,
}

impl Literal {
    /// Create a literal with the given polarity
    pub fn new(var: usize, positive: bool) -> Self {
        Literal { var, positive }
    }

    /// The uncomplemented variable
    pub fn positive(var: usize) -> Self {
        Literal::new(var, true)
    }

    /// The complemented variable
    pub fn negative(var: usize) -> Self {
        Literal::new(var, false)
    }

    /// The same variable with the opposite polarity
    pub fn negate(self) -> Self {
        Literal::new(self.var, !self.positive)
    }

    /// Value of the literal under an assignment (bit `var` of `assignment`)
    pub fn evaluate(self, assignment: u64) -> bool {
        let bit = self.var < 64 && (assignment >> self.var) & 1 == 1;
        bit == self.positive
    }
}

/// Boolean expression in negation normal form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A single literal
    Literal(Literal),
    /// Conjunction of the children; empty means `true`
    And(Vec<Expr>),
    /// Disjunction of the children; empty means `false`
    Or(Vec<Expr>),
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Expr::Literal(literal)
    }
}

/// Bottom-up view of a node, used by [`Expr::fold`]
#[derive(Debug)]
pub enum ExprNode<T> {
    /// A literal leaf
    Literal(Literal),
    /// An AND node with its folded children
    And(Vec<T>),
    /// An OR node with its folded children
    Or(Vec<T>),
}

impl Expr {
    /// The constant `true`
    pub const TRUE: Expr = Expr::And(Vec::new());
    /// The constant `false`
    pub const FALSE: Expr = Expr::Or(Vec::new());

    /// A constant expression
    pub fn constant(value: bool) -> Self {
        if value {
            Expr::TRUE
        } else {
            Expr::FALSE
        }
    }

    /// A literal expression
    pub fn literal(var: usize, positive: bool) -> Self {
        Expr::Literal(Literal::new(var, positive))
    }

    /// Conjunction with light simplification
    ///
    /// Nested conjunctions are flattened, `true` children are dropped, a `false`
    /// child makes the whole conjunction `false` and a single survivor is returned
    /// unwrapped. Child order is otherwise preserved.
    pub fn and(children: Vec<Expr>) -> Self {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Expr::And(grandchildren) => flat.extend(grandchildren),
                c if c.is_false() => return Expr::FALSE,
                c => flat.push(c),
            }
        }
        if flat.len() == 1 {
            flat.pop().unwrap_or(Expr::TRUE)
        } else {
            Expr::And(flat)
        }
    }

    /// Disjunction with light simplification
    ///
    /// The dual of [`Expr::and`].
    pub fn or(children: Vec<Expr>) -> Self {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Expr::Or(grandchildren) => flat.extend(grandchildren),
                c if c.is_true() => return Expr::TRUE,
                c => flat.push(c),
            }
        }
        if flat.len() == 1 {
            flat.pop().unwrap_or(Expr::FALSE)
        } else {
            Expr::Or(flat)
        }
    }

    /// Complement, pushed down to the literals (De Morgan)
    pub fn not(&self) -> Self {
        match self {
            Expr::Literal(l) => Expr::Literal(l.negate()),
            Expr::And(children) => Expr::or(children.iter().map(Expr::not).collect()),
            Expr::Or(children) => Expr::and(children.iter().map(Expr::not).collect()),
        }
    }

    /// Whether this is the constant `true`
    pub fn is_true(&self) -> bool {
        matches!(self, Expr::And(c) if c.is_empty())
    }

    /// Whether this is the constant `false`
    pub fn is_false(&self) -> bool {
        matches!(self, Expr::Or(c) if c.is_empty())
    }

    /// The constant value, if this expression is syntactically a constant
    pub fn as_constant(&self) -> Option<bool> {
        if self.is_true() {
            Some(true)
        } else if self.is_false() {
            Some(false)
        } else {
            None
        }
    }

    /// Fold the tree bottom-up
    pub fn fold<T>(&self, f: &impl Fn(ExprNode<T>) -> T) -> T {
        match self {
            Expr::Literal(l) => f(ExprNode::Literal(*l)),
            Expr::And(children) => f(ExprNode::And(
                children.iter().map(|c| c.fold(f)).collect(),
            )),
            Expr::Or(children) => f(ExprNode::Or(children.iter().map(|c| c.fold(f)).collect())),
        }
    }

    /// Number of literal occurrences, the cost measure used by factoring
    pub fn literal_count(&self) -> usize {
        self.fold(&|node| match node {
            ExprNode::Literal(_) => 1,
            ExprNode::And(counts) | ExprNode::Or(counts) => counts.into_iter().sum(),
        })
    }

    /// Depth of the tree (a literal or constant has depth 0)
    pub fn depth(&self) -> usize {
        self.fold(&|node| match node {
            ExprNode::Literal(_) => 0,
            ExprNode::And(depths) | ExprNode::Or(depths) => {
                depths.into_iter().max().map_or(0, |d| d + 1)
            }
        })
    }

    /// Variables mentioned anywhere in the expression
    pub fn variables(&self) -> BTreeSet<usize> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<usize>) {
        match self {
            Expr::Literal(l) => {
                vars.insert(l.var);
            }
            Expr::And(children) | Expr::Or(children) => {
                for child in children {
                    child.collect_variables(vars);
                }
            }
        }
    }

    /// The literals of a product term, or `None` if this is not a single product
    ///
    /// `true` is the empty product.
    pub fn as_product(&self) -> Option<Vec<Literal>> {
        match self {
            Expr::Literal(l) => Some(vec![*l]),
            Expr::And(children) => children
                .iter()
                .map(|c| match c {
                    Expr::Literal(l) => Some(*l),
                    _ => None,
                })
                .collect(),
            Expr::Or(_) => None,
        }
    }

    /// The product terms of a sum-of-products, or `None` if this is not one
    ///
    /// `false` is the empty sum.
    pub fn as_sum_of_products(&self) -> Option<Vec<Vec<Literal>>> {
        match self {
            Expr::Or(children) => children.iter().map(Expr::as_product).collect(),
            other => other.as_product().map(|p| vec![p]),
        }
    }

    /// Build a sum-of-products from product terms
    pub fn from_product_terms<I, P>(terms: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = Literal>,
    {
        Expr::or(
            terms
                .into_iter()
                .map(|term| Expr::and(term.into_iter().map(Expr::Literal).collect()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests;
