//! Display formatting for expressions

use super::{Expr, Literal};
use std::fmt;

/// Context for formatting expressions with minimal parentheses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpContext {
    None,
    And,
}

/// Formats an expression using caller-supplied variable names
///
/// Created by [`Expr::display_with`]. Variables without a name fall back to `v{index}`.
pub struct ExprDisplay<'a, S> {
    expr: &'a Expr,
    names: &'a [S],
}

impl Expr {
    /// Display this expression with named variables
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_probe::expression::Expr;
    ///
    /// let expr = Expr::and(vec![Expr::literal(0, true), Expr::literal(1, false)]);
    /// assert_eq!(expr.display_with(&["a", "q0"]).to_string(), "a * ~q0");
    /// ```
    pub fn display_with<'a, S: AsRef<str>>(&'a self, names: &'a [S]) -> ExprDisplay<'a, S> {
        ExprDisplay { expr: self, names }
    }
}

fn fmt_literal<S: AsRef<str>>(f: &mut fmt::Formatter<'_>, l: Literal, names: &[S]) -> fmt::Result {
    if !l.positive {
        write!(f, "~")?;
    }
    match names.get(l.var) {
        Some(name) => write!(f, "{}", name.as_ref()),
        None => write!(f, "v{}", l.var),
    }
}

fn fmt_with_context<S: AsRef<str>>(
    expr: &Expr,
    f: &mut fmt::Formatter<'_>,
    ctx: OpContext,
    names: &[S],
) -> fmt::Result {
    match expr {
        Expr::Literal(l) => fmt_literal(f, *l, names),
        Expr::And(children) if children.is_empty() => write!(f, "1"),
        Expr::Or(children) if children.is_empty() => write!(f, "0"),

        Expr::And(children) => {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " * ")?;
                }
                fmt_with_context(child, f, OpContext::And, names)?;
            }
            Ok(())
        }

        Expr::Or(children) => {
            // OR needs parens inside AND (lower precedence)
            let needs_parens = ctx == OpContext::And && children.len() > 1;
            if needs_parens {
                write!(f, "(")?;
            }
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " + ")?;
                }
                fmt_with_context(child, f, OpContext::None, names)?;
            }
            if needs_parens {
                write!(f, ")")?;
            }
            Ok(())
        }
    }
}

impl<S: AsRef<str>> fmt::Display for ExprDisplay<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_with_context(self.expr, f, OpContext::None, self.names)
    }
}

/// Formats with `*` for AND, `+` for OR and `~` for NOT, using `v{index}` names
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_with_context::<&str>(self, f, OpContext::None, &[])
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_literal::<&str>(f, *self, &[])
    }
}
