//! Parsing support for circuit descriptions

use super::ast::Statement;
use super::error::ParseCircuitError;
use lalrpop_util::ParseError;
use std::sync::Arc;

// Lalrpop-generated parser module (generated in OUT_DIR at build time)
#[allow(clippy::all)]
mod parser_impl {
    #![allow(clippy::all)]
    #![allow(dead_code)]
    #![allow(unused_variables)]
    #![allow(unused_imports)]
    #![allow(non_snake_case)]
    #![allow(non_camel_case_types)]
    #![allow(non_upper_case_globals)]
    include!(concat!(env!("OUT_DIR"), "/sim/circuit.rs"));
}

/// Blank out `#` comments, keeping byte offsets intact
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_comment = false;
    for c in input.chars() {
        match c {
            '\n' => {
                in_comment = false;
                out.push(c);
            }
            '#' => {
                in_comment = true;
                out.push(' ');
            }
            c if in_comment => out.extend(std::iter::repeat(' ').take(c.len_utf8())),
            c => out.push(c),
        }
    }
    out
}

/// Parse a circuit description into statements
pub(crate) fn parse_statements(input: &str) -> Result<Vec<Statement>, ParseCircuitError> {
    let source = strip_comments(input);
    parser_impl::CircuitParser::new()
        .parse(&source)
        .map_err(|e| {
            let position = match &e {
                ParseError::InvalidToken { location } => Some(*location),
                ParseError::UnrecognizedEof { location, .. } => Some(*location),
                ParseError::UnrecognizedToken { token, .. } => Some(token.0),
                ParseError::ExtraToken { token } => Some(token.0),
                ParseError::User { .. } => None,
            };
            ParseCircuitError::InvalidSyntax {
                message: Arc::from(e.to_string().as_str()),
                position,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ast::SignalExpr;

    #[test]
    fn test_strip_comments_keeps_offsets() {
        let text = "input a; # comment\nstate q;";
        let stripped = strip_comments(text);
        assert_eq!(stripped.len(), text.len());
        assert!(!stripped.contains('#'));
        assert_eq!(stripped.find("state"), text.find("state"));
    }

    #[test]
    fn test_precedence() {
        let stmts = parse_statements("output y = a + b * ~c';").unwrap();
        let Statement::Output { expr, .. } = &stmts[0] else {
            panic!("expected an output statement");
        };
        // a + (b * ~(c'))
        let SignalExpr::Or(_, rhs) = expr else {
            panic!("expected OR at the top");
        };
        let SignalExpr::And(_, not) = rhs.as_ref() else {
            panic!("expected AND under OR");
        };
        assert!(matches!(not.as_ref(), SignalExpr::Not(inner) if matches!(inner.as_ref(), SignalExpr::Not(_))));
    }

    #[test]
    fn test_syntax_error_position() {
        let err = parse_statements("input a;\noutput y = a + ;").unwrap_err();
        match err {
            ParseCircuitError::InvalidSyntax { position, .. } => assert_eq!(position, Some(24)),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
