//! Tests for the expression module

use super::*;
use test_log::test;

fn lit(var: usize) -> Expr {
    Expr::literal(var, true)
}

fn nlit(var: usize) -> Expr {
    Expr::literal(var, false)
}

fn product(lits: &[(usize, bool)]) -> Vec<Literal> {
    lits.iter().map(|&(v, p)| Literal::new(v, p)).collect()
}

#[test]
fn test_constants() {
    assert!(Expr::TRUE.is_true());
    assert!(Expr::FALSE.is_false());
    assert_eq!(Expr::constant(true), Expr::TRUE);
    assert_eq!(Expr::TRUE.as_constant(), Some(true));
    assert_eq!(lit(0).as_constant(), None);
    assert!(Expr::TRUE.evaluate(0));
    assert!(!Expr::FALSE.evaluate(u64::MAX));
    assert_eq!(Expr::TRUE.to_string(), "1");
    assert_eq!(Expr::FALSE.to_string(), "0");
}

#[test]
fn test_and_or_flatten_and_simplify() {
    let nested = Expr::and(vec![lit(0), Expr::and(vec![lit(1), lit(2)]), Expr::TRUE]);
    assert_eq!(nested, Expr::And(vec![lit(0), lit(1), lit(2)]));

    assert_eq!(Expr::and(vec![lit(0), Expr::FALSE]), Expr::FALSE);
    assert_eq!(Expr::or(vec![lit(0), Expr::TRUE]), Expr::TRUE);
    assert_eq!(Expr::or(vec![Expr::FALSE, lit(3)]), lit(3));
    assert_eq!(Expr::and(vec![]), Expr::TRUE);
    assert_eq!(Expr::or(vec![]), Expr::FALSE);
}

#[test]
fn test_not_pushes_to_literals() {
    let expr = Expr::or(vec![Expr::and(vec![lit(0), nlit(1)]), lit(2)]);
    let negated = expr.not();
    assert_eq!(
        negated,
        Expr::And(vec![Expr::Or(vec![nlit(0), lit(1)]), nlit(2)])
    );
    for assignment in 0..8 {
        assert_eq!(negated.evaluate(assignment), !expr.evaluate(assignment));
    }
    assert_eq!(Expr::TRUE.not(), Expr::FALSE);
}

#[test]
fn test_display_precedence() {
    let expr = Expr::or(vec![
        Expr::and(vec![lit(0), nlit(1)]),
        Expr::and(vec![lit(2), Expr::or(vec![lit(3), nlit(4)])]),
    ]);
    assert_eq!(expr.to_string(), "v0 * ~v1 + v2 * (v3 + ~v4)");

    let names = ["a", "b", "c", "d", "e"];
    assert_eq!(
        expr.display_with(&names).to_string(),
        "a * ~b + c * (d + ~e)"
    );
    // Missing names fall back to the index
    assert_eq!(expr.display_with(&["a"]).to_string(), "a * ~v1 + v2 * (v3 + ~v4)");
}

#[test]
fn test_literal_count_depth_variables() {
    let expr = Expr::or(vec![
        Expr::and(vec![lit(0), Expr::or(vec![lit(1), nlit(2)])]),
        nlit(0),
    ]);
    assert_eq!(expr.literal_count(), 4);
    assert_eq!(expr.depth(), 3);
    assert_eq!(expr.variables().into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(Expr::TRUE.literal_count(), 0);
    assert_eq!(lit(5).depth(), 0);
}

#[test]
fn test_sum_of_products_views() {
    let sop = Expr::from_product_terms(vec![product(&[(0, true), (1, false)]), product(&[(2, true)])]);
    assert_eq!(
        sop.as_sum_of_products(),
        Some(vec![product(&[(0, true), (1, false)]), product(&[(2, true)])])
    );
    assert_eq!(Expr::FALSE.as_sum_of_products(), Some(vec![]));
    assert_eq!(Expr::TRUE.as_sum_of_products(), Some(vec![vec![]]));

    let nested = Expr::and(vec![lit(0), Expr::or(vec![lit(1), lit(2)])]);
    assert_eq!(nested.as_sum_of_products(), None);
}

#[test]
fn test_equivalent_to() {
    let lhs = Expr::and(vec![lit(0), Expr::or(vec![lit(1), lit(2)])]);
    let rhs = Expr::from_product_terms(vec![product(&[(0, true), (1, true)]), product(&[(0, true), (2, true)])]);
    assert!(lhs.equivalent_to(&rhs, 3));
    assert!(!lhs.equivalent_to(&lit(0), 3));
}

// ========== Factoring ==========

#[test]
fn test_factor_extracts_common_pair() {
    // a*b*c + a*b*d + e
    let sop = Expr::from_product_terms(vec![
        product(&[(0, true), (1, true), (2, true)]),
        product(&[(0, true), (1, true), (3, true)]),
        product(&[(4, true)]),
    ]);
    let factored = factor(&sop);
    assert_eq!(factored.to_string(), "v0 * v1 * (v2 + v3) + v4");
    assert!(factored.equivalent_to(&sop, 5));
    assert!(factored.literal_count() < sop.literal_count());
}

#[test]
fn test_factor_leaves_single_literal_sharing_alone_by_default() {
    // a*c + a*d + b*c + b*d shares only single literals
    let sop = Expr::from_product_terms(vec![
        product(&[(0, true), (2, true)]),
        product(&[(0, true), (3, true)]),
        product(&[(1, true), (2, true)]),
        product(&[(1, true), (3, true)]),
    ]);
    assert_eq!(factor(&sop), sop);

    let single = factor_with(&sop, &FactorOptions { min_size: 1 });
    assert_eq!(single.to_string(), "v0 * (v2 + v3) + v1 * (v2 + v3)");
    assert!(single.equivalent_to(&sop, 4));
}

#[test]
fn test_factor_prefers_larger_candidate_on_tied_score() {
    // {a,b} appears in 3 terms (score 6), {a,b,c} in 2 terms (score 6)
    let sop = Expr::from_product_terms(vec![
        product(&[(0, true), (1, true), (2, true), (3, true)]),
        product(&[(0, true), (1, true), (2, true), (4, true)]),
        product(&[(0, true), (1, true), (5, true)]),
    ]);
    let factored = factor(&sop);
    assert_eq!(factored.to_string(), "v0 * v1 * v2 * (v3 + v4) + v0 * v1 * v5");
    assert!(factored.equivalent_to(&sop, 6));
}

#[test]
fn test_factor_constants_and_literals() {
    assert_eq!(factor(&Expr::TRUE), Expr::TRUE);
    assert_eq!(factor(&Expr::FALSE), Expr::FALSE);
    assert_eq!(factor(&nlit(3)), nlit(3));
    let single = Expr::and(vec![lit(0), lit(1)]);
    assert_eq!(factor(&single), single);
}

#[test]
fn test_factor_is_idempotent() {
    let inputs = vec![
        Expr::from_product_terms(vec![
            product(&[(0, true), (1, true), (2, true)]),
            product(&[(0, true), (1, true), (3, false)]),
            product(&[(2, true), (3, true), (4, true)]),
            product(&[(2, true), (3, true), (5, true)]),
        ]),
        Expr::from_product_terms(vec![
            product(&[(0, true), (1, true), (2, true), (3, true)]),
            product(&[(0, true), (1, true), (2, true), (4, true)]),
            product(&[(0, true), (1, true), (5, true)]),
        ]),
        Expr::from_product_terms(vec![product(&[(0, true)]), product(&[(1, false)])]),
    ];
    for options in [FactorOptions::default(), FactorOptions { min_size: 1 }] {
        for sop in &inputs {
            let once = factor_with(sop, &options);
            let twice = factor_with(&once, &options);
            assert_eq!(once, twice, "not a fixed point: {}", once);
            assert!(once.equivalent_to(sop, 6));
            assert!(once.literal_count() <= sop.literal_count());
        }
    }
}

#[test]
fn test_factor_absorbs_redundant_terms() {
    // a*b + a*b*c + a*b*d: the longer terms are absorbed by a*b
    let sop = Expr::from_product_terms(vec![
        product(&[(0, true), (1, true)]),
        product(&[(0, true), (1, true), (2, true)]),
        product(&[(0, true), (1, true), (3, true)]),
    ]);
    let factored = factor(&sop);
    assert_eq!(factored, Expr::And(vec![lit(0), lit(1)]));
    assert!(factored.equivalent_to(&sop, 4));
}

#[test]
fn test_factor_inside_non_sop_expression() {
    // x * (a*b*c + a*b*d)
    let inner = Expr::from_product_terms(vec![
        product(&[(0, true), (1, true), (2, true)]),
        product(&[(0, true), (1, true), (3, true)]),
    ]);
    let expr = Expr::and(vec![lit(5), inner]);
    let factored = factor(&expr);
    assert_eq!(factored, Expr::And(vec![lit(5), lit(0), lit(1), Expr::Or(vec![lit(2), lit(3)])]));
    assert!(factored.equivalent_to(&expr, 6));
}
