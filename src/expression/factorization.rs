//! Algebraic factoring of sum-of-products expressions
//!
//! Factoring rewrites a sum of product terms into a multi-level expression with
//! fewer literals, e.g. `a*b*c + a*b*d` becomes `a*b*(c + d)`.
//!
//! The greedy loop works on a set of product terms:
//! 1. Every pairwise intersection of terms is a candidate factor; intersections of
//!    candidates with further terms are candidates too, so common sub-conjunctions
//!    shared by three or more terms are found even when no pair alone isolates them.
//! 2. A candidate of size `s` contained in `n` terms scores `s × n`. The best
//!    candidate must score more than 1; ties prefer the larger candidate and then
//!    the lexicographically smallest literal set, so results are deterministic.
//! 3. The terms containing the candidate are divided by it, the quotients and the
//!    remaining terms are factored recursively, and the result is
//!    `candidate * (quotients) + rest`.
//! 4. When no candidate qualifies the terms are emitted unchanged.
//!
//! Expressions that are not a plain sum of products are factored in place: every
//! group of product terms under an OR node is factored, other children are
//! recursed into. Output of [`factor`] is therefore a fixed point of [`factor`].

use super::{Expr, Literal};
use std::collections::BTreeSet;

/// Tuning knobs for [`factor_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorOptions {
    /// Smallest common sub-conjunction worth extracting
    ///
    /// The default of 2 extracts only multi-literal factors. Setting it to 1 also
    /// pulls out single shared literals, which gives deeper but smaller trees.
    pub min_size: usize,
}

impl Default for FactorOptions {
    fn default() -> Self {
        FactorOptions { min_size: 2 }
    }
}

/// A product term as a sorted set of literals
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ProductTerm {
    literals: BTreeSet<Literal>,
}

impl ProductTerm {
    fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        ProductTerm {
            literals: literals.into_iter().collect(),
        }
    }

    fn len(&self) -> usize {
        self.literals.len()
    }

    fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    fn contains(&self, other: &ProductTerm) -> bool {
        other.literals.is_subset(&self.literals)
    }

    fn intersect(&self, other: &ProductTerm) -> ProductTerm {
        ProductTerm::new(self.literals.intersection(&other.literals).copied())
    }

    fn divide(&self, divisor: &ProductTerm) -> ProductTerm {
        ProductTerm::new(self.literals.difference(&divisor.literals).copied())
    }

    fn to_expr(&self) -> Expr {
        Expr::and(self.literals.iter().map(|l| Expr::Literal(*l)).collect())
    }
}

/// A common sub-conjunction and the number of terms containing it
#[derive(Debug, Clone)]
struct Candidate {
    term: ProductTerm,
    count: usize,
}

impl Candidate {
    fn score(&self) -> usize {
        self.term.len() * self.count
    }
}

/// Remove duplicate terms and terms that contain another term (`a + a*b = a`)
fn absorb(mut terms: Vec<ProductTerm>) -> Vec<ProductTerm> {
    terms.sort_by_key(ProductTerm::len);
    let mut kept: Vec<ProductTerm> = Vec::with_capacity(terms.len());
    for term in terms {
        if !kept.iter().any(|k| term.contains(k)) {
            kept.push(term);
        }
    }
    kept.sort();
    kept
}

/// Find the highest scoring common sub-conjunction, if any scores above 1
fn best_candidate(terms: &[ProductTerm], min_size: usize) -> Option<Candidate> {
    if terms.len() < 2 {
        return None;
    }
    let min_size = min_size.max(1);

    let mut seen: BTreeSet<ProductTerm> = BTreeSet::new();
    let mut frontier: Vec<ProductTerm> = Vec::new();
    for (i, left) in terms.iter().enumerate() {
        for right in &terms[i + 1..] {
            let common = left.intersect(right);
            if common.len() >= min_size && seen.insert(common.clone()) {
                frontier.push(common);
            }
        }
    }
    while let Some(candidate) = frontier.pop() {
        for term in terms {
            let common = candidate.intersect(term);
            if common.len() >= min_size && seen.insert(common.clone()) {
                frontier.push(common);
            }
        }
    }

    // `seen` iterates in ascending literal order, so only a strictly better
    // (score, size) may replace the current best.
    let mut best: Option<Candidate> = None;
    for term in seen {
        let count = terms.iter().filter(|t| t.contains(&term)).count();
        let candidate = Candidate { term, count };
        if candidate.count < 2 || candidate.score() <= 1 {
            continue;
        }
        let better = match &best {
            None => true,
            Some(b) => (candidate.score(), candidate.term.len()) > (b.score(), b.term.len()),
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

/// Factor a set of product terms
fn factorise_terms(terms: Vec<ProductTerm>, options: &FactorOptions) -> Expr {
    if terms.iter().any(ProductTerm::is_empty) {
        return Expr::TRUE;
    }
    let terms = absorb(terms);
    if terms.is_empty() {
        return Expr::FALSE;
    }

    let Some(candidate) = best_candidate(&terms, options.min_size) else {
        return Expr::or(terms.iter().map(ProductTerm::to_expr).collect());
    };

    let (quotients, rest): (Vec<_>, Vec<_>) =
        terms.into_iter().partition(|t| t.contains(&candidate.term));
    let quotients: Vec<ProductTerm> = quotients
        .iter()
        .map(|t| t.divide(&candidate.term))
        .collect();

    let mut product: Vec<Expr> = candidate
        .term
        .literals
        .iter()
        .map(|l| Expr::Literal(*l))
        .collect();
    product.push(factorise_terms(quotients, options));
    let factored = Expr::and(product);

    if rest.is_empty() {
        factored
    } else {
        Expr::or(vec![factored, factorise_terms(rest, options)])
    }
}

/// Factor an expression with the default options
///
/// # Examples
///
/// ```
/// use logic_probe::expression::{factor, Expr, Literal};
///
/// let (a, b, c, d) = (0, 1, 2, 3);
/// let sop = Expr::from_product_terms(vec![
///     vec![Literal::positive(a), Literal::positive(b), Literal::positive(c)],
///     vec![Literal::positive(a), Literal::positive(b), Literal::positive(d)],
/// ]);
///
/// let factored = factor(&sop);
/// assert_eq!(factored.to_string(), "v0 * v1 * (v2 + v3)");
/// assert!(factored.equivalent_to(&sop, 4));
/// ```
pub fn factor(expr: &Expr) -> Expr {
    factor_with(expr, &FactorOptions::default())
}

/// Factor an expression
///
/// The result is logically equivalent to the input and never has more literals.
pub fn factor_with(expr: &Expr, options: &FactorOptions) -> Expr {
    match expr {
        Expr::Literal(_) => expr.clone(),
        Expr::And(children) => Expr::and(children.iter().map(|c| factor_with(c, options)).collect()),
        Expr::Or(children) => {
            let mut products = Vec::new();
            let mut others = Vec::new();
            for child in children {
                match child.as_product() {
                    Some(literals) => products.push(ProductTerm::new(literals)),
                    None => others.push(child),
                }
            }

            let absorbed = absorb(products.clone());
            if absorbed.len() == products.len()
                && best_candidate(&absorbed, options.min_size).is_none()
            {
                // Nothing to factor at this level; keep the child order
                return Expr::or(children.iter().map(|c| factor_with(c, options)).collect());
            }

            let mut result: Vec<Expr> = others.into_iter().map(|c| factor_with(c, options)).collect();
            result.push(factorise_terms(products, options));
            Expr::or(result)
        }
    }
}
