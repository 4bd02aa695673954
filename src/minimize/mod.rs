//! Two-level minimization with don't-cares (Quine–McCluskey)
//!
//! A [`Function`] labels minterms of `num_vars` variables as 1 or 0. Every minterm
//! left unlabelled is a don't-care: it may be covered or not, whichever gives the
//! smaller result. This is how untested rows and unreachable state codes of a
//! sequential circuit end up helping the minimizer.
//!
//! [`Function::minimize`] generates prime implicants, then selects a cover
//! essential primes first and greedily after that. Primes come from the classic
//! tabular merging when the off-set is the larger side, and otherwise are expanded
//! from each required minterm against the off-set, so a sparse table over many
//! variables does not pay for its don't-cares. The result is a [`MinimalCover`]
//! which converts to a sum-of-products [`Expr`].
//!
//! # Example
//!
//! ```
//! use logic_probe::minimize::Function;
//!
//! # fn main() -> Result<(), logic_probe::minimize::MinimizeError> {
//! // f(x0, x1, x2) with ones {1, 3}, don't-cares {5, 7}, zeros elsewhere
//! let f = Function::from_sets(3, [1, 3], [5, 7])?;
//! let cover = f.minimize();
//!
//! assert_eq!(cover.to_expr().to_string(), "v0");
//! # Ok(())
//! # }
//! ```

mod covering;
pub mod error;
pub mod excitation;
mod implicant;

pub use error::MinimizeError;
pub use excitation::{acceptable_pairs, required_input, JkInput, JkPair};
pub use implicant::Implicant;

use crate::expression::{Expr, Literal};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Largest number of variables [`Function`] accepts
///
/// Minterm indices are `u32` and a fully specified function holds `2^n` labels.
pub const MAX_VARIABLES: usize = 16;

/// A partially specified boolean function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    num_vars: usize,
    labels: BTreeMap<u32, bool>,
}

impl Function {
    /// A function of `num_vars` variables with every minterm a don't-care
    pub fn new(num_vars: usize) -> Result<Self, MinimizeError> {
        if num_vars > MAX_VARIABLES {
            return Err(MinimizeError::TooManyVariables {
                requested: num_vars,
                max: MAX_VARIABLES,
            });
        }
        Ok(Function {
            num_vars,
            labels: BTreeMap::new(),
        })
    }

    /// Fully specified except for `dont_cares`: `ones` are 1, everything else is 0
    pub fn from_sets(
        num_vars: usize,
        ones: impl IntoIterator<Item = u32>,
        dont_cares: impl IntoIterator<Item = u32>,
    ) -> Result<Self, MinimizeError> {
        let mut function = Function::new(num_vars)?;
        for minterm in ones {
            function.set(minterm, true)?;
        }
        let mut free = BTreeSet::new();
        for minterm in dont_cares {
            function.check(minterm)?;
            free.insert(minterm);
        }
        for minterm in 0..function.num_minterms() {
            if !free.contains(&minterm) && !function.labels.contains_key(&minterm) {
                function.labels.insert(minterm, false);
            }
        }
        Ok(function)
    }

    fn check(&self, minterm: u32) -> Result<(), MinimizeError> {
        if u64::from(minterm) >= self.num_minterms_u64() {
            Err(MinimizeError::MintermOutOfRange {
                minterm,
                num_vars: self.num_vars,
            })
        } else {
            Ok(())
        }
    }

    fn num_minterms_u64(&self) -> u64 {
        1u64 << self.num_vars
    }

    fn num_minterms(&self) -> u32 {
        // num_vars <= MAX_VARIABLES keeps this in range
        self.num_minterms_u64() as u32
    }

    /// Number of variables
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Label a minterm
    ///
    /// Labelling a minterm with the value it already has is accepted; labelling it
    /// with the opposite value is a [`MinimizeError::ConflictingLabel`].
    pub fn set(&mut self, minterm: u32, value: bool) -> Result<(), MinimizeError> {
        self.check(minterm)?;
        match self.labels.get(&minterm) {
            Some(&existing) if existing != value => Err(MinimizeError::ConflictingLabel { minterm }),
            _ => {
                self.labels.insert(minterm, value);
                Ok(())
            }
        }
    }

    /// The label of a minterm, `None` for a don't-care
    pub fn get(&self, minterm: u32) -> Option<bool> {
        self.labels.get(&minterm).copied()
    }

    /// Minterms labelled 1
    pub fn ones(&self) -> impl Iterator<Item = u32> + '_ {
        self.labels.iter().filter(|&(_, &v)| v).map(|(&m, _)| m)
    }

    /// Minterms labelled 0
    pub fn zeros(&self) -> impl Iterator<Item = u32> + '_ {
        self.labels.iter().filter(|&(_, &v)| !v).map(|(&m, _)| m)
    }

    /// Whether `expr` agrees with every labelled minterm
    pub fn is_implemented_by(&self, expr: &Expr) -> bool {
        self.labels
            .iter()
            .all(|(&m, &v)| expr.evaluate(u64::from(m)) == v)
    }

    /// Minimize to a two-level cover
    ///
    /// A function with no minterm labelled 1 minimizes to the empty cover (`false`).
    pub fn minimize(&self) -> MinimalCover {
        let required: BTreeSet<u32> = self.ones().collect();
        if required.is_empty() {
            return MinimalCover {
                num_vars: self.num_vars,
                implicants: Vec::new(),
            };
        }

        let zeros: Vec<u32> = self.zeros().collect();
        let ones_or_free = u64::from(self.num_minterms()) - zeros.len() as u64;
        // Both generators yield the same primes over the required minterms; pick the
        // one that enumerates the smaller side
        let primes = if (zeros.len() as u64) < ones_or_free {
            implicant::primes_through(self.num_vars, &required, &zeros)
        } else {
            let candidates = (0..self.num_minterms()).filter(|m| self.get(*m) != Some(false));
            implicant::prime_implicants(self.num_vars, candidates)
        };
        let selected = covering::select_cover(&primes, &required, self.num_vars);
        debug!(
            "Minimized {} ones / {} zeros over {} variables: {} primes, {} selected",
            required.len(),
            self.labels.len() - required.len(),
            self.num_vars,
            primes.len(),
            selected.len()
        );

        MinimalCover {
            num_vars: self.num_vars,
            implicants: selected.into_iter().map(|i| primes[i].clone()).collect(),
        }
    }
}

/// The selected prime implicants of a minimized function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalCover {
    num_vars: usize,
    implicants: Vec<Implicant>,
}

impl MinimalCover {
    /// Number of variables of the minimized function
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Selected implicants, ordered by `(value, mask)`
    pub fn implicants(&self) -> &[Implicant] {
        &self.implicants
    }

    /// Product terms, one per implicant
    pub fn product_terms(&self) -> Vec<Vec<Literal>> {
        self.implicants
            .iter()
            .map(|imp| imp.literals(self.num_vars))
            .collect()
    }

    /// Total number of literals over all product terms
    pub fn literal_count(&self) -> usize {
        self.implicants
            .iter()
            .map(|imp| imp.specified(self.num_vars))
            .sum()
    }

    /// The cover as a sum-of-products expression
    ///
    /// An empty cover is `false`; an implicant with no specified position is `true`.
    pub fn to_expr(&self) -> Expr {
        Expr::from_product_terms(self.product_terms())
    }
}

/// Minimize `function` straight to a sum-of-products expression
pub fn minimize(function: &Function) -> Expr {
    function.minimize().to_expr()
}
