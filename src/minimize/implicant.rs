//! Implicants and prime implicant generation

use crate::expression::Literal;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// A cube over the function's variables
///
/// Bit `i` of `mask` set means variable `i` is free (don't-care position). For the
/// specified positions, bit `i` of `value` gives the required variable value; free
/// positions are always 0 in `value`. The minterms covered are implied by the cube
/// and enumerated on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Implicant {
    value: u32,
    mask: u32,
    prime: bool,
}

impl Implicant {
    /// The implicant covering exactly one minterm
    pub fn from_minterm(minterm: u32) -> Self {
        Implicant {
            value: minterm,
            mask: 0,
            prime: false,
        }
    }

    /// Specified variable values
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Free variable positions
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Minterms covered, ascending
    pub fn minterms(&self) -> impl Iterator<Item = u32> + '_ {
        // Submasks of `mask` in increasing order
        let mut next = Some(0u32);
        std::iter::from_fn(move || {
            let sub = next?;
            next = (sub != self.mask).then(|| sub.wrapping_sub(self.mask) & self.mask);
            Some(self.value | sub)
        })
    }

    /// Number of minterms covered
    pub fn size(&self) -> u64 {
        1u64 << self.mask.count_ones()
    }

    /// Whether the implicant could not be merged any further
    pub fn is_prime(&self) -> bool {
        self.prime
    }

    /// Whether the cube contains `minterm`
    pub fn covers(&self, minterm: u32) -> bool {
        minterm & !self.mask == self.value
    }

    /// Number of specified (non-free) positions among `num_vars` variables
    pub fn specified(&self, num_vars: usize) -> usize {
        num_vars - self.mask.count_ones() as usize
    }

    /// The product term of this cube, by ascending variable
    pub fn literals(&self, num_vars: usize) -> Vec<Literal> {
        (0..num_vars)
            .filter(|&i| self.mask >> i & 1 == 0)
            .map(|i| Literal::new(i, self.value >> i & 1 == 1))
            .collect()
    }

    /// Cube notation with variable 0 first, e.g. `1-0`
    pub fn pattern(&self, num_vars: usize) -> String {
        (0..num_vars)
            .map(|i| {
                if self.mask >> i & 1 == 1 {
                    '-'
                } else if self.value >> i & 1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }

    /// Combine with a partner that differs only in `bit` (set in the partner)
    fn merge(&self, partner: &Implicant, bit: u32) -> Implicant {
        debug_assert_eq!(self.mask, partner.mask);
        debug_assert_eq!(self.value | bit, partner.value);
        Implicant {
            value: self.value,
            mask: self.mask | bit,
            prime: false,
        }
    }

    /// Sort key giving a stable, readable order of cubes
    pub(crate) fn key(&self) -> (u32, u32) {
        (self.value, self.mask)
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:#b}", self.value, self.mask)
    }
}

/// Generate all prime implicants of the ones-or-don't-care set
///
/// Implicants are grouped by the number of 1s in their value. Each round merges
/// every implicant with partners from the next group that share its mask and differ
/// in exactly one specified bit; implicants that took part in no merge are prime.
/// Duplicates produced by different merge orders are collapsed by keying on
/// `(mask, value)`.
pub(crate) fn prime_implicants(
    num_vars: usize,
    minterms: impl IntoIterator<Item = u32>,
) -> Vec<Implicant> {
    type Group = BTreeMap<(u32, u32), Implicant>;

    let mut groups: Vec<Group> = vec![Group::new(); num_vars + 1];
    for minterm in minterms {
        groups[minterm.count_ones() as usize]
            .insert((0, minterm), Implicant::from_minterm(minterm));
    }

    let mut primes = Vec::new();
    loop {
        let mut next: Vec<Group> = vec![Group::new(); num_vars + 1];
        let mut merged: HashSet<(u32, u32)> = HashSet::new();

        for ones in 0..num_vars {
            let (lower, upper) = (&groups[ones], &groups[ones + 1]);
            if upper.is_empty() {
                continue;
            }
            for (&(mask, value), implicant) in lower {
                for i in 0..num_vars {
                    let bit = 1u32 << i;
                    if (mask | value) & bit != 0 {
                        continue;
                    }
                    if let Some(partner) = upper.get(&(mask, value | bit)) {
                        merged.insert((mask, value));
                        merged.insert((mask, value | bit));
                        next[ones]
                            .entry((mask | bit, value))
                            .or_insert_with(|| implicant.merge(partner, bit));
                    }
                }
            }
        }

        for group in groups {
            for (key, mut implicant) in group {
                if !merged.contains(&key) {
                    implicant.prime = true;
                    primes.push(implicant);
                }
            }
        }

        if next.iter().all(BTreeMap::is_empty) {
            break;
        }
        groups = next;
    }

    primes.sort_by_key(Implicant::key);
    primes
}

/// Minimal position sets that intersect every set of `family`
///
/// Incremental transversal construction: each hitting set that misses the next
/// family member is extended by one of that member's positions, then non-minimal
/// sets are dropped. Sets are kept ordered by `(size, bits)`.
fn minimal_transversals(family: &[u32]) -> Vec<u32> {
    let mut hitting = vec![0u32];
    for &set in family {
        let mut next = Vec::with_capacity(hitting.len());
        for &h in &hitting {
            if h & set != 0 {
                next.push(h);
                continue;
            }
            let mut rest = set;
            while rest != 0 {
                let bit = rest & rest.wrapping_neg();
                next.push(h | bit);
                rest &= rest - 1;
            }
        }
        next.sort_unstable_by_key(|&h| (h.count_ones(), h));
        next.dedup();

        let mut minimal: Vec<u32> = Vec::with_capacity(next.len());
        for h in next {
            if !minimal.iter().any(|&m| m & h == m) {
                minimal.push(h);
            }
        }
        hitting = minimal;
    }
    hitting
}

/// Generate the primes that contain at least one `required` minterm, working from
/// the off-set
///
/// A cube through minterm `m` avoids zero `z` exactly when one of the positions
/// where `m` and `z` differ stays specified. The primes through `m` are therefore
/// the cubes whose specified positions form a minimal transversal of
/// `{m ^ z : z in zeros}`. Cost depends on the number of zeros, not on the number
/// of don't-cares, so this suits sparse tables over many variables.
///
/// Returns the same set as [`prime_implicants`] restricted to primes covering a
/// required minterm, ordered by `(value, mask)`.
pub(crate) fn primes_through(
    num_vars: usize,
    required: &BTreeSet<u32>,
    zeros: &[u32],
) -> Vec<Implicant> {
    let full = if num_vars >= 32 {
        u32::MAX
    } else {
        (1u32 << num_vars) - 1
    };

    let mut found: BTreeMap<(u32, u32), Implicant> = BTreeMap::new();
    for &m in required {
        let mut family: Vec<u32> = zeros.iter().map(|&z| z ^ m).collect();
        family.sort_unstable_by_key(|&d| (d.count_ones(), d));
        family.dedup();
        for fixed in minimal_transversals(&family) {
            let implicant = Implicant {
                value: m & fixed,
                mask: full & !fixed,
                prime: true,
            };
            found.entry(implicant.key()).or_insert(implicant);
        }
    }
    found.into_values().collect()
}
