//! Prime implicant chart reduction

use super::implicant::Implicant;
use log::trace;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Select a subset of `primes` covering every minterm in `required`
///
/// Essential primes (the only cover of some uncovered minterm) are taken first,
/// repeatedly, until none is left. The rest is covered greedily: the prime covering
/// the most uncovered minterms wins, then the one with fewest specified positions,
/// then the lowest `(value, mask)`. Primes that cover no required minterm never take
/// part. Returns indices into `primes`.
pub(crate) fn select_cover(primes: &[Implicant], required: &BTreeSet<u32>, num_vars: usize) -> Vec<usize> {
    let candidates: Vec<usize> = (0..primes.len())
        .filter(|&i| required.iter().any(|&m| primes[i].covers(m)))
        .collect();

    let mut uncovered = required.clone();
    let mut selected: Vec<usize> = Vec::new();

    let take = |index: usize, uncovered: &mut BTreeSet<u32>, selected: &mut Vec<usize>| {
        uncovered.retain(|&m| !primes[index].covers(m));
        selected.push(index);
    };

    // Essential primes
    loop {
        let essential = uncovered.iter().find_map(|&m| {
            let mut covering = candidates.iter().filter(|&&i| primes[i].covers(m));
            match (covering.next(), covering.next()) {
                (Some(&only), None) => Some(only),
                _ => None,
            }
        });
        match essential {
            Some(index) if !selected.contains(&index) => {
                trace!("essential prime {}", primes[index].pattern(num_vars));
                take(index, &mut uncovered, &mut selected);
            }
            // A selected prime covers all its minterms, so this cannot repeat
            Some(_) | None => break,
        }
    }

    // Greedy completion
    while !uncovered.is_empty() {
        let best = candidates
            .iter()
            .copied()
            .filter(|i| !selected.contains(i))
            .max_by_key(|&i| {
                let gain = uncovered.iter().filter(|&&m| primes[i].covers(m)).count();
                (
                    gain,
                    Reverse(primes[i].specified(num_vars)),
                    Reverse(primes[i].key()),
                )
            });
        match best {
            Some(index) => {
                trace!("greedy prime {}", primes[index].pattern(num_vars));
                take(index, &mut uncovered, &mut selected);
            }
            // Every required minterm is covered by some prime, so this is unreachable
            None => break,
        }
    }

    selected.sort_by_key(|&i| primes[i].key());
    selected
}
