//! JK flip-flop excitation
//!
//! A JK flip-flop holds on `J=0,K=0`, resets on `J=0,K=1`, sets on `J=1,K=0` and
//! toggles on `J=1,K=1`. For every observed transition `q -> q'` exactly two of the
//! four `(J, K)` pairs produce it:
//!
//! | q | q' | J | K |
//! |---|----|---|---|
//! | 0 | 0  | 0 | - |
//! | 0 | 1  | 1 | - |
//! | 1 | 0  | - | 1 |
//! | 1 | 1  | - | 0 |
//!
//! so one of `J`, `K` is always a don't-care for that row.

/// The two control inputs of a JK flip-flop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JkPair {
    /// The J (set) input
    pub j: bool,
    /// The K (reset) input
    pub k: bool,
}

/// Selects one of the JK control inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JkInput {
    /// The J (set) input
    J,
    /// The K (reset) input
    K,
}

impl JkPair {
    /// All four input combinations
    pub const ALL: [JkPair; 4] = [
        JkPair { j: false, k: false },
        JkPair { j: false, k: true },
        JkPair { j: true, k: false },
        JkPair { j: true, k: true },
    ];

    /// Next flip-flop value when clocked with these inputs from `current`
    pub fn next_state(self, current: bool) -> bool {
        (self.j && !current) || (!self.k && current)
    }

    /// Value of the selected input
    pub fn get(self, input: JkInput) -> bool {
        match input {
            JkInput::J => self.j,
            JkInput::K => self.k,
        }
    }
}

/// The input pairs that take a flip-flop from `current` to `next`
pub fn acceptable_pairs(current: bool, next: bool) -> impl Iterator<Item = JkPair> {
    JkPair::ALL
        .into_iter()
        .filter(move |pair| pair.next_state(current) == next)
}

/// The value `input` must have for the transition `current -> next`
///
/// `None` means either value works, i.e. the row is a don't-care for that input.
///
/// # Examples
///
/// ```
/// use logic_probe::minimize::{required_input, JkInput};
///
/// assert_eq!(required_input(false, true, JkInput::J), Some(true));
/// assert_eq!(required_input(false, true, JkInput::K), None);
/// assert_eq!(required_input(true, true, JkInput::K), Some(false));
/// ```
pub fn required_input(current: bool, next: bool, input: JkInput) -> Option<bool> {
    let mut values = acceptable_pairs(current, next).map(|pair| pair.get(input));
    let first = values.next()?;
    if values.all(|v| v == first) {
        Some(first)
    } else {
        None
    }
}
