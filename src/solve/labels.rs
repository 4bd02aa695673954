//! Signal names for inputs, state bits and outputs
//!
//! Unnamed signals get sequential names from a per-group prefix: inputs `x0, x1, ...`,
//! state bits `q0, q1, ...` and outputs `y0, y1, ...`. When a generated name is
//! already taken by a user-supplied one, the next free index is used instead.

use std::collections::HashMap;
use std::sync::Arc;

use super::SolveError;

/// Ordered names with a fast name -> position lookup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet<const PREFIX: char> {
    labels: Vec<Arc<str>>,
    label_map: HashMap<Arc<str>, usize>,
}

impl<const PREFIX: char> LabelSet<PREFIX> {
    /// Generated names for `count` signals
    pub fn generated(count: usize) -> Self {
        let mut set = LabelSet {
            labels: Vec::new(),
            label_map: HashMap::new(),
        };
        set.backfill_to(count);
        set
    }

    /// Use the given names, rejecting duplicates
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, SolveError> {
        let mut set = LabelSet {
            labels: Vec::with_capacity(names.len()),
            label_map: HashMap::with_capacity(names.len()),
        };
        for name in names {
            let label: Arc<str> = Arc::from(name.as_ref());
            if set.label_map.contains_key(&label) {
                return Err(SolveError::DuplicateLabel {
                    name: label.to_string(),
                });
            }
            set.add(label);
        }
        Ok(set)
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no names
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Name at a position
    pub fn get(&self, index: usize) -> Option<&Arc<str>> {
        self.labels.get(index)
    }

    /// All names in order
    pub fn as_slice(&self) -> &[Arc<str>] {
        &self.labels
    }

    /// Position of a name
    pub fn find_position(&self, name: &str) -> Option<usize> {
        self.label_map.get(name).copied()
    }

    fn add(&mut self, label: Arc<str>) {
        self.label_map.insert(Arc::clone(&label), self.labels.len());
        self.labels.push(label);
    }

    /// First free generated index at or after `start`
    fn next_available_index(&self, start: usize) -> usize {
        (start..)
            .find(|n| !self.label_map.contains_key(format!("{}{}", PREFIX, n).as_str()))
            .unwrap_or(start)
    }

    /// Append generated names until there are `target_size`
    pub fn backfill_to(&mut self, target_size: usize) {
        while self.labels.len() < target_size {
            let n = self.next_available_index(self.labels.len());
            self.add(Arc::from(format!("{}{}", PREFIX, n)));
        }
    }

    /// Drop names past `target_size`
    pub fn truncate(&mut self, target_size: usize) {
        for label in self.labels.drain(target_size.min(self.labels.len())..) {
            self.label_map.remove(&label);
        }
    }
}

/// Names of every signal of a circuit
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels {
    /// Primary inputs
    pub inputs: LabelSet<'x'>,
    /// State bits (flip-flops)
    pub states: LabelSet<'q'>,
    /// Primary outputs
    pub outputs: LabelSet<'y'>,
}

impl Labels {
    /// Generated names for every signal
    pub fn generated(inputs: usize, states: usize, outputs: usize) -> Self {
        Labels {
            inputs: LabelSet::generated(inputs),
            states: LabelSet::generated(states),
            outputs: LabelSet::generated(outputs),
        }
    }

    /// User-supplied names
    pub fn from_names<S: AsRef<str>>(inputs: &[S], states: &[S], outputs: &[S]) -> Result<Self, SolveError> {
        Ok(Labels {
            inputs: LabelSet::from_names(inputs)?,
            states: LabelSet::from_names(states)?,
            outputs: LabelSet::from_names(outputs)?,
        })
    }

    /// Pad or cut each group to the given sizes
    pub fn fit(&mut self, inputs: usize, states: usize, outputs: usize) {
        self.inputs.truncate(inputs);
        self.inputs.backfill_to(inputs);
        self.states.truncate(states);
        self.states.backfill_to(states);
        self.outputs.truncate(outputs);
        self.outputs.backfill_to(outputs);
    }

    /// Names of the expression variables: inputs first, then state bits
    pub fn variables(&self) -> Vec<Arc<str>> {
        self.inputs
            .as_slice()
            .iter()
            .chain(self.states.as_slice())
            .cloned()
            .collect()
    }
}
