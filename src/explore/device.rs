//! The device-under-test interface

use crate::table::Dimensions;

/// What the device reports after one clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Observation {
    /// Output vector sampled before the clock edge, bit `i` is output `i`
    pub outputs: u64,
    /// Flip-flop values after the clock edge, bit `i` is flip-flop `i`
    pub state: u64,
}

/// A synchronous circuit that can be driven and observed
///
/// Implementations wrap real hardware (GPIO, a logic analyser, a JTAG boundary
/// scan) or a simulation such as [`SimCircuit`](crate::sim::SimCircuit). The
/// explorer assumes the device is deterministic: the same input in the same
/// flip-flop state always gives the same outputs and next state.
pub trait Device {
    /// Error raised by the underlying transport
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of inputs, outputs and flip-flops
    fn dimensions(&self) -> Dimensions;

    /// Read the current flip-flop values without clocking
    fn observe_state(&mut self) -> Result<u64, Self::Error>;

    /// Drive `input`, sample the outputs and apply one clock edge
    fn apply_input(&mut self, input: u32) -> Result<Observation, Self::Error>;

    /// Return the device to its power-on state
    fn reset(&mut self) -> Result<(), Self::Error>;
}

impl<D: Device + ?Sized> Device for &mut D {
    type Error = D::Error;

    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }

    fn observe_state(&mut self) -> Result<u64, Self::Error> {
        (**self).observe_state()
    }

    fn apply_input(&mut self, input: u32) -> Result<Observation, Self::Error> {
        (**self).apply_input(input)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        (**self).reset()
    }
}
