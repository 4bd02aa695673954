//! Tests for the explorer and route planner

use super::*;
use crate::table::{Dimensions, TableError};
use std::error::Error;
use test_log::test;

#[derive(Debug)]
struct Unplugged;

impl fmt::Display for Unplugged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device unplugged")
    }
}

impl std::error::Error for Unplugged {}

/// `(state, input) -> (outputs, next state)`
type Transition = Box<dyn Fn(u64, u32) -> (u64, u64)>;

/// A Mealy machine with knobs for misbehaving
struct ModelDevice {
    dims: Dimensions,
    init: u64,
    state: u64,
    transition: Transition,
    probes: usize,
    resets: usize,
    fail_after: Option<usize>,
    corrupt_after: Option<usize>,
    reset_drift: bool,
}

impl ModelDevice {
    fn new(
        dims: (usize, usize, usize),
        transition: impl Fn(u64, u32) -> (u64, u64) + 'static,
    ) -> Self {
        ModelDevice {
            dims: Dimensions::new(dims.0, dims.1, dims.2).unwrap(),
            init: 0,
            state: 0,
            transition: Box::new(transition),
            probes: 0,
            resets: 0,
            fail_after: None,
            corrupt_after: None,
            reset_drift: false,
        }
    }
}

impl Device for ModelDevice {
    type Error = Unplugged;

    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn observe_state(&mut self) -> Result<u64, Unplugged> {
        Ok(self.state)
    }

    fn apply_input(&mut self, input: u32) -> Result<Observation, Unplugged> {
        if self.fail_after.is_some_and(|n| self.probes >= n) {
            return Err(Unplugged);
        }
        let (mut outputs, next) = (self.transition)(self.state, input);
        self.probes += 1;
        if self.corrupt_after.is_some_and(|n| self.probes > n) {
            outputs ^= 1;
        }
        self.state = next;
        Ok(Observation {
            outputs,
            state: next,
        })
    }

    fn reset(&mut self) -> Result<(), Unplugged> {
        self.resets += 1;
        self.state = if self.reset_drift && self.resets > 1 {
            self.init ^ 1
        } else {
            self.init
        };
        Ok(())
    }
}

/// 2-bit counter; input bit 0 clears it, output is the carry (state 3)
fn clear_counter() -> ModelDevice {
    ModelDevice::new((1, 1, 2), |state, input| {
        let carry = u64::from(state == 3);
        let next = if input & 1 == 1 { 0 } else { (state + 1) % 4 };
        (carry, next)
    })
}

/// Input 0 falls into state 1, which never leaves
fn trap() -> ModelDevice {
    ModelDevice::new((1, 1, 1), |state, input| {
        let next = if state == 1 || input == 0 { 1 } else { 0 };
        (state, next)
    })
}

fn assert_table_matches(exploration: &Exploration, model: &ModelDevice) {
    for row in exploration.table.rows() {
        let signature = exploration.table.signature(row.state).unwrap();
        let (outputs, next) = (model.transition)(signature, row.input);
        assert_eq!(row.outputs, outputs, "outputs of {} on {}", row.state, row.input);
        assert_eq!(exploration.table.signature(row.next), Some(next));
    }
}

// ========== Route planner ==========

/// States A, B, C, D with C -0-> D -0-> A; A and B untested
fn chain_table() -> (TruthTable, [StateId; 4]) {
    let mut table = TruthTable::new(Dimensions::new(1, 1, 2).unwrap());
    let ids = [0, 1, 2, 3].map(|sig| table.intern_state(sig).unwrap().0);
    let [a, _b, c, d] = ids;
    table.record(c, 0, 0, d).unwrap();
    table.record(c, 1, 0, c).unwrap();
    table.record(d, 0, 0, a).unwrap();
    table.record(d, 1, 0, d).unwrap();
    (table, ids)
}

#[test]
fn test_plan_prefers_walking_when_reset_is_expensive() {
    let (table, [a, _, c, d]) = chain_table();
    let plan = pathfind::plan(&table, c, a, Costs { reset: Some(5) }).unwrap();
    assert_eq!(
        plan.steps,
        vec![
            Step::Apply {
                from: c,
                input: 0,
                to: d
            },
            Step::Apply {
                from: d,
                input: 0,
                to: a
            },
        ]
    );
    assert_eq!(plan.target, a);
    assert_eq!(plan.input, 0);
    assert_eq!(plan.cost, 3);
    assert!(!plan.uses_reset());
}

#[test]
fn test_plan_walks_from_origin_through_known_edges() {
    // A -0-> B -1-> C with only C untested; D is a dead end
    let mut table = TruthTable::new(Dimensions::new(1, 1, 2).unwrap());
    let [a, b, c, d] = [0, 1, 2, 3].map(|sig| table.intern_state(sig).unwrap().0);
    table.record(a, 0, 0, b).unwrap();
    table.record(a, 1, 0, a).unwrap();
    table.record(b, 0, 0, b).unwrap();
    table.record(b, 1, 0, c).unwrap();
    table.record(d, 0, 0, d).unwrap();
    table.record(d, 1, 0, d).unwrap();

    let route = vec![
        Step::Apply {
            from: a,
            input: 0,
            to: b,
        },
        Step::Apply {
            from: b,
            input: 1,
            to: c,
        },
    ];

    let plan = pathfind::plan(&table, a, a, Costs { reset: Some(5) }).unwrap();
    assert_eq!(plan.steps, route);
    assert_eq!((plan.target, plan.input), (c, 0));
    assert_eq!(plan.cost, 3);
    assert!(!plan.uses_reset());

    // From the dead end the only way back is a reset, then the same walk
    let plan = pathfind::plan(&table, d, a, Costs { reset: Some(5) }).unwrap();
    let mut expected = vec![Step::Reset];
    expected.extend(route);
    assert_eq!(plan.steps, expected);
    assert_eq!(plan.cost, 8);
    assert_eq!(plan.resets, 1);
}

#[test]
fn test_plan_resets_when_cheaper() {
    let (table, [a, _, c, _]) = chain_table();
    let plan = pathfind::plan(&table, c, a, Costs { reset: Some(1) }).unwrap();
    assert_eq!(plan.steps, vec![Step::Reset]);
    assert_eq!(plan.target, a);
    assert_eq!(plan.cost, 2);
    assert_eq!(plan.resets, 1);
}

#[test]
fn test_plan_tie_prefers_fewer_resets() {
    let (table, [a, _, c, _]) = chain_table();
    let plan = pathfind::plan(&table, c, a, Costs { reset: Some(2) }).unwrap();
    assert_eq!(plan.cost, 3);
    assert_eq!(plan.resets, 0);
    assert_eq!(plan.steps.len(), 2);
}

#[test]
fn test_plan_without_route_is_none() {
    let mut table = TruthTable::new(Dimensions::new(1, 1, 2).unwrap());
    let (a, _) = table.intern_state(0).unwrap();
    let (c, _) = table.intern_state(2).unwrap();
    table.record(c, 0, 0, c).unwrap();
    table.record(c, 1, 0, c).unwrap();

    assert!(pathfind::plan(&table, c, a, Costs { reset: None }).is_none());
    let plan = pathfind::plan(&table, c, a, Costs { reset: Some(7) }).unwrap();
    assert_eq!(plan.cost, 8);
    assert!(pathfind::plan(&table, StateId::new(9), a, Costs { reset: Some(1) }).is_none());
}

#[test]
fn test_plan_ties_broken_by_state_index() {
    let mut table = TruthTable::new(Dimensions::new(1, 1, 2).unwrap());
    let (x, _) = table.intern_state(0).unwrap();
    let (y, _) = table.intern_state(1).unwrap();
    let (z, _) = table.intern_state(2).unwrap();
    table.record(x, 0, 0, z).unwrap();
    table.record(x, 1, 0, y).unwrap();

    let plan = pathfind::plan(&table, x, x, Costs { reset: Some(5) }).unwrap();
    assert_eq!(plan.target, y);
    assert_eq!(
        plan.steps,
        vec![Step::Apply {
            from: x,
            input: 1,
            to: y
        }]
    );
}

#[test]
fn test_plan_for_live_state_is_a_single_probe() {
    let mut table = TruthTable::new(Dimensions::new(2, 1, 1).unwrap());
    let (s, _) = table.intern_state(0).unwrap();
    table.record(s, 0, 0, s).unwrap();
    let plan = pathfind::plan(&table, s, s, Costs { reset: Some(5) }).unwrap();
    assert!(plan.steps.is_empty());
    assert_eq!((plan.target, plan.input, plan.cost), (s, 1, 1));
}

// ========== Explorer ==========

#[test]
fn test_explore_clear_counter() {
    let model = clear_counter();
    let reference = clear_counter();
    let exploration = explore(model, ExploreConfig::default()).unwrap();

    assert!(exploration.coverage.is_complete());
    assert_eq!(exploration.table.num_states(), 4);
    assert_eq!(exploration.table.num_tested(), 8);
    assert_eq!(exploration.table.num_untested(), 0);
    assert_eq!(exploration.origin, StateId::new(0));
    assert_eq!(
        exploration.stats,
        ExploreStats {
            probes: 14,
            new_rows: 8,
            replays: 6,
            resets: 1,
            plans: 3,
        }
    );
    assert_table_matches(&exploration, &reference);
}

#[test]
fn test_expensive_reset_is_still_used_when_it_is_the_only_route() {
    let config = ExploreConfig {
        reset_cost: u32::MAX,
        ..ExploreConfig::default()
    };
    let exploration = explore(trap(), config).unwrap();
    assert!(exploration.coverage.is_complete());
    assert_eq!(exploration.stats.resets, 2);
}

#[test]
fn test_trap_state_without_reset_is_partial() {
    let config = ExploreConfig {
        allow_reset: false,
        reset_on_start: false,
        ..ExploreConfig::default()
    };
    let exploration = explore(trap(), config).unwrap();
    assert_eq!(
        exploration.coverage,
        Coverage::Partial {
            stranded: vec![StateId::new(0)]
        }
    );
    assert_eq!(exploration.stats.resets, 0);
    assert!(exploration.table.is_tested(StateId::new(0), 0));
    assert!(!exploration.table.is_tested(StateId::new(0), 1));
}

#[test]
fn test_trap_state_with_reset_is_complete() {
    let exploration = explore(trap(), ExploreConfig::default()).unwrap();
    assert!(exploration.coverage.is_complete());
    assert_eq!(exploration.table.num_tested(), 4);
    // One reset at start, one to escape the trap
    assert_eq!(exploration.stats.resets, 2);
    assert_table_matches(&exploration, &trap());
}

#[test]
fn test_phases_step_by_step() {
    let config = ExploreConfig {
        allow_reset: false,
        reset_on_start: false,
        ..ExploreConfig::default()
    };
    let mut explorer = Explorer::new(trap(), config).unwrap();
    assert_eq!(explorer.phase(), Phase::Walk);

    let phases: Vec<Phase> = (0..6).map(|_| explorer.step().unwrap()).collect();
    assert_eq!(
        phases,
        vec![
            Phase::Walk,
            Phase::Walk,
            Phase::Walk,
            Phase::Pathfind,
            Phase::Done,
            Phase::Done
        ]
    );
    assert_eq!(explorer.live(), StateId::new(1));
    assert_eq!(explorer.stats().probes, 3);
    assert_eq!(Phase::Pathfind.to_string(), "PATHFIND");
}

#[test]
fn test_non_deterministic_device_is_detected() {
    let mut model = clear_counter();
    model.corrupt_after = Some(5);
    let err = explore(model, ExploreConfig::default()).unwrap_err();
    match err {
        ExploreError::Consistency(c) => {
            assert_eq!(c.state, StateId::new(0));
            assert_eq!(c.input, 0);
            assert_eq!(c.recorded.0 ^ c.observed.0, 1);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_reset_divergence_is_detected() {
    let mut model = trap();
    model.reset_drift = true;
    let err = explore(model, ExploreConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        ExploreError::ResetDiverged {
            expected: 0,
            observed: 1
        }
    ));
}

#[test]
fn test_device_error_propagates() {
    let mut model = clear_counter();
    model.fail_after = Some(2);
    let err = explore(model, ExploreConfig::default()).unwrap_err();
    assert!(matches!(err, ExploreError::Device(_)));
    assert_eq!(err.source().unwrap().to_string(), "device unplugged");
}

#[test]
fn test_explorer_over_borrowed_device() {
    let mut model = clear_counter();
    let exploration = explore(&mut model, ExploreConfig::default()).unwrap();
    assert!(exploration.coverage.is_complete());
    assert_eq!(model.probes, exploration.stats.probes);
    assert_eq!(model.resets, 1);
}

#[test]
fn test_config_builders() {
    let config = ExploreConfig::new()
        .with_reset_cost(9)
        .without_reset()
        .with_reset_on_start(false);
    assert_eq!(config.reset_cost, 9);
    assert!(!config.allow_reset);
    assert!(!config.reset_on_start);
    assert_eq!(config.costs(), Costs { reset: None });
    assert_eq!(ExploreConfig::new().costs(), Costs { reset: Some(5) });
}

#[test]
fn test_io_error_conversion() {
    let err: std::io::Error = ExploreError::ResetDiverged {
        expected: 0,
        observed: 0b10,
    }
    .into();
    assert_eq!(err.kind(), std::io::ErrorKind::Other);
    assert!(err.to_string().contains("power-on state"));

    let err: std::io::Error = ExploreError::Table(TableError::UnknownState {
        state: StateId::new(7),
    })
    .into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}
