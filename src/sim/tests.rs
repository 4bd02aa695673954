//! Tests for simulated circuits

use super::*;
use std::io::Write;
use test_log::test;

const COUNTER: &str = "
# 2-bit counter with enable
input en;
state q0;          # initial value 0
state q1 = 0;
output carry = en * q0 * q1;
jk q0 = en, en;
jk q1 = en * q0, en * q0;
";

#[test]
fn test_parse_counter() {
    let circuit = SimCircuit::parse(COUNTER).unwrap();
    assert_eq!(circuit.dimensions(), Dimensions::new(1, 1, 2).unwrap());
    assert_eq!(circuit.input_names(), &["en"]);
    assert_eq!(circuit.state_names(), &["q0", "q1"]);
    assert_eq!(circuit.output_names(), &["carry"]);
    assert_eq!(circuit.initial_state(), 0);

    let names = circuit.labels().variables();
    let carry = circuit.output(0).unwrap();
    assert_eq!(carry.display_with(&names).to_string(), "en * q0 * q1");
}

#[test]
fn test_excitation_follows_state_order() {
    let circuit = SimCircuit::parse(COUNTER).unwrap();
    let names = circuit.labels().variables();
    let show = |i: usize| {
        circuit.excitation(i).map(|(j, k)| {
            (
                j.display_with(&names).to_string(),
                k.display_with(&names).to_string(),
            )
        })
    };
    assert_eq!(show(0), Some(("en".to_string(), "en".to_string())));
    assert_eq!(
        show(1),
        Some(("en * q0".to_string(), "en * q0".to_string()))
    );
    assert_eq!(show(2), None);

    // jk statements may come in any order
    let circuit = SimCircuit::parse(
        "input a; state p; state r; jk r = a, 0; jk p = 1, a'; output y = p;",
    )
    .unwrap();
    let (j, k) = circuit.excitation(0).unwrap();
    assert_eq!((j, k), (&Expr::TRUE, &Expr::literal(0, false)));
    let (j, k) = circuit.excitation(1).unwrap();
    assert_eq!((j, k), (&Expr::literal(0, true), &Expr::FALSE));
}

#[test]
fn test_counter_counts() {
    let mut circuit: SimCircuit = COUNTER.parse().unwrap();
    let mut seen = Vec::new();
    for _ in 0..4 {
        let obs = circuit.apply_input(1).unwrap();
        seen.push((obs.outputs, obs.state));
    }
    // Carry is sampled before the clock edge that wraps around
    assert_eq!(seen, vec![(0, 1), (0, 2), (0, 3), (1, 0)]);

    let hold = circuit.apply_input(0).unwrap();
    assert_eq!(hold.state, 0);
}

#[test]
fn test_jk_semantics() {
    let circuit = SimCircuit::parse(
        "input j, k;
         state q;
         jk q = j, k;",
    )
    .unwrap();
    // (state, input) -> next; input bit 0 is j, bit 1 is k
    let cases = [
        (0, 0b00, 0), // hold
        (1, 0b00, 1),
        (0, 0b10, 0), // reset
        (1, 0b10, 0),
        (0, 0b01, 1), // set
        (1, 0b01, 1),
        (0, 0b11, 1), // toggle
        (1, 0b11, 0),
    ];
    for (state, input, next) in cases {
        assert_eq!(circuit.step(state, input).state, next, "q={} jk={:02b}", state, input);
    }
}

#[test]
fn test_initial_value_and_reset() {
    let mut circuit = SimCircuit::parse(
        "input t;
         state a = 1;
         state b;
         output y = a' + b;
         jk a = t, t;
         jk b = 0, 1;",
    )
    .unwrap();
    assert_eq!(circuit.initial_state(), 0b01);
    assert_eq!(circuit.observe_state().unwrap(), 0b01);

    let obs = circuit.apply_input(1).unwrap();
    assert_eq!(obs, Observation { outputs: 0, state: 0b00 });
    let obs = circuit.apply_input(0).unwrap();
    assert_eq!(obs.outputs, 1);

    circuit.reset().unwrap();
    assert_eq!(circuit.state(), 0b01);
}

#[test]
fn test_operator_spellings_agree() {
    let a = SimCircuit::parse("input a, b, c; output y = a * ~b + c;").unwrap();
    let b = SimCircuit::parse("input a, b, c; output y = a & !b | c;").unwrap();
    let c = SimCircuit::parse("input a, b, c; output y = (a * b') + (c);").unwrap();
    for input in 0..8 {
        let expected = a.step(0, input).outputs;
        assert_eq!(b.step(0, input).outputs, expected);
        assert_eq!(c.step(0, input).outputs, expected);
    }
}

#[test]
fn test_constants_and_no_inputs() {
    let mut circuit = SimCircuit::parse("state q; output y = 1; jk q = 1, 0;").unwrap();
    assert_eq!(circuit.dimensions().inputs(), 0);
    let obs = circuit.apply_input(0).unwrap();
    assert_eq!(obs, Observation { outputs: 1, state: 1 });
    assert!(matches!(
        circuit.apply_input(1),
        Err(SimError::InputOutOfRange { input: 1, inputs: 0 })
    ));
}

#[test]
fn test_unknown_signal() {
    let err = SimCircuit::parse("input a;\noutput y = a * z;").unwrap_err();
    assert_eq!(
        err,
        ParseCircuitError::UnknownSignal {
            name: "z".to_string(),
            position: 24
        }
    );

    // Outputs cannot feed other expressions
    let err = SimCircuit::parse("input a; output y = a; output z = y;").unwrap_err();
    assert!(matches!(err, ParseCircuitError::UnknownSignal { ref name, .. } if name == "y"));
}

#[test]
fn test_duplicate_signal() {
    let err = SimCircuit::parse("input a, a;").unwrap_err();
    assert!(matches!(err, ParseCircuitError::DuplicateSignal { ref name, position: 9 } if name == "a"));

    let err = SimCircuit::parse("input a; state a; jk a = 0, 0;").unwrap_err();
    assert!(matches!(err, ParseCircuitError::DuplicateSignal { .. }));
}

#[test]
fn test_excitation_errors() {
    let err = SimCircuit::parse("input a; state q;").unwrap_err();
    assert!(matches!(
        err,
        ParseCircuitError::Excitation {
            problem: "has no jk statement",
            ..
        }
    ));

    let err = SimCircuit::parse("input a; jk a = a, a;").unwrap_err();
    assert!(matches!(
        err,
        ParseCircuitError::Excitation {
            problem: "is not a declared state",
            ..
        }
    ));

    let err = SimCircuit::parse("state q; jk q = 1, 1; jk q = 0, 0;").unwrap_err();
    assert!(matches!(
        err,
        ParseCircuitError::Excitation {
            problem: "has more than one jk statement",
            ..
        }
    ));
}

#[test]
fn test_syntax_error() {
    let err = SimCircuit::parse("input a\noutput y = a;").unwrap_err();
    assert!(matches!(err, ParseCircuitError::InvalidSyntax { position: Some(8), .. }));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(COUNTER.as_bytes()).unwrap();
    let circuit = SimCircuit::from_file(file.path()).unwrap();
    assert_eq!(circuit.state_names().len(), 2);

    let missing = SimCircuit::from_file("/definitely/not/here.circuit").unwrap_err();
    assert_eq!(missing.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_explore_counter_circuit() {
    let mut circuit = SimCircuit::parse(COUNTER).unwrap();
    let exploration =
        crate::explore::explore(&mut circuit, crate::explore::ExploreConfig::default()).unwrap();
    assert!(exploration.coverage.is_complete());
    assert_eq!(exploration.table.num_states(), 4);
    assert_eq!(exploration.table.num_tested(), 8);

    // Every recorded row agrees with a fresh evaluation of the circuit
    for row in exploration.table.rows() {
        let state = exploration.table.signature(row.state).unwrap();
        let expected = circuit.step(state, row.input);
        assert_eq!(expected.outputs, row.outputs);
        assert_eq!(Some(expected.state), exploration.table.signature(row.next));
    }
}
