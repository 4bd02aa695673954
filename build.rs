fn main() {
    // Compile the circuit description grammar (src/sim/circuit.lalrpop)
    lalrpop::process_root().unwrap();

    println!("cargo:rerun-if-changed=src/sim/circuit.lalrpop");
}
