//! Logic Probe - Command Line Interface
//!
//! Explores a simulated JK flip-flop circuit and prints the equations it derives.

use clap::{Parser, ValueEnum};
use logic_probe::expression::FactorOptions;
use logic_probe::{
    analyze, Coverage, ExploreConfig, SimCircuit, SolverConfig, StateEncoding, TruthTable,
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Encoding {
    /// Use the flip-flop values read from the circuit
    Observed,
    /// Number states in discovery order with as few bits as possible
    Discovery,
}

impl From<Encoding> for StateEncoding {
    fn from(val: Encoding) -> Self {
        match val {
            Encoding::Observed => StateEncoding::Observed,
            Encoding::Discovery => StateEncoding::DiscoveryOrder,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "logic-probe")]
#[command(about = "Characterise a JK flip-flop circuit by probing it", long_about = None)]
#[command(version)]
struct Args {
    /// Circuit description file
    #[arg(value_name = "CIRCUIT")]
    circuit: PathBuf,

    /// Cost of a reset relative to one clock edge
    #[arg(long, default_value_t = 5)]
    reset_cost: u32,

    /// Never reset after power-on
    #[arg(long)]
    no_reset: bool,

    /// State numbering used in the equations
    #[arg(long, value_enum, default_value = "observed")]
    encoding: Encoding,

    /// Print the minimal sum of products without factoring
    #[arg(long)]
    no_factor: bool,

    /// Also factor out single shared literals
    #[arg(long)]
    single_literal_factors: bool,

    /// Print the discovered state graph
    #[arg(long)]
    graph: bool,

    /// Write the derived columns as a PLA file
    #[arg(long, value_name = "FILE")]
    pla: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn print_graph(table: &TruthTable, circuit: &SimCircuit) {
    let width = table.dimensions().flip_flops();
    let graph = table.graph();
    println!("States:");
    for node in &graph.nodes {
        println!("  {} = {:0width$b}", node.id, node.signature, width = width);
    }
    println!("Transitions:");
    let inputs = circuit.input_names().len();
    let outputs = circuit.output_names().len();
    for edge in &graph.edges {
        println!(
            "  {} --{:0iw$b}/{:0ow$b}--> {}",
            edge.from,
            edge.input,
            edge.outputs,
            edge.to,
            iw = inputs,
            ow = outputs
        );
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = TermLogger::init(
        log_level(args.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start logging: {}", e);
    }

    let circuit = match SimCircuit::from_file(&args.circuit) {
        Ok(circuit) => circuit,
        Err(e) => {
            eprintln!("Error reading circuit '{}': {}", args.circuit.display(), e);
            process::exit(1);
        }
    };
    let labels = circuit.labels();

    let mut explore_config = ExploreConfig::new().with_reset_cost(args.reset_cost);
    if args.no_reset {
        explore_config = explore_config.without_reset();
    }
    let factor = if args.no_factor {
        None
    } else if args.single_literal_factors {
        Some(FactorOptions { min_size: 1 })
    } else {
        Some(FactorOptions::default())
    };
    let solver_config = SolverConfig {
        encoding: args.encoding.into(),
        factor,
    };

    let analysis = match analyze(circuit.clone(), &explore_config, &solver_config) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let exploration = &analysis.exploration;
    let stats = exploration.stats;

    println!(
        "Explored {} state(s), {} row(s) in {} probe(s) ({} replayed, {} reset(s), {} route(s))",
        exploration.table.num_states(),
        exploration.table.num_tested(),
        stats.probes,
        stats.replays,
        stats.resets,
        stats.plans
    );
    if let Coverage::Partial { stranded } = &exploration.coverage {
        let names: Vec<String> = stranded.iter().map(|s| s.to_string()).collect();
        println!(
            "Coverage is partial: {} untested row(s), stranded state(s) {}",
            exploration.table.num_untested(),
            names.join(", ")
        );
    }

    if args.graph {
        print_graph(&exploration.table, &circuit);
    }

    let solver = analysis.solver().with_labels(labels);
    println!();
    for equation in &analysis.equations {
        println!("{}", solver.format_equation(equation));
    }

    if let Some(ref path) = args.pla {
        if let Err(e) = solver.to_pla_file(path) {
            eprintln!("Error writing PLA file '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}
