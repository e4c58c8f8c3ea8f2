//! Command-line front-end for the word equation solver.
//!
//! # Usage
//!
//! Solve a single equation:
//! ```bash
//! cargo run --example solve -- --consts "{a}" --vars "{u, v}" "u a v = v a u"
//! ```
//!
//! Read equations from stdin, one per line, and write the derivation trees:
//! ```bash
//! cargo run --example solve -- --consts "{a, b}" --vars "{u}" --dot out < equations.txt
//! dot -Tpng out/0.dot -o out/0.png
//! ```

use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use weq_rs::dot::DotWriter;
use weq_rs::options::{PrintOptions, SolveOptions};
use weq_rs::solver::Solver;
use weq_rs::trace::NoTrace;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Equation to solve; read from stdin (one per line) if omitted.
    #[arg(value_name = "EQUATION")]
    equation: Option<String>,

    /// Constant alphabet.
    #[arg(long, value_name = "ALPHABET", default_value = "{}")]
    consts: String,

    /// Variable alphabet.
    #[arg(long, value_name = "ALPHABET")]
    vars: String,

    /// Algorithm mode: "Standard" or "Finite".
    #[arg(long, value_name = "MODE", default_value = "Standard")]
    mode: String,

    /// Depth bound (0 means the default of 100).
    #[arg(long, value_name = "INT", default_value = "0")]
    cycle_range: usize,

    /// Split quadratic equations by equidecomposability.
    #[arg(long)]
    split: bool,

    /// Enable length analysis.
    #[arg(long)]
    length: bool,

    /// Explore all branches after a solution is found.
    #[arg(long)]
    full_graph: bool,

    /// Evaluate all members of a split system.
    #[arg(long)]
    full_system: bool,

    /// Directory for DOT files of the derivation trees.
    #[arg(long, value_name = "DIR")]
    dot: Option<PathBuf>,

    /// Show rule paths in node labels.
    #[arg(long)]
    show_paths: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    info!("args = {:?}", args);

    let options = SolveOptions::default()
        .with_algorithm_mode(args.mode.clone())
        .with_cycle_range(args.cycle_range)
        .with_split_by_equidecomposability(args.split)
        .with_length_analysis(args.length)
        .with_full_graph(args.full_graph)
        .with_full_system(args.full_system);
    let print_options = PrintOptions::default().with_paths(args.show_paths);

    let equations: Vec<String> = match &args.equation {
        Some(eq) => vec![eq.clone()],
        None => io::stdin()
            .lock()
            .lines()
            .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
            .collect::<Result<_, _>>()?,
    };

    if let Some(dir) = &args.dot {
        fs::create_dir_all(dir)?;
    }

    for (i, text) in equations.iter().enumerate() {
        let mut solver = Solver::new(&args.consts, &args.vars, text, print_options.clone(), options.clone())?;
        let report = match &args.dot {
            Some(dir) => {
                let path = dir.join(format!("{}.dot", i));
                let mut writer = DotWriter::new(BufWriter::new(File::create(&path)?));
                let report = solver.solve(&mut writer)?;
                info!("Wrote '{}'", path.display());
                report
            }
            None => solver.solve(&mut NoTrace)?,
        };

        println!("{} : {}", text, report);
        if let Some(solutions) = solver.solutions() {
            println!("  solution: {}", solutions);
        }
    }

    println!("\nAll done in {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
