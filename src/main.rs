//! `.call` to bytecode compiler CLI.
//!
//! Reads a `.call` script, prints the compiled bytecode to stdout and writes
//! it next to the input as `<name>.calldata`.
//!
//! # Usage
//! ```text
//! callc <input.call>
//! ```
//!
//! # Examples
//! ```text
//! callc swap.call        # writes swap.calldata
//! callc script.txt       # writes script.txt.calldata
//! ```

use callc::compiler::run;
use callc::utils::log;
use callc::{error, info};
use std::env;
use std::process;
use std::sync::atomic::Ordering;

fn main() {
    log::SHOW_TIMESTAMP.store(false, Ordering::Relaxed);

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("callc");

    let input_path = match args.get(1).map(String::as_str) {
        None => {
            print_usage(program_name);
            process::exit(1);
        }
        Some("--help" | "-h") => {
            print_usage(program_name);
            process::exit(0);
        }
        Some(path) => path,
    };

    if let Some(extra) = args.get(2) {
        error!("Unexpected argument: {}\n", extra);
        print_usage(program_name);
        process::exit(1);
    }

    let (program, output) = match run(input_path) {
        Ok(done) => done,
        Err(e) => {
            error!("Compilation failed: {}", e);
            process::exit(1);
        }
    };

    println!("{}", program);

    info!(
        "Output written to: {} ({} records, {} labels)",
        output.display(),
        program.record_count(),
        program.labels().len()
    );
}

const USAGE: &str = "\
Call Script Compiler

USAGE:
    {program} <input.call>

ARGS:
    <input.call>    Script to compile; output goes to <input>.calldata

OPTIONS:
    -h, --help      Print this help message
";

fn print_usage(program: &str) {
    info!("{}", USAGE.replace("{program}", program));
}
