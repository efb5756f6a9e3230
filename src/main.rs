//! cellgraph - apply formula assignments to a grid, recalculate, print the result

mod cli;
mod default_config;
mod error;
mod report;

use anyhow::Context;
use cellgraph_core::{Recalc, Sheet, SheetConfig};
use cellgraph_engine::RhaiEvaluator;
use std::env;
use std::fs;
use std::process::ExitCode;

use cli::{Command, Options};

fn print_usage() {
    eprintln!("{}", cli::USAGE);
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match cli::parse_args(&args) {
        Ok(Command::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(options)) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> anyhow::Result<ExitCode> {
    let config = load_config(&options)?;
    let evaluator = load_evaluator(&options)?;
    let mut sheet = Sheet::from_config(&config, evaluator)?;

    for (cell_ref, formula) in &options.assignments {
        sheet
            .set_cell(cell_ref, formula)
            .with_context(|| format!("Cannot set {} to '{}'", cell_ref, formula))?;
    }

    if let Recalc::Cyclic(blocked) = sheet.detect_cycle_and_recompute()? {
        let cells: Vec<String> = blocked.iter().map(|c| c.to_string()).collect();
        eprintln!("Circular dependency detected: {}", cells.join(", "));
        return Ok(ExitCode::FAILURE);
    }

    for cell_ref in &options.dumps {
        print!("{}", sheet.cell(cell_ref)?.debug_string());
    }

    if let Some(output_path) = &options.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("Cannot create {}", output_path.display()))?;
        report::write_markdown(&mut file, &sheet)?;
        println!("Exported to {}", output_path.display());
    } else if options.dumps.is_empty() {
        report::write_markdown(&mut std::io::stdout().lock(), &sheet)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(options: &Options) -> anyhow::Result<SheetConfig> {
    let path =
        default_config::resolve_config_path(options.config.as_ref(), options.no_default_config);
    let mut config = match path {
        Some(path) => SheetConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SheetConfig::default(),
    };
    if let Some(rows) = options.rows {
        config.rows = rows;
    }
    if let Some(cols) = options.cols {
        config.cols = cols;
    }
    Ok(config)
}

fn load_evaluator(options: &Options) -> anyhow::Result<RhaiEvaluator> {
    if options.functions_files.is_empty() {
        return Ok(RhaiEvaluator::new());
    }

    let mut script = String::new();
    for path in &options.functions_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read functions file {}", path.display()))?;
        script.push_str(&content);
        script.push('\n');
    }
    RhaiEvaluator::with_functions(&script).context("Error in custom functions")
}
