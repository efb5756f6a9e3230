//! Command line parsing.

use cellgraph_core::CellRef;
use std::path::PathBuf;

use crate::error::{CliError, Result};

pub(crate) const USAGE: &str = "\
Usage: cellgraph [OPTIONS] [CELL=FORMULA]...

Arguments:
  [CELL=FORMULA]...         Formula assignments, applied in order (e.g. B1=A1+1)

Options:
  --rows <N>                Number of rows (overrides config)
  --cols <N>                Number of columns (overrides config)
  --config <FILE>           Load sheet config from TOML file
  --no-default-config       Do not read the per-user config.toml
  -f, --functions <FILE>    Load custom Rhai functions (can be repeated)
  --dump <CELL>             Print a cell's dependency state (can be repeated)
  -o, --output <FILE>       Write the grid as markdown to a file
  -h, --help                Print help";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Run(Options),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Options {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub config: Option<PathBuf>,
    pub no_default_config: bool,
    pub functions_files: Vec<PathBuf>,
    pub dumps: Vec<CellRef>,
    pub output: Option<PathBuf>,
    pub assignments: Vec<(CellRef, String)>,
}

pub(crate) fn parse_args(args: &[String]) -> Result<Command> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "--rows" => {
                i += 1;
                options.rows = Some(parse_number(arg, args.get(i))?);
            }
            "--cols" => {
                i += 1;
                options.cols = Some(parse_number(arg, args.get(i))?);
            }
            "--config" => {
                i += 1;
                options.config = Some(PathBuf::from(value_of(arg, args.get(i))?));
            }
            "--no-default-config" => options.no_default_config = true,
            "-f" | "--functions" => {
                i += 1;
                options
                    .functions_files
                    .push(PathBuf::from(value_of(arg, args.get(i))?));
            }
            "--dump" => {
                i += 1;
                let name = value_of(arg, args.get(i))?;
                let cell_ref =
                    CellRef::from_a1(name).ok_or_else(|| CliError::InvalidCell(name.to_string()))?;
                options.dumps.push(cell_ref);
            }
            "-o" | "--output" => {
                i += 1;
                options.output = Some(PathBuf::from(value_of(arg, args.get(i))?));
            }
            _ if arg.starts_with('-') => return Err(CliError::UnknownOption(arg.to_string())),
            _ => options.assignments.push(parse_assignment(arg)?),
        }
        i += 1;
    }

    Ok(Command::Run(options))
}

fn value_of<'a>(option: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue(option.to_string()))
}

fn parse_number(option: &str, value: Option<&String>) -> Result<usize> {
    let value = value_of(option, value)?;
    value.parse().map_err(|_| CliError::InvalidNumber {
        option: option.to_string(),
        value: value.to_string(),
    })
}

/// Parse `CELL=FORMULA`. A leading `=` on the formula is accepted and dropped.
fn parse_assignment(arg: &str) -> Result<(CellRef, String)> {
    let Some((name, formula)) = arg.split_once('=') else {
        return Err(CliError::InvalidAssignment(arg.to_string()));
    };
    let name = name.trim();
    let cell_ref = CellRef::from_a1(name).ok_or_else(|| CliError::InvalidCell(name.to_string()))?;
    let formula = formula.trim();
    let formula = formula.strip_prefix('=').unwrap_or(formula).trim();
    Ok((cell_ref, formula.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_options(list: &[&str]) -> Options {
        match parse_args(&args(list)).unwrap() {
            Command::Run(options) => options,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_parse_assignments_in_order() {
        let options = run_options(&["A1=1", "B1 = =A1 + 1", "c2="]);
        assert_eq!(options.assignments, vec![
            (CellRef::new(0, 0), "1".to_string()),
            (CellRef::new(0, 1), "A1 + 1".to_string()),
            (CellRef::new(1, 2), String::new()),
        ]);
    }

    #[test]
    fn test_parse_options() {
        let options = run_options(&[
            "--rows", "3", "--cols", "4", "--no-default-config", "-f", "a.rhai", "--functions",
            "b.rhai", "--dump", "B2", "-o", "out.md",
        ]);
        assert_eq!(options.rows, Some(3));
        assert_eq!(options.cols, Some(4));
        assert!(options.no_default_config);
        assert_eq!(options.functions_files, vec![
            PathBuf::from("a.rhai"),
            PathBuf::from("b.rhai")
        ]);
        assert_eq!(options.dumps, vec![CellRef::new(1, 1)]);
        assert_eq!(options.output, Some(PathBuf::from("out.md")));
    }

    #[test]
    fn test_help_short_circuits() {
        assert_eq!(parse_args(&args(&["A1=1", "-h", "--bogus"])), Ok(Command::Help));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_args(&args(&["--rows"])),
            Err(CliError::MissingValue("--rows".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["--cols", "many"])),
            Err(CliError::InvalidNumber {
                option: "--cols".to_string(),
                value: "many".to_string()
            })
        );
        assert_eq!(
            parse_args(&args(&["A1"])),
            Err(CliError::InvalidAssignment("A1".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["1A=3"])),
            Err(CliError::InvalidCell("1A".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["--keymap", "vim"])),
            Err(CliError::UnknownOption("--keymap".to_string()))
        );
    }
}
