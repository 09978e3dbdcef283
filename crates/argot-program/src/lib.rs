//! Lifecycle glue for programs that read their command line through
//! [`argot`].
//!
//! A program implements [`CliProgram`]; [`launch`] reads the process
//! argument vector, parses it, runs the program body and maps every failure
//! class to its own process status, so shell callers can tell a
//! configuration mistake from bad input from a failing program. The parsing
//! engine itself never terminates the process; all exit decisions live here.

use std::process::ExitCode;

use argot::{DefinitionError, ParsedArgs, Parser};
use tracing_subscriber::EnvFilter;

/// Everything ran to completion.
pub const STATUS_OK: u8 = 0;
/// The program's own option definitions were rejected.
pub const STATUS_DEFINITION_ERROR: u8 = 1;
/// The supplied argument vector did not parse.
pub const STATUS_PARSE_ERROR: u8 = 2;
/// The program body failed.
pub const STATUS_PROGRAM_ERROR: u8 = 3;

/// A command-line program whose arguments are parsed before its body runs.
pub trait CliProgram {
    /// Builds the argument parser. `None` declares a program that takes no
    /// options; it receives the empty [`ParsedArgs`].
    fn build_parser(&self) -> Result<Option<Parser>, DefinitionError>;

    /// The program body, handed the frozen parse result.
    fn run(&mut self, args: ParsedArgs) -> anyhow::Result<()>;
}

/// Parses the process argument vector and runs `program`.
///
/// Intended to be the tail call of `main`:
///
/// ```no_run
/// # use argot::{DefinitionError, ParsedArgs, Parser};
/// # use argot_program::CliProgram;
/// # struct MyProgram;
/// # impl CliProgram for MyProgram {
/// #     fn build_parser(&self) -> Result<Option<Parser>, DefinitionError> { Ok(None) }
/// #     fn run(&mut self, _args: ParsedArgs) -> anyhow::Result<()> { Ok(()) }
/// # }
/// fn main() -> std::process::ExitCode {
///     argot_program::init_tracing();
///     argot_program::launch(MyProgram)
/// }
/// ```
pub fn launch<P: CliProgram>(mut program: P) -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    ExitCode::from(execute(&mut program, &argv))
}

/// Runs `program` against an already-collected argument vector and reports
/// the process status: [`STATUS_DEFINITION_ERROR`] when the parser cannot be
/// built, [`STATUS_PARSE_ERROR`] when `argv` is rejected and
/// [`STATUS_PROGRAM_ERROR`] when the program body fails. Failures are
/// reported on stderr; this function never exits the process.
pub fn execute<P: CliProgram>(program: &mut P, argv: &[String]) -> u8 {
    let parser = match program.build_parser() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            return STATUS_DEFINITION_ERROR;
        }
    };

    let args = match &parser {
        Some(parser) => match parser.parse(argv) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("error: {err}");
                return STATUS_PARSE_ERROR;
            }
        },
        None => ParsedArgs::default(),
    };

    tracing::debug!(parameters = args.parameters().len(), "argument vector parsed");

    match program.run(args) {
        Ok(()) => STATUS_OK,
        Err(err) => {
            eprintln!("error: {err:#}");
            STATUS_PROGRAM_ERROR
        }
    }
}

/// Installs the stderr tracing subscriber, honoring `RUST_LOG` and
/// defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
