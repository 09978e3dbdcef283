//! Schema-driven command-line argument parsing.
//!
//! A caller declares its options up front, registers them with a [`Parser`],
//! and hands the parser the raw argument vector. Each option is a set of
//! short (`-s`) and long (`--long-name`) aliases, a flag/value mode and an
//! optional value validator. The result is a frozen [`ParsedArgs`]: option values
//! readable through any alias, flag-presence checks and indexed positional
//! parameters.
//!
//! Two invocation surfaces are supported. In the mixed form all options come
//! first and `--` starts the parameter tail; in the pure-parameter form a
//! bare first token makes the whole vector parameters with no `--` needed.
//! Grouped short flags (`-abc`) and inline `--name=value` are deliberately
//! not supported: values always arrive as the following token.
//!
//! ```
//! use argot::{OptionDef, Parser};
//!
//! let mut parser = Parser::new();
//! parser.add_option(OptionDef::builder().alias("output").alias("o").build()?)?;
//! parser.add_option(OptionDef::builder().alias("verbose").alias("v").flag().build()?)?;
//!
//! let argv: Vec<String> = ["-v", "--output", "out.txt", "--", "input.txt"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let args = parser.parse(&argv)?;
//!
//! assert_eq!(args.option("o"), Some("out.txt"));
//! assert!(args.flag("verbose"));
//! assert_eq!(args.parameter(0), Some("input.txt"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Configuration mistakes ([`DefinitionError`]) and bad user input
//! ([`ParseError`]) are distinct error types, so callers can map them to
//! different process exit statuses. The engine itself never logs, performs
//! no I/O and never terminates the process.

mod error;
mod option;
mod parser;
mod result;
mod usage;

pub use error::{DefinitionError, ParseError};
pub use option::{OptionDef, OptionDefBuilder, ValueValidator};
pub use parser::Parser;
pub use result::{OptionValue, ParsedArgs};
