//! Reference program for the argot parsing engine.
//!
//! Echoes its positional parameters, optionally repeated or uppercased, as
//! plain lines or a JSON report. It exists to exercise the whole
//! definition/parse/run pipeline from an end-to-end test, including the
//! three-way exit-status contract of `argot-program`.

use std::process::ExitCode;

use anyhow::Context;
use argot::{DefinitionError, OptionDef, ParsedArgs, Parser};
use argot_program::CliProgram;
use serde::Serialize;

const PROGRAM: &str = "argot";

fn build_parser() -> Result<Parser, DefinitionError> {
    let mut parser = Parser::new();
    parser.add_option(
        OptionDef::builder()
            .alias("format")
            .alias("f")
            .description("Output format: plain or json")
            .validator(|value| matches!(value, "plain" | "json"))
            .build()?,
    )?;
    parser.add_option(
        OptionDef::builder()
            .alias("repeat")
            .alias("r")
            .description("Echo every parameter this many times")
            .validator(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
            .build()?,
    )?;
    parser.add_option(
        OptionDef::builder()
            .alias("upper")
            .alias("u")
            .flag()
            .description("Uppercase parameters before echoing")
            .build()?,
    )?;
    parser.add_option(
        OptionDef::builder()
            .alias("help")
            .alias("h")
            .flag()
            .description("Show this message")
            .build()?,
    )?;
    Ok(parser)
}

#[derive(Serialize)]
struct Report {
    format: String,
    repeat: u32,
    upper: bool,
    lines: Vec<String>,
}

struct EchoProgram;

impl CliProgram for EchoProgram {
    fn build_parser(&self) -> Result<Option<Parser>, DefinitionError> {
        build_parser().map(Some)
    }

    fn run(&mut self, args: ParsedArgs) -> anyhow::Result<()> {
        if args.flag("help") {
            print!("{}", build_parser()?.usage(PROGRAM));
            return Ok(());
        }

        let format = args.option("format").unwrap_or("plain").to_string();
        let repeat: u32 = args
            .option("repeat")
            .unwrap_or("1")
            .parse()
            .context("repeat count out of range")?;
        let upper = args.flag("upper");

        if args.parameters().is_empty() {
            anyhow::bail!("nothing to echo; pass at least one parameter");
        }

        let mut lines = Vec::new();
        for parameter in args.parameters() {
            let line = if upper {
                parameter.to_uppercase()
            } else {
                parameter.clone()
            };
            for _ in 0..repeat {
                lines.push(line.clone());
            }
        }

        tracing::debug!(count = lines.len(), %format, "echoing parameters");

        if format == "json" {
            let report = Report {
                format,
                repeat,
                upper,
                lines,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for line in &lines {
                println!("{line}");
            }
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    argot_program::init_tracing();
    argot_program::launch(EchoProgram)
}
