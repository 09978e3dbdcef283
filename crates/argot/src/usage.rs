//! Usage text rendering for a parser's registered options.

use crate::option::OptionDef;
use crate::parser::Parser;

impl Parser {
    /// Renders a usage message for this parser's registered options.
    ///
    /// Options are listed in registration order, two columns, with the
    /// description column aligned on the widest invocation spelling.
    /// One-character aliases render as `-x`, longer ones as `--xx`, and
    /// value options carry a `<VALUE>` marker.
    pub fn usage(&self, program: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("Usage: {program} [OPTIONS] [--] [PARAM ...]\n"));
        out.push_str(&format!("       {program} [PARAM ...]\n"));

        let options = self.options();
        if options.is_empty() {
            return out;
        }

        out.push_str("\nOptions:\n");
        let rows: Vec<(String, &str)> = options
            .iter()
            .map(|option| (format_invocations(option), option.description().unwrap_or("")))
            .collect();
        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        for (left, help) in rows {
            if help.is_empty() {
                out.push_str(&format!("  {left}\n"));
            } else {
                out.push_str(&format!("  {left:width$}  {help}\n"));
            }
        }
        out
    }
}

fn format_invocations(option: &OptionDef) -> String {
    let mut names: Vec<String> = option
        .aliases()
        .map(|alias| {
            if alias.len() == 1 {
                format!("-{alias}")
            } else {
                format!("--{alias}")
            }
        })
        .collect();
    // Short spellings first; the sort is stable so ties keep their
    // registration order.
    names.sort_by_key(String::len);
    let mut left = names.join(", ");
    if !option.is_flag() {
        left.push_str(" <VALUE>");
    }
    left
}
