//! Option registry and the argument-vector state machine.

use std::collections::{BTreeMap, HashMap};

use crate::error::{DefinitionError, ParseError};
use crate::option::{OptionDef, option_name};
use crate::result::{ArgsWriter, ParsedArgs};

/// Accumulates option definitions and parses argument vectors against them.
///
/// Registration and parsing are separate phases: every [`add_option`]
/// failure is a [`DefinitionError`] and surfaces before any vector is
/// consumed, while [`parse`] only ever reports [`ParseError`]. A parser is
/// built once and may be reused across `parse` calls; `parse` takes `&self`
/// and is a pure function of the registry and the vector.
///
/// The supported command-line surface:
///
/// ```text
/// prog [ (--long-name [value] | -s [value])... ] [--] [param ...]
/// prog param ...
/// ```
///
/// All options come before positional parameters. The `--` separator starts
/// the parameter tail; it is not needed when the very first token is already
/// a non-option shape, in which case the whole vector is parameters.
///
/// [`add_option`]: Self::add_option
/// [`parse`]: Self::parse
#[derive(Debug, Default)]
pub struct Parser {
    options: Vec<OptionDef>,
    alias_index: HashMap<String, usize>,
}

/// Token-loop state. `ExpectValue` carries the pending option's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pre,
    ExpectValue(usize),
    PostOption,
    Params,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option definition.
    ///
    /// Fails when any alias is already mapped to a previously registered
    /// option; in that case the registry is left untouched, so none of the
    /// rejected option's aliases become reachable.
    pub fn add_option(&mut self, option: OptionDef) -> Result<(), DefinitionError> {
        for alias in option.aliases() {
            if self.alias_index.contains_key(alias) {
                return Err(DefinitionError::DuplicateAlias(alias.to_string()));
            }
        }
        let id = self.options.len();
        for alias in option.aliases() {
            self.alias_index.insert(alias.to_string(), id);
        }
        self.options.push(option);
        Ok(())
    }

    pub(crate) fn options(&self) -> &[OptionDef] {
        &self.options
    }

    /// Parses an argument vector (without the program name) into a frozen
    /// [`ParsedArgs`].
    ///
    /// Tokens are classified left to right: option names, option values, the
    /// `--` separator, or positional parameters. A bare first token switches
    /// the whole vector into parameter mode; a bare token after options have
    /// started is an error unless `--` came first. A value option repeated
    /// in one vector keeps its last value.
    pub fn parse(&self, argv: &[String]) -> Result<ParsedArgs, ParseError> {
        // Keyed by registration index so the validation pass below visits
        // options in a reproducible order.
        let mut values: BTreeMap<usize, Option<String>> = BTreeMap::new();
        let mut parameters: Vec<String> = Vec::new();
        let mut state = State::Pre;

        for arg in argv {
            let arg = arg.as_str();
            state = match state {
                State::Pre | State::PostOption => {
                    if arg == "--" {
                        State::Params
                    } else if let Some(name) = option_name(arg) {
                        let id = *self
                            .alias_index
                            .get(name)
                            .ok_or_else(|| ParseError::UnknownOption(name.to_string()))?;
                        if self.options[id].is_flag() {
                            values.insert(id, None);
                            State::PostOption
                        } else {
                            State::ExpectValue(id)
                        }
                    } else if state == State::Pre {
                        // A bare leading token puts the whole vector into
                        // parameter mode; no option parsing after this.
                        parameters.push(arg.to_string());
                        State::Params
                    } else {
                        return Err(ParseError::InvalidToken(arg.to_string()));
                    }
                }
                State::ExpectValue(id) => {
                    // Consumed verbatim, whatever its shape.
                    values.insert(id, Some(arg.to_string()));
                    State::PostOption
                }
                State::Params => {
                    parameters.push(arg.to_string());
                    State::Params
                }
            };
        }

        if let State::ExpectValue(id) = state {
            return Err(ParseError::MissingValue {
                aliases: self.options[id].joined_aliases(),
            });
        }

        let mut writer = ArgsWriter::default();
        for (&id, value) in &values {
            let option = &self.options[id];
            if let Some(value) = value {
                if !option.is_flag() && !option.accepts(value) {
                    return Err(ParseError::InvalidValue {
                        aliases: option.joined_aliases(),
                    });
                }
            }
            writer.record_option(option, value.clone());
        }
        for parameter in parameters {
            writer.record_parameter(parameter);
        }
        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::OptionValue;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn option(aliases: &[&str]) -> OptionDef {
        let mut builder = OptionDef::builder();
        for alias in aliases {
            builder = builder.alias(*alias);
        }
        builder.build().unwrap()
    }

    fn flag(aliases: &[&str]) -> OptionDef {
        let mut builder = OptionDef::builder().flag();
        for alias in aliases {
            builder = builder.alias(*alias);
        }
        builder.build().unwrap()
    }

    fn fixture() -> Parser {
        let mut parser = Parser::new();
        parser.add_option(option(&["opt", "o"])).unwrap();
        parser.add_option(flag(&["flag", "f"])).unwrap();
        parser
    }

    #[test]
    fn empty_vector_yields_empty_result() {
        let args = fixture().parse(&[]).unwrap();
        assert_eq!(args.option("opt"), None);
        assert!(!args.flag("flag"));
        assert!(args.parameters().is_empty());
    }

    #[test]
    fn value_readable_through_every_alias() {
        let args = fixture().parse(&argv(&["--opt", "value1"])).unwrap();
        assert_eq!(args.option("opt"), Some("value1"));
        assert_eq!(args.option("o"), Some("value1"));
        assert_eq!(args.lookup("o"), OptionValue::Value("value1"));
    }

    #[test]
    fn flag_present_under_any_alias_reads_back_as_present() {
        for spelling in [&["--flag"], &["-f"]] {
            let args = fixture().parse(&argv(spelling)).unwrap();
            assert!(args.flag("flag"));
            assert!(args.flag("f"));
            assert_eq!(args.option("flag"), Some(""));
            assert_eq!(args.lookup("f"), OptionValue::Flag);
        }
    }

    #[test]
    fn single_character_alias_answers_to_both_shapes() {
        let args = fixture().parse(&argv(&["--f"])).unwrap();
        assert!(args.flag("f"));

        let args = fixture().parse(&argv(&["-o", "x"])).unwrap();
        assert_eq!(args.option("opt"), Some("x"));
    }

    #[test]
    fn separator_starts_the_parameter_tail() {
        let args = fixture()
            .parse(&argv(&["-o", "value1", "--", "p1", "p2"]))
            .unwrap();
        assert_eq!(args.option("opt"), Some("value1"));
        assert_eq!(args.parameter(0), Some("p1"));
        assert_eq!(args.parameter(1), Some("p2"));
        assert_eq!(args.parameter(2), None);
    }

    #[test]
    fn everything_after_separator_is_a_parameter() {
        let args = fixture()
            .parse(&argv(&["--", "-o", "--flag", "--", "p"]))
            .unwrap();
        assert_eq!(args.option("opt"), None);
        assert!(!args.flag("flag"));
        assert_eq!(args.parameters(), ["-o", "--flag", "--", "p"]);
    }

    #[test]
    fn bare_first_token_switches_to_pure_parameter_mode() {
        // "opt" is a registered alias, but a bare token is never an option.
        let args = fixture().parse(&argv(&["opt", "p2"])).unwrap();
        assert_eq!(args.option("opt"), None);
        assert_eq!(args.parameters(), ["opt", "p2"]);

        // Even option-shaped tokens stay parameters afterwards.
        let args = fixture().parse(&argv(&["x", "-o", "--flag"])).unwrap();
        assert_eq!(args.parameters(), ["x", "-o", "--flag"]);
    }

    #[test]
    fn dash_junk_in_first_position_is_a_parameter() {
        for first in ["-34", "-ab", "---x", "-"] {
            let args = fixture().parse(&argv(&[first, "next"])).unwrap();
            assert_eq!(args.parameters(), [first, "next"]);
        }
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = fixture().parse(&argv(&["--nope"])).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption("nope".to_string()));
        assert_eq!(err.to_string(), "option nope not found");
    }

    #[test]
    fn dangling_value_option_is_rejected() {
        let err = fixture().parse(&argv(&["--opt"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingValue {
                aliases: "opt/o".to_string()
            }
        );
    }

    #[test]
    fn bare_token_after_options_is_an_error() {
        // Flags never consume a following token; without a `--` the stray
        // token is rejected rather than treated as a parameter.
        let err = fixture().parse(&argv(&["--flag", "x"])).unwrap_err();
        assert_eq!(err, ParseError::InvalidToken("x".to_string()));

        let err = fixture().parse(&argv(&["-o", "v", "-ab"])).unwrap_err();
        assert_eq!(err, ParseError::InvalidToken("-ab".to_string()));

        let err = fixture().parse(&argv(&["--flag", "-34"])).unwrap_err();
        assert_eq!(err, ParseError::InvalidToken("-34".to_string()));
    }

    #[test]
    fn flag_then_separator_recovers_parameters() {
        let args = fixture().parse(&argv(&["--flag", "--", "x"])).unwrap();
        assert!(args.flag("flag"));
        assert_eq!(args.parameters(), ["x"]);
    }

    #[test]
    fn pending_value_consumes_any_shape() {
        let args = fixture().parse(&argv(&["-o", "--flag"])).unwrap();
        assert_eq!(args.option("opt"), Some("--flag"));
        assert!(!args.flag("flag"));

        let args = fixture().parse(&argv(&["-o", "--"])).unwrap();
        assert_eq!(args.option("opt"), Some("--"));
        assert!(args.parameters().is_empty());
    }

    #[test]
    fn last_occurrence_of_an_option_wins() {
        let args = fixture().parse(&argv(&["-o", "a", "--opt", "b"])).unwrap();
        assert_eq!(args.option("opt"), Some("b"));
    }

    #[test]
    fn validator_rejection_names_every_alias() {
        let mut parser = Parser::new();
        parser
            .add_option(
                OptionDef::builder()
                    .alias("opt")
                    .alias("o")
                    .validator(|value| value.bytes().all(|b| b.is_ascii_digit()))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let err = parser.parse(&argv(&["--opt", "abc"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidValue {
                aliases: "opt/o".to_string()
            }
        );
        assert_eq!(err.to_string(), "value for option opt/o is not valid");

        let args = parser.parse(&argv(&["--opt", "123"])).unwrap();
        assert_eq!(args.option("o"), Some("123"));
    }

    #[test]
    fn validator_is_skipped_for_flags() {
        let mut parser = Parser::new();
        parser
            .add_option(
                OptionDef::builder()
                    .alias("strict")
                    .flag()
                    .validator(|_| false)
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let args = parser.parse(&argv(&["--strict"])).unwrap();
        assert!(args.flag("strict"));
    }

    #[test]
    fn duplicate_alias_across_options_leaves_registry_unchanged() {
        let mut parser = Parser::new();
        parser.add_option(flag(&["verbose", "v"])).unwrap();

        let err = parser.add_option(option(&["v", "vv"])).unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateAlias("v".to_string()));

        // The rejected option's fresh alias never became reachable, and the
        // first registration still resolves.
        let err = parser.parse(&argv(&["--vv"])).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption("vv".to_string()));
        assert!(parser.parse(&argv(&["-v"])).unwrap().flag("verbose"));
    }

    #[test]
    fn empty_registry_still_parses_parameters() {
        let parser = Parser::new();
        let args = parser.parse(&argv(&["p1", "p2"])).unwrap();
        assert_eq!(args.parameters(), ["p1", "p2"]);

        let err = parser.parse(&argv(&["-x"])).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption("x".to_string()));
    }
}
