//! Option definitions and the alias/token grammar.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::error::DefinitionError;

/// Predicate applied to a value option's raw value once the token loop has
/// finished. Flags never see their validator.
pub type ValueValidator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// One named option: a set of aliases, a flag/value mode, an optional value
/// validator and a description for usage output.
///
/// Definitions are immutable; construct one through [`OptionDef::builder`]
/// and hand it to a [`Parser`](crate::Parser). Aliases are stored without
/// their leading dashes: the definition `alias("output").alias("o")` is
/// invoked as `--output` or `-o` (and, since both grammars extract the bare
/// name, a one-character alias also answers to `--o`).
#[derive(Clone)]
pub struct OptionDef {
    aliases: IndexSet<String>,
    flag: bool,
    validator: Option<ValueValidator>,
    description: Option<String>,
}

impl OptionDef {
    /// Starts an empty definition.
    pub fn builder() -> OptionDefBuilder {
        OptionDefBuilder::default()
    }

    /// The aliases in registration order, without leading dashes.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }

    /// Whether this option is a bare flag that never consumes a value token.
    pub fn is_flag(&self) -> bool {
        self.flag
    }

    /// The usage description, if one was set.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Applies the validator to a raw value; no validator accepts everything.
    pub(crate) fn accepts(&self, value: &str) -> bool {
        match &self.validator {
            Some(validator) => validator(value),
            None => true,
        }
    }

    /// Aliases joined with `/`, the spelling used in error messages.
    pub(crate) fn joined_aliases(&self) -> String {
        self.aliases
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Debug for OptionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDef")
            .field("aliases", &self.aliases)
            .field("flag", &self.flag)
            .field("has_validator", &self.validator.is_some())
            .field("description", &self.description)
            .finish()
    }
}

/// Consuming builder for [`OptionDef`].
///
/// Aliases are validated and deduplicated at [`build`](Self::build); a
/// definition without any alias is rejected there.
#[derive(Default)]
pub struct OptionDefBuilder {
    aliases: Vec<String>,
    flag: bool,
    validator: Option<ValueValidator>,
    description: Option<String>,
}

impl OptionDefBuilder {
    /// Adds an alias, written without leading dashes.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Marks the option as a flag. A flag never consumes a following token
    /// and skips any configured validator.
    pub fn flag(mut self) -> Self {
        self.flag = true;
        self
    }

    /// Sets the value validator, replacing any previous one.
    pub fn validator(mut self, validator: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Removes any configured validator.
    pub fn clear_validator(mut self) -> Self {
        self.validator = None;
        self
    }

    /// Sets the description shown in usage output.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Validates the accumulated aliases and freezes the definition.
    pub fn build(self) -> Result<OptionDef, DefinitionError> {
        let mut aliases = IndexSet::with_capacity(self.aliases.len());
        for alias in self.aliases {
            if alias.is_empty() {
                return Err(DefinitionError::EmptyAlias);
            }
            if !is_valid_alias(&alias) {
                return Err(DefinitionError::InvalidAlias(alias));
            }
            aliases.insert(alias);
        }
        if aliases.is_empty() {
            return Err(DefinitionError::NoAliases);
        }
        Ok(OptionDef {
            aliases,
            flag: self.flag,
            validator: self.validator,
            description: self.description,
        })
    }
}

fn is_alias_open(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn is_alias_continue(c: char) -> bool {
    is_alias_open(c) || c == '-'
}

fn is_short_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Alias grammar: `[A-Za-z0-9_.]` followed by any run of `[A-Za-z0-9_.-]`.
pub(crate) fn is_valid_alias(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_alias_open(c) => {}
        _ => return false,
    }
    chars.all(is_alias_continue)
}

/// Classifies a token as an option name and extracts the bare name.
///
/// The long form (`--` + alias grammar) is tried first, then the short form
/// (`-` + exactly one `[A-Za-z0-9_]`). The literal `--` is never an option
/// name, and any other token matching neither form returns `None`; such
/// tokens fall through to parameter handling or rejection depending on the
/// machine state.
pub(crate) fn option_name(token: &str) -> Option<&str> {
    if token == "--" {
        return None;
    }
    if let Some(rest) = token.strip_prefix("--") {
        if is_valid_alias(rest) {
            return Some(rest);
        }
    }
    if let Some(rest) = token.strip_prefix('-') {
        let mut chars = rest.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if is_short_name(c) {
                return Some(rest);
            }
        }
    }
    None
}
