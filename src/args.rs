//! Command-line token classification
//!
//! Tokens are split into positional arguments and recognised flags. Flags
//! carrying a value (`--path=.`) are kept verbatim; [`ParsedArgv::flag_value`]
//! extracts the value. Unrecognised dash-prefixed tokens are dropped.

use std::ffi::OsString;

/// Flags understood by the dispatcher, matched on the text before any `=`
pub const FLAGS: &[&str] = &[
    "-h",
    "--help",
    "-n",
    "--dry-run",
    "-v",
    "--version",
    "--path",
];

/// Leading tokens that name the invocation rather than the request
const INVOCATION_PREFIX_LEN: usize = 2;

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgv {
    pub arguments: Vec<String>,
    pub flags: Vec<String>,
}

impl ParsedArgv {
    /// Build directly from already-classified parts
    pub fn new<A, F>(arguments: A, flags: F) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            arguments: arguments.into_iter().map(Into::into).collect(),
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the bare token `flag` is present; `--version=x` does not count as `--version`
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Whether any of `flags` is present
    pub fn has_any_flag(&self, flags: &[&str]) -> bool {
        flags.iter().any(|flag| self.has_flag(flag))
    }

    /// Value of the first `flag=value` token for `flag`
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.flags
            .iter()
            .filter_map(|f| f.split_once('='))
            .find(|(name, _)| *name == flag)
            .map(|(_, value)| value)
    }

    /// First positional argument, the command name
    pub fn command(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }
}

fn flag_name(token: &str) -> &str {
    token.split('=').next().unwrap_or(token)
}

/// Whether `token` is a recognised flag
pub fn is_flag(token: &str) -> bool {
    FLAGS.contains(&flag_name(token))
}

/// Classify raw tokens, dropping the two-token invocation prefix from the arguments
pub fn parse_argv<I, S>(tokens: I) -> ParsedArgv
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedArgv::default();
    let mut positional = 0usize;

    for token in tokens {
        let token = token.as_ref();
        if is_flag(token) {
            parsed.flags.push(token.to_string());
        } else if !token.starts_with('-') {
            if positional >= INVOCATION_PREFIX_LEN {
                parsed.arguments.push(token.to_string());
            }
            positional += 1;
        }
    }

    parsed
}

/// Classify the process's own arguments (program name first), lossily decoding non-UTF-8
pub fn parse_args_os<I>(args: I) -> ParsedArgv
where
    I: IntoIterator<Item = OsString>,
{
    // one synthetic token stands in for the interpreter ahead of the program name
    let tokens = args
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned());
    parse_argv(std::iter::once(String::from("cratos")).chain(tokens))
}
