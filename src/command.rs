//! Command string tokenization.
//!
//! Command strings follow POSIX shell word-splitting and quoting rules, via
//! `shell-words`. Nothing else is interpreted: pipes, redirects and globs are
//! passed through as literal arguments.

use crate::error::{ProcError, Result};
use std::fmt;

/// A tokenized command: program followed by its arguments. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    tokens: Vec<String>,
}

impl CommandSpec {
    /// The executable to run.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// All tokens, program first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_words::join(&self.tokens))
    }
}

/// Split a command string into a [`CommandSpec`].
///
/// Fails with [`ProcError::InvalidCommand`] when the string is empty,
/// whitespace-only, or has unmatched quotes / a dangling escape.
pub fn tokenize(command: &str) -> Result<CommandSpec> {
    let tokens = shell_words::split(command).map_err(|e| {
        ProcError::InvalidCommand(format!(
            "failed to parse '{}': {}\n\
             Fix: check for unmatched quotes or invalid escape sequences.",
            command, e
        ))
    })?;

    if tokens.is_empty() {
        return Err(ProcError::InvalidCommand(format!(
            "command is empty after parsing: '{}'",
            command
        )));
    }

    Ok(CommandSpec { tokens })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let spec = tokenize("grep 2").unwrap();
        assert_eq!(spec.tokens(), &["grep".to_string(), "2".to_string()]);
        assert_eq!(spec.program(), "grep");
        assert_eq!(spec.args(), &["2".to_string()]);
    }

    #[test]
    fn respects_quotes_and_escapes() {
        let spec = tokenize(r#"sh -c "echo 'a b'" c\ d"#).unwrap();
        assert_eq!(spec.tokens(), &["sh", "-c", "echo 'a b'", "c d"]);
    }

    #[test]
    fn shell_metacharacters_are_literal() {
        let spec = tokenize("echo a | grep a > out").unwrap();
        assert_eq!(spec.args(), &["a", "|", "grep", "a", ">", "out"]);
    }

    #[test]
    fn empty_and_whitespace_are_invalid() {
        for input in ["", "   ", "\t\n"] {
            let err = tokenize(input).unwrap_err();
            assert!(matches!(err, ProcError::InvalidCommand(_)), "{input:?}");
        }
    }

    #[test]
    fn unmatched_quote_is_invalid() {
        let err = tokenize("echo \"unmatched").unwrap_err();
        assert!(matches!(err, ProcError::InvalidCommand(_)));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn display_requotes_tokens() {
        let spec = tokenize("echo 'a b'").unwrap();
        assert_eq!(spec.to_string(), "echo 'a b'");
    }
}
