//! rustyline helper: slash-command completion, hints and highlighting.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use inkspire_core::TattooStyle;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use super::command::COMMANDS;

const STYLE_PREFIX: &str = "/style ";

#[derive(Clone)]
pub struct StudioHelper {
    commands: Vec<String>,
    styles: Vec<String>,
}

impl StudioHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
            styles: TattooStyle::all().map(|style| style.id().to_string()).collect(),
        }
    }

    fn candidates(&self, line: &str) -> (usize, Vec<&String>) {
        if let Some(partial) = line.strip_prefix(STYLE_PREFIX) {
            let styles = self
                .styles
                .iter()
                .filter(|id| id.starts_with(partial))
                .collect();
            return (STYLE_PREFIX.len(), styles);
        }
        if line.starts_with('/') && !line.contains(' ') {
            let commands = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .collect();
            return (0, commands);
        }
        (0, Vec::new())
    }
}

impl Helper for StudioHelper {}

impl Completer for StudioHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for StudioHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for StudioHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        let (start, candidates) = self.candidates(line);
        let typed = line.len() - start;
        candidates
            .into_iter()
            .find(|candidate| candidate.len() > typed)
            .map(|candidate| candidate[typed..].to_string())
    }
}

impl Validator for StudioHelper {}

/// Masks the password prompt: every typed character is drawn as `*`.
#[derive(Clone, Default)]
pub struct PasswordHelper;

impl Helper for PasswordHelper {}

impl Completer for PasswordHelper {
    type Candidate = String;
}

impl Highlighter for PasswordHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for PasswordHelper {
    type Hint = String;
}

impl Validator for PasswordHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_candidates() {
        let helper = StudioHelper::new();
        let (start, candidates) = helper.candidates("/st");
        assert_eq!(start, 0);
        assert_eq!(candidates, vec!["/style", "/styles"]);
    }

    #[test]
    fn test_style_candidates() {
        let helper = StudioHelper::new();
        let (start, candidates) = helper.candidates("/style neo");
        assert_eq!(start, STYLE_PREFIX.len());
        assert_eq!(candidates, vec!["neo-traditional"]);
    }

    #[test]
    fn test_password_is_masked() {
        let helper = PasswordHelper;
        assert_eq!(helper.highlight("segredo", 7), "*******");
        assert_eq!(helper.highlight("ação", 4), "****");
    }

    #[test]
    fn test_no_candidates_for_descriptions() {
        let helper = StudioHelper::new();
        assert!(helper.candidates("Lobo uivando").1.is_empty());
    }
}
