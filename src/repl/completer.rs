use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::models::FilingType;
use crate::repl::commands::COMMAND_NAMES;

#[derive(Default)]
pub struct ReplHelper;

impl Helper for ReplHelper {}
impl Validator for ReplHelper {}
impl Highlighter for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let trimmed = line.trim();
        if !trimmed.starts_with('/') || trimmed.contains(' ') {
            return None;
        }
        for name in COMMAND_NAMES {
            if name.starts_with(trimmed) && *name != trimmed {
                return Some(name[trimmed.len()..].to_string());
            }
        }
        None
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(complete_line(&line[..pos], pos))
    }
}

fn complete_line(prefix: &str, pos: usize) -> (usize, Vec<Pair>) {
    let trimmed = prefix.trim_start();
    if !trimmed.starts_with('/') {
        return (0, vec![]);
    }

    // Past the command name: only /analyze takes completable values
    if let Some(space_idx) = trimmed.find(' ') {
        let cmd = &trimmed[..space_idx];
        let word = trimmed.rsplit(' ').next().unwrap_or("");
        let word_start = pos - word.len();
        let words_before = trimmed[space_idx..].split_whitespace().count()
            - usize::from(!word.is_empty());

        if cmd != "/analyze" || words_before == 0 {
            return (word_start, vec![]);
        }

        let upper = word.to_ascii_uppercase();
        let matches = FilingType::ALL
            .iter()
            .map(|ft| ft.as_str())
            .filter(|ft| ft.starts_with(&upper))
            .map(|ft| Pair {
                display: ft.to_string(),
                replacement: ft.to_string(),
            })
            .collect();
        return (word_start, matches);
    }

    let start = pos - trimmed.len();
    let matches = COMMAND_NAMES
        .iter()
        .filter(|name| name.starts_with(trimmed))
        .map(|name| Pair {
            display: name.to_string(),
            replacement: name.to_string(),
        })
        .collect();

    (start, matches)
}
