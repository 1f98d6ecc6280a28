//! Line-oriented prompts for the interactive commands

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::error::{ForklyError, ForklyResult};

/// What the user typed at a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Trimmed text (possibly empty)
    Value(String),
    /// `back` or `:back`
    Back,
}

/// Whether the raw input asks to go back a step
pub fn is_back(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "back" | ":back")
}

fn classify(raw: &str) -> Input {
    if is_back(raw) {
        Input::Back
    } else {
        Input::Value(raw.trim().to_string())
    }
}

/// Prompt for a line of text
pub fn prompt(label: &str) -> ForklyResult<Input> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(ForklyError::Io("Input closed".into()));
    }
    Ok(classify(&input))
}

/// Prompt showing the current value; empty input keeps it
pub fn prompt_with_default(label: &str, current: &str) -> ForklyResult<Input> {
    let shown = if current.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, current)
    };
    Ok(match prompt(&shown)? {
        Input::Value(v) if v.is_empty() => Input::Value(current.to_string()),
        other => other,
    })
}

/// Prompt for a secret without echo
pub fn prompt_secret(label: &str) -> ForklyResult<Input> {
    let input = rpassword::prompt_password(label)?;
    Ok(classify(&input))
}

/// Prompt for a yes/no answer
pub fn prompt_yes_no(label: &str, default: bool) -> ForklyResult<Option<bool>> {
    let hint = if default { "Y/n" } else { "y/N" };
    match prompt(&format!("{} [{}]: ", label, hint))? {
        Input::Back => Ok(None),
        Input::Value(v) => Ok(Some(parse_yes_no(&v).unwrap_or(default))),
    }
}

/// `y`/`yes`/`n`/`no`, case-insensitive
pub fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Parse "1, 3 4" into zero-based indices below `count`
pub fn parse_choice_numbers(raw: &str, count: usize) -> Result<Vec<usize>, String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
            _ => Err(format!("'{}' is not a number between 1 and {}", part, count)),
        })
        .collect()
}

/// Print a numbered menu, marking selected entries
pub fn print_menu<T, F>(options: &[T], label: F, is_selected: impl Fn(&T) -> bool)
where
    F: Fn(&T) -> &'static str,
{
    for (i, option) in options.iter().enumerate() {
        let mark = if is_selected(option) { "x" } else { " " };
        println!("  [{}] {}. {}", mark, i + 1, label(option));
    }
}

/// Toggle entries of a multi-choice set until the user submits an empty line
///
/// Returns `None` when the user asked to go back.
pub fn toggle_menu<T, F>(
    options: &[T],
    label: F,
    mut selected: BTreeSet<T>,
) -> ForklyResult<Option<BTreeSet<T>>>
where
    T: Copy + Ord,
    F: Fn(&T) -> &'static str + Copy,
{
    loop {
        print_menu(options, label, |o| selected.contains(o));
        match prompt("Toggle numbers (Enter when done): ")? {
            Input::Back => return Ok(None),
            Input::Value(v) if v.is_empty() => return Ok(Some(selected)),
            Input::Value(v) => match parse_choice_numbers(&v, options.len()) {
                Ok(indices) => {
                    for i in indices {
                        crate::models::selection::toggle(&mut selected, options[i]);
                    }
                }
                Err(msg) => println!("  {}", msg),
            },
        }
    }
}

/// Pick at most one option; Enter keeps `current`
pub fn single_choice<T, F>(options: &[T], label: F, current: Option<T>) -> ForklyResult<Option<Option<T>>>
where
    T: Copy + PartialEq,
    F: Fn(&T) -> &'static str + Copy,
{
    loop {
        print_menu(options, label, |o| Some(*o) == current);
        match prompt("Choose a number (Enter to keep): ")? {
            Input::Back => return Ok(None),
            Input::Value(v) if v.is_empty() => return Ok(Some(current)),
            Input::Value(v) => match parse_choice_numbers(&v, options.len()).as_deref() {
                Ok([index]) => return Ok(Some(Some(options[*index]))),
                Ok(_) => println!("  Pick exactly one option"),
                Err(msg) => println!("  {}", msg),
            },
        }
    }
}
