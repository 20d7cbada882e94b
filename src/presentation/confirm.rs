//! Destructive-action confirmation
//!
//! Clearing the roster cannot be undone, so every adapter asks first.

use std::io::{BufRead, Write};

use crate::roster::{Roster, RosterSnapshot};

/// Question asked before the roster is cleared
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear all employee data?";

/// Something that can ask the user a yes/no question
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Line-based prompt: writes the question, reads one answer line.
///
/// Only `y` or `yes` (any case) confirms; anything else, including EOF,
/// declines.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{} [y/N] ", prompt)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }
}

/// Clear the roster only if the user confirms.
///
/// Returns the refreshed snapshot when cleared, `None` when declined (the
/// roster is left untouched).
pub fn clear_with_confirmation(
    roster: &mut Roster,
    confirm: &mut impl Confirm,
) -> Option<RosterSnapshot> {
    if confirm.confirm(CLEAR_PROMPT) {
        Some(roster.clear_all())
    } else {
        tracing::debug!("Clear declined");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::CommissionPolicy;
    use std::io::Cursor;

    #[test]
    fn test_declined_leaves_roster() {
        let mut roster = Roster::seeded(CommissionPolicy::default());
        let mut decline = |_: &str| false;

        assert!(clear_with_confirmation(&mut roster, &mut decline).is_none());
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.revision(), 0);
    }

    #[test]
    fn test_confirmed_clears() {
        let mut roster = Roster::seeded(CommissionPolicy::default());
        let mut asked = Vec::new();
        let mut accept = |prompt: &str| {
            asked.push(prompt.to_string());
            true
        };

        let snapshot = clear_with_confirmation(&mut roster, &mut accept).unwrap();
        assert!(snapshot.is_empty());
        assert!(roster.is_empty());
        assert_eq!(asked, vec![CLEAR_PROMPT.to_string()]);
    }

    #[test]
    fn test_prompt_answers() {
        for (answer, expected) in [
            ("y\n", true),
            ("YES\n", true),
            ("n\n", false),
            ("\n", false),
            ("", false),
            ("maybe\n", false),
        ] {
            let mut output = Vec::new();
            let mut prompt = PromptConfirm::new(Cursor::new(answer), &mut output);
            assert_eq!(prompt.confirm("Proceed?"), expected, "answer {:?}", answer);
            assert_eq!(String::from_utf8(output).unwrap(), "Proceed? [y/N] ");
        }
    }
}
