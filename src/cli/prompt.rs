// Plug Password — Interactive prompts
//
// Confirmation and free-text questions on stdin. Behind a trait so command
// handlers can be driven by scripted answers in tests.

use std::io::{self, BufRead, Write};

pub trait Prompter {
    /// Ask a yes/no question. Anything but `y`/`yes` is a no.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Ask for a line of text. `None` on end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
}

pub struct StdinPrompter;

impl StdinPrompter {
    fn read_answer(question: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl Prompter for StdinPrompter {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = Self::read_answer(&format!("{} [y/N]: ", question))?;
        Ok(is_yes(answer.as_deref().unwrap_or("")))
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        Self::read_answer(&format!("{}: ", question))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

// ─── Scripted prompter for testing ───────────────────────────────────────────


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        for yes in ["y", "Y", "yes", " YES "] {
            assert!(is_yes(yes), "'{}' should count as yes", yes);
        }
        for no in ["", "n", "no", "yep", "maybe"] {
            assert!(!is_yes(no), "'{}' should count as no", no);
        }
    }
}
