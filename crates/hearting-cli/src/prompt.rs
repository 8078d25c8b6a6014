use hearting_board::{Notice, Prompter};
use std::io::{self, BufRead, Write};

/// Alerts go to stdout; confirmations read one `y`/`n` line from stdin.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn alert(&self, notice: Notice) {
        println!("! {notice}");
    }

    fn confirm(&self, notice: Notice) -> bool {
        print!("? {notice} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!("failed to read confirmation: {err}");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::is_yes;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }
}
