//! Interactive prompts

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let input = read_line()?;
    Ok(is_yes(&input))
}

/// Prompt with a default value, returns None if user keeps default
pub fn prompt_with_default(prompt: &str, default: &str) -> Result<Option<String>> {
    if default.is_empty() {
        print!("{}: ", prompt);
    } else {
        print!("{} [{}]: ", prompt, default);
    }
    io::stdout().flush()?;

    Ok(non_empty(read_line()?))
}

/// Prompt for a value that is required
pub fn prompt_required(prompt: &str) -> Result<String> {
    loop {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        if let Some(value) = non_empty(read_line()?) {
            return Ok(value);
        }
    }
}

fn read_line() -> Result<String> {
    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        anyhow::bail!("Input closed");
    }
    Ok(input)
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

fn non_empty(input: String) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  value \n".to_string()), Some("value".to_string()));
        assert_eq!(non_empty(" \n".to_string()), None);
    }
}
