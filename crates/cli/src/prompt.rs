use std::io::{self, BufRead, Write};

use tracing::debug;

/// Most interest strings asked for in one session.
pub const MAX_PROMPTS: usize = 10;

const PROMPT: &str = "Enter a movie string, or press enter to begin search: ";

/// Ask for interest strings until a blank line, end of input, or `max` answers.
pub fn read_interests<R: BufRead, W: Write>(mut input: R, output: &mut W, max: usize) -> io::Result<Vec<String>> {
    let mut interests = Vec::new();

    for _ in 0..max {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let interest = line.trim_end_matches(['\r', '\n']);
        if interest.trim().is_empty() {
            break;
        }

        debug!(interest, "adding interest to movie filter");
        interests.push(interest.to_string());
    }

    Ok(interests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blank_line_ends_input() {
        let mut output = Vec::new();
        let interests = read_interests(Cursor::new("Alien\nThe Return\n\nBrazil\n"), &mut output, MAX_PROMPTS).unwrap();

        assert_eq!(interests, vec!["Alien", "The Return"]);
        assert_eq!(String::from_utf8(output).unwrap().matches(PROMPT).count(), 3);
    }

    #[test]
    fn test_whitespace_line_ends_input() {
        let mut output = Vec::new();
        let interests = read_interests(Cursor::new("Alien\n   \nBrazil\n"), &mut output, MAX_PROMPTS).unwrap();

        assert_eq!(interests, vec!["Alien"]);
    }

    #[test]
    fn test_end_of_input() {
        let mut output = Vec::new();
        let interests = read_interests(Cursor::new("Alien"), &mut output, MAX_PROMPTS).unwrap();

        assert_eq!(interests, vec!["Alien"]);
    }

    #[test]
    fn test_prompt_limit() {
        let mut output = Vec::new();
        let interests = read_interests(Cursor::new("A\nB\nC\n"), &mut output, 2).unwrap();

        assert_eq!(interests, vec!["A", "B"]);
    }

    #[test]
    fn test_interest_keeps_inner_spaces() {
        let mut output = Vec::new();
        let interests = read_interests(Cursor::new(" Return \r\n\n"), &mut output, MAX_PROMPTS).unwrap();

        assert_eq!(interests, vec![" Return "]);
    }
}
