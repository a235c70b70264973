//! Text framing around the cipher path.
//!
//! The machine only has 26 keys. On encipher, `Z` becomes `X` and the
//! space bar becomes `Z`, so `Z` in ciphertext-side streams always marks a
//! word boundary. On decipher, spaces are ignored and `Z` prints as a space
//! after the whole message has passed through the rotors.

use crate::machine::Direction;

/// Prepares raw input for the rotors.
///
/// Letters are uppercased and anything that is neither a letter nor a space
/// is dropped.
pub fn filter_in(direction: Direction, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() && c != ' ' {
            continue;
        }
        match direction {
            Direction::Encrypt => out.push(match c {
                'Z' => 'X',
                ' ' => 'Z',
                other => other,
            }),
            Direction::Decrypt => {
                if c != ' ' {
                    out.push(c);
                }
            }
        }
    }
    out
}

/// Post-processes rotor output: deciphered `Z` becomes a space.
pub fn filter_out(direction: Direction, text: String) -> String {
    match direction {
        Direction::Encrypt => text,
        Direction::Decrypt => text
            .chars()
            .map(|c| if c == 'Z' { ' ' } else { c })
            .collect(),
    }
}

/// Splits `text` into `n`-character groups separated by single spaces.
pub fn group_text(text: &str, n: usize) -> String {
    let n = n.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(n)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lays ciphertext out as `group`-letter groups on lines of at most `width`
/// columns, never splitting a group.
pub fn cipher_lines(text: &str, group: usize, width: usize) -> Vec<String> {
    let group = group.max(1);
    let per_line = (width / (group + 1)).max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(group * per_line)
        .map(|line| group_text(&line.iter().collect::<String>(), group))
        .collect()
}

/// Breaks plaintext into lines of at most `width` columns at word
/// boundaries. Words longer than `width` get a line of their own.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
