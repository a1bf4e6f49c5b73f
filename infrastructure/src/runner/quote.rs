//! POSIX shell quoting for remote command lines
//!
//! The remote side of an ssh session always goes through the login shell, so
//! an argv has to be flattened into one string that the shell splits back
//! into exactly the same words.

/// Quote one word for a POSIX shell.
///
/// Words made only of safe characters are returned as-is; everything else is
/// wrapped in single quotes with embedded single quotes spelled `'\''`.
pub fn shell_quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }

    if word.chars().all(is_safe) {
        return word.to_string();
    }

    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('\'');
    for ch in word.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

/// Join an argv into a single shell command line
pub fn join_command(argv: &[String]) -> String {
    argv.iter()
        .map(|word| shell_quote(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '@' | '+' | '%')
}
