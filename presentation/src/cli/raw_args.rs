//! Parameter parsing for `operations exec`
//!
//! Accepted forms:
//!
//! | Argument | Result |
//! |----------|--------|
//! | `--name=value` | `name = value` |
//! | `--name value` | `name = value` (next argument does not start with `--`) |
//! | `--flag` | `flag = true` |
//! | `name=value` | `name = value` |
//!
//! A repeated name keeps the last value.

use operations_domain::ParameterValues;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RawArgsError {
    #[error("parameter name missing in argument {0:?}")]
    EmptyName(String),

    #[error("unexpected argument {0:?}; expected --name=value, --name value or name=value")]
    Unexpected(String),
}

pub fn parse_raw_args<S: AsRef<str>>(args: &[S]) -> Result<ParameterValues, RawArgsError> {
    let mut values = ParameterValues::new();
    let mut iter = args.iter().map(AsRef::as_ref).peekable();

    while let Some(arg) = iter.next() {
        if let Some(flag) = arg.strip_prefix("--") {
            let (name, value) = match flag.split_once('=') {
                Some((name, value)) => (name, value.to_string()),
                None => match iter.next_if(|next| !next.starts_with("--")) {
                    Some(next) => (flag, next.to_string()),
                    None => (flag, "true".to_string()),
                },
            };
            if name.is_empty() {
                return Err(RawArgsError::EmptyName(arg.to_string()));
            }
            values.insert(name.to_string(), value);
        } else if let Some((name, value)) = arg.split_once('=') {
            if name.is_empty() {
                return Err(RawArgsError::EmptyName(arg.to_string()));
            }
            values.insert(name.to_string(), value.to_string());
        } else {
            return Err(RawArgsError::Unexpected(arg.to_string()));
        }
    }

    Ok(values)
}
