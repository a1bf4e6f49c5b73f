//! Command template expansion
//!
//! Command tokens may reference parameter values with `{{.name}}` actions:
//!
//! ```text
//! ["get", "pod", "-n", "{{.namespace}}"]  +  {namespace: "default"}
//!   → ["get", "pod", "-n", "default"]
//! ```
//!
//! Only single-level key lookups into the value map are supported. Tokens
//! without `{{` are returned untouched; unknown keys render as an empty
//! string. Anything else inside an action is an error and aborts the whole
//! expansion.

use super::traits::ParameterValues;
use crate::core::error::DomainError;

const ACTION_OPEN: &str = "{{";
const ACTION_CLOSE: &str = "}}";

/// Expand every token of a command template
pub fn expand(tokens: &[String], values: &ParameterValues) -> Result<Vec<String>, DomainError> {
    tokens
        .iter()
        .map(|token| expand_token(token, values))
        .collect()
}

/// Expand a single token
pub fn expand_token(token: &str, values: &ParameterValues) -> Result<String, DomainError> {
    if !token.contains(ACTION_OPEN) {
        return Ok(token.to_string());
    }

    let mut output = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(start) = rest.find(ACTION_OPEN) {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + ACTION_OPEN.len()..];

        let end = after_open
            .find(ACTION_CLOSE)
            .ok_or_else(|| syntax_error(token, "unclosed action"))?;
        let action = &after_open[..end];
        if action.contains(ACTION_OPEN) {
            return Err(syntax_error(token, "unexpected \"{{\" in action"));
        }

        output.push_str(render_action(token, action.trim(), values)?);
        rest = &after_open[end + ACTION_CLOSE.len()..];
    }

    output.push_str(rest);
    Ok(output)
}

fn render_action<'v>(
    token: &str,
    action: &str,
    values: &'v ParameterValues,
) -> Result<&'v str, DomainError> {
    if action.is_empty() {
        return Err(syntax_error(token, "missing value for action"));
    }
    let Some(path) = action.strip_prefix('.') else {
        return Err(syntax_error(
            token,
            &format!("expected a field reference like .name, found {:?}", action),
        ));
    };
    if path.is_empty() {
        return Err(execution_error(token, "cannot render the whole value set"));
    }

    let fields: Vec<&str> = path.split('.').collect();
    if let Some(bad) = fields.iter().find(|f| !is_identifier(f)) {
        return Err(syntax_error(
            token,
            &format!("bad field name {:?} in {:?}", bad, action),
        ));
    }
    if fields.len() > 1 {
        return Err(execution_error(
            token,
            &format!("can't evaluate field {} of a string value", fields[1]),
        ));
    }

    Ok(values.get(fields[0]).map(String::as_str).unwrap_or(""))
}

fn is_identifier(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn syntax_error(token: &str, reason: &str) -> DomainError {
    DomainError::TemplateSyntax {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}

fn execution_error(token: &str, reason: &str) -> DomainError {
    DomainError::TemplateExecution {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}
