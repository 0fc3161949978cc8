//! `${VAR}` expansion for compose values.
//!
//! Supported forms:
//! - `$VAR`, `${VAR}`: value, or empty when unset
//! - `${VAR:-default}` / `${VAR-default}`: default when unset or empty / unset
//! - `${VAR:+alt}` / `${VAR+alt}`: alt when set and non-empty / set
//! - `${VAR:?msg}` / `${VAR?msg}`: error when unset or empty / unset
//! - `$$`: a literal `$`
//!
//! Defaults and alternatives are themselves interpolated.

use bake_common::{ComposeError, Environment};

/// Expand every variable reference in `input`.
pub fn interpolate(input: &str, env: &Environment) -> Result<String, ComposeError> {
    if !input.contains('$') {
        return Ok(input.to_string());
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('{') => {
                chars.next();
                let mut body = String::new();
                let mut depth = 1usize;
                for c in chars.by_ref() {
                    match c {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    body.push(c);
                }
                if depth != 0 {
                    return Err(error(input, "missing closing brace"));
                }
                out.push_str(&expand_braced(input, &body, env)?);
            }
            Some(c) if is_name_start(c) => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if !is_name_char(c) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                out.push_str(env.get(&name).unwrap_or_default());
            }
            _ => out.push('$'),
        }
    }

    Ok(out)
}

fn expand_braced(input: &str, body: &str, env: &Environment) -> Result<String, ComposeError> {
    let split = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
    let (name, rest) = body.split_at(split);
    if name.is_empty() || !name.starts_with(is_name_start) {
        return Err(error(input, &format!("invalid variable name in ${{{body}}}")));
    }

    let value = env.get(name);
    if rest.is_empty() {
        return Ok(value.unwrap_or_default().to_string());
    }

    let (strict, rest) = rest
        .strip_prefix(':')
        .map_or((false, rest), |rest| (true, rest));
    // `strict` treats an empty value like an unset one.
    let set = value.is_some_and(|v| !strict || !v.is_empty());

    let mut operand = rest.chars();
    let op = operand.next();
    let operand = operand.as_str();

    match op {
        Some('-') => match value {
            Some(v) if set => Ok(v.to_string()),
            _ => interpolate(operand, env),
        },
        Some('+') => {
            if set {
                interpolate(operand, env)
            } else {
                Ok(String::new())
            }
        }
        Some('?') => match value {
            Some(v) if set => Ok(v.to_string()),
            _ => {
                let message = if operand.is_empty() {
                    format!("required variable {name} is missing a value")
                } else {
                    format!("required variable {name} is missing a value: {operand}")
                };
                Err(error(input, &message))
            }
        },
        _ => Err(error(
            input,
            &format!("unsupported modifier in ${{{body}}}"),
        )),
    }
}

fn error(input: &str, message: &str) -> ComposeError {
    ComposeError::Interpolation {
        value: input.to_string(),
        message: message.to_string(),
    }
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
