use serde_json::{Map, Number, Value};

use crate::{DEFAULT_TARGET, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

/// Flags that never take the following argument as their value, except for a
/// literal `true`/`false`.
const BOOLEAN_OPTIONS: &[&str] = &[
    "alwaysOnTop",
    "center",
    "closable",
    "frame",
    "focus",
    "fullscreen",
    "hasShadow",
    "kiosk",
    "maximizable",
    "minimizable",
    "resizable",
    "show",
    "skipTaskbar",
    "transparent",
];

const END_OF_OPTIONS: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LaunchArgs {
    pub(crate) options: Map<String, Value>,
    pub(crate) positional: Vec<String>,
}

impl LaunchArgs {
    pub(crate) fn target(&self) -> &str {
        self.positional
            .first()
            .map(String::as_str)
            .filter(|target| !target.is_empty())
            .unwrap_or(DEFAULT_TARGET)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Option { key: String, value: Value },
    Positional(String),
    EndOfOptions,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    start: usize,
    len: usize,
}

pub(crate) fn parse_launch_args(args: &[String]) -> LaunchArgs {
    let mut options = Map::new();
    let mut positional = Vec::new();

    for token in tokenize(args) {
        match token.kind {
            TokenKind::Option { key, value } => {
                options.insert(key, value);
            }
            TokenKind::Positional(value) => positional.push(value),
            TokenKind::EndOfOptions => {}
        }
    }

    for (key, default) in [("width", DEFAULT_WINDOW_WIDTH), ("height", DEFAULT_WINDOW_HEIGHT)] {
        if !options.contains_key(key) {
            if let Some(number) = Number::from_f64(default) {
                options.insert(key.to_string(), Value::Number(number));
            }
        }
    }

    LaunchArgs {
        options,
        positional,
    }
}

/// Removes every spelling of `flag` (same key, same value) from `args`.
pub(crate) fn strip_option(args: &[String], flag: &str) -> Vec<String> {
    let Some((flag_key, flag_value)) = single_option(flag) else {
        return args.to_vec();
    };

    let mut stripped = Vec::with_capacity(args.len());
    for token in tokenize(args) {
        if let TokenKind::Option { key, value } = &token.kind {
            if *key == flag_key && *value == flag_value {
                continue;
            }
        }
        stripped.extend_from_slice(&args[token.start..token.start + token.len]);
    }
    stripped
}

/// Appends `flag` ahead of any `--` so it is still read as an option.
pub(crate) fn append_option(args: &[String], flag: &str) -> Vec<String> {
    let insert_at = args
        .iter()
        .position(|arg| arg == END_OF_OPTIONS)
        .unwrap_or(args.len());
    let mut appended = args.to_vec();
    appended.insert(insert_at, flag.to_string());
    appended
}

fn single_option(flag: &str) -> Option<(String, Value)> {
    match tokenize(&[flag.to_string()]).into_iter().next()?.kind {
        TokenKind::Option { key, value } => Some((key, value)),
        _ => None,
    }
}

fn tokenize(args: &[String]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < args.len() {
        let arg = &args[index];

        if arg == END_OF_OPTIONS {
            tokens.push(Token {
                kind: TokenKind::EndOfOptions,
                start: index,
                len: 1,
            });
            tokens.extend(args.iter().enumerate().skip(index + 1).map(|(start, value)| {
                Token {
                    kind: TokenKind::Positional(value.clone()),
                    start,
                    len: 1,
                }
            }));
            break;
        }

        let Some(body) = flag_body(arg) else {
            tokens.push(Token {
                kind: TokenKind::Positional(arg.clone()),
                start: index,
                len: 1,
            });
            index += 1;
            continue;
        };

        let (key, value, len) = match body.split_once('=') {
            Some((raw_key, raw_value)) => (camel_case(raw_key), parse_value(raw_value), 1),
            None if body.starts_with("no-") && body.len() > 3 => {
                (camel_case(&body[3..]), Value::Bool(false), 1)
            }
            None => {
                let key = camel_case(body);
                let next = args.get(index + 1).filter(|next| next.as_str() != END_OF_OPTIONS);
                let takes_next = match next {
                    Some(next) if BOOLEAN_OPTIONS.contains(&key.as_str()) => {
                        next == "true" || next == "false"
                    }
                    Some(next) => flag_body(next).is_none(),
                    None => false,
                };
                match next {
                    Some(next) if takes_next => (key, parse_value(next), 2),
                    _ => (key, Value::Bool(true), 1),
                }
            }
        };

        tokens.push(Token {
            kind: TokenKind::Option { key, value },
            start: index,
            len,
        });
        index += len;
    }

    tokens
}

fn flag_body(arg: &str) -> Option<&str> {
    if let Some(body) = arg.strip_prefix("--") {
        return (!body.is_empty()).then_some(body);
    }
    let body = arg.strip_prefix('-')?;
    if body.is_empty() || body.parse::<f64>().is_ok() {
        return None;
    }
    Some(body)
}

fn camel_case(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut upper_next = false;
    for ch in raw.chars() {
        if ch == '-' {
            upper_next = !key.is_empty();
            continue;
        }
        if upper_next {
            key.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            key.push(ch);
        }
    }
    key
}

fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(integer) = raw.parse::<i64>() {
        return Value::Number(integer.into());
    }
    if let Some(number) = raw
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .and_then(Number::from_f64)
    {
        return Value::Number(number);
    }
    Value::String(raw.to_string())
}
