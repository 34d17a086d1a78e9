//! Lenient reader for the JSON-LD block embedded in film pages.
//!
//! Letterboxd wraps the object in CDATA comment lines, so the script text is
//! not always valid JSON as a whole. Only the first line that looks like a
//! JSON object is parsed; this is not a general JSON-LD processor.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonLdError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("aggregateRating is not a JSON object")]
    AggregateRatingNotAnObject,
}

/// Parses the whole blob if it starts with `{`, else the first line that does.
/// A blob with no such line reads as an empty object.
pub fn parse_first_object(text: &str) -> Result<Map<String, Value>, JsonLdError> {
    let text = text.trim();
    let candidate = if text.starts_with('{') {
        Some(text)
    } else {
        text.lines().find(|line| line.trim_start().starts_with('{'))
    };

    let Some(candidate) = candidate else {
        return Ok(Map::new());
    };

    Ok(serde_json::from_str::<Map<String, Value>>(candidate)?)
}

/// `aggregateRating.ratingCount`, formatted for the CSV column.
pub fn rating_count(text: &str) -> Result<String, JsonLdError> {
    let data = parse_first_object(text)?;
    let count = match data.get("aggregateRating") {
        None => return Ok(String::new()),
        Some(Value::Object(agg)) => agg.get("ratingCount"),
        Some(_) => return Err(JsonLdError::AggregateRatingNotAnObject),
    };
    Ok(count.map(format_count).unwrap_or_default())
}

/// Integers and all-digit strings get thousands separators; other truthy
/// values are stringified; empty and zero-like values become "".
pub fn format_count(value: &Value) -> String {
    match value {
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Number(n) => {
            let text = n.to_string();
            if is_integer_text(&text) {
                group_thousands(&text)
            } else if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                text
            }
        }
        Value::String(s) if is_ascii_number(s) => group_thousands(s),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(a) if a.is_empty() => String::new(),
        Value::Object(o) if o.is_empty() => String::new(),
        other => other.to_string(),
    }
}

/// Number text as written in the source, so integers past u64 keep every digit.
fn is_integer_text(s: &str) -> bool {
    is_ascii_number(s.strip_prefix('-').unwrap_or(s))
}

fn is_ascii_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `"-1234567"` -> `"-1,234,567"`. Leading zeros are dropped.
pub fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }

    let mut out = String::with_capacity(sign.len() + digits.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
