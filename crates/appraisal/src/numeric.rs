use serde::{Deserialize, Serialize};

/// Raw numeric field as it arrives from a form or payload: an actual number,
/// free text, or nothing at all. Parsing is total: every shape maps to a
/// finite value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    #[default]
    Blank,
    Value(f64),
    Text(String),
}

impl NumberInput {
    pub fn parsed(&self) -> f64 {
        parse_number(self)
    }
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        NumberInput::Value(value)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

/// Coerce any numeric input to a finite number; blanks, garbage text and
/// non-finite values all become 0.0.
pub fn parse_number(input: &NumberInput) -> f64 {
    match input {
        NumberInput::Blank => 0.0,
        NumberInput::Value(value) => {
            if value.is_finite() {
                *value
            } else {
                0.0
            }
        }
        NumberInput::Text(raw) => parse_str(raw),
    }
}

/// Text leg of [`parse_number`]: tolerates surrounding whitespace, grouping
/// spaces (including non-breaking ones) and comma decimal separators.
pub fn parse_str(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a percent cell like `"9.2%"` into `9.2`. Placeholders (`"-"`),
/// blanks, and anything without a trailing percent sign yield `None`.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let stripped = raw.trim().strip_suffix('%')?;
    let cleaned = stripped.trim().replace(',', ".");
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Fixed-decimal rendering; non-finite values render as an empty string so a
/// half-filled worksheet never displays `NaN`.
pub fn format_number(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    format!("{value:.digits$}")
}
