//! Coercion of the provider's loosely typed score fields.
//!
//! The leaderboard feed mixes plain integers, numeric strings, BSON extended
//! JSON wrappers (`{"$numberInt": "68"}`) and par-relative text (`"E"`, `"+3"`,
//! `"-2"`). Everything is resolved here, once, into `Option<i32>`: `Some` is a
//! canonical value and `None` is "unknown". Nothing downstream looks at raw JSON
//! score values.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::sync::LazyLock;

static SIGNED_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("static signed integer pattern is valid"));

/// The closed set of shapes a score field can arrive in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawScore<'a> {
    Integer(i64),
    /// Free text, including `null` which is read as the empty string.
    ParText(&'a str),
    /// Inner text of `$numberInt` / `$numberLong` / `$numberDouble`.
    BsonWrapped(&'a str),
    Missing,
}

impl<'a> RawScore<'a> {
    #[must_use]
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None => Self::Missing,
            Some(Value::Null) => Self::ParText(""),
            Some(Value::String(s)) => Self::ParText(s.as_str()),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else {
                    n.as_f64()
                        .and_then(integral_f64)
                        .map_or(Self::Missing, Self::Integer)
                }
            }
            Some(Value::Object(map)) => ["$numberInt", "$numberLong", "$numberDouble"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map_or(Self::Missing, Self::BsonWrapped),
            Some(Value::Array(_) | Value::Bool(_)) => Self::Missing,
        }
    }

    /// Strict integer reading: only integer-like input produces a value.
    #[must_use]
    pub fn as_integer(self) -> Option<i32> {
        match self {
            Self::Integer(i) => i32::try_from(i).ok(),
            Self::ParText(text) => parse_signed(text),
            Self::BsonWrapped(text) => parse_signed(text).or_else(|| parse_integral_float(text)),
            Self::Missing => None,
        }
    }

    /// Par-relative reading: text never fails, shapes that are not text or
    /// integers stay unknown.
    #[must_use]
    pub fn as_score_to_par(self) -> Option<i32> {
        match self {
            Self::ParText(text) => Some(parse_par_text(text)),
            Self::Missing => None,
            other => other.as_integer(),
        }
    }
}

fn parse_signed(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if !SIGNED_INT.is_match(trimmed) {
        return None;
    }
    trimmed.trim_start_matches('+').parse::<i32>().ok()
}

#[allow(clippy::cast_possible_truncation)]
fn integral_f64(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15).then_some(f as i64)
}

fn parse_integral_float(text: &str) -> Option<i32> {
    let f = text.trim().parse::<f64>().ok()?;
    integral_f64(f).and_then(|i| i32::try_from(i).ok())
}

/// Parses a stroke count. Anything that is not integer-like is unknown.
#[must_use]
pub fn parse_strokes(value: Option<&Value>) -> Option<i32> {
    RawScore::classify(value).as_integer()
}

/// Parses a score-to-par value. `"E"`, `""` and `null` are even par,
/// unparseable text falls back to 0, a missing key or a foreign shape is
/// unknown.
#[must_use]
pub fn parse_score_to_par(value: Option<&Value>) -> Option<i32> {
    RawScore::classify(value).as_score_to_par()
}

/// Reads a live in-round score. Blank text, `null` and the `"-"` placeholder
/// mean the player has not posted a live score.
#[must_use]
pub fn parse_live_score(value: Option<&Value>) -> Option<i32> {
    match RawScore::classify(value) {
        RawScore::ParText(text) if matches!(text.trim(), "" | "-") => None,
        raw => raw.as_score_to_par(),
    }
}

/// Round numbers arrive in the same shapes as stroke counts.
#[must_use]
pub fn parse_round_id(value: Option<&Value>) -> Option<i32> {
    parse_strokes(value)
}

#[must_use]
pub fn parse_par_text(text: &str) -> i32 {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("e") {
        return 0;
    }
    parse_signed(trimmed).unwrap_or_else(|| {
        tracing::trace!(text = trimmed, "unparseable score to par, reading as even");
        0
    })
}

#[must_use]
pub fn format_score_to_par(value: i32) -> String {
    match value {
        0 => "E".to_string(),
        v if v > 0 => format!("+{v}"),
        v => v.to_string(),
    }
}

#[must_use]
pub fn normalize_par_text(text: &str) -> String {
    format_score_to_par(parse_par_text(text))
}

/// Serde adapter writing `Option<i32>` par values as `"E"`/`"+N"`/`"-N"`.
pub mod par_text {
    use super::{Deserialize, Deserializer, Serializer, Value};

    /// # Errors
    ///
    /// Propagates serializer failures.
    #[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&super::format_score_to_par(*v)),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    ///
    /// Propagates deserializer failures; value coercion itself never fails.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(|v| super::parse_score_to_par(Some(v))))
    }
}
