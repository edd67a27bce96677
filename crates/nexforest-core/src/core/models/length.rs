use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// The weight carried by an edge.
///
/// Lengths arrive from readers in whatever shape the source format used, often as
/// text. Trees with a numeric [`LengthKind`] normalise them when an edge is added.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Length {
    #[default]
    Unset,
    Int(i64),
    Float(f64),
    Text(String),
}

/// The numeric representation a tree imposes on its edge lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthKind {
    /// Lengths are stored as given.
    #[default]
    Any,
    /// Lengths are coerced to integers (`IntTree`, `IntNetwork`).
    Int,
    /// Lengths are coerced to floating point (`FloatTree`, `FloatNetwork`).
    Float,
}

/// How text that is not a number is treated during coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthCoercion {
    /// Unparsable text is an error.
    Strict,
    /// Unparsable text becomes zero.
    #[default]
    Lenient,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Cannot coerce length '{text}' to {kind}")]
pub struct LengthError {
    pub text: String,
    pub kind: LengthKind,
}

impl Length {
    pub fn is_set(&self) -> bool {
        !matches!(self, Length::Unset)
    }

    /// The length as a floating point number, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Length::Int(value) => Some(*value as f64),
            Length::Float(value) => Some(*value),
            Length::Text(text) => text.trim().parse().ok(),
            Length::Unset => None,
        }
    }

    /// Converts the length into the representation required by `kind`.
    ///
    /// Floats are truncated toward zero when an integer is required. An unset
    /// length stays unset whatever the kind.
    ///
    /// # Errors
    ///
    /// Returns [`LengthError`] for non-numeric text under [`LengthCoercion::Strict`].
    pub fn coerce(&self, kind: LengthKind, mode: LengthCoercion) -> Result<Length, LengthError> {
        let coerced = match (kind, self) {
            (LengthKind::Any, _) | (_, Length::Unset) => self.clone(),
            (LengthKind::Int, Length::Int(value)) => Length::Int(*value),
            (LengthKind::Int, Length::Float(value)) => Length::Int(value.trunc() as i64),
            (LengthKind::Int, Length::Text(text)) => match parse_int(text) {
                Some(value) => Length::Int(value),
                None => fallback(text, kind, mode, Length::Int(0))?,
            },
            (LengthKind::Float, Length::Int(value)) => Length::Float(*value as f64),
            (LengthKind::Float, Length::Float(value)) => Length::Float(*value),
            (LengthKind::Float, Length::Text(text)) => match parse_float(text) {
                Some(value) => Length::Float(value),
                None => fallback(text, kind, mode, Length::Float(0.0))?,
            },
        };
        Ok(coerced)
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| parse_float(trimmed).map(|value| value.trunc() as i64))
}

fn fallback(
    text: &str,
    kind: LengthKind,
    mode: LengthCoercion,
    zero: Length,
) -> Result<Length, LengthError> {
    match mode {
        LengthCoercion::Lenient => Ok(zero),
        LengthCoercion::Strict => Err(LengthError {
            text: text.to_string(),
            kind,
        }),
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Unset => Ok(()),
            Length::Int(value) => write!(f, "{}", value),
            Length::Float(value) => write!(f, "{}", value),
            Length::Text(text) => write!(f, "{}", text),
        }
    }
}

impl fmt::Display for LengthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LengthKind::Any => "any",
                LengthKind::Int => "integer",
                LengthKind::Float => "float",
            }
        )
    }
}

impl From<i64> for Length {
    fn from(value: i64) -> Self {
        Length::Int(value)
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Length::Float(value)
    }
}

impl From<&str> for Length {
    fn from(text: &str) -> Self {
        Length::Text(text.to_string())
    }
}

impl From<String> for Length {
    fn from(text: String) -> Self {
        Length::Text(text)
    }
}
