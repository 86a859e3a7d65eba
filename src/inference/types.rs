use std::fmt;

use serde::{Deserialize, Serialize};

/// Precision used for `DECIMAL` when none is given.
pub const DEFAULT_DECIMAL_PRECISION: u32 = 24;
/// Scale used for `DECIMAL` when none is given.
pub const DEFAULT_DECIMAL_SCALE: u32 = 6;

/// A dialect-neutral type label plus optional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredType {
    /// Abstract type token such as `STRING`, `DECIMAL`, or `VARCHAR(64)`.
    pub data_type: String,
    /// Total digits for decimal and float types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Fractional digits for decimal types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    /// Character length for `VARCHAR`/`CHAR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

impl InferredType {
    /// A type without parameters.
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            precision: None,
            scale: None,
            length: None,
        }
    }

    /// Abstract `STRING`.
    pub fn string() -> Self {
        Self::new("STRING")
    }

    /// Abstract `DATE`.
    pub fn date() -> Self {
        Self::new("DATE")
    }

    /// Abstract `TIMESTAMP`.
    pub fn timestamp() -> Self {
        Self::new("TIMESTAMP")
    }

    /// `DECIMAL(precision, scale)`.
    pub fn decimal(precision: u32, scale: u32) -> Self {
        Self {
            precision: Some(precision),
            scale: Some(scale),
            ..Self::new("DECIMAL")
        }
    }

    /// The default amount/quantity type, `DECIMAL(24,6)`.
    pub fn default_decimal() -> Self {
        Self::decimal(DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE)
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data_type.trim().to_uppercase())?;
        match (self.precision, self.scale, self.length) {
            (Some(p), Some(s), _) => write!(f, "({p},{s})"),
            (Some(p), None, _) => write!(f, "({p})"),
            (None, _, Some(len)) => write!(f, "({len})"),
            _ => Ok(()),
        }
    }
}
