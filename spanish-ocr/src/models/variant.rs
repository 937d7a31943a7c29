use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Size/accuracy profile selecting which PP-OCR models an engine loads.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    /// Smaller, faster models.
    #[default]
    Mobile,
    /// Larger, more accurate models.
    Server,
}

impl ModelVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Server => "server",
        }
    }

    /// Stable slot index used by the engine registry.
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Mobile => 0,
            Self::Server => 1,
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse used for environment values (`MODEL_TYPE=Server` is accepted).
/// Request parameters go through serde and are matched exactly.
impl FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "server" => Ok(Self::Server),
            other => Err(format!(
                "unknown model type '{other}', expected 'mobile' or 'server'"
            )),
        }
    }
}
