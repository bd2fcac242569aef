//! Tone of voice — the fixed set offered by the form, and the instruction each adds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// No tone instruction is added to the prompt.
    #[default]
    Default,
    Professional,
    Casual,
    Witty,
    Authoritative,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Default,
        Tone::Professional,
        Tone::Casual,
        Tone::Witty,
        Tone::Authoritative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Default => "Default",
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Witty => "Witty",
            Tone::Authoritative => "Authoritative",
        }
    }

    /// Prompt sentence for this tone; empty for `Default`.
    pub fn instruction(&self) -> String {
        match self {
            Tone::Default => String::new(),
            other => format!(
                "Adopt a **{}** tone of voice.",
                other.as_str().to_lowercase()
            ),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTone(pub String);

impl fmt::Display for UnknownTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = Tone::ALL
            .iter()
            .map(Tone::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Unsupported tone '{}'. Expected one of: {options}", self.0)
    }
}

impl FromStr for Tone {
    type Err = UnknownTone;

    /// Case-insensitive; a blank string is `Default`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Tone::Default);
        }
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTone(s.to_string()))
    }
}
