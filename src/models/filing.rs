use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Regulatory filing categories the backend knows how to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FilingType {
    /// Annual report
    #[default]
    #[serde(rename = "10-K")]
    TenK,
    /// Quarterly report
    #[serde(rename = "10-Q")]
    TenQ,
    /// Current report (material events)
    #[serde(rename = "8-K")]
    EightK,
}

impl FilingType {
    pub const ALL: [FilingType; 3] = [FilingType::TenK, FilingType::TenQ, FilingType::EightK];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TenK => "10-K",
            Self::TenQ => "10-Q",
            Self::EightK => "8-K",
        }
    }
}

impl std::fmt::Display for FilingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingType {
    type Err = String;

    /// Accepts `10-K`, `10k`, `10K` and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();
        match compact.as_str() {
            "10K" => Ok(Self::TenK),
            "10Q" => Ok(Self::TenQ),
            "8K" => Ok(Self::EightK),
            _ => Err(format!(
                "Unknown filing type: {}. Use one of: 10-K, 10-Q, 8-K",
                s.trim()
            )),
        }
    }
}

/// Trim and upper-case a ticker. Returns `None` for empty or whitespace-only input.
pub fn normalize_ticker(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
