use serde::{Deserialize, Serialize};

/// Health classification of a pool, banded on the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Overall score >= 80.
    Healthy,
    /// Overall score in [60, 80).
    Warning,
    /// Overall score < 60.
    Critical,
}

impl HealthStatus {
    /// Classifies an overall score. Lower bounds are inclusive.
    #[must_use]
    pub fn from_overall_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Healthy
        } else if score >= 60.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Converts the status to its storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Parses a status from its storage string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "healthy" => Some(Self::Healthy),
            "warning" => Some(Self::Warning),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Severity of an alert record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Converts the severity to its storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Venue a monitored pool trades on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dex {
    UniswapV2,
    UniswapV3,
    Raydium,
    Orca,
    PancakeSwap,
}

impl Dex {
    /// Converts the venue to its storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UniswapV2 => "uniswap_v2",
            Self::UniswapV3 => "uniswap_v3",
            Self::Raydium => "raydium",
            Self::Orca => "orca",
            Self::PancakeSwap => "pancakeswap",
        }
    }

    /// Chain identifier used when querying market data aggregators.
    #[must_use]
    pub fn chain_id(&self) -> &'static str {
        match self {
            Self::UniswapV2 | Self::UniswapV3 => "ethereum",
            Self::Raydium | Self::Orca => "solana",
            Self::PancakeSwap => "bsc",
        }
    }

    /// Parses a venue from its storage string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniswap_v2" | "uniswapv2" => Some(Self::UniswapV2),
            "uniswap_v3" | "uniswapv3" => Some(Self::UniswapV3),
            "raydium" => Some(Self::Raydium),
            "orca" => Some(Self::Orca),
            "pancakeswap" => Some(Self::PancakeSwap),
            _ => None,
        }
    }
}
