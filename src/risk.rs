//! Fraud-score risk bands.
//!
//! One threshold table serves the aggregate score and every per-question
//! score: `<= 10` low, `<= 50` medium, above that high. Input is not clamped.
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Highest score still classified as low risk.
pub const LOW_RISK_MAX: f64 = 10.0;
/// Highest score still classified as medium risk.
pub const MEDIUM_RISK_MAX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low Risk",
            RiskBand::Medium => "Medium Risk",
            RiskBand::High => "High Risk",
        }
    }

    /// Severity rank: 0 low, 1 medium, 2 high.
    pub fn tier(&self) -> u8 {
        match self {
            RiskBand::Low => 0,
            RiskBand::Medium => 1,
            RiskBand::High => 2,
        }
    }

    /// Badge colour variant used by presentation layers.
    pub fn color_tag(&self) -> &'static str {
        match self {
            RiskBand::Low => "success",
            RiskBand::Medium => "warning",
            RiskBand::High => "destructive",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RiskBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RiskBand", 3)?;
        s.serialize_field("label", self.label())?;
        s.serialize_field("tier", &self.tier())?;
        s.serialize_field("color", self.color_tag())?;
        s.end()
    }
}

pub fn classify(score: f64) -> RiskBand {
    if score <= LOW_RISK_MAX {
        RiskBand::Low
    } else if score <= MEDIUM_RISK_MAX {
        RiskBand::Medium
    } else {
        RiskBand::High
    }
}
