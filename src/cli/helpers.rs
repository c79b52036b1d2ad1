//! Shared formatting helpers for CLI commands
//!
//! The analytics return structured values; everything about currency,
//! percentage, and color rendering lives here.

use console::{style, StyledObject};

use crate::analytics::RiskTier;

/// Format an optional price as dollars, or "N/A"
pub fn fmt_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v:.2}"),
        None => "N/A".to_string(),
    }
}

/// Format a 0-1 rate as a percentage
pub fn fmt_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Format an optional percentage value (already in percent units)
pub fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "N/A".to_string(),
    }
}

/// Format a similarity score as a whole percentage
pub fn fmt_similarity(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// Human-readable risk tier label
pub fn risk_label(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Stable => "Stable",
        RiskTier::Watch => "Watch",
        RiskTier::HighRisk => "High Risk",
    }
}

/// Risk tier label with the color used across all commands
pub fn styled_risk(tier: RiskTier) -> StyledObject<&'static str> {
    match tier {
        RiskTier::Stable => style(risk_label(tier)).green(),
        RiskTier::Watch => style(risk_label(tier)).yellow(),
        RiskTier::HighRisk => style(risk_label(tier)).red().bold(),
    }
}
