// Domain rules - Business logic and policies

use crate::domain::model::*;

/// Decision taken for an output path before any job starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDecision {
    /// Emit no job
    Skip,
    /// Rename the existing output to `.bak`, then convert
    Backup,
    /// Convert, replacing whatever is there
    Proceed,
}

/// Business rules for existing outputs
pub struct OverwriteRules;

impl OverwriteRules {
    /// Resolve the policy against the current state of the output path
    pub fn decide(policy: OverwritePolicy, output_exists: bool) -> OutputDecision {
        match (policy, output_exists) {
            (OverwritePolicy::SkipIfExists, true) => OutputDecision::Skip,
            (OverwritePolicy::Backup, true) => OutputDecision::Backup,
            _ => OutputDecision::Proceed,
        }
    }
}

/// Business rules for frame rate selection
pub struct FrameRateRules;

impl FrameRateRules {
    /// Keep the source rate unless it exceeds the format's cap
    pub fn output_frame_rate(source: f64, format: OutputFormat) -> f64 {
        source.min(format.max_frame_rate())
    }

    /// Render a rate without trailing zeros (`30`, `29.97`)
    pub fn format_rate(rate: f64) -> String {
        let rounded = (rate * 1000.0).round() / 1000.0;
        format!("{}", rounded)
    }
}

/// Business rules for bounding source rates
pub struct RateLimitRules;

impl RateLimitRules {
    /// Source value capped at `max`, or `max` when the source did not report one
    pub fn cap(source: Option<u32>, max: u32) -> u32 {
        match source {
            Some(value) if value > 0 => value.min(max),
            _ => max,
        }
    }
}

#[cfg(test)]
mod tests;
