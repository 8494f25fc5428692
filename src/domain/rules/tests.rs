// Unit tests for business rules

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use crate::domain::rules::*;

    #[test]
    fn test_overwrite_rules_without_existing_output() {
        for policy in [
            OverwritePolicy::SkipIfExists,
            OverwritePolicy::Backup,
            OverwritePolicy::Overwrite,
        ] {
            assert_eq!(OverwriteRules::decide(policy, false), OutputDecision::Proceed);
        }
    }

    #[test]
    fn test_overwrite_rules_with_existing_output() {
        assert_eq!(
            OverwriteRules::decide(OverwritePolicy::SkipIfExists, true),
            OutputDecision::Skip
        );
        assert_eq!(
            OverwriteRules::decide(OverwritePolicy::Backup, true),
            OutputDecision::Backup
        );
        assert_eq!(
            OverwriteRules::decide(OverwritePolicy::Overwrite, true),
            OutputDecision::Proceed
        );
    }

    #[test]
    fn test_frame_rate_clamped_per_format() {
        assert_eq!(FrameRateRules::output_frame_rate(29.97, OutputFormat::Flv), 29.97);
        assert_eq!(FrameRateRules::output_frame_rate(59.94, OutputFormat::Flv), 30.0);
        assert_eq!(FrameRateRules::output_frame_rate(59.94, OutputFormat::Mp4), 30.0);
        assert_eq!(FrameRateRules::output_frame_rate(59.94, OutputFormat::Webm), 59.94);
        assert_eq!(FrameRateRules::output_frame_rate(120.0, OutputFormat::Ogg), 60.0);
    }

    #[test]
    fn test_frame_rate_formatting() {
        assert_eq!(FrameRateRules::format_rate(30.0), "30");
        assert_eq!(FrameRateRules::format_rate(29.97), "29.97");
        assert_eq!(FrameRateRules::format_rate(23.976), "23.976");
        assert_eq!(FrameRateRules::format_rate(29.970029), "29.97");
    }

    #[test]
    fn test_rate_limit_rules() {
        assert_eq!(RateLimitRules::cap(Some(5000), 1024), 1024);
        assert_eq!(RateLimitRules::cap(Some(800), 1024), 800);
        assert_eq!(RateLimitRules::cap(None, 56), 56);
        assert_eq!(RateLimitRules::cap(Some(0), 56), 56);
    }
}
