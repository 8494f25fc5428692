// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("flv").unwrap(), OutputFormat::Flv);
        assert_eq!(OutputFormat::parse("OGG").unwrap(), OutputFormat::Ogg);
        assert_eq!(OutputFormat::parse("ogv").unwrap(), OutputFormat::Ogg);
        assert_eq!(OutputFormat::parse(" mp4 ").unwrap(), OutputFormat::Mp4);
        assert_eq!(OutputFormat::parse("webm").unwrap(), OutputFormat::Webm);

        assert!(OutputFormat::parse("avi").is_err());
    }

    #[test]
    fn test_output_format_list_defaults_to_all() {
        let empty: [&str; 0] = [];
        assert_eq!(OutputFormat::parse_list(&empty).unwrap(), OutputFormat::ALL.to_vec());
        assert_eq!(OutputFormat::parse_list(&[" , "]).unwrap(), OutputFormat::ALL.to_vec());
    }

    #[test]
    fn test_output_format_list_dedups_and_keeps_order() {
        let formats = OutputFormat::parse_list(&["webm,mp4", "webm", "ogv"]).unwrap();
        assert_eq!(
            formats,
            vec![OutputFormat::Webm, OutputFormat::Mp4, OutputFormat::Ogg]
        );

        assert!(OutputFormat::parse_list(&["mp4,mkv"]).is_err());
    }

    #[test]
    fn test_frame_rate_caps() {
        assert_eq!(OutputFormat::Flv.max_frame_rate(), 30.0);
        assert_eq!(OutputFormat::Mp4.max_frame_rate(), 30.0);
        assert_eq!(OutputFormat::Webm.max_frame_rate(), 60.0);
        assert_eq!(OutputFormat::Ogg.max_frame_rate(), 60.0);
    }

    #[test]
    fn test_overwrite_policy_from_flags() {
        assert_eq!(OverwritePolicy::from_flags(false, false), OverwritePolicy::Overwrite);
        assert_eq!(OverwritePolicy::from_flags(false, true), OverwritePolicy::Backup);
        assert_eq!(OverwritePolicy::from_flags(true, false), OverwritePolicy::SkipIfExists);
        // skip implies no write, so it takes priority over backup
        assert_eq!(OverwritePolicy::from_flags(true, true), OverwritePolicy::SkipIfExists);
    }

    #[test]
    fn test_video_spec_validation() {
        let spec = VideoSpec::new("clip.mov", 1920, 1080, 29.97).unwrap();
        assert_eq!(spec.aspect_ratio(), 16.0 / 9.0);
        assert_eq!(spec.video_bitrate_kbps, None);

        assert!(VideoSpec::new("clip.mov", 1920, 1080, 0.0).is_err());
        assert!(VideoSpec::new("clip.mov", 1920, 1080, f64::NAN).is_err());
    }

    #[test]
    fn test_target_geometry_filter_expression() {
        let geometry = TargetGeometry {
            out_width: 640,
            out_height: 360,
            pad_left: 0,
            pad_top: 60,
            pad_right: 0,
            pad_bottom: 60,
        };

        assert_eq!(geometry.box_width(), 640);
        assert_eq!(geometry.box_height(), 480);
        assert_eq!(geometry.filter_expression(), "scale=640:360,pad=640:480:0:60");
    }

    #[test]
    fn test_staging_and_backup_paths() {
        let job = ConversionJob {
            input_path: PathBuf::from("in/clip.mov"),
            output_path: PathBuf::from("out/web_clip.mp4"),
            format: OutputFormat::Mp4,
            overwrite_policy: OverwritePolicy::Overwrite,
            dry_run: false,
            backup_path: None,
        };

        assert_eq!(job.staging_path(), PathBuf::from("out/web_clip.tmp.mp4"));
        assert_eq!(
            backup_path_for(Path::new("out/web_clip.mp4")),
            PathBuf::from("out/web_clip.mp4.bak")
        );
    }

    #[test]
    fn test_run_report_counts() {
        let outcome = |status| JobOutcome {
            input_path: PathBuf::from("a.avi"),
            output_path: PathBuf::from("a.flv"),
            format: OutputFormat::Flv,
            status,
        };
        let report = RunReport {
            outcomes: vec![
                outcome(JobStatus::Converted),
                outcome(JobStatus::Skipped),
                outcome(JobStatus::Planned("ffmpeg -i a.avi".to_string())),
                outcome(JobStatus::Failed("boom".to_string())),
            ],
            errors: Vec::new(),
        };

        assert_eq!(report.converted(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.planned(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert_eq!(report.planned_commands().collect::<Vec<_>>(), vec!["ffmpeg -i a.avi"]);
    }

    #[test]
    fn test_run_report_errors_fail_the_run() {
        let mut report = RunReport::default();
        assert!(report.is_success());

        report.errors.push("permission denied".to_string());
        assert!(!report.is_success());
    }
}
