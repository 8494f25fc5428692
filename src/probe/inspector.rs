//! Video inspection through the external mediainfo tool

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::model::VideoSpec;
use crate::error::{WebvidError, WebvidResult};
use crate::ports::{ProcessPort, ToolCommand};
use crate::probe::mediainfo::MediaInfoReport;

/// Video inspector for reading geometry and rates from media files
pub struct VideoInspector {
    process: Arc<dyn ProcessPort>,
    mediainfo: String,
    timeout: Duration,
}

impl VideoInspector {
    /// Create a new video inspector
    pub fn new(process: Arc<dyn ProcessPort>, mediainfo: impl Into<String>, timeout: Duration) -> Self {
        Self {
            process,
            mediainfo: mediainfo.into(),
            timeout,
        }
    }

    /// Command used to inspect a file
    pub fn command_for(&self, path: &Path) -> ToolCommand {
        ToolCommand::new(&self.mediainfo)
            .arg(path)
            .with_timeout(self.timeout)
    }

    /// Inspect a video file
    pub async fn inspect(&self, path: &Path) -> WebvidResult<VideoSpec> {
        info!("Inspecting video file: {}", path.display());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| metadata_error(path, format!("cannot read file: {}", e)))?;
        if !metadata.is_file() {
            return Err(metadata_error(path, "not a regular file"));
        }

        let output = self
            .process
            .invoke(&self.command_for(path))
            .await
            .map_err(|e| metadata_error(path, e.to_string()))?;
        if !output.success() {
            return Err(metadata_error(
                path,
                format!("{} failed with {}", self.mediainfo, output.failure_summary()),
            ));
        }

        let report = MediaInfoReport::parse(&output.stdout);
        let width = report
            .width()
            .ok_or_else(|| metadata_error(path, "no video width in report"))?;
        let height = report
            .height()
            .ok_or_else(|| metadata_error(path, "no video height in report"))?;
        let frame_rate = report
            .frame_rate()
            .ok_or_else(|| metadata_error(path, "no video frame rate in report"))?;

        let spec = VideoSpec::new(path, width, height, frame_rate)?.with_rates(
            report.video_bitrate_kbps(),
            report.audio_bitrate_kbps(),
            report.audio_sampling_hz(),
        );

        debug!("Video spec: {:?}", spec);
        info!(
            "Video inspection completed: {}x{} @ {} fps",
            spec.width, spec.height, spec.frame_rate
        );
        Ok(spec)
    }
}

fn metadata_error(path: &Path, message: impl Into<String>) -> WebvidError {
    WebvidError::Metadata {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ProcessOutput;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedProcess {
        output: ProcessOutput,
        calls: Mutex<Vec<ToolCommand>>,
    }

    #[async_trait]
    impl ProcessPort for CannedProcess {
        async fn invoke(&self, command: &ToolCommand) -> WebvidResult<ProcessOutput> {
            self.calls.lock().unwrap().push(command.clone());
            Ok(self.output.clone())
        }
    }

    fn inspector(exit_code: i32, stdout: &str) -> (VideoInspector, Arc<CannedProcess>) {
        let process = Arc::new(CannedProcess {
            output: ProcessOutput {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                stderr: "mediainfo: error".to_string(),
            },
            calls: Mutex::new(Vec::new()),
        });
        let inspector = VideoInspector::new(process.clone(), "mediainfo", Duration::from_secs(5));
        (inspector, process)
    }

    fn video_file() -> tempfile::NamedTempFile {
        tempfile::Builder::new().suffix(".mov").tempfile().unwrap()
    }

    #[tokio::test]
    async fn test_inspect_reads_spec() {
        let file = video_file();
        let (inspector, process) = inspector(
            0,
            "Video\nWidth : 1 920 pixels\nHeight : 1 080 pixels\nFrame rate : 30.000 FPS\n\
             Audio\nSampling rate : 44.1 kHz\n",
        );

        let spec = inspector.inspect(file.path()).await.unwrap();
        assert_eq!((spec.width, spec.height), (1920, 1080));
        assert_eq!(spec.frame_rate, 30.0);
        assert_eq!(spec.audio_sampling_hz, Some(44100));
        assert_eq!(spec.video_bitrate_kbps, None);

        let calls = process.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "mediainfo");
        assert_eq!(calls[0].args, vec![file.path().as_os_str().to_os_string()]);
        assert_eq!(calls[0].timeout, Some(Duration::from_secs(5)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_inspect_passes_non_utf8_path_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"clip\xff.mov"));
        std::fs::write(&path, b"video").unwrap();
        let (inspector, process) = inspector(
            0,
            "Video\nWidth : 640 pixels\nHeight : 480 pixels\nFrame rate : 25 FPS\n",
        );

        let spec = inspector.inspect(&path).await.unwrap();
        assert_eq!(spec.path, path);

        let calls = process.calls.lock().unwrap();
        let arg = Path::new(&calls[0].args[0]);
        assert_eq!(arg, path);
        assert!(arg.exists());
    }

    #[tokio::test]
    async fn test_inspect_fails_on_non_zero_exit() {
        let file = video_file();
        let (inspector, _) = inspector(1, "");

        let err = inspector.inspect(file.path()).await.unwrap_err();
        assert!(matches!(err, WebvidError::Metadata { .. }));
        assert!(err.to_string().contains("exit code 1"));
    }

    #[tokio::test]
    async fn test_inspect_fails_on_missing_fields() {
        let file = video_file();
        let (inspector, _) = inspector(0, "Video\nWidth : 640 pixels\nHeight : 480 pixels\n");

        let err = inspector.inspect(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("frame rate"));
    }

    #[tokio::test]
    async fn test_inspect_fails_on_unreadable_file_without_spawning() {
        let (inspector, process) = inspector(0, "");

        let err = inspector
            .inspect(Path::new("/definitely/not/here.mov"))
            .await
            .unwrap_err();
        assert!(matches!(err, WebvidError::Metadata { .. }));
        assert!(process.calls.lock().unwrap().is_empty());
    }
}
