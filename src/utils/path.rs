//! Path utilities for mirroring input trees into the output root

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::model::OutputFormat;
use crate::error::{WebvidError, WebvidResult};

/// Path utilities for output naming
pub struct PathUtils;

impl PathUtils {
    /// Directory a file's outputs go to.
    ///
    /// With an output root, the file's directory relative to `input_root` is
    /// recreated under it. Without one, outputs sit next to the input.
    pub fn mirror_directory(
        input_root: &Path,
        output_root: Option<&Path>,
        file: &Path,
    ) -> WebvidResult<PathBuf> {
        let parent = file.parent().unwrap_or_else(|| Path::new(""));
        let Some(output_root) = output_root else {
            return Ok(parent.to_path_buf());
        };

        let relative = parent.strip_prefix(input_root).map_err(|_| {
            WebvidError::filesystem(
                file,
                format!("not located under input root {}", input_root.display()),
            )
        })?;
        Ok(output_root.join(relative))
    }

    /// `<prefix><stem>.<extension>` for one format
    pub fn output_file_name(
        prefix: Option<&str>,
        file: &Path,
        format: OutputFormat,
    ) -> WebvidResult<OsString> {
        let stem = file
            .file_stem()
            .ok_or_else(|| WebvidError::filesystem(file, "invalid input file name"))?;

        let mut name = OsString::from(prefix.unwrap_or(""));
        name.push(stem);
        name.push(".");
        name.push(format.extension());
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_directory_preserves_structure() {
        let dir = PathUtils::mirror_directory(
            Path::new("/videos"),
            Some(Path::new("/out")),
            Path::new("/videos/a/b/video1.avi"),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/out/a/b"));

        let top = PathUtils::mirror_directory(
            Path::new("/videos"),
            Some(Path::new("/out")),
            Path::new("/videos/clip.avi"),
        )
        .unwrap();
        assert_eq!(top, PathBuf::from("/out"));
    }

    #[test]
    fn test_mirror_directory_without_output_root() {
        let dir = PathUtils::mirror_directory(
            Path::new("/videos"),
            None,
            Path::new("/videos/c/video2.avi"),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/videos/c"));
    }

    #[test]
    fn test_mirror_directory_rejects_foreign_file() {
        assert!(PathUtils::mirror_directory(
            Path::new("/videos"),
            Some(Path::new("/out")),
            Path::new("/elsewhere/clip.avi"),
        )
        .is_err());
    }

    #[test]
    fn test_output_file_name() {
        let file = Path::new("/videos/a/video1.avi");
        assert_eq!(
            PathUtils::output_file_name(Some("web_"), file, OutputFormat::Mp4).unwrap(),
            "web_video1.mp4"
        );
        assert_eq!(
            PathUtils::output_file_name(None, Path::new("clip.tar.mov"), OutputFormat::Ogg)
                .unwrap(),
            "clip.tar.ogg"
        );
        assert_eq!(
            PathUtils::output_file_name(None, Path::new("noext"), OutputFormat::Webm).unwrap(),
            "noext.webm"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_output_file_name_keeps_raw_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let file = Path::new(OsStr::from_bytes(b"/videos/clip\xff.mov"));
        assert_eq!(
            PathUtils::output_file_name(Some("web_"), file, OutputFormat::Ogg).unwrap(),
            OsStr::from_bytes(b"web_clip\xff.ogg").to_os_string()
        );
    }
}
