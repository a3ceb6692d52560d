//! Still-frame extraction for animated and video sources.

use std::io::Cursor;
use std::process::Stdio;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::entities::MediaClass;
use crate::domain::errors::TranscodeError;
use crate::domain::ports::TranscodePort;

const DEFAULT_FFMPEG: &str = "ffmpeg";
const STDERR_EXCERPT_LEN: usize = 200;

/// Reduces animated images and videos to a single PNG frame.
///
/// Animated images decode in-process via the `image` codecs (the decoder
/// yields the first frame). Video containers go through an `ffmpeg` sidecar
/// process extracting the first decodable frame.
pub struct StillFrameTranscoder {
    ffmpeg_path: String,
}

impl StillFrameTranscoder {
    /// Creates a transcoder invoking `ffmpeg` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ffmpeg(DEFAULT_FFMPEG)
    }

    /// Creates a transcoder with an explicit ffmpeg binary path.
    #[must_use]
    pub fn with_ffmpeg(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    async fn video_frame_png(&self, bytes: &[u8]) -> Result<Vec<u8>, TranscodeError> {
        let work_dir = tempfile::tempdir()?;
        let input_path = work_dir.path().join("source");
        let output_path = work_dir.path().join("still.png");

        tokio::fs::write(&input_path, bytes).await?;

        debug!(ffmpeg = %self.ffmpeg_path, size = bytes.len(), "Extracting video frame");

        let output = Command::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-i")
            .arg(&input_path)
            .args(["-frames:v", "1", "-f", "image2", "-c:v", "png"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let excerpt: String = stderr.chars().take(STDERR_EXCERPT_LEN).collect();
            warn!(status = %output.status, "ffmpeg frame extraction failed");
            return Err(TranscodeError::tool(format!(
                "ffmpeg exited with {}: {excerpt}",
                output.status
            )));
        }

        let png = tokio::fs::read(&output_path).await?;
        Ok(png)
    }
}

impl Default for StillFrameTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscodePort for StillFrameTranscoder {
    async fn still_png(&self, bytes: &[u8], class: MediaClass) -> Result<Vec<u8>, TranscodeError> {
        match class {
            MediaClass::MotionVideo => self.video_frame_png(bytes).await,
            MediaClass::AnimatedImage | MediaClass::StaticImage | MediaClass::Unknown => {
                let bytes = bytes.to_vec();
                tokio::task::spawn_blocking(move || first_frame_png(&bytes))
                    .await
                    .map_err(|e| TranscodeError::decode(format!("decode task panicked: {e}")))?
            }
        }
    }
}

/// Decodes the first frame of `bytes` and re-encodes it as PNG.
fn first_frame_png(bytes: &[u8]) -> Result<Vec<u8>, TranscodeError> {
    let frame: DynamicImage =
        image::load_from_memory(bytes).map_err(|e| TranscodeError::decode(e.to_string()))?;

    let mut png = Vec::new();
    frame
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| TranscodeError::encode(e.to_string()))?;

    Ok(png)
}
