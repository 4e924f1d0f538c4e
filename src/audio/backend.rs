use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio asset not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
    #[error("audio output unavailable: {0}")]
    Output(String),
}

/// Handle to one playing clip.
///
/// Dropping the handle cancels playback, the same as calling `stop`.
pub trait Clip {
    fn set_volume(&mut self, volume: f32);
    fn stop(&mut self);
    /// Resume a clip that was paused or finished; only meaningful for loops.
    fn resume(&mut self) {}
}

/// Something that can turn an asset path into a playing clip.
pub trait Backend {
    /// Start playing `path` at `volume`. `looping` clips repeat until stopped.
    fn open(&self, path: &Path, looping: bool, volume: f32) -> Result<Box<dyn Clip>, AudioError>;
}

/// Backend used when no audio output is compiled in or available.
///
/// It still resolves assets so missing files show up in the log exactly as
/// they would with a real output device.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl Backend for SilentBackend {
    fn open(&self, path: &Path, looping: bool, volume: f32) -> Result<Box<dyn Clip>, AudioError> {
        if !path.is_file() {
            return Err(AudioError::Missing(path.to_path_buf()));
        }
        debug!(path = %path.display(), looping, volume, "silent playback");
        Ok(Box::new(SilentClip {
            path: path.to_path_buf(),
        }))
    }
}

struct SilentClip {
    path: PathBuf,
}

impl Clip for SilentClip {
    fn set_volume(&mut self, volume: f32) {
        trace!(path = %self.path.display(), volume, "volume");
    }

    fn stop(&mut self) {
        trace!(path = %self.path.display(), "stop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_backend_rejects_missing_assets() {
        let err = SilentBackend
            .open(Path::new("/no/such/clip.mp3"), false, 1.0)
            .err()
            .unwrap();
        assert!(matches!(err, AudioError::Missing(_)));
    }

    #[test]
    fn silent_backend_opens_existing_assets() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut clip = SilentBackend.open(file.path(), true, 0.5).unwrap();
        clip.set_volume(0.1);
        clip.resume();
        clip.stop();
    }
}
