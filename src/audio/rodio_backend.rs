//! Audio output through `rodio`.
//!
//! Every clip gets its own `Sink` on the shared output stream. The stream's
//! mixer thread does the decoding and playback, so opening a clip returns
//! immediately; stopping or dropping the sink cancels it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::backend::{AudioError, Backend, Clip};

pub struct RodioBackend {
    // Output stops when the stream is dropped.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioBackend {
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl Backend for RodioBackend {
    fn open(&self, path: &Path, looping: bool, volume: f32) -> Result<Box<dyn Clip>, AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Output(e.to_string()))?;
        sink.set_volume(volume);
        if looping {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }
        Ok(Box::new(RodioClip { sink }))
    }
}

struct RodioClip {
    sink: Sink,
}

impl Clip for RodioClip {
    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn resume(&mut self) {
        self.sink.play();
    }
}
