//! rodio 音频后端
//!
//! 支持 MP3, WAV, FLAC, OGG 格式。每个通道同一时刻只有一个 Sink，
//! 新的播放替换旧的。

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{AudioBackend, Channel};
use crate::resources::ResourceError;

/// rodio 音频后端
pub struct RodioAudioBackend {
    /// 音频输出流（必须保持存活）
    _stream: OutputStream,
    /// 音频输出句柄
    stream_handle: OutputStreamHandle,
    sinks: HashMap<Channel, Sink>,
}

impl RodioAudioBackend {
    /// 打开默认输出设备
    pub fn new() -> Result<Self, ResourceError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| ResourceError::DeviceUnavailable {
                message: e.to_string(),
            })?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            sinks: HashMap::new(),
        })
    }

    fn open_sink(&self, path: &Path, looping: bool, volume: f32) -> Result<Sink, ResourceError> {
        let load_failed = |message: String| ResourceError::LoadFailed {
            path: path.display().to_string(),
            kind: "audio".to_string(),
            message,
        };

        let file = File::open(path).map_err(|e| load_failed(e.to_string()))?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| load_failed(e.to_string()))?;
        let sink = Sink::try_new(&self.stream_handle).map_err(|e| ResourceError::DeviceUnavailable {
            message: e.to_string(),
        })?;

        sink.set_volume(volume);
        if looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        Ok(sink)
    }
}

impl AudioBackend for RodioAudioBackend {
    fn play(
        &mut self,
        channel: Channel,
        path: &Path,
        looping: bool,
        volume: f32,
    ) -> Result<(), ResourceError> {
        self.stop(channel);
        let sink = self.open_sink(path, looping, volume)?;
        self.sinks.insert(channel, sink);
        Ok(())
    }

    fn stop(&mut self, channel: Channel) {
        if let Some(sink) = self.sinks.remove(&channel) {
            sink.stop();
        }
    }

    fn set_volume(&mut self, channel: Channel, volume: f32) {
        if let Some(sink) = self.sinks.get(&channel) {
            sink.set_volume(volume);
        }
    }
}
