use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SizedSample};
use ringbuf::traits::*;
use ringbuf::{HeapCons, HeapProd, HeapRb};
use tracing::{info, warn};

use super::AudioError;
use super::analyser::Analyser;

/// Samples the capture thread may queue between two frames.
const RING_CAPACITY: usize = 48_000;

/// A live input stream. Samples arrive on the audio host's thread and are
/// drained on the game thread each frame.
pub struct Microphone {
    _stream: cpal::Stream,
    cons: HeapCons<f32>,
    analyser: Analyser,
}

fn downmix<T>(data: &[T], channels: usize, to_f32: impl Fn(T) -> f32, prod: &mut HeapProd<f32>)
where
    T: Copy,
{
    for frame in data.chunks(channels.max(1)) {
        let sum: f32 = frame.iter().map(|&s| to_f32(s)).sum();
        // A full ring refuses new samples until the game thread drains it,
        // which it does every frame; only a stalled frame loses audio.
        let _ = prod.try_push(sum / frame.len() as f32);
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut prod: HeapProd<f32>,
    to_f32: fn(T) -> f32,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + Copy + Send + 'static,
{
    let channels = config.channels as usize;
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| downmix(data, channels, to_f32, &mut prod),
            |err| warn!("microphone stream error: {err}"),
            None,
        )
        .map_err(|e| AudioError::Stream(e.to_string()))
}

impl Microphone {
    /// Opens the default input device. This is the permission request; on
    /// failure the game keeps going without voice control.
    pub fn open() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(AudioError::NoInputDevice)?;
        let supported = device
            .default_input_config()
            .map_err(|e| AudioError::Config(e.to_string()))?;
        let format = supported.sample_format();
        let config = supported.config();

        let (prod, cons) = HeapRb::<f32>::new(RING_CAPACITY).split();
        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, prod, |s| s)?,
            SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, prod, |s| s as f32 / i16::MAX as f32)?
            }
            SampleFormat::U16 => build_stream::<u16>(&device, &config, prod, |s| {
                (s as f32 - 32_768.0) / 32_768.0
            })?,
            other => return Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
        };
        stream
            .play()
            .map_err(|e| AudioError::Stream(e.to_string()))?;

        let name = device.name().unwrap_or_default();
        info!(
            device = %name,
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            "microphone open"
        );

        Ok(Self {
            _stream: stream,
            cons,
            analyser: Analyser::new(),
        })
    }

    /// Drains pending samples and reads the current normalized volume.
    pub fn read_volume(&mut self) -> f64 {
        self.analyser.push_samples(self.cons.pop_iter());
        self.analyser.volume()
    }
}
