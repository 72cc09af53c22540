//! Audio capture from microphone

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, StreamConfig};

use crate::{Error, Result};

/// Sample rate for audio capture (16kHz for speech)
pub const SAMPLE_RATE: u32 = 16000;

/// Records fixed-length clips from the default input device
pub struct AudioCapture {
    device: Device,
    config: StreamConfig,
}

impl AudioCapture {
    /// Open the default input device at 16 kHz mono
    ///
    /// # Errors
    ///
    /// Returns error if there is no input device or it cannot capture 16 kHz
    /// mono
    pub fn new() -> Result<Self> {
        let device = cpal::default_host()
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device available".to_string()))?;

        let config = device
            .supported_input_configs()
            .map_err(|e| Error::Audio(e.to_string()))?
            .find(|c| {
                c.channels() == 1
                    && (c.min_sample_rate()..=c.max_sample_rate()).contains(&SampleRate(SAMPLE_RATE))
            })
            .ok_or_else(|| Error::Audio("no mono 16kHz input config found".to_string()))?
            .with_sample_rate(SampleRate(SAMPLE_RATE))
            .config();

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            channels = config.channels,
            "microphone ready"
        );

        Ok(Self { device, config })
    }

    /// Record for exactly `duration` and return the captured samples
    ///
    /// The stream only exists while recording, so nothing is captured
    /// between turns.
    ///
    /// # Errors
    ///
    /// Returns error if the input stream cannot be started
    pub async fn record(&self, duration: Duration) -> Result<Vec<f32>> {
        let samples = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&samples);

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = sink.lock() {
                        buf.extend_from_slice(data);
                    }
                },
                |err| tracing::error!(error = %err, "audio stream error"),
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;
        stream.play().map_err(|e| Error::Audio(e.to_string()))?;

        tracing::debug!(seconds = duration.as_secs(), "recording");
        tokio::time::sleep(duration).await;
        drop(stream);

        let samples = samples
            .lock()
            .map(|mut buf| std::mem::take(&mut *buf))
            .unwrap_or_default();
        Ok(samples)
    }
}

/// Loudest 100ms window, as RMS energy
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn peak_energy(samples: &[f32]) -> f32 {
    samples
        .chunks(SAMPLE_RATE as usize / 10)
        .map(|frame| {
            let sum_squares: f32 = frame.iter().map(|s| s * s).sum();
            (sum_squares / frame.len() as f32).sqrt()
        })
        .fold(0.0, f32::max)
}
