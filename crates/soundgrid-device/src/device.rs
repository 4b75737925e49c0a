//! Device state: layout parameters, binding registry, downmix scratch.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use soundgrid_routing::{InputBinding, OutputBinding};

use crate::error::{ConfigError, RegistrationError};

/// Capacity of the downmix scratch buffer, in samples.
///
/// Bounds the largest accepted `frames_per_buffer`: a mono fold consumes
/// two source samples per frame, so `frames * 2` must fit.
pub const MAX_BUFFER_LEN: usize = 8192;

/// Sample rate substituted when a caller supplies a non-positive one.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Immutable-per-session device attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub internal_name: String,
    pub display_name: String,
    pub host_api: String,
    pub output_channels: u16,
    pub input_channels: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            internal_name: "Unknown Soundcard".to_string(),
            display_name: "Unknown Soundcard".to_string(),
            host_api: "Unknown API".to_string(),
            output_channels: 2,
            input_channels: 2,
        }
    }
}

/// One multi-channel sound device: a fixed interleaved channel layout plus
/// the ordered lists of output and input bindings registered against it.
///
/// Registration and clearing happen on the configuration path and must be
/// externally serialized against [`compose_output_buffer`]: the core adds
/// no locking of its own so that the real-time path stays lock-free.
/// Reconfigure only while the device's stream is stopped.
///
/// [`compose_output_buffer`]: Device::compose_output_buffer
pub struct Device {
    config: DeviceConfig,
    sample_rate: f64,
    frames_per_buffer: usize,
    pub(crate) outputs: Vec<OutputBinding>,
    inputs: Vec<InputBinding>,
    // Allocated once here so the callback never allocates.
    pub(crate) downmix_scratch: Box<[f32]>,
}

impl Device {
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            config,
            sample_rate: DEFAULT_SAMPLE_RATE,
            frames_per_buffer: 0,
            outputs: Vec::new(),
            inputs: Vec::new(),
            downmix_scratch: vec![0.0; MAX_BUFFER_LEN].into_boxed_slice(),
        }
    }

    pub fn internal_name(&self) -> &str {
        &self.config.internal_name
    }

    pub fn display_name(&self) -> &str {
        &self.config.display_name
    }

    pub fn host_api(&self) -> &str {
        &self.config.host_api
    }

    pub fn set_host_api(&mut self, api: impl Into<String>) {
        self.config.host_api = api.into();
    }

    pub fn num_output_channels(&self) -> u16 {
        self.config.output_channels
    }

    pub fn num_input_channels(&self) -> u16 {
        self.config.input_channels
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Set the device sample rate.
    ///
    /// Non-positive values are silently replaced by [`DEFAULT_SAMPLE_RATE`]
    /// rather than rejected.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        if sample_rate <= 0.0 {
            warn!(
                sample_rate,
                fallback = DEFAULT_SAMPLE_RATE,
                "non-positive sample rate, using default"
            );
            self.sample_rate = DEFAULT_SAMPLE_RATE;
        } else {
            self.sample_rate = sample_rate;
        }
    }

    pub fn frames_per_buffer(&self) -> usize {
        self.frames_per_buffer
    }

    /// Set the per-callback frame count.
    ///
    /// Fails with [`ConfigError::FramesPerBufferTooLarge`] when a mono fold
    /// at this size would overrun the downmix scratch buffer; the previous
    /// value is kept. Callers should treat the error as terminal.
    pub fn set_frames_per_buffer(&mut self, frames: usize) -> Result<(), ConfigError> {
        let capacity = self.downmix_scratch.len();
        if frames * 2 > capacity {
            return Err(ConfigError::FramesPerBufferTooLarge { frames, capacity });
        }
        self.frames_per_buffer = frames;
        Ok(())
    }

    /// Register an output binding.
    ///
    /// Outputs must claim pairwise disjoint channel ranges: a clash with any
    /// existing registration is rejected before the bounds check, and the
    /// registry is left unchanged on failure.
    pub fn register_output(&mut self, out: OutputBinding) -> Result<(), RegistrationError> {
        if self.outputs.iter().any(|existing| out.clashes_with(existing)) {
            warn!(
                device = %self.config.internal_name,
                base = out.group().channel_base(),
                count = out.group().channel_count(),
                "rejected output registration: channels already claimed"
            );
            return Err(RegistrationError::DuplicateOutputChannel);
        }
        if !out.group().fits_within(self.config.output_channels) {
            warn!(
                device = %self.config.internal_name,
                base = out.group().channel_base(),
                count = out.group().channel_count(),
                output_channels = self.config.output_channels,
                "rejected output registration: range out of layout"
            );
            return Err(RegistrationError::ExcessiveOutputChannel);
        }
        debug!(
            device = %self.config.internal_name,
            base = out.group().channel_base(),
            count = out.group().channel_count(),
            "registered output"
        );
        self.outputs.push(out);
        Ok(())
    }

    /// Register an input binding.
    ///
    /// No clash check: fanning the same captured channels out to several
    /// consumers is a supported pattern, so only the bounds are validated.
    pub fn register_input(&mut self, input: InputBinding) -> Result<(), RegistrationError> {
        if !input.group().fits_within(self.config.input_channels) {
            warn!(
                device = %self.config.internal_name,
                base = input.group().channel_base(),
                count = input.group().channel_count(),
                input_channels = self.config.input_channels,
                "rejected input registration: range out of layout"
            );
            return Err(RegistrationError::ExcessiveInputChannel);
        }
        debug!(
            device = %self.config.internal_name,
            base = input.group().channel_base(),
            count = input.group().channel_count(),
            "registered input"
        );
        self.inputs.push(input);
        Ok(())
    }

    /// Remove every output registration. Idempotent.
    pub fn clear_outputs(&mut self) {
        self.outputs.clear();
    }

    /// Remove every input registration. Idempotent.
    pub fn clear_inputs(&mut self) {
        self.inputs.clear();
    }

    /// Registered outputs, in registration order.
    pub fn outputs(&self) -> &[OutputBinding] {
        &self.outputs
    }

    /// Registered inputs, in registration order.
    pub fn inputs(&self) -> &[InputBinding] {
        &self.inputs
    }
}

#[cfg(test)]
mod tests {
    use soundgrid_routing::{ChannelGroup, InputBinding, OutputBinding, SampleSink, SampleView};

    use super::{Device, DeviceConfig, DEFAULT_SAMPLE_RATE, MAX_BUFFER_LEN};
    use crate::error::{ConfigError, RegistrationError};

    fn stereo_device() -> Device {
        Device::new(DeviceConfig::default())
    }

    fn output(base: u16, count: u16, buf: &[f32]) -> OutputBinding {
        OutputBinding::new(ChannelGroup::new(base, count), unsafe {
            SampleView::from_slice(buf)
        })
    }

    #[test]
    fn defaults_match_unknown_soundcard() {
        let device = stereo_device();
        assert_eq!(device.internal_name(), "Unknown Soundcard");
        assert_eq!(device.display_name(), "Unknown Soundcard");
        assert_eq!(device.host_api(), "Unknown API");
        assert_eq!(device.num_output_channels(), 2);
        assert_eq!(device.num_input_channels(), 2);
        assert_eq!(device.sample_rate(), DEFAULT_SAMPLE_RATE);
        assert_eq!(device.frames_per_buffer(), 0);
    }

    #[test]
    fn non_positive_sample_rate_falls_back_to_default() {
        let mut device = stereo_device();
        device.set_sample_rate(48000.0);
        assert_eq!(device.sample_rate(), 48000.0);

        device.set_sample_rate(0.0);
        assert_eq!(device.sample_rate(), DEFAULT_SAMPLE_RATE);

        device.set_sample_rate(-96000.0);
        assert_eq!(device.sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn frames_per_buffer_guard() {
        let mut device = stereo_device();

        // Largest accepted value: frames * 2 == capacity.
        assert_eq!(device.set_frames_per_buffer(MAX_BUFFER_LEN / 2), Ok(()));
        assert_eq!(device.frames_per_buffer(), MAX_BUFFER_LEN / 2);

        let too_big = MAX_BUFFER_LEN / 2 + 1;
        assert_eq!(
            device.set_frames_per_buffer(too_big),
            Err(ConfigError::FramesPerBufferTooLarge {
                frames: too_big,
                capacity: MAX_BUFFER_LEN,
            })
        );
        // Previous value survives the rejected call.
        assert_eq!(device.frames_per_buffer(), MAX_BUFFER_LEN / 2);
    }

    #[test]
    fn duplicate_output_rejected_before_bounds() {
        let buf = vec![0.0_f32; 8];
        let mut device = Device::new(DeviceConfig {
            output_channels: 2,
            ..DeviceConfig::default()
        });
        device.register_output(output(0, 2, &buf)).unwrap();

        // Overlaps AND exceeds the layout: the clash is reported.
        let err = device.register_output(output(1, 2, &buf)).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateOutputChannel);
        assert_eq!(device.outputs().len(), 1);
    }

    #[test]
    fn excessive_output_rejected() {
        let buf = vec![0.0_f32; 8];
        let mut device = stereo_device();
        let err = device.register_output(output(1, 2, &buf)).unwrap_err();
        assert_eq!(err, RegistrationError::ExcessiveOutputChannel);
        assert!(device.outputs().is_empty());
    }

    #[test]
    fn overlapping_inputs_both_accepted() {
        let mut a = vec![0.0_f32; 8];
        let mut b = vec![0.0_f32; 8];
        let mut device = stereo_device();
        let group = ChannelGroup::new(0, 2);

        device
            .register_input(InputBinding::new(group, unsafe {
                SampleSink::from_slice(&mut a)
            }))
            .unwrap();
        device
            .register_input(InputBinding::new(group, unsafe {
                SampleSink::from_slice(&mut b)
            }))
            .unwrap();
        assert_eq!(device.inputs().len(), 2);
    }

    #[test]
    fn excessive_input_rejected() {
        let mut buf = vec![0.0_f32; 8];
        let mut device = stereo_device();
        let err = device
            .register_input(InputBinding::new(ChannelGroup::new(2, 1), unsafe {
                SampleSink::from_slice(&mut buf)
            }))
            .unwrap_err();
        assert_eq!(err, RegistrationError::ExcessiveInputChannel);
        assert!(device.inputs().is_empty());
    }

    #[test]
    fn clears_are_idempotent() {
        let buf = vec![0.0_f32; 8];
        let mut device = stereo_device();
        device.register_output(output(0, 2, &buf)).unwrap();

        device.clear_outputs();
        device.clear_outputs();
        assert!(device.outputs().is_empty());

        device.clear_inputs();
        assert!(device.inputs().is_empty());
    }

    #[test]
    fn registration_order_preserved() {
        let buf = vec![0.0_f32; 8];
        let mut device = Device::new(DeviceConfig {
            output_channels: 6,
            ..DeviceConfig::default()
        });
        device.register_output(output(4, 2, &buf)).unwrap();
        device.register_output(output(0, 2, &buf)).unwrap();
        device.register_output(output(2, 1, &buf)).unwrap();

        let bases: Vec<u16> = device
            .outputs()
            .iter()
            .map(|o| o.group().channel_base())
            .collect();
        assert_eq!(bases, vec![4, 0, 2]);
    }
}
