//! Real-time buffer composition.
//!
//! Runs on the audio I/O thread once per hardware callback. Nothing here
//! allocates, locks, logs, or returns an error: every invariant the code
//! relies on was established at registration time, and the caller
//! guarantees that no registration or clear runs while a composition is in
//! flight.

use crate::device::Device;

impl Device {
    /// Assemble one interleaved hardware buffer from every registered
    /// output, in registration order.
    ///
    /// `output` must hold at least `frames * frame_size` samples;
    /// `frame_size` is the number of interleaved channel slots per frame
    /// (normally the device's output channel count). Slots no output claims
    /// are left at exact zero.
    ///
    /// One-channel bindings are folded from their producer's two-channel
    /// data by averaging left and right into the device's scratch buffer
    /// before the copy; two-channel bindings are copied as-is.
    ///
    /// # Panics
    /// Panics if `output` is smaller than `frames * frame_size`. A binding
    /// whose channel range does not fit inside `frame_size` is a
    /// precondition violation (checked in debug builds).
    pub fn compose_output_buffer(&mut self, output: &mut [f32], frames: usize, frame_size: usize) {
        assert!(
            output.len() >= frames * frame_size,
            "output buffer holds {} samples, composition needs {}",
            output.len(),
            frames * frame_size
        );

        // Unclaimed slots must read as silence, not stale data.
        output[..frames * frame_size].fill(0.0);

        for binding in &self.outputs {
            let group = binding.group();
            let channel_count = group.channel_count() as usize;
            let channel_base = group.channel_base() as usize;
            debug_assert!(
                channel_base + channel_count <= frame_size,
                "binding at base {channel_base} spans past frame size {frame_size}"
            );

            // Safety: registered views stay valid while registered, and the
            // caller serializes configuration changes against callbacks.
            let source = unsafe { binding.samples().as_slice() };

            let effective: &[f32] = if channel_count == 1 {
                // Producers are natively two-channel; a one-channel group
                // folds them down, one averaged sample per frame.
                debug_assert!(source.len() >= frames * 2);
                let scratch = &mut self.downmix_scratch[..frames];
                for (frame, folded) in scratch.iter_mut().enumerate() {
                    *folded = (source[frame * 2] + source[frame * 2 + 1]) / 2.0;
                }
                &self.downmix_scratch[..frames]
            } else {
                debug_assert!(source.len() >= frames * channel_count);
                source
            };

            for frame in 0..frames {
                let frame_base = frame * frame_size;
                let local_base = frame * channel_count;
                for channel in 0..channel_count {
                    output[frame_base + channel_base + channel] =
                        effective[local_base + channel];
                }
            }
        }
    }
}
