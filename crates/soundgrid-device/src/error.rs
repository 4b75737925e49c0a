use thiserror::Error;

/// Recoverable admission-control failures returned at registration time.
///
/// The registry is left unchanged on every variant; the caller may retry
/// with corrected parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The output's channel group intersects an already registered one.
    #[error("output channels already claimed by another registration")]
    DuplicateOutputChannel,
    /// The output's channel group extends past the device's output layout.
    #[error("output channel range exceeds the device's output channel count")]
    ExcessiveOutputChannel,
    /// The input's channel group extends past the device's input layout.
    #[error("input channel range exceeds the device's input channel count")]
    ExcessiveInputChannel,
}

/// Unrecoverable configuration failures.
///
/// Continuing after one of these would risk out-of-bounds writes on the
/// real-time path, so the embedding application is expected to treat them
/// as terminal. Returned rather than aborting so the core stays testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `frames * 2` exceeds the downmix scratch capacity; a mono fold at
    /// this buffer size would write past the scratch buffer.
    #[error("frames per buffer {frames} too big: {frames} * 2 exceeds scratch capacity {capacity}")]
    FramesPerBufferTooLarge { frames: usize, capacity: usize },
}
