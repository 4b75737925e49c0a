//! Multi-channel sound device abstraction.
//!
//! A [`Device`] exposes a fixed interleaved channel layout. Producers and
//! consumers register [`soundgrid_routing`] bindings against disjoint
//! (outputs) or freely overlapping (inputs) channel ranges; on every
//! hardware callback [`Device::compose_output_buffer`] assembles the final
//! interleaved buffer from the registered outputs without allocating or
//! blocking.
//!
//! Opening streams and driving the callback belong to the surrounding
//! driver-integration layer, which must also serialize registration against
//! in-flight compositions (see [`Device`]).

mod compose;
mod device;
mod error;

pub use device::{Device, DeviceConfig, DEFAULT_SAMPLE_RATE, MAX_BUFFER_LEN};
pub use error::{ConfigError, RegistrationError};
