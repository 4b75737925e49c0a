//! Channel group definitions and buffer bindings for multi-channel routing.

mod binding;
mod group;
mod view;

pub use binding::{InputBinding, OutputBinding};
pub use group::ChannelGroup;
pub use view::{SampleSink, SampleView};
