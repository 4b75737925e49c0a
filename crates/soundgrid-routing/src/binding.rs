//! Output and input buffer bindings.

use crate::{ChannelGroup, SampleSink, SampleView};

/// A producer's claim on a range of output channel slots.
///
/// The bound sample buffer is caller-owned (see [`SampleView`]) and always
/// contains two-channel interleaved audio upstream, regardless of the
/// group's channel count: a one-channel group means "fold this two-channel
/// producer down to a single physical output slot", not "the producer is
/// natively mono".
#[derive(Debug, Clone, Copy)]
pub struct OutputBinding {
    group: ChannelGroup,
    samples: SampleView,
}

impl OutputBinding {
    pub const fn new(group: ChannelGroup, samples: SampleView) -> Self {
        Self { group, samples }
    }

    pub const fn group(&self) -> ChannelGroup {
        self.group
    }

    pub const fn samples(&self) -> SampleView {
        self.samples
    }

    /// Returns true if the two bindings claim intersecting channel ranges.
    pub const fn clashes_with(&self, other: &OutputBinding) -> bool {
        self.group.clashes_with(&other.group)
    }
}

/// A consumer's subscription to a range of input channel slots.
///
/// Unlike outputs, several input bindings may cover the same channels: the
/// same captured samples are legitimately fanned out to multiple consumers.
#[derive(Debug, Clone, Copy)]
pub struct InputBinding {
    group: ChannelGroup,
    dest: SampleSink,
}

impl InputBinding {
    pub const fn new(group: ChannelGroup, dest: SampleSink) -> Self {
        Self { group, dest }
    }

    pub const fn group(&self) -> ChannelGroup {
        self.group
    }

    pub const fn dest(&self) -> SampleSink {
        self.dest
    }
}
