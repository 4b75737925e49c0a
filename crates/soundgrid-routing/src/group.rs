//! Contiguous channel ranges within a device layout.

use serde::{Deserialize, Serialize};

/// A contiguous range of channel slots `[channel_base, channel_base + channel_count)`
/// within a device's interleaved layout.
///
/// Counts observed in practice are 1 (mono assignment) and 2 (stereo); the
/// type admits any positive count, but composition guarantees are only made
/// for 1 and 2.
///
/// # Example
/// ```
/// use soundgrid_routing::ChannelGroup;
///
/// let main = ChannelGroup::new(0, 2);
/// let booth = ChannelGroup::new(2, 2);
/// assert!(!main.clashes_with(&booth));
/// assert!(main.fits_within(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelGroup {
    channel_base: u16,
    channel_count: u16,
}

impl ChannelGroup {
    /// Create a group starting at `channel_base` spanning `channel_count` slots.
    pub const fn new(channel_base: u16, channel_count: u16) -> Self {
        Self {
            channel_base,
            channel_count,
        }
    }

    /// First channel slot covered by this group.
    pub const fn channel_base(&self) -> u16 {
        self.channel_base
    }

    /// Number of consecutive channel slots covered by this group.
    pub const fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Returns true if the two ranges share at least one channel slot.
    pub const fn clashes_with(&self, other: &ChannelGroup) -> bool {
        // Widened so that groups near u16::MAX cannot overflow.
        (self.channel_base as u32) < other.channel_base as u32 + other.channel_count as u32
            && (other.channel_base as u32) < self.channel_base as u32 + self.channel_count as u32
    }

    /// Returns true if the whole range lies inside `[0, total_channels)`.
    pub const fn fits_within(&self, total_channels: u16) -> bool {
        self.channel_base as u32 + self.channel_count as u32 <= total_channels as u32
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelGroup;

    #[test]
    fn identical_groups_clash() {
        let a = ChannelGroup::new(0, 2);
        let b = ChannelGroup::new(0, 2);
        assert!(a.clashes_with(&b));
        assert!(b.clashes_with(&a));
    }

    #[test]
    fn partial_overlap_clashes() {
        let a = ChannelGroup::new(0, 2);
        let b = ChannelGroup::new(1, 2);
        assert!(a.clashes_with(&b));
        assert!(b.clashes_with(&a));
    }

    #[test]
    fn adjacent_groups_do_not_clash() {
        let a = ChannelGroup::new(0, 2);
        let b = ChannelGroup::new(2, 2);
        assert!(!a.clashes_with(&b));
        assert!(!b.clashes_with(&a));
    }

    #[test]
    fn mono_inside_stereo_clashes() {
        let stereo = ChannelGroup::new(0, 2);
        let mono = ChannelGroup::new(1, 1);
        assert!(stereo.clashes_with(&mono));
        assert!(mono.clashes_with(&stereo));
    }

    #[test]
    fn bounds_check() {
        assert!(ChannelGroup::new(2, 2).fits_within(4));
        assert!(!ChannelGroup::new(3, 2).fits_within(4));
        assert!(!ChannelGroup::new(4, 1).fits_within(4));
        assert!(ChannelGroup::new(0, 1).fits_within(1));
    }
}
