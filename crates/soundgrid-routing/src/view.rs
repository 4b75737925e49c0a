//! Non-owning sample buffer views.
//!
//! Registered bindings never own their sample storage: the engine that
//! produces (or consumes) the audio keeps the buffer alive for as long as
//! the binding is registered, and refills it before every callback. The
//! registry therefore holds a raw pointer + length pair rather than any
//! shared-ownership handle, keeping the real-time path free of reference
//! counting and the registry free of lifetime parameters.

use std::ptr::NonNull;

/// Read-only view of a caller-owned interleaved sample buffer.
///
/// # Safety contract
///
/// The creator guarantees that the pointed-to buffer outlives every use of
/// the view, and that no writes to it overlap a callback that reads it.
/// Both are upheld by the same external scheduling discipline that
/// serializes registration against composition.
#[derive(Debug, Clone, Copy)]
pub struct SampleView {
    ptr: NonNull<f32>,
    len: usize,
}

// The view is handed from the configuration thread to the real-time thread.
// Safe under the documented contract: the buffer is stable while registered
// and only one callback reads it at a time.
unsafe impl Send for SampleView {}
unsafe impl Sync for SampleView {}

impl SampleView {
    /// Create a view of `buf`, erasing its lifetime.
    ///
    /// # Safety
    /// The buffer must remain valid (and must not be written concurrently
    /// with a callback that reads the view) for as long as the view is
    /// registered anywhere.
    pub unsafe fn from_slice(buf: &[f32]) -> Self {
        // Empty slices still carry a valid, well-aligned pointer.
        Self {
            ptr: NonNull::new_unchecked(buf.as_ptr() as *mut f32),
            len: buf.len(),
        }
    }

    /// Number of samples covered by the view.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reborrow the underlying samples.
    ///
    /// # Safety
    /// The buffer backing the view must still be alive, and must not be
    /// mutated for the duration of the returned borrow.
    pub unsafe fn as_slice<'a>(&self) -> &'a [f32] {
        std::slice::from_raw_parts(self.ptr.as_ptr(), self.len)
    }
}

/// Writable counterpart of [`SampleView`], used as the destination of an
/// input binding (where captured hardware samples are deposited).
///
/// Same safety contract as [`SampleView`], plus exclusivity: while a
/// callback writes through the sink, nothing else may read or write the
/// underlying buffer.
#[derive(Debug, Clone, Copy)]
pub struct SampleSink {
    ptr: NonNull<f32>,
    len: usize,
}

unsafe impl Send for SampleSink {}
unsafe impl Sync for SampleSink {}

impl SampleSink {
    /// Create a sink over `buf`, erasing its lifetime.
    ///
    /// # Safety
    /// The buffer must remain valid for as long as the sink is registered,
    /// and access through the sink must be externally serialized against
    /// every other access to the buffer.
    pub unsafe fn from_slice(buf: &mut [f32]) -> Self {
        Self {
            ptr: NonNull::new_unchecked(buf.as_mut_ptr()),
            len: buf.len(),
        }
    }

    /// Number of samples the sink can hold.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reborrow the underlying samples mutably.
    ///
    /// # Safety
    /// The buffer backing the sink must still be alive, and the returned
    /// borrow must be the only access to it for its duration.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn as_mut_slice<'a>(&self) -> &'a mut [f32] {
        std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len)
    }
}
