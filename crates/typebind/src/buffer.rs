// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Caller-owned serialized message buffer.
//!
//! The buffer separates capacity (allocated storage) from logical length
//! (bytes of valid encoded data). Growth is monotonic: serialize may enlarge
//! the storage but never shrinks it, and `length <= capacity` holds after
//! every operation. A bounded buffer refuses growth past its hard bound,
//! which surfaces as [`ResizeError`].

use crate::error::ResizeError;

/// Byte buffer with separate capacity and logical length.
#[derive(Debug, Default)]
pub struct SerializedBuffer {
    storage: Vec<u8>,
    length: usize,
    bound: Option<usize>,
}

impl SerializedBuffer {
    /// Empty, unbounded buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unbounded buffer with `capacity` bytes preallocated.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            length: 0,
            bound: None,
        }
    }

    /// Buffer whose capacity may grow up to `bound` bytes and no further.
    #[must_use]
    pub fn bounded(bound: usize) -> Self {
        Self {
            storage: Vec::new(),
            length: 0,
            bound: Some(bound),
        }
    }

    /// Allocated storage in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Logical length of the encoded content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The encoded content.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.length]
    }

    /// Grow storage so that at least `required` bytes are available.
    ///
    /// Grow-only: a buffer that is already large enough is left untouched.
    /// Fails without side effects when the hard bound forbids the growth.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<(), ResizeError> {
        if required <= self.storage.len() {
            return Ok(());
        }
        if let Some(bound) = self.bound {
            if required > bound {
                return Err(ResizeError { required, bound });
            }
        }
        self.storage.resize(required, 0);
        Ok(())
    }

    /// Mutable view of the first `len` bytes of storage. Caller must have
    /// ensured capacity first.
    pub(crate) fn storage_mut(&mut self, len: usize) -> &mut [u8] {
        debug_assert!(len <= self.storage.len());
        &mut self.storage[..len]
    }

    /// Set the logical length after a successful encode.
    pub(crate) fn set_length(&mut self, length: usize) {
        debug_assert!(length <= self.storage.len());
        self.length = length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_is_monotonic() {
        let mut buf = SerializedBuffer::with_capacity(8);
        assert_eq!(buf.capacity(), 8);

        buf.ensure_capacity(16).expect("grow");
        assert_eq!(buf.capacity(), 16);

        // Smaller requirement never shrinks.
        buf.ensure_capacity(4).expect("noop");
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn bounded_buffer_refuses_growth_past_bound() {
        let mut buf = SerializedBuffer::bounded(8);
        buf.ensure_capacity(8).expect("within bound");
        assert_eq!(buf.capacity(), 8);

        let err = buf.ensure_capacity(9).unwrap_err();
        assert_eq!(err.required, 9);
        assert_eq!(err.bound, 8);
        // Failed growth leaves capacity and length untouched.
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn length_tracks_content_not_capacity() {
        let mut buf = SerializedBuffer::with_capacity(32);
        buf.storage_mut(3).copy_from_slice(&[1, 2, 3]);
        buf.set_length(3);

        assert_eq!(buf.len(), 3);
        assert!(buf.len() <= buf.capacity());
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }
}
