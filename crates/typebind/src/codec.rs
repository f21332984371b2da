// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bidirectional codec between native messages and their transport
//! representation.
//!
//! Field mapping is pure structural copying: schema compatibility is settled
//! when the message types are compiled, so the hot path carries no
//! validation, no defaulting and no allocation. Serialization layers the
//! runtime's wire encoder on top of the mapping and manages the caller's
//! [`SerializedBuffer`].

use crate::buffer::SerializedBuffer;
use crate::error::{DecodingError, EncodingError, SerializeError};
use crate::runtime::SampleEncoder;

/// Mapping between a native message and its transport representation.
///
/// Both directions are total for well-typed input: every declared field is
/// copied, nothing else happens.
pub trait TransportMapped: Sized {
    /// The transport-side twin of this message (same fields, the runtime's
    /// layout and naming conventions).
    type Transport;

    fn to_transport(&self) -> Self::Transport;
    fn from_transport(transport: &Self::Transport) -> Self;
}

/// Encode `message` into `buffer`, growing it when undersized.
///
/// On success `buffer.len()` equals the encoder's required length exactly.
/// A failed encode may have overwritten storage, so the logical length is
/// reset to zero rather than left pointing at stale content. `type_name`
/// only feeds the diagnostic cause text of errors.
pub fn serialize<M>(
    message: &M,
    encoder: &dyn SampleEncoder<M::Transport>,
    buffer: &mut SerializedBuffer,
    type_name: &str,
) -> Result<(), SerializeError>
where
    M: TransportMapped,
{
    let transport = message.to_transport();
    let required = encoder.serialized_size(&transport);
    buffer.ensure_capacity(required)?;

    let status = encoder.encode(&transport, buffer.storage_mut(required));
    if !status.is_ok() {
        buffer.set_length(0);
        return Err(EncodingError::from_status(status, type_name).into());
    }
    buffer.set_length(required);
    Ok(())
}

/// Decode one message from `buf`.
///
/// Every malformed/truncated/internal decoder condition collapses into a
/// single [`DecodingError`] carrying the runtime's status as its cause.
pub fn deserialize<M>(
    encoder: &dyn SampleEncoder<M::Transport>,
    buf: &[u8],
    type_name: &str,
) -> Result<M, DecodingError>
where
    M: TransportMapped,
{
    let transport = encoder
        .decode(buf)
        .map_err(|status| DecodingError::from_status(status, type_name))?;
    Ok(M::from_transport(&transport))
}
