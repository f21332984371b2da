// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typebind - typed message codec and transport-adapter layer
//!
//! typebind is the marshalling seam between application message types and a
//! DDS-style pub/sub runtime: it converts between the native and the
//! transport representation of a message, serializes to the runtime's wire
//! encoding, drives publish/take against runtime handles, and exposes each
//! message type as a named, dispatchable type-support bundle.
//!
//! ## Data flow
//!
//! ```text
//! application message
//!     -> TransportMapped::to_transport -> SampleWriter::write      (publish)
//!     <- TransportMapped::from_transport <- SampleReader::take     (subscribe)
//!     <-> SampleEncoder + SerializedBuffer                          (serialize)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use typebind::{adapter, InstanceHandle, LoopbackChannel};
//! # use typebind::TransportMapped;
//! # #[derive(Clone, Copy, PartialEq, Debug, Default)] struct Reading { value: f64 }
//! # #[derive(Clone, Copy, PartialEq, Debug, Default)] struct ReadingDds { value_: f64 }
//! # impl TransportMapped for Reading {
//! #     type Transport = ReadingDds;
//! #     fn to_transport(&self) -> ReadingDds { ReadingDds { value_: self.value } }
//! #     fn from_transport(t: &ReadingDds) -> Self { Reading { value: t.value_ } }
//! # }
//!
//! let channel: LoopbackChannel<ReadingDds> = LoopbackChannel::new(InstanceHandle::new(1, 1, 0));
//! let writer = channel.writer(InstanceHandle::new(2, 1, 0));
//! let reader = channel.reader();
//!
//! adapter::publish(&writer, &Reading { value: 42.0 }, "demo::Reading")?;
//! if let Some(sample) = adapter::take::<Reading>(&reader, false, None, "demo::Reading")? {
//!     println!("got {:?}", sample);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Layering
//!
//! - [`runtime`] - status codes, handles and the traits the underlying
//!   runtime implements (consumed contract)
//! - [`codec`] / [`cdr`] / [`buffer`] - representation mapping and wire
//!   encoding
//! - [`adapter`] - register/publish/take with the typed error taxonomy
//! - [`registry`] - name-indexed, type-erased type-support bundles
//!   (exposed contract)
//!
//! The runtime's participant/topic lifecycle, QoS engine and discovery are
//! out of scope; they stay behind the [`runtime`] traits.

/// Transport adapter operations (register, publish, take).
pub mod adapter;
/// Caller-owned serialized message buffer.
pub mod buffer;
/// CDR little-endian wire codec (cursors, encoder, decoder).
pub mod cdr;
/// Native/transport representation mapping and serialize/deserialize.
pub mod codec;
/// Static message descriptors.
pub mod descriptor;
/// Error taxonomy with machine-checkable reasons.
pub mod error;
/// In-process loopback runtime (tests, reference loan discipline).
pub mod loopback;
/// Registration façade and process-wide type-support registry.
pub mod registry;
/// Transport-runtime contract (status codes, handles, endpoint traits).
pub mod runtime;

pub use buffer::SerializedBuffer;
pub use codec::{deserialize, serialize, TransportMapped};
pub use descriptor::{MessageDescriptor, MessageMember, PrimitiveKind};
pub use error::{
    DecodingError, DecodingReason, EncodingError, EncodingReason, PublishError, PublishReason,
    RegistrationError, RegistrationReason, ResizeError, SerializeError, TakeError, TakeReason,
};
pub use loopback::{LoopbackChannel, LoopbackParticipant, LoopbackReader, LoopbackWriter};
pub use registry::{MessageTypeSupport, TypeSupportRegistry, TypedTypeSupport};
pub use runtime::{
    InstanceHandle, ReadMasks, ReturnCode, SampleEncoder, SampleInfo, SampleReader, SampleWriter,
    SupportId, TypeRegistrar,
};

/// typebind version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
