// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration façade: name-indexed, type-erased type-support handles.
//!
//! A generic messaging runtime resolves a bundle by qualified type name and
//! drives register/publish/take/serialize/deserialize through it without
//! knowing the concrete message type. The bundle itself has no behavior
//! beyond dispatch: it downcasts the erased handles and forwards to
//! [`crate::adapter`] and [`crate::codec`].

use std::any::Any;
use std::sync::OnceLock;

use dashmap::DashMap;

use crate::adapter;
use crate::buffer::SerializedBuffer;
use crate::codec::{self, TransportMapped};
use crate::descriptor::MessageDescriptor;
use crate::error::{
    DecodingError, PublishError, PublishReason, RegistrationError, SerializeError, TakeError,
    TakeReason,
};
use crate::runtime::{
    InstanceHandle, SampleEncoder, SampleReader, SampleWriter, SupportId, TypeRegistrar,
};

/// Type-erased type-support bundle for one message type.
///
/// Implementations are process-wide singletons: constructed once, never
/// mutated afterwards, alive until process exit.
pub trait MessageTypeSupport: Send + Sync {
    /// Qualified type name, e.g. `"typebind_msgs::msg::HandControl"`.
    fn type_name(&self) -> &'static str;

    /// Static layout of the message type.
    fn descriptor(&self) -> &'static MessageDescriptor;

    /// Identity of this instance, used for idempotent registration.
    fn support_id(&self) -> SupportId;

    /// Bind this type under `type_name` on the participant.
    fn register_type(
        &self,
        participant: Option<&dyn TypeRegistrar>,
        type_name: &str,
    ) -> Result<(), RegistrationError>;

    /// Publish an erased native message through an erased writer handle.
    fn publish(&self, writer: &dyn Any, message: &dyn Any) -> Result<(), PublishError>;

    /// Take at most one erased native message from an erased reader handle.
    fn take(
        &self,
        reader: &dyn Any,
        ignore_local_publications: bool,
        sending_handle_out: Option<&mut InstanceHandle>,
    ) -> Result<Option<Box<dyn Any>>, TakeError>;

    /// Serialize an erased native message into `buffer`.
    fn serialize(
        &self,
        message: &dyn Any,
        buffer: &mut SerializedBuffer,
    ) -> Result<(), SerializeError>;

    /// Deserialize one erased native message from `buf`.
    fn deserialize(&self, buf: &[u8]) -> Result<Box<dyn Any>, DecodingError>;
}

/// Generic [`MessageTypeSupport`] implementation for message `M` bound to a
/// concrete runtime's writer `W`, reader `R` and wire encoder `E`.
///
/// The Rust rendition of a per-type callback table: the erased handles are
/// narrowed back to their concrete types before dispatch.
pub struct TypedTypeSupport<M, W, R, E>
where
    M: TransportMapped,
{
    qualified_name: &'static str,
    descriptor: &'static MessageDescriptor,
    encoder: E,
    _marker: std::marker::PhantomData<fn() -> (M, W, R)>,
}

impl<M, W, R, E> TypedTypeSupport<M, W, R, E>
where
    M: TransportMapped,
{
    pub const fn new(
        qualified_name: &'static str,
        descriptor: &'static MessageDescriptor,
        encoder: E,
    ) -> Self {
        Self {
            qualified_name,
            descriptor,
            encoder,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<M, W, R, E> MessageTypeSupport for TypedTypeSupport<M, W, R, E>
where
    M: TransportMapped + Any + Send + Sync,
    M::Transport: 'static,
    W: SampleWriter<M::Transport> + Any,
    R: SampleReader<M::Transport> + Any,
    E: SampleEncoder<M::Transport>,
{
    fn type_name(&self) -> &'static str {
        self.qualified_name
    }

    fn descriptor(&self) -> &'static MessageDescriptor {
        self.descriptor
    }

    fn support_id(&self) -> SupportId {
        // Pointer identity: the lazily constructed singleton is the identity
        // the registrar checks idempotent re-registration against.
        self as *const Self as SupportId
    }

    fn register_type(
        &self,
        participant: Option<&dyn TypeRegistrar>,
        type_name: &str,
    ) -> Result<(), RegistrationError> {
        adapter::register_type(participant, type_name, self.support_id())
    }

    fn publish(&self, writer: &dyn Any, message: &dyn Any) -> Result<(), PublishError> {
        let writer = writer.downcast_ref::<W>().ok_or_else(|| {
            PublishError::new(
                PublishReason::BadParameter,
                format!("{}: writer handle has an unexpected type", self.qualified_name),
            )
        })?;
        let message = message.downcast_ref::<M>().ok_or_else(|| {
            PublishError::new(
                PublishReason::BadParameter,
                format!("{}: message has an unexpected type", self.qualified_name),
            )
        })?;
        adapter::publish(writer, message, self.qualified_name)
    }

    fn take(
        &self,
        reader: &dyn Any,
        ignore_local_publications: bool,
        sending_handle_out: Option<&mut InstanceHandle>,
    ) -> Result<Option<Box<dyn Any>>, TakeError> {
        let reader = reader.downcast_ref::<R>().ok_or_else(|| {
            TakeError::new(
                TakeReason::PreconditionNotMet,
                format!("{}: reader handle has an unexpected type", self.qualified_name),
            )
        })?;
        let taken: Option<M> = adapter::take(
            reader,
            ignore_local_publications,
            sending_handle_out,
            self.qualified_name,
        )?;
        Ok(taken.map(|message| Box::new(message) as Box<dyn Any>))
    }

    fn serialize(
        &self,
        message: &dyn Any,
        buffer: &mut SerializedBuffer,
    ) -> Result<(), SerializeError> {
        let message = message.downcast_ref::<M>().ok_or_else(|| {
            SerializeError::Encoding(crate::error::EncodingError::new(
                crate::error::EncodingReason::BadParameter,
                format!("{}: message has an unexpected type", self.qualified_name),
            ))
        })?;
        codec::serialize(message, &self.encoder, buffer, self.qualified_name)
    }

    fn deserialize(&self, buf: &[u8]) -> Result<Box<dyn Any>, DecodingError> {
        let message: M = codec::deserialize(&self.encoder, buf, self.qualified_name)?;
        Ok(Box::new(message))
    }
}

/// Process-wide, name-indexed registry of type-support bundles.
pub struct TypeSupportRegistry {
    entries: DashMap<&'static str, &'static dyn MessageTypeSupport>,
}

impl TypeSupportRegistry {
    fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// The process-wide registry instance.
    pub fn global() -> &'static TypeSupportRegistry {
        static REGISTRY: OnceLock<TypeSupportRegistry> = OnceLock::new();
        REGISTRY.get_or_init(TypeSupportRegistry::new)
    }

    /// Publish a bundle under its qualified name. First registration wins;
    /// re-registering the same instance is a no-op. Returns whether the
    /// bundle now present is the supplied one.
    pub fn register(&self, support: &'static dyn MessageTypeSupport) -> bool {
        let name = support.type_name();
        match self.entries.entry(name) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                let existing = *entry.get();
                let same = existing.support_id() == support.support_id();
                if !same {
                    log::warn!(
                        "[typebind] type '{name}' already registered with a different instance"
                    );
                }
                same
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(support);
                log::debug!("[typebind] type support '{name}' available for lookup");
                true
            }
        }
    }

    /// Resolve a bundle by qualified type name.
    #[must_use]
    pub fn lookup(&self, type_name: &str) -> Option<&'static dyn MessageTypeSupport> {
        self.entries.get(type_name).map(|entry| *entry.value())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdr::{DecoderLE, EncoderLE};
    use crate::loopback::{LoopbackChannel, LoopbackReader, LoopbackWriter};
    use crate::runtime::ReturnCode;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    struct Tick {
        count: u32,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    struct TickDds {
        count_: u32,
    }

    impl TransportMapped for Tick {
        type Transport = TickDds;

        fn to_transport(&self) -> TickDds {
            TickDds { count_: self.count }
        }

        fn from_transport(transport: &TickDds) -> Self {
            Tick {
                count: transport.count_,
            }
        }
    }

    struct TickCdr;

    impl SampleEncoder<TickDds> for TickCdr {
        fn serialized_size(&self, _sample: &TickDds) -> usize {
            8 // encapsulation + u32
        }

        fn encode(&self, sample: &TickDds, out: &mut [u8]) -> ReturnCode {
            let Ok(mut enc) = EncoderLE::new(out) else {
                return ReturnCode::BadParameter;
            };
            match enc.write_u32(sample.count_) {
                Ok(()) => ReturnCode::Ok,
                Err(_) => ReturnCode::Error,
            }
        }

        fn decode(&self, buf: &[u8]) -> Result<TickDds, ReturnCode> {
            let mut dec = DecoderLE::new(buf).map_err(|_| ReturnCode::BadParameter)?;
            let count_ = dec.read_u32().map_err(|_| ReturnCode::BadParameter)?;
            Ok(TickDds { count_ })
        }
    }

    type TickSupport =
        TypedTypeSupport<Tick, LoopbackWriter<TickDds>, LoopbackReader<TickDds>, TickCdr>;

    fn tick_support() -> &'static TickSupport {
        static SUPPORT: OnceLock<TickSupport> = OnceLock::new();
        SUPPORT.get_or_init(|| {
            static DESCRIPTOR: MessageDescriptor = MessageDescriptor {
                namespace: "typebind::tests",
                name: "Tick",
                members: &[],
            };
            TickSupport::new("typebind::tests::Tick", &DESCRIPTOR, TickCdr)
        })
    }

    #[test]
    fn erased_publish_take_roundtrip() {
        let support: &dyn MessageTypeSupport = tick_support();
        let channel: LoopbackChannel<TickDds> =
            LoopbackChannel::new(InstanceHandle::new(1, 1, 0));
        let writer = channel.writer(InstanceHandle::new(2, 1, 0));
        let reader = channel.reader();

        let msg = Tick { count: 99 };
        support.publish(&writer, &msg).expect("publish");

        let taken = support
            .take(&reader, false, None)
            .expect("take")
            .expect("sample");
        let taken = taken.downcast_ref::<Tick>().expect("downcast");
        assert_eq!(*taken, msg);
    }

    #[test]
    fn erased_serialize_roundtrip() {
        let support: &dyn MessageTypeSupport = tick_support();
        let msg = Tick { count: 0xDEAD };
        let mut buffer = SerializedBuffer::new();
        support.serialize(&msg, &mut buffer).expect("serialize");
        assert_eq!(buffer.len(), 8);

        let back = support.deserialize(buffer.as_slice()).expect("deserialize");
        assert_eq!(back.downcast_ref::<Tick>(), Some(&msg));
    }

    #[test]
    fn mismatched_handle_types_are_bad_parameters() {
        let support: &dyn MessageTypeSupport = tick_support();
        let not_a_writer = 5u32;
        let err = support.publish(&not_a_writer, &Tick::default()).unwrap_err();
        assert_eq!(err.reason, PublishReason::BadParameter);

        let channel: LoopbackChannel<TickDds> =
            LoopbackChannel::new(InstanceHandle::new(1, 1, 0));
        let writer = channel.writer(InstanceHandle::new(2, 1, 0));
        let not_a_message = "tick";
        let err = support.publish(&writer, &not_a_message).unwrap_err();
        assert_eq!(err.reason, PublishReason::BadParameter);
    }

    #[test]
    fn registry_lookup_returns_registered_bundle() {
        let registry = TypeSupportRegistry::global();
        assert!(registry.register(tick_support()));
        // Same instance again: still fine.
        assert!(registry.register(tick_support()));

        let found = registry.lookup("typebind::tests::Tick").expect("lookup");
        assert_eq!(found.type_name(), "typebind::tests::Tick");
        assert_eq!(found.support_id(), tick_support().support_id());
        assert!(registry.lookup("typebind::tests::Missing").is_none());
    }
}
