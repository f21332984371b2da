// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `typebind_msgs::msg::HandControl` type support.
//!
//! Three scalar command fields for a hand actuator: the operating mode, the
//! placement distance and the placement height. The module carries the full
//! marshalling bundle for the type: transport representation, descriptor,
//! field mapping, CDR codec and the process-wide type-support handle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use typebind::cdr::{DecoderLE, EncoderLE, ENCAPSULATION_LEN};
use typebind::registry::{TypeSupportRegistry, TypedTypeSupport};
use typebind::{
    LoopbackReader, LoopbackWriter, MessageDescriptor, MessageMember, PrimitiveKind, ReturnCode,
    SampleEncoder, TransportMapped,
};

/// Qualified type name resolvable through the registry.
pub const HAND_CONTROL_TYPE_NAME: &str = "typebind_msgs::msg::HandControl";

/// Native `HandControl` message.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandControl {
    pub control_mode: u8,
    pub put_distance: f32,
    pub put_height: f32,
}

/// Transport representation of [`HandControl`].
///
/// Same fields and types, re-expressed in the runtime's member naming
/// convention. Instances never escape the codec/adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandControlDds {
    pub control_mode_: u8,
    pub put_distance_: f32,
    pub put_height_: f32,
}

impl TransportMapped for HandControl {
    type Transport = HandControlDds;

    fn to_transport(&self) -> HandControlDds {
        HandControlDds {
            control_mode_: self.control_mode,
            put_distance_: self.put_distance,
            put_height_: self.put_height,
        }
    }

    fn from_transport(transport: &HandControlDds) -> Self {
        HandControl {
            control_mode: transport.control_mode_,
            put_distance: transport.put_distance_,
            put_height: transport.put_height_,
        }
    }
}

static HAND_CONTROL_MEMBERS: [MessageMember; 3] = [
    MessageMember {
        name: "control_mode",
        kind: PrimitiveKind::U8,
        offset_bytes: 0,
    },
    MessageMember {
        name: "put_distance",
        kind: PrimitiveKind::F32,
        offset_bytes: 4,
    },
    MessageMember {
        name: "put_height",
        kind: PrimitiveKind::F32,
        offset_bytes: 8,
    },
];

/// Static layout of the `HandControl` transport representation.
pub static HAND_CONTROL_DESCRIPTOR: MessageDescriptor = MessageDescriptor {
    namespace: "typebind_msgs::msg",
    name: "HandControl",
    members: &HAND_CONTROL_MEMBERS,
};

/// Encoded payload size: u8 + 3 pad + f32 + f32.
const HAND_CONTROL_PAYLOAD_LEN: usize = 12;

/// CDR codec for the `HandControl` transport representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandControlCdr;

impl SampleEncoder<HandControlDds> for HandControlCdr {
    fn serialized_size(&self, _sample: &HandControlDds) -> usize {
        ENCAPSULATION_LEN + HAND_CONTROL_PAYLOAD_LEN
    }

    fn encode(&self, sample: &HandControlDds, out: &mut [u8]) -> ReturnCode {
        let Ok(mut enc) = EncoderLE::new(out) else {
            return ReturnCode::BadParameter;
        };
        let written = enc
            .write_u8(sample.control_mode_)
            .and_then(|()| enc.write_f32(sample.put_distance_))
            .and_then(|()| enc.write_f32(sample.put_height_));
        match written {
            Ok(()) => ReturnCode::Ok,
            Err(_) => ReturnCode::Error,
        }
    }

    fn decode(&self, buf: &[u8]) -> Result<HandControlDds, ReturnCode> {
        let mut dec = DecoderLE::new(buf).map_err(|_| ReturnCode::BadParameter)?;
        let control_mode_ = dec.read_u8().map_err(|_| ReturnCode::BadParameter)?;
        let put_distance_ = dec.read_f32().map_err(|_| ReturnCode::BadParameter)?;
        let put_height_ = dec.read_f32().map_err(|_| ReturnCode::BadParameter)?;
        Ok(HandControlDds {
            control_mode_,
            put_distance_,
            put_height_,
        })
    }
}

/// Concrete type-support bundle for `HandControl` over the loopback runtime.
pub type HandControlTypeSupport = TypedTypeSupport<
    HandControl,
    LoopbackWriter<HandControlDds>,
    LoopbackReader<HandControlDds>,
    HandControlCdr,
>;

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// How many times the type-support handle has been constructed in this
/// process. Stays at 1 once [`hand_control_type_support`] has run; exposed
/// for diagnostics.
pub fn hand_control_type_support_constructions() -> usize {
    CONSTRUCTIONS.load(Ordering::SeqCst)
}

/// The process-wide `HandControl` type-support handle.
///
/// Constructed lazily on the first call; concurrent first calls observe one
/// fully constructed winner. The handle is also published in the global
/// [`TypeSupportRegistry`] under [`HAND_CONTROL_TYPE_NAME`].
pub fn hand_control_type_support() -> &'static HandControlTypeSupport {
    static SUPPORT: OnceLock<HandControlTypeSupport> = OnceLock::new();
    let support = SUPPORT.get_or_init(|| {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        log::debug!("[typebind_msgs] constructing type support for '{HAND_CONTROL_TYPE_NAME}'");
        HandControlTypeSupport::new(
            HAND_CONTROL_TYPE_NAME,
            &HAND_CONTROL_DESCRIPTOR,
            HandControlCdr,
        )
    });
    TypeSupportRegistry::global().register(support);
    support
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_mapping_is_identity_both_ways() {
        let msg = HandControl {
            control_mode: 1,
            put_distance: 250.0,
            put_height: 10.0,
        };
        let dds = msg.to_transport();
        assert_eq!(dds.control_mode_, 1);
        assert_eq!(dds.put_distance_, 250.0);
        assert_eq!(dds.put_height_, 10.0);
        assert_eq!(HandControl::from_transport(&dds), msg);
    }

    #[test]
    fn descriptor_matches_encoded_layout() {
        assert_eq!(HAND_CONTROL_DESCRIPTOR.fqn(), HAND_CONTROL_TYPE_NAME);
        assert_eq!(HAND_CONTROL_DESCRIPTOR.member_count(), 3);

        let members = HAND_CONTROL_DESCRIPTOR.members;
        assert_eq!(members[0].name, "control_mode");
        assert_eq!(members[0].offset_bytes, 0);
        assert_eq!(members[1].kind, PrimitiveKind::F32);
        assert_eq!(members[1].offset_bytes, 4);
        assert_eq!(members[2].offset_bytes, 8);

        let last = &members[2];
        assert_eq!(
            (last.offset_bytes + last.kind.size_bytes()) as usize,
            HAND_CONTROL_PAYLOAD_LEN
        );
    }

    #[test]
    fn cdr_roundtrip_preserves_field_values() {
        let cdr = HandControlCdr;
        let sample = HandControlDds {
            control_mode_: 3,
            put_distance_: -0.25,
            put_height_: 1024.5,
        };

        let mut out = vec![0u8; cdr.serialized_size(&sample)];
        assert_eq!(cdr.encode(&sample, &mut out), ReturnCode::Ok);
        // Payload starts right after the 4-byte encapsulation.
        assert_eq!(out[ENCAPSULATION_LEN], 3);

        let back = cdr.decode(&out).expect("decode");
        assert_eq!(back, sample);
    }

    #[test]
    fn cdr_rejects_truncated_and_foreign_input() {
        let cdr = HandControlCdr;
        assert_eq!(cdr.decode(&[0x00, 0x01, 0x00]), Err(ReturnCode::BadParameter));
        // Big-endian encapsulation identifier.
        let be = [0x00u8, 0x00, 0x00, 0x00, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(cdr.decode(&be), Err(ReturnCode::BadParameter));
    }

    #[test]
    fn undersized_output_is_an_encode_error() {
        let cdr = HandControlCdr;
        let mut out = [0u8; 6];
        assert_eq!(
            cdr.encode(&HandControlDds::default(), &mut out),
            ReturnCode::Error
        );
    }
}
