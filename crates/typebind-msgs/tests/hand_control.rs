// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end tests for the generated `HandControl` type support: the typed
//! adapter path, the erased registry path and the process-wide handle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use anyhow::Result;

use typebind::{
    adapter, InstanceHandle, LoopbackChannel, LoopbackParticipant, MessageTypeSupport,
    PublishReason, RegistrationReason, ReturnCode, SerializeError, SerializedBuffer,
    TypeSupportRegistry,
};
use typebind_msgs::msg::{
    hand_control_type_support, hand_control_type_support_constructions, HandControl,
    HandControlDds, HAND_CONTROL_TYPE_NAME,
};

fn command() -> HandControl {
    HandControl {
        control_mode: 1,
        put_distance: 250.0,
        put_height: 10.0,
    }
}

#[test]
fn serialize_then_deserialize_restores_the_command() -> Result<()> {
    let support = hand_control_type_support();
    let msg = command();

    let mut buffer = SerializedBuffer::new();
    support.serialize(&msg, &mut buffer)?;
    assert_eq!(buffer.len(), 16); // 4-byte encapsulation + 12-byte payload
    assert!(buffer.len() <= buffer.capacity());

    let back = support.deserialize(buffer.as_slice())?;
    assert_eq!(back.downcast_ref::<HandControl>(), Some(&msg));
    Ok(())
}

#[test]
fn serialize_into_undersized_bound_reports_the_required_size() {
    let support = hand_control_type_support();
    let mut buffer = SerializedBuffer::bounded(8);

    let err = support.serialize(&command(), &mut buffer).unwrap_err();
    match err {
        SerializeError::Resize(resize) => {
            assert_eq!(resize.required, 16);
            assert_eq!(resize.bound, 8);
        }
        other => panic!("expected a resize failure, got {other:?}"),
    }
    // The failed attempt must not have produced a partial message.
    assert_eq!(buffer.len(), 0);
}

#[test]
fn registered_name_resolves_through_the_global_registry() {
    let support = hand_control_type_support();

    let found = TypeSupportRegistry::global()
        .lookup(HAND_CONTROL_TYPE_NAME)
        .expect("lookup");
    assert_eq!(found.support_id(), support.support_id());
    assert_eq!(found.descriptor().fqn(), HAND_CONTROL_TYPE_NAME);
}

#[test]
fn participant_registration_is_idempotent() -> Result<()> {
    let support = hand_control_type_support();
    let participant = LoopbackParticipant::new();

    support.register_type(Some(&participant), HAND_CONTROL_TYPE_NAME)?;
    support.register_type(Some(&participant), HAND_CONTROL_TYPE_NAME)?;
    assert_eq!(participant.binding_count(), 1);

    let err = support.register_type(None, HAND_CONTROL_TYPE_NAME).unwrap_err();
    assert_eq!(err.reason, RegistrationReason::NullParticipant);
    Ok(())
}

#[test]
fn publish_take_roundtrip_reports_the_sender() -> Result<()> {
    let channel: LoopbackChannel<HandControlDds> =
        LoopbackChannel::new(InstanceHandle::new(7, 1, 0));
    let writer = channel.writer(InstanceHandle::new(9, 2, 0));
    let reader = channel.reader();

    adapter::publish(&writer, &command(), HAND_CONTROL_TYPE_NAME)?;

    let mut sender = InstanceHandle::NIL;
    let taken: Option<HandControl> =
        adapter::take(&reader, false, Some(&mut sender), HAND_CONTROL_TYPE_NAME)?;
    assert_eq!(taken, Some(command()));
    assert_eq!(sender.system_id, 9);
    assert_eq!(channel.loans_acquired(), channel.loans_released());
    Ok(())
}

#[test]
fn deleted_writer_surfaces_as_a_non_retryable_publish_error() {
    let channel: LoopbackChannel<HandControlDds> =
        LoopbackChannel::new(InstanceHandle::new(7, 1, 0));
    let writer = channel.writer(InstanceHandle::new(9, 2, 0));
    channel.inject_write_failure(ReturnCode::AlreadyDeleted);

    let err = adapter::publish(&writer, &command(), HAND_CONTROL_TYPE_NAME).unwrap_err();
    assert_eq!(err.reason, PublishReason::WriterDeleted);
    assert!(!err.is_retryable());
    assert_eq!(channel.depth(), 0);
}

#[test]
fn erased_publish_take_through_the_registry() -> Result<()> {
    hand_control_type_support();
    let support = TypeSupportRegistry::global()
        .lookup(HAND_CONTROL_TYPE_NAME)
        .expect("lookup");

    let channel: LoopbackChannel<HandControlDds> =
        LoopbackChannel::new(InstanceHandle::new(3, 1, 0));
    let writer = channel.writer(InstanceHandle::new(4, 1, 0));
    let reader = channel.reader();

    support.publish(&writer, &command())?;

    let mut sender = InstanceHandle::NIL;
    let taken = support
        .take(&reader, false, Some(&mut sender))?
        .expect("sample");
    assert_eq!(taken.downcast_ref::<HandControl>(), Some(&command()));
    assert_eq!(sender.system_id, 4);
    Ok(())
}

#[test]
fn concurrent_first_access_constructs_one_handle() {
    static SEEN: AtomicUsize = AtomicUsize::new(0);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                let support = hand_control_type_support();
                SEEN.fetch_add(1, Ordering::SeqCst);
                support as *const _ as usize
            })
        })
        .collect();
    let pointers: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(SEEN.load(Ordering::SeqCst), 8);
    assert!(pointers.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(hand_control_type_support_constructions(), 1);
}
