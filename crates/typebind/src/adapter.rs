// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transport adapter: register, publish and take against the runtime.
//!
//! These are synchronous, re-entrant functions over externally supplied
//! handles. Every runtime status other than `Ok` (and `NoData` on the take
//! path) is mapped into the typed taxonomy and returned to the caller -
//! nothing is retried or swallowed here.

use crate::codec::TransportMapped;
use crate::error::{
    PublishError, RegistrationError, RegistrationReason, TakeError, TakeReason,
};
use crate::runtime::{
    InstanceHandle, ReadMasks, ReturnCode, SampleReader, SampleWriter, SupportId, TypeRegistrar,
};

/// Bind a type-support identity under `type_name` on `participant`.
///
/// Re-registration with the same identity is not an error; rebinding the
/// name to a different identity reports
/// [`RegistrationReason::AlreadyRegistered`].
pub fn register_type(
    participant: Option<&dyn TypeRegistrar>,
    type_name: &str,
    support_id: SupportId,
) -> Result<(), RegistrationError> {
    let Some(participant) = participant else {
        return Err(RegistrationError::new(
            RegistrationReason::NullParticipant,
            "participant handle is null",
        ));
    };
    if type_name.is_empty() {
        return Err(RegistrationError::new(
            RegistrationReason::EmptyTypeName,
            "type name is empty",
        ));
    }

    match participant.register_type(type_name, support_id) {
        ReturnCode::Ok => {
            log::debug!("[typebind] registered type '{type_name}'");
            Ok(())
        }
        code => Err(RegistrationError::from_status(code, type_name)),
    }
}

/// Convert `message` and hand it to `writer`.
///
/// May block up to the writer's configured timeout under reliable delivery;
/// that surfaces as the only retryable [`PublishError`]. A failed call has
/// no partial-send side effects.
pub fn publish<M>(
    writer: &dyn SampleWriter<M::Transport>,
    message: &M,
    type_name: &str,
) -> Result<(), PublishError>
where
    M: TransportMapped,
{
    let sample = message.to_transport();
    match writer.write(&sample, InstanceHandle::NIL) {
        ReturnCode::Ok => Ok(()),
        code => Err(PublishError::from_status(code, type_name)),
    }
}

/// Dequeue at most one sample from `reader`.
///
/// - `Ok(None)` when no data is available, when the sample is a
///   metadata-only notification, or when `ignore_local_publications` is set
///   and the sample's origin shares the reader's *system* identity. The
///   comparison deliberately stops at the system component (a process may
///   host several local participants); a full-identity comparison would be
///   stricter.
/// - The loan taken by the dequeue is released exactly once on every exit
///   path. A loan-release failure is surfaced only when the call has no
///   earlier error to report.
pub fn take<M>(
    reader: &dyn SampleReader<M::Transport>,
    ignore_local_publications: bool,
    mut sending_handle_out: Option<&mut InstanceHandle>,
    type_name: &str,
) -> Result<Option<M>, TakeError>
where
    M: TransportMapped,
{
    let mut values: Vec<M::Transport> = Vec::new();
    let mut infos = Vec::new();
    let status = reader.take(&mut values, &mut infos, 1, ReadMasks::ANY);

    let outcome: Result<Option<M>, TakeError> = match status {
        ReturnCode::NoData => Ok(None),
        ReturnCode::Ok => match (values.first(), infos.first()) {
            (Some(value), Some(info)) => {
                if !info.valid_data {
                    // Lifecycle notification without payload.
                    log::trace!("[typebind] '{type_name}': skipping metadata-only sample");
                    Ok(None)
                } else if ignore_local_publications
                    && info.publication_handle.same_system(reader.instance_handle())
                {
                    log::trace!("[typebind] '{type_name}': suppressing same-system sample");
                    Ok(None)
                } else {
                    if let Some(out) = sending_handle_out.as_deref_mut() {
                        *out = info.publication_handle;
                    }
                    Ok(Some(M::from_transport(value)))
                }
            }
            _ => Err(TakeError::new(
                TakeReason::PreconditionNotMet,
                format!("{type_name} reader: take: sequences disagree about the sample count"),
            )),
        },
        code => Err(TakeError::from_status(code, type_name)),
    };

    // The loan goes back exactly once, whatever happened above. The earlier
    // error wins over a release failure.
    let loan_status = reader.return_loan(&mut values, &mut infos);
    match (outcome, loan_status) {
        (Err(err), _) => Err(err),
        (ok, ReturnCode::Ok) => ok,
        (Ok(_), code) => Err(TakeError::loan_release(code, type_name)),
    }
}
