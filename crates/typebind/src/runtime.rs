// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transport-runtime contract consumed by the adapter layer.
//!
//! The pub/sub runtime underneath this crate is an external collaborator. It
//! is reached exclusively through the traits in this module, all of which
//! speak the runtime's native status-code vocabulary ([`ReturnCode`]). The
//! adapter owns the translation from status codes into the typed error
//! taxonomy in [`crate::error`].

/// Closed status enumeration returned by every transport-runtime primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnCode {
    /// Operation completed.
    Ok,
    /// An internal runtime error occurred.
    Error,
    /// A supplied handle or parameter was invalid.
    BadParameter,
    /// The runtime exhausted a resource limit.
    OutOfResources,
    /// The target entity has already been deleted.
    AlreadyDeleted,
    /// The target entity has not been enabled.
    NotEnabled,
    /// A precondition of the call was not met.
    PreconditionNotMet,
    /// A blocking call exceeded its configured timeout.
    Timeout,
    /// No data was available. Not an error for dequeue operations.
    NoData,
}

impl ReturnCode {
    /// Human-readable status text (status -> message table).
    pub const fn describe(self) -> &'static str {
        match self {
            ReturnCode::Ok => "ok",
            ReturnCode::Error => "an internal error has occurred",
            ReturnCode::BadParameter => "bad parameter",
            ReturnCode::OutOfResources => "out of resources",
            ReturnCode::AlreadyDeleted => "target has already been deleted",
            ReturnCode::NotEnabled => "target is not enabled",
            ReturnCode::PreconditionNotMet => "a precondition is not met",
            ReturnCode::Timeout => "blocking call exceeded its timeout",
            ReturnCode::NoData => "no data available",
        }
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, ReturnCode::Ok)
    }
}

/// Origin identity of a transport endpoint.
///
/// Mirrors the GID layout used by DDS runtimes: a system component shared by
/// every participant on one host process group, a local component naming the
/// participant within that system, and a serial disambiguating reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InstanceHandle {
    pub system_id: u32,
    pub local_id: u32,
    pub serial: u32,
}

impl InstanceHandle {
    /// The nil handle, used when publishing without instance registration.
    pub const NIL: InstanceHandle = InstanceHandle {
        system_id: 0,
        local_id: 0,
        serial: 0,
    };

    pub const fn new(system_id: u32, local_id: u32, serial: u32) -> Self {
        Self {
            system_id,
            local_id,
            serial,
        }
    }

    /// Whether `other` originates from the same system component.
    ///
    /// Loopback suppression compares only the system component, not the full
    /// identity: one system may host several local participants and all of
    /// them count as local traffic.
    #[must_use]
    pub const fn same_system(self, other: InstanceHandle) -> bool {
        self.system_id == other.system_id
    }
}

/// Per-sample metadata delivered alongside each dequeued value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleInfo {
    /// False for lifecycle/metadata-only notifications that carry no payload.
    pub valid_data: bool,
    /// Identity of the writer that produced the sample.
    pub publication_handle: InstanceHandle,
}

/// Wildcard state mask accepted by [`SampleReader::take`].
pub const ANY_STATE: u32 = u32::MAX;

/// Sample/view/instance state masks for a dequeue call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadMasks {
    pub sample_states: u32,
    pub view_states: u32,
    pub instance_states: u32,
}

impl ReadMasks {
    /// Match any sample, view and instance state.
    pub const ANY: ReadMasks = ReadMasks {
        sample_states: ANY_STATE,
        view_states: ANY_STATE,
        instance_states: ANY_STATE,
    };
}

/// Identity token of one type-support instance.
///
/// Registration is idempotent per identity: rebinding a type name to the same
/// token is a no-op, rebinding it to a different token is a precondition
/// failure.
pub type SupportId = usize;

/// Participant-scoped type registry of the underlying runtime.
pub trait TypeRegistrar: Send + Sync {
    /// Bind a type-support identity under `type_name`.
    fn register_type(&self, type_name: &str, support_id: SupportId) -> ReturnCode;
}

/// Publication endpoint of the underlying runtime, typed by the transport
/// representation it carries.
pub trait SampleWriter<S>: Send + Sync {
    /// Hand one sample to the runtime for delivery.
    fn write(&self, sample: &S, instance: InstanceHandle) -> ReturnCode;
}

/// Subscription endpoint of the underlying runtime.
///
/// `take` fills the supplied sequences with loaned storage; the caller must
/// hand the loan back through `return_loan` exactly once per `take` call,
/// whatever the outcome of the dequeue was.
pub trait SampleReader<S>: Send + Sync {
    /// Dequeue up to `max_samples` samples into the loaned sequences.
    fn take(
        &self,
        values: &mut Vec<S>,
        infos: &mut Vec<SampleInfo>,
        max_samples: u32,
        masks: ReadMasks,
    ) -> ReturnCode;

    /// Release the loan taken by the previous `take` on these sequences.
    fn return_loan(&self, values: &mut Vec<S>, infos: &mut Vec<SampleInfo>) -> ReturnCode;

    /// Origin identity of this reader's participant.
    fn instance_handle(&self) -> InstanceHandle;
}

/// Wire encoder/decoder supplied by the underlying runtime for one transport
/// representation.
pub trait SampleEncoder<S>: Send + Sync {
    /// Exact encoded size of `sample`, including encapsulation framing.
    fn serialized_size(&self, sample: &S) -> usize;

    /// Encode `sample` into `out`. `out` must hold at least
    /// [`SampleEncoder::serialized_size`] bytes.
    fn encode(&self, sample: &S, out: &mut [u8]) -> ReturnCode;

    /// Decode one sample from `buf`.
    fn decode(&self, buf: &[u8]) -> Result<S, ReturnCode>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_covers_every_status() {
        let codes = [
            ReturnCode::Ok,
            ReturnCode::Error,
            ReturnCode::BadParameter,
            ReturnCode::OutOfResources,
            ReturnCode::AlreadyDeleted,
            ReturnCode::NotEnabled,
            ReturnCode::PreconditionNotMet,
            ReturnCode::Timeout,
            ReturnCode::NoData,
        ];
        for code in codes {
            assert!(!code.describe().is_empty());
        }
        assert!(ReturnCode::Ok.is_ok());
        assert!(!ReturnCode::NoData.is_ok());
    }

    #[test]
    fn same_system_ignores_local_component() {
        let reader = InstanceHandle::new(7, 1, 0);
        let same_host_other_participant = InstanceHandle::new(7, 9, 3);
        let remote = InstanceHandle::new(8, 1, 0);

        assert!(reader.same_system(same_host_other_participant));
        assert!(!reader.same_system(remote));
    }
}
