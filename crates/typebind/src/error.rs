// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for the codec and transport-adapter layer.
//!
//! Every non-`Ok` status code coming back from the runtime is mapped to
//! exactly one member of this taxonomy and returned to the immediate caller.
//! Each error carries a machine-checkable reason plus the descriptive cause
//! text, so callers branch on the reason and log the cause.

use thiserror::Error;

use crate::runtime::ReturnCode;

/// Why a type registration failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationReason {
    /// No participant handle was supplied.
    NullParticipant,
    /// The type name was empty.
    EmptyTypeName,
    InternalError,
    BadParameter,
    OutOfResources,
    /// The name is already bound to a different type-support instance.
    AlreadyRegistered,
    UnknownCode,
}

/// Type registration against the runtime failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct RegistrationError {
    pub reason: RegistrationReason,
    pub cause: String,
}

impl RegistrationError {
    pub fn new(reason: RegistrationReason, cause: impl Into<String>) -> Self {
        Self {
            reason,
            cause: cause.into(),
        }
    }

    /// Map a non-`Ok` registration status onto the taxonomy.
    pub(crate) fn from_status(code: ReturnCode, type_name: &str) -> Self {
        let reason = match code {
            ReturnCode::Error => RegistrationReason::InternalError,
            ReturnCode::BadParameter => RegistrationReason::BadParameter,
            ReturnCode::OutOfResources => RegistrationReason::OutOfResources,
            ReturnCode::PreconditionNotMet => RegistrationReason::AlreadyRegistered,
            _ => RegistrationReason::UnknownCode,
        };
        let detail = match reason {
            RegistrationReason::BadParameter => "bad participant or type name parameter",
            RegistrationReason::AlreadyRegistered => {
                "already registered with a different type-support instance"
            }
            RegistrationReason::UnknownCode => "unknown return code",
            _ => code.describe(),
        };
        Self::new(
            reason,
            format!("{type_name} type support: register_type: {detail}"),
        )
    }
}

/// Why a publish failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishReason {
    InternalError,
    BadParameter,
    WriterDeleted,
    OutOfResources,
    WriterDisabled,
    /// The instance handle has not been registered with this writer.
    UnregisteredInstance,
    /// Writing blocked and then exceeded the reliability max blocking time.
    BlockingTimeoutExceeded,
    UnknownCode,
}

/// Handing a sample to the writer failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct PublishError {
    pub reason: PublishReason,
    pub cause: String,
}

impl PublishError {
    pub fn new(reason: PublishReason, cause: impl Into<String>) -> Self {
        Self {
            reason,
            cause: cause.into(),
        }
    }

    /// Only a blocking-timeout failure may be retried under an at-least-once
    /// policy; every other reason is fatal for the call.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.reason == PublishReason::BlockingTimeoutExceeded
    }

    pub(crate) fn from_status(code: ReturnCode, type_name: &str) -> Self {
        let reason = match code {
            ReturnCode::Error => PublishReason::InternalError,
            ReturnCode::BadParameter => PublishReason::BadParameter,
            ReturnCode::AlreadyDeleted => PublishReason::WriterDeleted,
            ReturnCode::OutOfResources => PublishReason::OutOfResources,
            ReturnCode::NotEnabled => PublishReason::WriterDisabled,
            ReturnCode::PreconditionNotMet => PublishReason::UnregisteredInstance,
            ReturnCode::Timeout => PublishReason::BlockingTimeoutExceeded,
            _ => PublishReason::UnknownCode,
        };
        let detail = match reason {
            PublishReason::BadParameter => "bad handle or instance data parameter",
            PublishReason::WriterDeleted => "this writer has already been deleted",
            PublishReason::WriterDisabled => "this writer is not enabled",
            PublishReason::UnregisteredInstance => {
                "the handle has not been registered with this writer"
            }
            PublishReason::BlockingTimeoutExceeded => {
                "writing blocked and then exceeded the max blocking time of the reliability policy"
            }
            PublishReason::UnknownCode => "unknown return code",
            _ => code.describe(),
        };
        Self::new(reason, format!("{type_name} writer: write: {detail}"))
    }
}

/// Why a take failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeReason {
    InternalError,
    ReaderDeleted,
    OutOfResources,
    ReaderDisabled,
    /// Mismatched sequence parameters on the dequeue call.
    PreconditionNotMet,
    /// The dequeue succeeded but the loan could not be handed back.
    LoanReturnFailed,
    UnknownCode,
}

/// Dequeuing a sample from the reader failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct TakeError {
    pub reason: TakeReason,
    pub cause: String,
}

impl TakeError {
    pub fn new(reason: TakeReason, cause: impl Into<String>) -> Self {
        Self {
            reason,
            cause: cause.into(),
        }
    }

    pub(crate) fn from_status(code: ReturnCode, type_name: &str) -> Self {
        let reason = match code {
            ReturnCode::Error => TakeReason::InternalError,
            ReturnCode::AlreadyDeleted => TakeReason::ReaderDeleted,
            ReturnCode::OutOfResources => TakeReason::OutOfResources,
            ReturnCode::NotEnabled => TakeReason::ReaderDisabled,
            ReturnCode::PreconditionNotMet => TakeReason::PreconditionNotMet,
            _ => TakeReason::UnknownCode,
        };
        let detail = match reason {
            TakeReason::ReaderDeleted => "this reader has already been deleted",
            TakeReason::ReaderDisabled => "this reader is not enabled",
            TakeReason::PreconditionNotMet => {
                "a precondition is not met: the sequences do not have matching parameters"
            }
            TakeReason::UnknownCode => "unknown return code",
            _ => code.describe(),
        };
        Self::new(reason, format!("{type_name} reader: take: {detail}"))
    }

    /// Loan-release failure, surfaced only when no earlier error is pending.
    pub(crate) fn loan_release(code: ReturnCode, type_name: &str) -> Self {
        Self::new(
            TakeReason::LoanReturnFailed,
            format!("{type_name} reader: return_loan: {}", code.describe()),
        )
    }
}

/// Why encoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingReason {
    InternalError,
    BadParameter,
    EncoderDeleted,
    OutOfResources,
    UnknownCode,
}

/// The wire encoder reported a failure while serializing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct EncodingError {
    pub reason: EncodingReason,
    pub cause: String,
}

impl EncodingError {
    pub fn new(reason: EncodingReason, cause: impl Into<String>) -> Self {
        Self {
            reason,
            cause: cause.into(),
        }
    }

    pub(crate) fn from_status(code: ReturnCode, type_name: &str) -> Self {
        let reason = match code {
            ReturnCode::Error => EncodingReason::InternalError,
            ReturnCode::BadParameter => EncodingReason::BadParameter,
            ReturnCode::AlreadyDeleted => EncodingReason::EncoderDeleted,
            ReturnCode::OutOfResources => EncodingReason::OutOfResources,
            _ => EncodingReason::UnknownCode,
        };
        let detail = match reason {
            EncodingReason::UnknownCode => "unknown return code",
            _ => code.describe(),
        };
        Self::new(
            reason,
            format!("{type_name} type support: serialize: {detail}"),
        )
    }
}

/// Why decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodingReason {
    InternalError,
    BadParameter,
    DecoderDeleted,
    OutOfResources,
    UnknownCode,
}

/// Malformed or truncated input, or a decoder-internal failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct DecodingError {
    pub reason: DecodingReason,
    pub cause: String,
}

impl DecodingError {
    pub fn new(reason: DecodingReason, cause: impl Into<String>) -> Self {
        Self {
            reason,
            cause: cause.into(),
        }
    }

    pub(crate) fn from_status(code: ReturnCode, type_name: &str) -> Self {
        let reason = match code {
            ReturnCode::Error => DecodingReason::InternalError,
            ReturnCode::BadParameter => DecodingReason::BadParameter,
            ReturnCode::AlreadyDeleted => DecodingReason::DecoderDeleted,
            ReturnCode::OutOfResources => DecodingReason::OutOfResources,
            _ => DecodingReason::UnknownCode,
        };
        let detail = match reason {
            DecodingReason::UnknownCode => "unknown return code",
            _ => code.describe(),
        };
        Self::new(
            reason,
            format!("{type_name} type support: deserialize: {detail}"),
        )
    }
}

/// The serialized buffer could not be grown to the required length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to resize serialized buffer to {required} bytes (bound {bound})")]
pub struct ResizeError {
    /// Length the encoder needs.
    pub required: usize,
    /// Hard capacity bound the buffer refused to exceed.
    pub bound: usize,
}

/// Failure of the serialize path: either the encoder or the buffer growth.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Resize(#[from] ResizeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_precondition_maps_to_already_registered() {
        let err = RegistrationError::from_status(ReturnCode::PreconditionNotMet, "demo::Msg");
        assert_eq!(err.reason, RegistrationReason::AlreadyRegistered);
        assert!(err.cause.contains("different type-support instance"));
    }

    #[test]
    fn publish_timeout_is_the_only_retryable_reason() {
        let timeout = PublishError::from_status(ReturnCode::Timeout, "demo::Msg");
        assert_eq!(timeout.reason, PublishReason::BlockingTimeoutExceeded);
        assert!(timeout.is_retryable());

        for code in [
            ReturnCode::Error,
            ReturnCode::BadParameter,
            ReturnCode::AlreadyDeleted,
            ReturnCode::OutOfResources,
            ReturnCode::NotEnabled,
            ReturnCode::PreconditionNotMet,
        ] {
            assert!(!PublishError::from_status(code, "demo::Msg").is_retryable());
        }
    }

    #[test]
    fn take_mapping_covers_reader_lifecycle_codes() {
        let deleted = TakeError::from_status(ReturnCode::AlreadyDeleted, "demo::Msg");
        assert_eq!(deleted.reason, TakeReason::ReaderDeleted);

        let disabled = TakeError::from_status(ReturnCode::NotEnabled, "demo::Msg");
        assert_eq!(disabled.reason, TakeReason::ReaderDisabled);

        let unknown = TakeError::from_status(ReturnCode::NoData, "demo::Msg");
        assert_eq!(unknown.reason, TakeReason::UnknownCode);
    }

    #[test]
    fn decode_statuses_collapse_into_decoding_error() {
        for (code, reason) in [
            (ReturnCode::Error, DecodingReason::InternalError),
            (ReturnCode::BadParameter, DecodingReason::BadParameter),
            (ReturnCode::OutOfResources, DecodingReason::OutOfResources),
        ] {
            let err = DecodingError::from_status(code, "demo::Msg");
            assert_eq!(err.reason, reason);
            assert!(err.cause.contains("deserialize"));
        }
    }
}
