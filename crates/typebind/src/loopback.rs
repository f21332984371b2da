// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-process loopback transport runtime.
//!
//! A minimal single-process implementation of the [`crate::runtime`] traits:
//! one bounded-free FIFO per channel, loan accounting on the reader side and
//! per-call fault injection. It backs the unit and integration tests and
//! doubles as the reference implementation of the loan discipline the
//! adapter expects from a real runtime.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::runtime::{
    InstanceHandle, ReadMasks, ReturnCode, SampleInfo, SampleReader, SampleWriter, SupportId,
    TypeRegistrar,
};

/// Participant-scoped type registry of the loopback runtime.
///
/// Re-registering a name with the same support identity is a no-op;
/// rebinding it to a different identity reports `PreconditionNotMet`.
#[derive(Debug, Default)]
pub struct LoopbackParticipant {
    bindings: DashMap<String, SupportId>,
    fail_next_register: Mutex<Option<ReturnCode>>,
}

impl LoopbackParticipant {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `register_type` call report `code`.
    pub fn inject_register_failure(&self, code: ReturnCode) {
        *self.fail_next_register.lock() = Some(code);
    }

    /// Number of names currently bound.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

impl TypeRegistrar for LoopbackParticipant {
    fn register_type(&self, type_name: &str, support_id: SupportId) -> ReturnCode {
        if let Some(code) = self.fail_next_register.lock().take() {
            return code;
        }
        if type_name.is_empty() {
            return ReturnCode::BadParameter;
        }
        match self.bindings.entry(type_name.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if *entry.get() == support_id {
                    ReturnCode::Ok
                } else {
                    ReturnCode::PreconditionNotMet
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(support_id);
                ReturnCode::Ok
            }
        }
    }
}

struct ChannelState<S> {
    queue: Mutex<VecDeque<(S, SampleInfo)>>,
    reader_handle: InstanceHandle,
    loans_acquired: AtomicUsize,
    loans_released: AtomicUsize,
    fail_next_write: Mutex<Option<ReturnCode>>,
    fail_next_take: Mutex<Option<ReturnCode>>,
    fail_next_return_loan: Mutex<Option<ReturnCode>>,
}

/// One topic-equivalent channel: any number of writers feeding one reader.
pub struct LoopbackChannel<S> {
    state: Arc<ChannelState<S>>,
}

impl<S: Clone + Send + 'static> LoopbackChannel<S> {
    /// Create a channel whose reader reports `reader_handle` as its origin.
    #[must_use]
    pub fn new(reader_handle: InstanceHandle) -> Self {
        Self {
            state: Arc::new(ChannelState {
                queue: Mutex::new(VecDeque::new()),
                reader_handle,
                loans_acquired: AtomicUsize::new(0),
                loans_released: AtomicUsize::new(0),
                fail_next_write: Mutex::new(None),
                fail_next_take: Mutex::new(None),
                fail_next_return_loan: Mutex::new(None),
            }),
        }
    }

    /// Writer endpoint publishing under origin identity `origin`.
    #[must_use]
    pub fn writer(&self, origin: InstanceHandle) -> LoopbackWriter<S> {
        LoopbackWriter {
            state: Arc::clone(&self.state),
            origin,
        }
    }

    /// Reader endpoint of this channel.
    #[must_use]
    pub fn reader(&self) -> LoopbackReader<S> {
        LoopbackReader {
            state: Arc::clone(&self.state),
        }
    }

    /// Enqueue a lifecycle notification that carries no payload.
    pub fn push_metadata_sample(&self, publication: InstanceHandle)
    where
        S: Default,
    {
        self.state.queue.lock().push_back((
            S::default(),
            SampleInfo {
                valid_data: false,
                publication_handle: publication,
            },
        ));
    }

    /// Samples currently queued.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state.queue.lock().len()
    }

    /// Loans handed out by `take` so far, failed dequeues included.
    #[must_use]
    pub fn loans_acquired(&self) -> usize {
        self.state.loans_acquired.load(Ordering::SeqCst)
    }

    /// Loans handed back through `return_loan` so far.
    #[must_use]
    pub fn loans_released(&self) -> usize {
        self.state.loans_released.load(Ordering::SeqCst)
    }

    /// Make the next `write` call report `code`.
    pub fn inject_write_failure(&self, code: ReturnCode) {
        *self.state.fail_next_write.lock() = Some(code);
    }

    /// Make the next `take` call report `code`.
    pub fn inject_take_failure(&self, code: ReturnCode) {
        *self.state.fail_next_take.lock() = Some(code);
    }

    /// Make the next `return_loan` call report `code`.
    pub fn inject_return_loan_failure(&self, code: ReturnCode) {
        *self.state.fail_next_return_loan.lock() = Some(code);
    }
}

/// Writer endpoint of a [`LoopbackChannel`].
pub struct LoopbackWriter<S> {
    state: Arc<ChannelState<S>>,
    origin: InstanceHandle,
}

impl<S: Clone + Send + 'static> SampleWriter<S> for LoopbackWriter<S> {
    fn write(&self, sample: &S, _instance: InstanceHandle) -> ReturnCode {
        if let Some(code) = self.state.fail_next_write.lock().take() {
            return code;
        }
        self.state.queue.lock().push_back((
            sample.clone(),
            SampleInfo {
                valid_data: true,
                publication_handle: self.origin,
            },
        ));
        ReturnCode::Ok
    }
}

/// Reader endpoint of a [`LoopbackChannel`].
pub struct LoopbackReader<S> {
    state: Arc<ChannelState<S>>,
}

impl<S: Clone + Send + 'static> SampleReader<S> for LoopbackReader<S> {
    fn take(
        &self,
        values: &mut Vec<S>,
        infos: &mut Vec<SampleInfo>,
        max_samples: u32,
        _masks: ReadMasks,
    ) -> ReturnCode {
        // Storage is loaned to the caller on every take call, even a failed
        // one; the matching return_loan is owed regardless of outcome.
        self.state.loans_acquired.fetch_add(1, Ordering::SeqCst);

        if let Some(code) = self.state.fail_next_take.lock().take() {
            return code;
        }
        if max_samples == 0 || !values.is_empty() || !infos.is_empty() {
            return ReturnCode::PreconditionNotMet;
        }

        let mut queue = self.state.queue.lock();
        if queue.is_empty() {
            return ReturnCode::NoData;
        }
        while values.len() < max_samples as usize {
            match queue.pop_front() {
                Some((value, info)) => {
                    values.push(value);
                    infos.push(info);
                }
                None => break,
            }
        }
        ReturnCode::Ok
    }

    fn return_loan(&self, values: &mut Vec<S>, infos: &mut Vec<SampleInfo>) -> ReturnCode {
        self.state.loans_released.fetch_add(1, Ordering::SeqCst);

        if let Some(code) = self.state.fail_next_return_loan.lock().take() {
            return code;
        }
        if values.len() != infos.len() {
            return ReturnCode::PreconditionNotMet;
        }
        values.clear();
        infos.clear();
        ReturnCode::Ok
    }

    fn instance_handle(&self) -> InstanceHandle {
        self.state.reader_handle
    }
}
