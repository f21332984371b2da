// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message packages bound to the typebind marshalling layer.
//!
//! Each message module follows the same pattern a message-tooling backend
//! emits: the native struct, its transport representation, the static
//! descriptor, the field mapping, the wire codec and the lazily constructed
//! process-wide type-support handle. See [`msg::HandControl`] for the
//! reference instance.

/// Message definitions (`typebind_msgs::msg` namespace).
pub mod msg;

pub use msg::{hand_control_type_support, HandControl, HandControlDds};
