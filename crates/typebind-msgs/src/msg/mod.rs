// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Messages in the `typebind_msgs::msg` namespace.

mod hand_control;

pub use hand_control::{
    hand_control_type_support, hand_control_type_support_constructions, HandControl,
    HandControlCdr, HandControlDds, HAND_CONTROL_DESCRIPTOR, HAND_CONTROL_TYPE_NAME,
};
