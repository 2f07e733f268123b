//! Hyprland-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`MonitorSource`](crate::traits::MonitorSource) and
//! [`LayoutSink`](crate::traits::LayoutSink) traits, powered by Hyprland's
//! IPC socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod backend;
