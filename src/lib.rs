//! **hyprpair** — a dual-monitor layout toggler for Hyprland.
//!
//! hyprpair arranges an internal (laptop) panel and one external monitor so
//! that their *logical* rectangles — physical pixels divided by the
//! per-monitor scale — are exactly adjacent, with no gap or overlap at the
//! cursor boundary.  A persisted one-bit state per axis lets a single
//! keybinding alternate which display sits at the coordinate origin; four
//! absolute placement flags compute a fixed arrangement with no state at all.
//!
//! # Architecture
//!
//! The crate is organised around three core traits:
//!
//! * [`traits::MonitorSource`] — abstracts monitor discovery so the
//!   classifier and geometry logic are not coupled to any specific
//!   compositor.
//! * [`traits::LayoutSink`] — abstracts the batched placement request the
//!   tool ultimately issues.
//! * [`traits::StateStore`] — abstracts the persisted toggle bit so tests
//!   can substitute an in-memory store for the filesystem.
//!
//! Concrete implementations live in [`hyprland`] (Hyprland IPC, implementing
//! both source and sink) and [`state`] (file-backed and in-memory stores).
//! The [`toggler::LayoutToggler`] only depends on the abstractions.

pub mod config;
pub mod hyprland;
pub mod layout;
pub mod monitor;
pub mod state;
pub mod toggler;
pub mod traits;
