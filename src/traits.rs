//! Core traits that decouple hyprpair from any specific compositor or
//! storage location.
//!
//! Every concrete backend (Hyprland IPC, the file-backed state store, a test
//! harness, …) implements one of these traits.  The
//! [`LayoutToggler`](crate::toggler::LayoutToggler) only depends on the
//! abstractions.

use crate::layout::{LayoutMode, Placement, ToggleState};
use crate::monitor::Monitor;

/// Abstraction over monitor discovery.
///
/// An implementation might query Hyprland over IPC, or it might be a
/// canned-list stub used in tests.
pub trait MonitorSource {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Return the attached displays in discovery order.
    ///
    /// The order is meaningful: classification falls back to it, and the
    /// "first remaining" secondary rule depends on it.
    fn monitors(&self) -> Result<Vec<Monitor>, Self::Error>;
}

/// Abstraction over the reconfiguration request.
///
/// The sink is the sole mutating effect the tool produces.  A batch of two
/// placements must be applied atomically: a compositor applying them one at
/// a time could transiently present an overlapping or gapped layout.
pub trait LayoutSink {
    /// The error type produced by this sink.
    type Error: std::error::Error + Send + 'static;

    /// Apply all placements as one request, in the given order (origin
    /// display first).
    fn apply(&self, placements: &[Placement]) -> Result<(), Self::Error>;
}

/// Abstraction over the persisted per-mode toggle bit.
///
/// Implementations decide where the bit lives — a small file under the
/// runtime directory in production, a cell in memory for tests.  An absent
/// value reads as [`ToggleState::SecondaryFirst`]; an unparseable value is
/// recovered to the same default by the implementation, never surfaced as
/// an error.
pub trait StateStore {
    /// The error type produced by this store.
    type Error: std::error::Error + Send + 'static;

    /// Read the persisted state for `mode`.
    fn get(&self, mode: LayoutMode) -> Result<ToggleState, Self::Error>;

    /// Persist `state` for `mode`.
    fn set(&self, mode: LayoutMode, state: ToggleState) -> Result<(), Self::Error>;
}
