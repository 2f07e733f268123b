//! Monitor descriptors and role classification.
//!
//! This module defines the vocabulary shared by every component:
//! [`Monitor`] describes one attached display at query time, and
//! [`classify`] partitions a discovery list into the primary (laptop) and
//! secondary (external) roles.
//!
//! Descriptors are constructed fresh on every invocation from a
//! point-in-time query.  They carry no identity beyond one run; a monitor's
//! role can change between runs if focus or name matching changes.

use thiserror::Error;

/// The active pixel mode of a display.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelMode {
    /// Horizontal resolution in physical pixels.
    pub width: u32,
    /// Vertical resolution in physical pixels.
    pub height: u32,
    /// Compositor-reported refresh rate in Hz (may be fractional).
    pub refresh: f64,
}

/// One attached display as reported by the compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    /// Name the compositor uses for this display (e.g. `"eDP-1"`).  Not
    /// guaranteed stable across reconnects.
    pub name: String,
    /// The active mode, or `None` if the compositor reported incomplete
    /// fields for this display.
    pub mode: Option<PixelMode>,
    /// Whether this display currently holds input focus.
    pub focused: bool,
}

/// Result of classification: exactly one primary, at most one secondary.
///
/// Invariant: when both are present they reference distinct descriptors.
/// Monitors beyond the selected two are left unmanaged.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleAssignment<'a> {
    pub primary: &'a Monitor,
    pub secondary: Option<&'a Monitor>,
}

/// Errors from classification.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Discovery returned an empty list; there is nothing to configure.
    #[error("no monitors found")]
    NoMonitors,

    /// A primary was configured by exact name but is absent from the
    /// discovery results.
    #[error("configured primary monitor {0:?} not found")]
    PrimaryNotFound(String),
}

/// Partition `monitors` into primary and secondary roles.
///
/// Selection order:
///
/// 1. `configured` (exact name) when set — its absence is an error.
/// 2. A unique substring match of `pattern` (the laptop-panel heuristic).
/// 3. The lone descriptor, when only one exists.
/// 4. The focused descriptor, when exactly one is focused.
/// 5. Discovery order.
///
/// The secondary is the first remaining descriptor in discovery order.
pub fn classify<'a>(
    monitors: &'a [Monitor],
    configured: Option<&str>,
    pattern: &str,
) -> Result<RoleAssignment<'a>, ClassifyError> {
    if monitors.is_empty() {
        return Err(ClassifyError::NoMonitors);
    }

    let primary = match configured {
        Some(name) => monitors
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ClassifyError::PrimaryNotFound(name.to_string()))?,
        None => pick_heuristic(monitors, pattern),
    };

    let secondary = monitors
        .iter()
        .find(|m| !std::ptr::eq(*m, primary));

    Ok(RoleAssignment { primary, secondary })
}

/// Heuristic primary selection when no exact name is configured.
fn pick_heuristic<'a>(monitors: &'a [Monitor], pattern: &str) -> &'a Monitor {
    let mut matches = monitors.iter().filter(|m| m.name.contains(pattern));
    if let (Some(only), None) = (matches.next(), matches.next()) {
        return only;
    }

    if monitors.len() == 1 {
        return &monitors[0];
    }

    let mut focused = monitors.iter().filter(|m| m.focused);
    if let (Some(only), None) = (focused.next(), focused.next()) {
        return only;
    }

    &monitors[0]
}
