//! Scale resolution, logical geometry, and layout arrangement.
//!
//! Everything in this module is pure: given two classified monitors and a
//! desired arrangement, it produces the exact list of [`Placement`]s to hand
//! to a [`LayoutSink`](crate::traits::LayoutSink).  The placements are always
//! ordered origin display first so a batched request configures the layout
//! from the origin outward.
//!
//! Positioning happens in *logical* coordinates: a display's physical pixel
//! dimensions divided by its scale factor.  The offset display starts exactly
//! at the origin display's logical width (or height), which is what makes the
//! cursor cross the boundary with no gap or clamping.

use crate::monitor::{Monitor, PixelMode};
use std::fmt;

/// Per-monitor scale factor.
///
/// The rule is deliberately narrow: a native 3840×2160 panel gets 1.5,
/// everything else (including other 4K-family modes such as 4096×2160)
/// gets 1.0.  This is not a DPI heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// 1.0 — logical dimensions equal physical dimensions.
    Normal,
    /// 1.5 — the UHD laptop-panel case.
    Hidpi,
}

impl Scale {
    /// Resolve the scale for a physical mode.
    pub fn resolve(width: u32, height: u32) -> Self {
        if (width, height) == (3840, 2160) {
            Scale::Hidpi
        } else {
            Scale::Normal
        }
    }

    /// Logical size of `physical` pixels at this scale.
    ///
    /// Truncates toward zero.  At 1.5 this is exact integer arithmetic
    /// (`px * 2 / 3`), so 3840 maps to 2560 with no rounding ambiguity.
    pub fn logical(self, physical: u32) -> u32 {
        match self {
            Scale::Normal => physical,
            Scale::Hidpi => physical * 2 / 3,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Normal => write!(f, "1"),
            Scale::Hidpi => write!(f, "1.5"),
        }
    }
}

/// Axis of a toggling layout.  Each mode owns an independent persisted bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Horizontal,
    Vertical,
}

impl LayoutMode {
    /// Stable key used to name the persisted state for this mode.
    pub fn key(self) -> &'static str {
        match self {
            LayoutMode::Horizontal => "horizontal",
            LayoutMode::Vertical => "vertical",
        }
    }
}

/// The two arrangements a toggling layout alternates between.
///
/// The persisted value names the arrangement to apply on the *next*
/// invocation; applying it flips the stored value, so two consecutive
/// toggles return the machine to its initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// Secondary at the origin, primary offset.  The default when nothing
    /// has been persisted yet.
    SecondaryFirst,
    /// Primary at the origin, secondary offset.
    PrimaryFirst,
}

impl ToggleState {
    /// The other arrangement.
    pub fn flipped(self) -> Self {
        match self {
            ToggleState::SecondaryFirst => ToggleState::PrimaryFirst,
            ToggleState::PrimaryFirst => ToggleState::SecondaryFirst,
        }
    }

    /// The arrangement expressed as a secondary-relative position on the
    /// given axis.
    pub fn position(self, mode: LayoutMode) -> SecondaryPosition {
        match (mode, self) {
            (LayoutMode::Horizontal, ToggleState::SecondaryFirst) => SecondaryPosition::Left,
            (LayoutMode::Horizontal, ToggleState::PrimaryFirst) => SecondaryPosition::Right,
            (LayoutMode::Vertical, ToggleState::SecondaryFirst) => SecondaryPosition::Above,
            (LayoutMode::Vertical, ToggleState::PrimaryFirst) => SecondaryPosition::Below,
        }
    }
}

/// Where the secondary display sits relative to the primary.
///
/// This is the single vocabulary both the toggling and the absolute
/// placement paths reduce to: a toggle state on an axis *is* one of these
/// four positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryPosition {
    Left,
    Right,
    Above,
    Below,
}

impl fmt::Display for SecondaryPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecondaryPosition::Left => write!(f, "left"),
            SecondaryPosition::Right => write!(f, "right"),
            SecondaryPosition::Above => write!(f, "above"),
            SecondaryPosition::Below => write!(f, "below"),
        }
    }
}

/// Mode portion of a placement directive.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementMode {
    /// An exact mode: `<width>x<height>@<refresh>`.
    Exact { width: u32, height: u32, refresh: f64 },
    /// Let the compositor pick the display's preferred mode.  Used by the
    /// degraded fallback paths where the active mode is unknown.
    Preferred,
}

/// One fully resolved placement directive for a single display.
///
/// The [`Display`](fmt::Display) implementation renders the exact monitor
/// keyword syntax Hyprland expects:
/// `<name>,<width>x<height>@<refresh>,<x>x<y>,<scale>`.
/// The refresh rate is always formatted with two decimal places; the
/// compositor-reported fractional rate is kept rather than truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub name: String,
    pub mode: PlacementMode,
    pub x: u32,
    pub y: u32,
    pub scale: Scale,
}

impl Placement {
    /// Place a monitor's active mode at `(x, y)` with its resolved scale.
    pub fn at(monitor: &Monitor, mode: &PixelMode, x: u32, y: u32) -> Self {
        Placement {
            name: monitor.name.clone(),
            mode: PlacementMode::Exact {
                width: mode.width,
                height: mode.height,
                refresh: mode.refresh,
            },
            x,
            y,
            scale: Scale::resolve(mode.width, mode.height),
        }
    }

    /// Place a monitor at the origin with its preferred mode and scale 1.0.
    ///
    /// The degraded fallback used when the active mode could not be
    /// determined.
    pub fn preferred(name: &str) -> Self {
        Placement {
            name: name.to_string(),
            mode: PlacementMode::Preferred,
            x: 0,
            y: 0,
            scale: Scale::Normal,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            PlacementMode::Exact {
                width,
                height,
                refresh,
            } => write!(
                f,
                "{},{}x{}@{:.2},{}x{},{}",
                self.name, width, height, refresh, self.x, self.y, self.scale
            ),
            PlacementMode::Preferred => {
                write!(f, "{},preferred,{}x{},{}", self.name, self.x, self.y, self.scale)
            }
        }
    }
}

/// Compute the two placements for a primary/secondary pair with the
/// secondary in the given position.
///
/// Returns `[origin, offset]`: whichever display sits at `(0,0)` comes
/// first.  The offset display starts exactly at the origin display's logical
/// width (or height), so the two logical rectangles share an edge.
pub fn arrange(
    primary: &Monitor,
    primary_mode: &PixelMode,
    secondary: &Monitor,
    secondary_mode: &PixelMode,
    position: SecondaryPosition,
) -> [Placement; 2] {
    let primary_scale = Scale::resolve(primary_mode.width, primary_mode.height);
    let secondary_scale = Scale::resolve(secondary_mode.width, secondary_mode.height);

    match position {
        SecondaryPosition::Left => {
            let offset = secondary_scale.logical(secondary_mode.width);
            [
                Placement::at(secondary, secondary_mode, 0, 0),
                Placement::at(primary, primary_mode, offset, 0),
            ]
        }
        SecondaryPosition::Right => {
            let offset = primary_scale.logical(primary_mode.width);
            [
                Placement::at(primary, primary_mode, 0, 0),
                Placement::at(secondary, secondary_mode, offset, 0),
            ]
        }
        SecondaryPosition::Above => {
            let offset = secondary_scale.logical(secondary_mode.height);
            [
                Placement::at(secondary, secondary_mode, 0, 0),
                Placement::at(primary, primary_mode, 0, offset),
            ]
        }
        SecondaryPosition::Below => {
            let offset = primary_scale.logical(primary_mode.height);
            [
                Placement::at(primary, primary_mode, 0, 0),
                Placement::at(secondary, secondary_mode, 0, offset),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{Monitor, PixelMode};

    fn laptop() -> (Monitor, PixelMode) {
        (
            Monitor {
                name: "eDP-1".into(),
                mode: Some(PixelMode {
                    width: 1920,
                    height: 1080,
                    refresh: 60.0,
                }),
                focused: true,
            },
            PixelMode {
                width: 1920,
                height: 1080,
                refresh: 60.0,
            },
        )
    }

    fn uhd_external() -> (Monitor, PixelMode) {
        (
            Monitor {
                name: "DP-1".into(),
                mode: Some(PixelMode {
                    width: 3840,
                    height: 2160,
                    refresh: 59.97,
                }),
                focused: false,
            },
            PixelMode {
                width: 3840,
                height: 2160,
                refresh: 59.97,
            },
        )
    }

    //  Scale resolution

    #[test]
    fn uhd_resolves_to_hidpi() {
        assert_eq!(Scale::resolve(3840, 2160), Scale::Hidpi);
    }

    #[test]
    fn everything_else_resolves_to_normal() {
        assert_eq!(Scale::resolve(1920, 1080), Scale::Normal);
        assert_eq!(Scale::resolve(2560, 1440), Scale::Normal);
        // DCI 4K is deliberately not the UHD case.
        assert_eq!(Scale::resolve(4096, 2160), Scale::Normal);
        assert_eq!(Scale::resolve(2160, 3840), Scale::Normal);
        assert_eq!(Scale::resolve(0, 0), Scale::Normal);
    }

    #[test]
    fn logical_dimensions_truncate() {
        assert_eq!(Scale::Hidpi.logical(3840), 2560);
        assert_eq!(Scale::Hidpi.logical(2160), 1440);
        assert_eq!(Scale::Normal.logical(1920), 1920);
        // 100 / 1.5 = 66.67 — truncation, not rounding.
        assert_eq!(Scale::Hidpi.logical(100), 66);
    }

    #[test]
    fn scale_renders_as_keyword_factor() {
        assert_eq!(Scale::Normal.to_string(), "1");
        assert_eq!(Scale::Hidpi.to_string(), "1.5");
    }

    //  Toggle state

    #[test]
    fn flipping_twice_is_identity() {
        assert_eq!(
            ToggleState::SecondaryFirst.flipped().flipped(),
            ToggleState::SecondaryFirst
        );
        assert_eq!(
            ToggleState::SecondaryFirst.flipped(),
            ToggleState::PrimaryFirst
        );
    }

    #[test]
    fn state_maps_to_axis_position() {
        assert_eq!(
            ToggleState::SecondaryFirst.position(LayoutMode::Horizontal),
            SecondaryPosition::Left
        );
        assert_eq!(
            ToggleState::PrimaryFirst.position(LayoutMode::Horizontal),
            SecondaryPosition::Right
        );
        assert_eq!(
            ToggleState::SecondaryFirst.position(LayoutMode::Vertical),
            SecondaryPosition::Above
        );
        assert_eq!(
            ToggleState::PrimaryFirst.position(LayoutMode::Vertical),
            SecondaryPosition::Below
        );
    }

    //  Arrangement

    #[test]
    fn secondary_left_puts_secondary_at_origin() {
        let (p, pm) = laptop();
        let (s, sm) = uhd_external();
        let [origin, offset] = arrange(&p, &pm, &s, &sm, SecondaryPosition::Left);

        assert_eq!(origin.name, "DP-1");
        assert_eq!((origin.x, origin.y), (0, 0));
        assert_eq!(origin.scale, Scale::Hidpi);

        assert_eq!(offset.name, "eDP-1");
        // 3840 / 1.5 = 2560 logical pixels.
        assert_eq!((offset.x, offset.y), (2560, 0));
        assert_eq!(offset.scale, Scale::Normal);
    }

    #[test]
    fn secondary_right_offsets_by_primary_logical_width() {
        let (p, pm) = laptop();
        let (s, sm) = uhd_external();
        let [origin, offset] = arrange(&p, &pm, &s, &sm, SecondaryPosition::Right);

        assert_eq!(origin.name, "eDP-1");
        assert_eq!((origin.x, origin.y), (0, 0));
        assert_eq!(offset.name, "DP-1");
        assert_eq!((offset.x, offset.y), (1920, 0));
    }

    #[test]
    fn secondary_above_offsets_by_secondary_logical_height() {
        let (p, pm) = laptop();
        let (s, sm) = uhd_external();
        let [origin, offset] = arrange(&p, &pm, &s, &sm, SecondaryPosition::Above);

        assert_eq!(origin.name, "DP-1");
        assert_eq!((origin.x, origin.y), (0, 0));
        assert_eq!(offset.name, "eDP-1");
        // 2160 / 1.5 = 1440 logical pixels.
        assert_eq!((offset.x, offset.y), (0, 1440));
    }

    #[test]
    fn secondary_below_offsets_by_primary_logical_height() {
        let (p, pm) = laptop();
        let (s, sm) = uhd_external();
        let [origin, offset] = arrange(&p, &pm, &s, &sm, SecondaryPosition::Below);

        assert_eq!(origin.name, "eDP-1");
        assert_eq!((origin.x, origin.y), (0, 0));
        assert_eq!(offset.name, "DP-1");
        assert_eq!((offset.x, offset.y), (0, 1080));
    }

    #[test]
    fn arrangement_is_pure() {
        let (p, pm) = laptop();
        let (s, sm) = uhd_external();
        let first = arrange(&p, &pm, &s, &sm, SecondaryPosition::Above);
        let second = arrange(&p, &pm, &s, &sm, SecondaryPosition::Above);
        assert_eq!(first, second);
    }

    //  Directive rendering

    #[test]
    fn exact_placement_renders_keyword_syntax() {
        let (s, sm) = uhd_external();
        let placement = Placement::at(&s, &sm, 0, 0);
        assert_eq!(placement.to_string(), "DP-1,3840x2160@59.97,0x0,1.5");
    }

    #[test]
    fn refresh_rate_keeps_two_decimals() {
        let (p, pm) = laptop();
        let placement = Placement::at(&p, &pm, 2560, 0);
        assert_eq!(placement.to_string(), "eDP-1,1920x1080@60.00,2560x0,1");
    }

    #[test]
    fn preferred_placement_renders_fallback_syntax() {
        let placement = Placement::preferred("HDMI-A-1");
        assert_eq!(placement.to_string(), "HDMI-A-1,preferred,0x0,1");
    }
}
