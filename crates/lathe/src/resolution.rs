//! # Resolution — How Finely Each Shape Is Sampled
//!
//! Each shape is controlled by a handful of integer subdivision counts. They
//! usually come straight from UI sliders, so out-of-range values are normal
//! input rather than errors: they are clamped into range without complaint.
//!
//! | Shape    | Parameter      | Range      | Default |
//! |----------|----------------|------------|---------|
//! | Cylinder | `slices`       | 3..=255    | 3       |
//! | Cylinder | `stacks`       | 1..=255    | 1       |
//! | Cylinder | `rings`        | 1..=255    | 1       |
//! | Torus    | `rings`        | 3..=255    | 8       |
//! | Torus    | `sides`        | 3..=255    | 8       |
//! | Torus    | `minor_radius` | unclamped  | 0.5     |
//!
//! Changing resolution never changes topology, only sample density.
//!
//! ## Buffer Freshness
//!
//! A generator does not own the buffers it fills, but it does know when they
//! have gone out of date. [`BufferState`] is a two-state machine:
//!
//! ```text
//!            remesh (values changed)
//!   Fresh ────────────────────────────► Stale
//!     ▲                                   │
//!     └───────── acknowledge_upload ──────┘
//! ```
//!
//! A remesh to the values already in effect is not a transition.

use std::ops::RangeInclusive;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

pub const CYLINDER_SLICES: RangeInclusive<u32> = 3..=255;
pub const CYLINDER_STACKS: RangeInclusive<u32> = 1..=255;
pub const CYLINDER_RINGS: RangeInclusive<u32> = 1..=255;
pub const TORUS_RINGS: RangeInclusive<u32> = 3..=255;
pub const TORUS_SIDES: RangeInclusive<u32> = 3..=255;

/// Clamp a requested subdivision count into `range`.
pub fn clamp_resolution(value: u32, range: RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

/// Whether buffers filled from a generator still match its resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferState {
    /// The last fill was uploaded and acknowledged; nothing changed since.
    Fresh,
    /// The resolution changed (or nothing was ever filled). Re-fill and
    /// re-upload, then acknowledge.
    #[default]
    Stale,
}

impl BufferState {
    pub fn is_fresh(self) -> bool {
        self == BufferState::Fresh
    }

    pub fn is_stale(self) -> bool {
        self == BufferState::Stale
    }

    pub fn label(self) -> &'static str {
        match self {
            BufferState::Fresh => "fresh",
            BufferState::Stale => "stale",
        }
    }
}

// ── Cylinder ────────────────────────────────────────────────────────────

/// Subdivision counts for a capped cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(default))]
pub struct CylinderResolution {
    /// Radial divisions around the axis.
    pub slices: u32,
    /// Vertical divisions of the side.
    pub stacks: u32,
    /// Concentric divisions of each end disk.
    pub rings: u32,
}

impl CylinderResolution {
    /// Store the values as given. Use [`clamped`](Self::clamped) to bring
    /// them into range.
    pub const fn new(slices: u32, stacks: u32, rings: u32) -> Self {
        Self { slices, stacks, rings }
    }

    pub fn clamped(self) -> Self {
        Self {
            slices: clamp_resolution(self.slices, CYLINDER_SLICES),
            stacks: clamp_resolution(self.stacks, CYLINDER_STACKS),
            rings: clamp_resolution(self.rings, CYLINDER_RINGS),
        }
    }
}

impl Default for CylinderResolution {
    fn default() -> Self {
        Self::new(3, 1, 1)
    }
}

// ── Torus ───────────────────────────────────────────────────────────────

/// Subdivision counts and tube radius for a torus of major radius 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(default))]
pub struct TorusResolution {
    /// Cuts around the major circle.
    pub rings: u32,
    /// Divisions around the tube.
    pub sides: u32,
    /// Tube radius. Not clamped; values in (0, 1) give a ring with a hole.
    pub minor_radius: f32,
}

impl TorusResolution {
    pub const fn new(rings: u32, sides: u32, minor_radius: f32) -> Self {
        Self { rings, sides, minor_radius }
    }

    pub fn clamped(self) -> Self {
        Self {
            rings: clamp_resolution(self.rings, TORUS_RINGS),
            sides: clamp_resolution(self.sides, TORUS_SIDES),
            minor_radius: self.minor_radius,
        }
    }
}

impl Default for TorusResolution {
    fn default() -> Self {
        Self::new(8, 8, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_values_into_range() {
        assert_eq!(clamp_resolution(0, CYLINDER_RINGS), 1);
        assert_eq!(clamp_resolution(1, CYLINDER_SLICES), 3);
        assert_eq!(clamp_resolution(1000, TORUS_SIDES), 255);
        assert_eq!(clamp_resolution(17, TORUS_RINGS), 17);
    }

    #[test]
    fn cylinder_clamps_every_field() {
        let r = CylinderResolution::new(1, 0, 300).clamped();
        assert_eq!(r, CylinderResolution::new(3, 1, 255));
    }

    #[test]
    fn torus_keeps_radius_unclamped() {
        let r = TorusResolution::new(0, 999, 3.5).clamped();
        assert_eq!(r, TorusResolution::new(3, 255, 3.5));
    }

    #[test]
    fn defaults_are_already_in_range() {
        assert_eq!(CylinderResolution::default().clamped(), CylinderResolution::default());
        assert_eq!(TorusResolution::default().clamped(), TorusResolution::default());
    }

    #[test]
    fn state_defaults_to_stale() {
        assert!(BufferState::default().is_stale());
        assert!(!BufferState::default().is_fresh());
    }
}
