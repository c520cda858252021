//! Axis-aligned bounding boxes used for collision and win tests.
//!
//! Boxes are computed on demand from value positions; nothing here owns
//! geometry or keeps a persistent spatial structure. Wall queries scan every
//! wall linearly, which is fine for hand-sized mazes but grows with the wall
//! count.

use glam::Vec3;

/// Axis-aligned box described by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Creates a box centred on `center` that extends `half_extents` along each axis.
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Creates a cube centred on `center` with the provided edge length.
    #[must_use]
    pub fn cube(center: Vec3, size: f32) -> Self {
        Self::from_center(center, Vec3::splat(size * 0.5))
    }

    /// Minimum corner of the box.
    #[must_use]
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner of the box.
    #[must_use]
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Returns a copy of the box shifted by `delta`.
    ///
    /// Only the offset changes; the box size is carried over unchanged, which
    /// keeps speculative move tests reproducible.
    #[must_use]
    pub fn translate(self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Reports whether the two boxes overlap or touch on every axis.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}
