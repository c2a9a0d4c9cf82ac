//! Rigid poses and anchor-relative conversions.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A position and orientation in 3D space.
///
/// Forward is local +Z and up is local +Y.
///
/// # Example
///
/// ```
/// use grab_types::Pose;
/// use glam::Vec3;
///
/// // Identity pose
/// let p = Pose::identity();
/// let point = Vec3::new(1.0, 2.0, 3.0);
/// assert!((p.transform_point(point) - point).length() < 1e-6);
///
/// // Translation only
/// let p = Pose::from_position(Vec3::new(10.0, 0.0, 0.0));
/// assert!((p.transform_point(Vec3::ZERO).x - 10.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position component.
    pub position: Vec3,

    /// Orientation component (unit quaternion).
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Creates a pose at the origin with no rotation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    /// Creates a pose from position and rotation.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Creates a pose with only a position.
    #[must_use]
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Creates a pose with only a rotation.
    #[must_use]
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
        }
    }

    /// The pose's forward direction (local +Z).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// The pose's up direction (local +Y).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Maps a point from this pose's local frame into the parent frame.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }

    /// Returns the inverse pose.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: inv_rotation * (-self.position),
            rotation: inv_rotation,
        }
    }

    /// Composes this pose with another (self * other).
    ///
    /// The result applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.rotation * other.position + self.position,
            rotation: self.rotation * other.rotation,
        }
    }

    /// Expresses a world-space pose in this pose's local frame.
    ///
    /// Treats `self` as an anchor: the returned pose satisfies
    /// `self.global_pose(&self.delta(&world)) == world`.
    #[must_use]
    pub fn delta(&self, world: &Self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: inv_rotation * (world.position - self.position),
            rotation: inv_rotation * world.rotation,
        }
    }

    /// Converts a pose in this pose's local frame back into world space.
    #[must_use]
    pub fn global_pose(&self, relative: &Self) -> Self {
        self.compose(relative)
    }

    /// Interpolates between two poses.
    ///
    /// Position is interpolated linearly and rotation spherically. `t` is not
    /// clamped, so values outside `[0, 1]` extrapolate.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t),
        }
    }

    /// Returns true if both position and rotation are within `epsilon` of `other`.
    ///
    /// Quaternions `q` and `-q` are treated as the same rotation.
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        let same_position = self.position.abs_diff_eq(other.position, epsilon);
        let same_rotation = 1.0 - self.rotation.dot(other.rotation).abs() < epsilon;
        same_position && same_rotation
    }
}
