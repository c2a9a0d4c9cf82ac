//! Ranking of candidate poses against a query pose.
//!
//! A [`PoseScore`] keeps translation and rotation distances separate and only
//! blends them at comparison time, after normalising translation against the
//! other score being compared. Translation is *signed*: a negative value marks
//! a point already inside a valid volume, and any inside score outranks any
//! outside score regardless of magnitude.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// How well a candidate pose matches a query pose. Lower is better.
///
/// # Example
///
/// ```
/// use grab_types::{Pose, PoseScore};
/// use glam::Vec3;
///
/// let query = Pose::identity();
/// let near = PoseScore::from_poses(&query, &Pose::from_position(Vec3::X), 0.0);
/// let far = PoseScore::from_poses(&query, &Pose::from_position(Vec3::X * 3.0), 0.0);
///
/// assert!(near.is_better_than(&far));
/// assert!(far.is_better_than(&PoseScore::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseScore {
    translation: f32,
    rotation: f32,
    rotation_weight: f32,
}

impl Default for PoseScore {
    fn default() -> Self {
        Self::MAX
    }
}

impl PoseScore {
    /// The "no match" score. Never better than anything.
    pub const MAX: Self = Self {
        translation: f32::INFINITY,
        rotation: 0.0,
        rotation_weight: 0.0,
    };

    /// Creates a score from raw components.
    ///
    /// `translation` is a signed squared distance, `rotation` lies in `[0, 1]`
    /// and `rotation_weight` blends the two (0 = translation only).
    #[must_use]
    pub const fn new(translation: f32, rotation: f32, rotation_weight: f32) -> Self {
        Self {
            translation,
            rotation,
            rotation_weight,
        }
    }

    /// Scores the distance between two points.
    ///
    /// When `is_inside` is set the squared distance is negated so the point
    /// ranks ahead of every point outside the volume.
    #[must_use]
    pub fn from_points(from: Vec3, to: Vec3, is_inside: bool) -> Self {
        let distance = from.distance_squared(to);
        Self {
            translation: if is_inside { -distance } else { distance },
            rotation: 0.0,
            rotation_weight: 0.0,
        }
    }

    /// Scores two full poses.
    ///
    /// Rotation distance is measured from forward and up vector agreement
    /// rather than the quaternion dot product: 0 when both axes agree, 1 when
    /// either points the opposite way.
    #[must_use]
    pub fn from_poses(from: &Pose, to: &Pose, rotation_weight: f32) -> Self {
        let forward = from.forward().dot(to.forward()).mul_add(0.5, 0.5);
        let up = from.up().dot(to.up()).mul_add(0.5, 0.5);
        Self {
            translation: from.position.distance_squared(to.position),
            rotation: 1.0 - forward * up,
            rotation_weight,
        }
    }

    /// Signed squared translation distance.
    #[must_use]
    pub const fn translation(&self) -> f32 {
        self.translation
    }

    /// Rotation distance in `[0, 1]`.
    #[must_use]
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Weight of rotation against translation in `[0, 1]`.
    #[must_use]
    pub const fn rotation_weight(&self) -> f32 {
        self.rotation_weight
    }

    /// Returns false for [`PoseScore::MAX`] and other non-finite translations.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.translation.is_finite()
    }

    /// True when the score was produced for a point inside a volume.
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.translation < 0.0
    }

    /// Blended, signed score with translation normalised by `max_translation`.
    ///
    /// The sign of the translation is carried onto the blended value.
    #[must_use]
    pub fn normalized(&self, max_translation: f32) -> f32 {
        let translation = if max_translation > 0.0 {
            self.translation.abs() / max_translation
        } else {
            0.0
        };
        let blended = (self.rotation - translation).mul_add(self.rotation_weight, translation);
        if self.is_inside() {
            -blended
        } else {
            blended
        }
    }

    /// Returns true if this score should be preferred over `other`.
    ///
    /// - An invalid score is never better.
    /// - A valid score always beats an invalid one.
    /// - Otherwise both are normalised against the larger absolute
    ///   translation and compared signed: negative (inside) beats
    ///   non-negative, and within one sign the smaller value wins.
    #[must_use]
    pub fn is_better_than(&self, other: &Self) -> bool {
        if !self.is_valid() {
            return false;
        }
        if !other.is_valid() {
            return true;
        }

        let max_translation = self.translation.abs().max(other.translation.abs());
        let this = self.normalized(max_translation);
        let that = other.normalized(max_translation);

        match (this < 0.0, that < 0.0) {
            (true, false) => true,
            (false, true) => false,
            _ => this < that,
        }
    }

    /// Componentwise interpolation of two scores. `t` is not clamped.
    ///
    /// Interpolating a score with itself returns it unchanged. If either
    /// side is invalid the result is [`PoseScore::MAX`].
    #[must_use]
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        if a == b {
            return *a;
        }
        if !a.is_valid() || !b.is_valid() {
            return Self::MAX;
        }
        Self {
            translation: (b.translation - a.translation).mul_add(t, a.translation),
            rotation: (b.rotation - a.rotation).mul_add(t, a.rotation),
            rotation_weight: (b.rotation_weight - a.rotation_weight).mul_add(t, a.rotation_weight),
        }
    }
}
