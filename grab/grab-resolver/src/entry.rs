//! Authored grab poses and per-entry evaluation.

use grab_types::{GrabError, HandPose, Handedness, Pose, PoseMeasureParameters, PoseScore, Result};
use tracing::trace;

use crate::surface::GrabSurface;

/// Output of a pose query.
///
/// Designed to be reused across queries: evaluation overwrites the fields
/// in place instead of allocating.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseQueryResult {
    /// Whether `hand_pose` holds a resolved hand shape.
    pub has_hand_pose: bool,
    /// Resolved hand shape. Only meaningful when `has_hand_pose` is set.
    pub hand_pose: HandPose,
    /// Where the hand should snap, relative to the entry's anchor.
    pub snap_pose: Pose,
    /// How well the snap pose matches the query.
    pub score: PoseScore,
}

impl Default for PoseQueryResult {
    fn default() -> Self {
        Self {
            has_hand_pose: false,
            hand_pose: HandPose::default(),
            snap_pose: Pose::identity(),
            score: PoseScore::MAX,
        }
    }
}

impl PoseQueryResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites this result with `other` without reallocating.
    pub fn copy_from(&mut self, other: &Self) {
        self.has_hand_pose = other.has_hand_pose;
        self.hand_pose.copy_from(&other.hand_pose);
        self.snap_pose = other.snap_pose;
        self.score = other.score;
    }
}

/// One authored grab pose in a [`crate::PoseLibrary`].
///
/// An entry holds an optional hand shape, the grip pose relative to its
/// anchor, an optional surface constraint and the hand scale it was
/// authored for.
///
/// # Example
///
/// ```
/// use grab_resolver::{PoseLibraryEntry, PoseQueryResult};
/// use grab_types::{HandPose, Handedness, Pose, PoseMeasureParameters};
/// use glam::Vec3;
///
/// let entry = PoseLibraryEntry::new(Pose::identity(), Pose::from_position(Vec3::X))
///     .with_hand_pose(HandPose::new(Handedness::Right));
///
/// let mut result = PoseQueryResult::new();
/// let params = PoseMeasureParameters::default();
/// assert!(entry.calculate_best_pose(&Pose::identity(), Handedness::Right, &params, &mut result));
/// assert!(result.has_hand_pose);
/// assert!(!entry.calculate_best_pose(&Pose::identity(), Handedness::Left, &params, &mut result));
/// ```
#[derive(Debug)]
pub struct PoseLibraryEntry {
    hand_pose: Option<HandPose>,
    relative_to: Pose,
    relative_grip: Pose,
    surface: Option<Box<dyn GrabSurface>>,
    scale: f32,
}

impl PoseLibraryEntry {
    /// Creates an entry at scale 1 with no hand shape and no surface.
    ///
    /// `relative_to` is the anchor's world pose and `relative_grip` the
    /// grip expressed in the anchor's frame.
    #[must_use]
    pub const fn new(relative_to: Pose, relative_grip: Pose) -> Self {
        Self {
            hand_pose: None,
            relative_to,
            relative_grip,
            surface: None,
            scale: 1.0,
        }
    }

    /// Creates an entry from a world-space grip.
    #[must_use]
    pub fn from_world_grip(relative_to: Pose, world_grip: &Pose) -> Self {
        Self::new(relative_to, relative_to.delta(world_grip))
    }

    /// Attaches a hand shape.
    #[must_use]
    pub fn with_hand_pose(mut self, hand_pose: HandPose) -> Self {
        self.hand_pose = Some(hand_pose);
        self
    }

    /// Attaches a surface constraint.
    #[must_use]
    pub fn with_surface(mut self, surface: impl GrabSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Sets the hand scale this entry was authored for.
    ///
    /// # Errors
    ///
    /// Returns [`GrabError::InvalidScale`] if `scale` is not finite and
    /// positive.
    pub fn with_scale(mut self, scale: f32) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(GrabError::invalid_scale(scale));
        }
        self.scale = scale;
        Ok(self)
    }

    /// The authored hand shape, if any.
    #[must_use]
    pub const fn hand_pose(&self) -> Option<&HandPose> {
        self.hand_pose.as_ref()
    }

    /// Handedness of the authored hand shape, if any.
    #[must_use]
    pub fn handedness(&self) -> Option<Handedness> {
        self.hand_pose.as_ref().map(|pose| pose.handedness)
    }

    /// The anchor's world pose.
    #[must_use]
    pub const fn relative_to(&self) -> &Pose {
        &self.relative_to
    }

    /// The grip in the anchor's frame.
    #[must_use]
    pub const fn relative_grip(&self) -> &Pose {
        &self.relative_grip
    }

    /// The grip in world space.
    #[must_use]
    pub fn world_grip(&self) -> Pose {
        self.relative_to.global_pose(&self.relative_grip)
    }

    /// The attached surface constraint, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&dyn GrabSurface> {
        self.surface.as_deref()
    }

    /// Hand scale this entry was authored for.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Evaluates this entry against a tracked hand.
    ///
    /// `result.has_hand_pose` is cleared first, so a declined call never
    /// leaves a previous hand shape flagged as current. Returns false if the
    /// entry's hand shape is for the other hand or its surface rejects the
    /// query. Otherwise writes the snap pose (in the anchor's frame), the
    /// score and the hand shape into `result` and returns true.
    pub fn calculate_best_pose(
        &self,
        user_pose: &Pose,
        handedness: Handedness,
        params: &PoseMeasureParameters,
        result: &mut PoseQueryResult,
    ) -> bool {
        result.has_hand_pose = false;

        if let Some(authored) = self.handedness() {
            if authored != handedness {
                trace!(?authored, ?handedness, "entry declined: handedness mismatch");
                return false;
            }
        }

        let world_grip = self.world_grip();
        if let Some(surface) = &self.surface {
            let Some(hit) = surface.try_best_pose_at_surface(
                user_pose,
                &world_grip,
                params,
                &self.relative_to,
            ) else {
                trace!(scale = self.scale, "entry declined: surface rejected query");
                return false;
            };
            result.snap_pose = self.relative_to.delta(&hit.pose);
            result.score = hit.score;
        } else {
            result.snap_pose = self.relative_grip;
            result.score =
                PoseScore::from_poses(user_pose, &world_grip, params.position_rotation_weight);
        }

        match &self.hand_pose {
            Some(hand_pose) => {
                result.has_hand_pose = true;
                result.hand_pose.copy_from(hand_pose);
            }
            None => result.has_hand_pose = false,
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::surface::SurfaceHit;
    use approx::assert_relative_eq;
    use glam::{Quat, Vec3};

    /// Slides the candidate onto the plane y = `height`.
    #[derive(Debug)]
    struct PlaneSurface {
        height: f32,
    }

    impl GrabSurface for PlaneSurface {
        fn try_best_pose_at_surface(
            &self,
            query: &Pose,
            candidate: &Pose,
            _params: &PoseMeasureParameters,
            _relative_to: &Pose,
        ) -> Option<SurfaceHit> {
            let position = Vec3::new(query.position.x, self.height, query.position.z);
            Some(SurfaceHit {
                pose: Pose::new(position, candidate.rotation),
                score: PoseScore::from_points(query.position, position, false),
            })
        }
    }

    #[derive(Debug)]
    struct RejectingSurface;

    impl GrabSurface for RejectingSurface {
        fn try_best_pose_at_surface(
            &self,
            _query: &Pose,
            _candidate: &Pose,
            _params: &PoseMeasureParameters,
            _relative_to: &Pose,
        ) -> Option<SurfaceHit> {
            None
        }
    }

    #[test]
    fn entry_defaults() {
        let entry = PoseLibraryEntry::new(Pose::identity(), Pose::identity());
        assert_eq!(entry.scale(), 1.0);
        assert!(entry.hand_pose().is_none());
        assert!(entry.surface().is_none());
        assert!(entry.handedness().is_none());
    }

    #[test]
    fn with_scale_rejects_invalid() {
        let make = || PoseLibraryEntry::new(Pose::identity(), Pose::identity());
        assert!(make().with_scale(0.0).is_err());
        assert!(make().with_scale(-1.0).is_err());
        assert!(make().with_scale(f32::NAN).is_err());
        assert_eq!(make().with_scale(1.2).unwrap().scale(), 1.2);
    }

    #[test]
    fn from_world_grip_roundtrips() {
        let anchor = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.6));
        let grip = Pose::new(Vec3::new(1.5, 2.0, 3.5), Quat::from_rotation_x(0.2));
        let entry = PoseLibraryEntry::from_world_grip(anchor, &grip);
        assert!(entry.world_grip().abs_diff_eq(&grip, 1e-5));
    }

    #[test]
    fn evaluation_without_surface_scores_world_grip() {
        let anchor = Pose::from_position(Vec3::new(0.0, 1.0, 0.0));
        let entry = PoseLibraryEntry::new(anchor, Pose::from_position(Vec3::new(0.0, 0.0, 2.0)))
            .with_hand_pose(HandPose::new(Handedness::Right));

        let user = Pose::from_position(Vec3::new(0.0, 1.0, 0.0));
        let mut result = PoseQueryResult::new();
        let params = PoseMeasureParameters::default();

        assert!(entry.calculate_best_pose(&user, Handedness::Right, &params, &mut result));
        assert!(result.has_hand_pose);
        assert_eq!(result.snap_pose, *entry.relative_grip());
        assert_relative_eq!(result.score.translation(), 4.0, epsilon = 1e-5);
    }

    #[test]
    fn handedness_mismatch_clears_previous_hand_pose() {
        let entry = PoseLibraryEntry::new(Pose::identity(), Pose::identity())
            .with_hand_pose(HandPose::new(Handedness::Left));
        let mut result = PoseQueryResult::new();
        let params = PoseMeasureParameters::default();

        let accepted =
            entry.calculate_best_pose(&Pose::identity(), Handedness::Left, &params, &mut result);
        assert!(accepted);
        assert!(result.has_hand_pose);

        let accepted =
            entry.calculate_best_pose(&Pose::identity(), Handedness::Right, &params, &mut result);
        assert!(!accepted);
        assert!(!result.has_hand_pose);
    }

    #[test]
    fn entry_without_hand_pose_accepts_either_hand() {
        let entry = PoseLibraryEntry::new(Pose::identity(), Pose::identity());
        let mut result = PoseQueryResult::new();
        result.has_hand_pose = true;
        let params = PoseMeasureParameters::default();

        for hand in [Handedness::Left, Handedness::Right] {
            assert!(entry.calculate_best_pose(&Pose::identity(), hand, &params, &mut result));
            assert!(!result.has_hand_pose);
        }
    }

    #[test]
    fn surface_pose_is_returned_in_anchor_frame() {
        let anchor = Pose::from_position(Vec3::new(10.0, 0.0, 0.0));
        let entry = PoseLibraryEntry::new(anchor, Pose::identity())
            .with_surface(PlaneSurface { height: 1.0 });

        let user = Pose::from_position(Vec3::new(11.0, 3.0, 0.0));
        let mut result = PoseQueryResult::new();
        assert!(entry.calculate_best_pose(
            &user,
            Handedness::Left,
            &PoseMeasureParameters::default(),
            &mut result
        ));

        // World hit is (11, 1, 0); anchor sits at x = 10.
        assert!(result.snap_pose.position.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-5));
        assert_relative_eq!(result.score.translation(), 4.0, epsilon = 1e-5);
    }

    #[test]
    fn surface_rejection_declines() {
        let entry =
            PoseLibraryEntry::new(Pose::identity(), Pose::identity()).with_surface(RejectingSurface);
        let mut result = PoseQueryResult::new();
        result.has_hand_pose = true;
        assert!(!entry.calculate_best_pose(
            &Pose::identity(),
            Handedness::Right,
            &PoseMeasureParameters::default(),
            &mut result
        ));
        assert!(!result.score.is_valid());
        assert!(!result.has_hand_pose);
    }

    #[test]
    fn result_copy_from() {
        let mut source = PoseQueryResult::new();
        source.has_hand_pose = true;
        source.snap_pose = Pose::from_position(Vec3::Y);
        source.score = PoseScore::new(1.0, 0.5, 0.5);

        let mut target = PoseQueryResult::new();
        target.copy_from(&source);
        assert_eq!(target, source);
    }
}
