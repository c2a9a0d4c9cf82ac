//! Surface constraints that limit where a snap pose may land.

use std::fmt::Debug;

use grab_types::{Pose, PoseMeasureParameters, PoseScore};

/// A pose projected onto a surface, with its score against the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Adjusted pose in world space.
    pub pose: Pose,
    /// Score of `pose` against the query pose.
    pub score: PoseScore,
}

/// A geometric region that constrains grab poses.
///
/// Implementations project the tracked hand onto their shape (a box, a
/// cylinder, a mesh…) and report how good the projected pose is. The
/// resolver only sees this trait.
pub trait GrabSurface: Debug + Send + Sync {
    /// Finds the best pose on the surface for a query.
    ///
    /// - `query` is the tracked hand pose in world space.
    /// - `candidate` is the authored grip in world space; surfaces typically
    ///   keep its orientation and slide its position.
    /// - `relative_to` is the anchor the surface was authored against.
    ///
    /// Returns `None` if the surface rejects the query.
    fn try_best_pose_at_surface(
        &self,
        query: &Pose,
        candidate: &Pose,
        params: &PoseMeasureParameters,
        relative_to: &Pose,
    ) -> Option<SurfaceHit>;
}
