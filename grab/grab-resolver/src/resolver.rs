//! Best-pose search across a scale-bracketed library.

use grab_types::{HandPose, Handedness, Pose, PoseMeasureParameters, PoseScore};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::entry::{PoseLibraryEntry, PoseQueryResult};
use crate::library::PoseLibrary;

/// Outcome of a [`PoseResolver::find_best_pose`] query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindResult {
    /// The library is empty.
    NotFound,
    /// No bracketing entry accepted the query (wrong hand, surface rejected).
    NotCompatible,
    /// A pose was resolved.
    Found,
}

impl FindResult {
    /// Returns true for [`FindResult::Found`].
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Scratch results for the two bracketing entries.
///
/// Reused across queries so resolution does not allocate.
#[derive(Debug, Clone, Default)]
pub struct InterpolationCache {
    from_result: PoseQueryResult,
    to_result: PoseQueryResult,
}

impl InterpolationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of the lower bracketing entry from the last query.
    #[must_use]
    pub const fn from_result(&self) -> &PoseQueryResult {
        &self.from_result
    }

    /// Result of the upper bracketing entry from the last query.
    #[must_use]
    pub const fn to_result(&self) -> &PoseQueryResult {
        &self.to_result
    }
}

/// Finds the best grab pose for a tracked hand.
///
/// The resolver owns an [`InterpolationCache`]; queries take `&mut self`, so
/// one resolver serves one query at a time. The library is only borrowed
/// shared, and any number of resolvers may query the same library
/// concurrently.
///
/// # Example
///
/// ```
/// use grab_resolver::{FindResult, PoseLibrary, PoseLibraryEntry, PoseQueryResult, PoseResolver};
/// use grab_types::{HandPose, Handedness, Pose, PoseMeasureParameters};
///
/// let library: PoseLibrary = [0.8, 1.2]
///     .into_iter()
///     .map(|scale| {
///         PoseLibraryEntry::new(Pose::identity(), Pose::identity())
///             .with_hand_pose(HandPose::new(Handedness::Right))
///             .with_scale(scale)
///             .unwrap()
///     })
///     .collect();
///
/// let mut resolver = PoseResolver::new();
/// let mut result = PoseQueryResult::new();
/// let found = resolver.find_best_pose(
///     &library,
///     &Pose::identity(),
///     1.0,
///     Handedness::Right,
///     &PoseMeasureParameters::default(),
///     &mut result,
/// );
/// assert_eq!(found, FindResult::Found);
/// assert!(result.has_hand_pose);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PoseResolver {
    cache: InterpolationCache,
}

impl PoseResolver {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The scratch state left by the last query.
    #[must_use]
    pub const fn cache(&self) -> &InterpolationCache {
        &self.cache
    }

    /// Finds the best pose for `user_pose` and writes it into `result`.
    ///
    /// - Empty library: [`FindResult::NotFound`], `result` untouched.
    /// - One entry (or a bracket collapsing onto one entry): that entry's
    ///   own evaluation, no interpolation.
    /// - Otherwise the two entries bracketing `hand_scale` are evaluated and
    ///   blended by the bracket's `t`:
    ///   - both have hand shapes: hand shape, snap pose and score are all
    ///     interpolated;
    ///   - one has a hand shape: its hand shape and snap pose are used as is,
    ///     the score is still interpolated;
    ///   - neither has a hand shape: snap pose and score are interpolated;
    ///   - only one entry accepted: its result is copied.
    ///
    /// Returns [`FindResult::NotCompatible`] if no evaluated entry accepts the
    /// query, with `result.has_hand_pose` cleared.
    ///
    /// # Panics
    ///
    /// In debug builds, if `hand_scale` is not finite and positive or
    /// `params` fails validation.
    pub fn find_best_pose(
        &mut self,
        library: &PoseLibrary,
        user_pose: &Pose,
        hand_scale: f32,
        handedness: Handedness,
        params: &PoseMeasureParameters,
        result: &mut PoseQueryResult,
    ) -> FindResult {
        debug_assert!(
            hand_scale.is_finite() && hand_scale > 0.0,
            "hand scale must be positive and finite, got {hand_scale}"
        );
        debug_assert!(params.validate().is_ok(), "invalid scoring parameters");

        if library.is_empty() {
            trace!("pose library is empty");
            return FindResult::NotFound;
        }

        if library.len() == 1 {
            return match library.get(0) {
                Some(entry) => evaluate_single(entry, user_pose, handedness, params, result),
                None => FindResult::NotFound,
            };
        }

        let Some(bracket) = library.find_interpolation_range(hand_scale) else {
            debug!(hand_scale, "no scale bracket for query");
            result.has_hand_pose = false;
            return FindResult::NotCompatible;
        };
        let (Some(from), Some(to)) = (library.get(bracket.from), library.get(bracket.to)) else {
            result.has_hand_pose = false;
            return FindResult::NotCompatible;
        };

        if bracket.is_single() {
            return evaluate_single(from, user_pose, handedness, params, result);
        }

        let cache = &mut self.cache;
        let from_ok =
            from.calculate_best_pose(user_pose, handedness, params, &mut cache.from_result);
        let to_ok = to.calculate_best_pose(user_pose, handedness, params, &mut cache.to_result);

        match (from_ok, to_ok) {
            (false, false) => {
                debug!(?handedness, hand_scale, "no bracketing entry accepted the query");
                result.has_hand_pose = false;
                FindResult::NotCompatible
            }
            (true, false) => {
                result.copy_from(&cache.from_result);
                FindResult::Found
            }
            (false, true) => {
                result.copy_from(&cache.to_result);
                FindResult::Found
            }
            (true, true) => {
                blend(&cache.from_result, &cache.to_result, bracket.t, result);
                FindResult::Found
            }
        }
    }

    /// Convenience wrapper around [`PoseResolver::find_best_pose`] that
    /// returns a fresh result.
    pub fn query(
        &mut self,
        library: &PoseLibrary,
        user_pose: &Pose,
        hand_scale: f32,
        handedness: Handedness,
        params: &PoseMeasureParameters,
    ) -> (PoseQueryResult, FindResult) {
        let mut result = PoseQueryResult::new();
        let found = self.find_best_pose(
            library,
            user_pose,
            hand_scale,
            handedness,
            params,
            &mut result,
        );
        (result, found)
    }
}

fn evaluate_single(
    entry: &PoseLibraryEntry,
    user_pose: &Pose,
    handedness: Handedness,
    params: &PoseMeasureParameters,
    result: &mut PoseQueryResult,
) -> FindResult {
    if entry.calculate_best_pose(user_pose, handedness, params, result) {
        FindResult::Found
    } else {
        FindResult::NotCompatible
    }
}

/// Combines two accepted results by `t`.
fn blend(from: &PoseQueryResult, to: &PoseQueryResult, t: f32, result: &mut PoseQueryResult) {
    match (from.has_hand_pose, to.has_hand_pose) {
        (true, true) => {
            // Both entries passed the same handedness check.
            if let Err(err) =
                HandPose::lerp_into(&from.hand_pose, &to.hand_pose, t, &mut result.hand_pose)
            {
                debug!(%err, "hand pose interpolation failed, using lower entry");
                result.hand_pose.copy_from(&from.hand_pose);
            }
            result.has_hand_pose = true;
            result.snap_pose = from.snap_pose.lerp(&to.snap_pose, t);
        }
        (true, false) => {
            result.has_hand_pose = true;
            result.hand_pose.copy_from(&from.hand_pose);
            result.snap_pose = from.snap_pose;
        }
        (false, true) => {
            result.has_hand_pose = true;
            result.hand_pose.copy_from(&to.hand_pose);
            result.snap_pose = to.snap_pose;
        }
        (false, false) => {
            result.has_hand_pose = false;
            result.snap_pose = from.snap_pose.lerp(&to.snap_pose, t);
        }
    }
    result.score = PoseScore::lerp(&from.score, &to.score, t);
}
