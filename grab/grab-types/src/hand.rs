//! Hand poses: per-joint finger rotations with handedness.

use std::ops::Range;

use glam::Quat;
use serde::{Deserialize, Serialize};

use crate::error::{GrabError, Result};

/// Number of fingers on a hand.
pub const FINGER_COUNT: usize = 5;

/// Number of finger joints stored in every [`HandPose`].
///
/// Thumb and pinky have four joints, the other fingers three.
pub const HAND_JOINT_COUNT: usize = 17;

/// Which hand a pose was authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand.
    Left,
    /// Right hand.
    #[default]
    Right,
}

impl Handedness {
    /// Returns the opposite hand.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A finger of the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandFinger {
    /// Thumb.
    Thumb,
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Pinky finger.
    Pinky,
}

impl HandFinger {
    /// All fingers in joint-schema order.
    pub const ALL: [Self; FINGER_COUNT] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    /// Position of this finger in [`HandFinger::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of joints this finger contributes to the schema.
    #[must_use]
    pub const fn joint_count(self) -> usize {
        match self {
            Self::Thumb | Self::Pinky => 4,
            Self::Index | Self::Middle | Self::Ring => 3,
        }
    }

    /// Range of this finger's joints within [`HandPose::joint_rotations`].
    #[must_use]
    pub const fn joint_range(self) -> Range<usize> {
        let start = match self {
            Self::Thumb => 0,
            Self::Index => 4,
            Self::Middle => 7,
            Self::Ring => 10,
            Self::Pinky => 13,
        };
        start..start + self.joint_count()
    }
}

/// How strictly a finger follows its authored rotations while grabbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JointFreedom {
    /// The finger follows the tracked hand.
    Free,
    /// The finger may close further than authored but not open past it.
    #[default]
    Constrained,
    /// The finger is held at the authored rotations.
    Locked,
}

/// A hand shape: local rotations for every finger joint.
///
/// The joint layout is fixed by [`HandFinger::joint_range`], so every
/// `HandPose` has exactly [`HAND_JOINT_COUNT`] rotations.
///
/// # Example
///
/// ```
/// use grab_types::{HandPose, Handedness};
/// use glam::Quat;
///
/// let open = HandPose::new(Handedness::Right);
/// let mut closed = HandPose::new(Handedness::Right);
/// closed.joint_rotations = [Quat::from_rotation_x(1.0); 17];
///
/// let half = HandPose::lerp(&open, &closed, 0.5).unwrap();
/// assert!(half.joint_rotations[0].dot(Quat::from_rotation_x(0.5)).abs() > 0.9999);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    /// Which hand this pose belongs to.
    pub handedness: Handedness,

    /// Per-finger freedom, indexed by [`HandFinger::index`].
    pub fingers_freedom: [JointFreedom; FINGER_COUNT],

    /// Local joint rotations laid out by [`HandFinger::joint_range`].
    pub joint_rotations: [Quat; HAND_JOINT_COUNT],
}

impl Default for HandPose {
    fn default() -> Self {
        Self::new(Handedness::default())
    }
}

impl HandPose {
    /// Creates a flat hand: identity rotations, every finger constrained.
    #[must_use]
    pub fn new(handedness: Handedness) -> Self {
        Self {
            handedness,
            fingers_freedom: [JointFreedom::Constrained; FINGER_COUNT],
            joint_rotations: [Quat::IDENTITY; HAND_JOINT_COUNT],
        }
    }

    /// Sets the freedom of one finger.
    #[must_use]
    pub fn with_finger_freedom(mut self, finger: HandFinger, freedom: JointFreedom) -> Self {
        self.fingers_freedom[finger.index()] = freedom;
        self
    }

    /// Freedom of the given finger.
    #[must_use]
    pub const fn finger_freedom(&self, finger: HandFinger) -> JointFreedom {
        self.fingers_freedom[finger.index()]
    }

    /// The joint rotations belonging to one finger.
    #[must_use]
    pub fn finger_rotations(&self, finger: HandFinger) -> &[Quat] {
        &self.joint_rotations[finger.joint_range()]
    }

    /// Mutable access to one finger's joint rotations.
    pub fn finger_rotations_mut(&mut self, finger: HandFinger) -> &mut [Quat] {
        &mut self.joint_rotations[finger.joint_range()]
    }

    /// Overwrites this pose with `other` without reallocating.
    pub fn copy_from(&mut self, other: &Self) {
        self.handedness = other.handedness;
        self.fingers_freedom = other.fingers_freedom;
        self.joint_rotations = other.joint_rotations;
    }

    /// Interpolates two hand poses into `out`.
    ///
    /// Joint rotations are slerped without clamping `t`. Finger freedom comes
    /// from `from` while `t <= 0.5` and from `to` after that.
    ///
    /// # Errors
    ///
    /// Returns [`GrabError::HandednessMismatch`] if the poses belong to
    /// different hands. `out` is left untouched in that case.
    pub fn lerp_into(from: &Self, to: &Self, t: f32, out: &mut Self) -> Result<()> {
        if from.handedness != to.handedness {
            return Err(GrabError::handedness_mismatch(
                from.handedness,
                to.handedness,
            ));
        }

        out.handedness = from.handedness;
        for (slot, (a, b)) in out
            .joint_rotations
            .iter_mut()
            .zip(from.joint_rotations.iter().zip(&to.joint_rotations))
        {
            *slot = a.slerp(*b, t);
        }
        out.fingers_freedom = if t <= 0.5 {
            from.fingers_freedom
        } else {
            to.fingers_freedom
        };
        Ok(())
    }

    /// Interpolates two hand poses into a new value.
    ///
    /// # Errors
    ///
    /// Returns [`GrabError::HandednessMismatch`] if the poses belong to
    /// different hands.
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Result<Self> {
        let mut out = from.clone();
        Self::lerp_into(from, to, t, &mut out)?;
        Ok(out)
    }
}
