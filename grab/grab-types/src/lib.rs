//! Core value types for hand grab pose matching.
//!
//! This crate provides the data shared by everything that ranks or blends
//! authored grab poses:
//!
//! - [`Pose`] - Position + orientation, with anchor-relative conversions
//! - [`HandPose`] - Per-joint finger rotations tagged with [`Handedness`]
//! - [`PoseScore`] - Signed translation/rotation ranking of a candidate pose
//! - [`PoseMeasureParameters`] - Rotation vs. translation weighting
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - Runtime grab resolution
//! - Offline pose authoring tools
//! - Recorded-session analysis
//!
//! # Coordinate System
//!
//! Poses use local +Z as forward and local +Y as up.
//!
//! # Example
//!
//! ```
//! use grab_types::{Pose, PoseScore};
//! use glam::{Quat, Vec3};
//!
//! let anchor = Pose::from_position(Vec3::new(0.0, 1.0, 0.0));
//! let grip = Pose::new(Vec3::new(0.0, 1.1, 0.2), Quat::IDENTITY);
//!
//! // Grip expressed in the anchor's frame and back again
//! let relative = anchor.delta(&grip);
//! assert!(anchor.global_pose(&relative).abs_diff_eq(&grip, 1e-6));
//!
//! let score = PoseScore::from_poses(&grip, &grip, 0.5);
//! assert!(score.is_better_than(&PoseScore::MAX));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::suboptimal_flops)]

mod config;
mod error;
mod hand;
mod pose;
mod score;

pub use config::PoseMeasureParameters;
pub use error::{GrabError, Result};
pub use hand::{
    FINGER_COUNT, HAND_JOINT_COUNT, HandFinger, HandPose, Handedness, JointFreedom,
};
pub use pose::Pose;
pub use score::PoseScore;

// Re-export math types for convenience
pub use glam::{Quat, Vec3};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        GrabError, HandFinger, HandPose, Handedness, JointFreedom, Pose, PoseMeasureParameters,
        PoseScore,
    };
}
