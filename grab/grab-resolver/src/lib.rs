//! Scale-bracketed grab pose resolution.
//!
//! Given a tracked hand, this crate picks the best authored grab pose from a
//! library of poses recorded at several hand sizes:
//!
//! # Library
//!
//! - [`PoseLibraryEntry`] - One authored grip: hand shape, anchor, surface, scale
//! - [`PoseLibrary`] - Entries searchable by hand scale
//! - [`ScaleBracket`] - The two entries around a query scale, with an
//!   unclamped interpolation factor
//!
//! # Resolution
//!
//! - [`PoseResolver`] - Evaluates the bracketing entries and blends them
//! - [`FindResult`] - `NotFound` / `NotCompatible` / `Found`
//! - [`PoseQueryResult`] - Hand shape, snap pose and score of a query
//!
//! # Surfaces
//!
//! - [`GrabSurface`] - Projects a query onto a constraining shape
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Queries are
//! synchronous and allocation-free; call them once per frame from any
//! update loop.
//!
//! # Example
//!
//! ```
//! use grab_resolver::{FindResult, PoseLibrary, PoseLibraryEntry, PoseResolver};
//! use grab_types::{HandPose, Handedness, Pose, PoseMeasureParameters};
//! use glam::Vec3;
//!
//! let small = PoseLibraryEntry::new(Pose::identity(), Pose::from_position(Vec3::X))
//!     .with_hand_pose(HandPose::new(Handedness::Left))
//!     .with_scale(0.8)
//!     .unwrap();
//! let large = PoseLibraryEntry::new(Pose::identity(), Pose::from_position(Vec3::X * 2.0))
//!     .with_hand_pose(HandPose::new(Handedness::Left))
//!     .with_scale(1.2)
//!     .unwrap();
//! let library = PoseLibrary::from_entries(vec![small, large]);
//!
//! let mut resolver = PoseResolver::new();
//! let (result, found) = resolver.query(
//!     &library,
//!     &Pose::identity(),
//!     1.0,
//!     Handedness::Left,
//!     &PoseMeasureParameters::default(),
//! );
//! assert_eq!(found, FindResult::Found);
//! assert!((result.snap_pose.position.x - 1.5).abs() < 1e-4);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod entry;
mod library;
mod resolver;
mod surface;

// Re-export library types
pub use entry::{PoseLibraryEntry, PoseQueryResult};
pub use library::{LibraryDiagnostics, PoseLibrary, ScaleBracket};

// Re-export resolution types
pub use resolver::{FindResult, InterpolationCache, PoseResolver};

// Re-export surface types
pub use surface::{GrabSurface, SurfaceHit};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        FindResult, GrabSurface, PoseLibrary, PoseLibraryEntry, PoseQueryResult, PoseResolver,
        ScaleBracket, SurfaceHit,
    };
    pub use grab_types::prelude::*;
}
