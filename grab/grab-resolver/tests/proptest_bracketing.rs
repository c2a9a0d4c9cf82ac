//! Property-based tests for scale bracketing and score interpolation.
//!
//! Run with: cargo test -p grab-resolver -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use glam::Vec3;
use grab_resolver::{FindResult, PoseLibrary, PoseLibraryEntry, PoseResolver};
use grab_types::{HandPose, Handedness, Pose, PoseMeasureParameters, PoseScore};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Distinct-enough scales so bracket ranges never collapse to zero width.
fn arb_scales() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::btree_set(50u32..=200, 2..=10)
        .prop_map(|set| set.into_iter().map(|s| s as f32 / 100.0).collect::<Vec<_>>())
        .prop_shuffle()
}

fn arb_score() -> impl Strategy<Value = PoseScore> {
    (-100.0f32..100.0, 0.0f32..=1.0, 0.0f32..=1.0)
        .prop_map(|(translation, rotation, weight)| PoseScore::new(translation, rotation, weight))
}

fn library(scales: &[f32]) -> PoseLibrary {
    scales
        .iter()
        .map(|&scale| {
            PoseLibraryEntry::new(Pose::identity(), Pose::from_position(Vec3::X * scale))
                .with_hand_pose(HandPose::new(Handedness::Right))
                .with_scale(scale)
                .unwrap()
        })
        .collect()
}

fn bounds(scales: &[f32]) -> (f32, f32) {
    scales
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)))
}

// =============================================================================
// Bracketing
// =============================================================================

proptest! {
    #[test]
    fn proptest_bracket_within_range(scales in arb_scales(), frac in 0.0f32..=1.0) {
        let (lo, hi) = bounds(&scales);
        let query = (lo + (hi - lo) * frac).clamp(lo, hi);
        let lib = library(&scales);

        let bracket = lib.find_interpolation_range(query).unwrap();
        let from = lib.get(bracket.from).unwrap().scale();
        let to = lib.get(bracket.to).unwrap().scale();

        prop_assert!(from <= query);
        prop_assert!(query <= to);
        prop_assert!((0.0..=1.0).contains(&bracket.t), "t = {}", bracket.t);
    }

    #[test]
    fn proptest_bracket_below_range_is_unclamped(scales in arb_scales(), below in 0.01f32..0.4) {
        let (lo, _) = bounds(&scales);
        let lib = library(&scales);

        let bracket = lib.find_interpolation_range(lo - below).unwrap();
        prop_assert_eq!(lib.get(bracket.from).unwrap().scale(), lo);
        prop_assert!(bracket.t < 0.0, "t = {}", bracket.t);
    }

    #[test]
    fn proptest_bracket_above_range_is_unclamped(scales in arb_scales(), above in 0.01f32..0.4) {
        let (_, hi) = bounds(&scales);
        let lib = library(&scales);

        let bracket = lib.find_interpolation_range(hi + above).unwrap();
        prop_assert_eq!(lib.get(bracket.to).unwrap().scale(), hi);
        prop_assert!(bracket.t > 1.0, "t = {}", bracket.t);
    }

    #[test]
    fn proptest_resolver_finds_matching_hand(scales in arb_scales(), query in 0.3f32..2.5) {
        let lib = library(&scales);
        let mut resolver = PoseResolver::new();
        let params = PoseMeasureParameters::default();

        let (_, found) = resolver.query(&lib, &Pose::identity(), query, Handedness::Right, &params);
        prop_assert_eq!(found, FindResult::Found);

        let (_, found) = resolver.query(&lib, &Pose::identity(), query, Handedness::Left, &params);
        prop_assert_eq!(found, FindResult::NotCompatible);
    }
}

// =============================================================================
// Scores
// =============================================================================

proptest! {
    #[test]
    fn proptest_score_lerp_identity(score in arb_score(), t in -5.0f32..5.0) {
        prop_assert_eq!(PoseScore::lerp(&score, &score, t), score);
    }

    #[test]
    fn proptest_max_never_better(score in arb_score()) {
        prop_assert!(!PoseScore::MAX.is_better_than(&score));
        prop_assert!(score.is_better_than(&PoseScore::MAX));
    }

    #[test]
    fn proptest_better_is_asymmetric(a in arb_score(), b in arb_score()) {
        prop_assert!(!(a.is_better_than(&b) && b.is_better_than(&a)));
    }

    #[test]
    fn proptest_inside_beats_outside(inside in 0.0f32..100.0, outside in 0.0f32..100.0, rotation in 0.0f32..=1.0) {
        // With translation-only ranking any inside point outranks any outside one.
        let a = PoseScore::new(-inside - 0.001, rotation, 0.0);
        let b = PoseScore::new(outside, rotation, 0.0);
        prop_assert!(a.is_better_than(&b));
    }
}
