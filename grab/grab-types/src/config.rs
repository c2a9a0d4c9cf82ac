//! Scoring configuration for pose queries.

use serde::{Deserialize, Serialize};

use crate::error::{GrabError, Result};

/// Controls how candidate poses are ranked.
///
/// `position_rotation_weight` blends translation against rotation distance:
/// 0 ranks purely by translation, 1 purely by rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseMeasureParameters {
    /// Weight of rotation against translation, in `[0, 1]`.
    pub position_rotation_weight: f32,
}

impl Default for PoseMeasureParameters {
    fn default() -> Self {
        Self::translation_only()
    }
}

impl PoseMeasureParameters {
    /// Creates parameters with the given rotation weight.
    #[must_use]
    pub const fn new(position_rotation_weight: f32) -> Self {
        Self {
            position_rotation_weight,
        }
    }

    /// Rank by translation only.
    #[must_use]
    pub const fn translation_only() -> Self {
        Self::new(0.0)
    }

    /// Rank by rotation only.
    #[must_use]
    pub const fn rotation_only() -> Self {
        Self::new(1.0)
    }

    /// Weigh translation and rotation equally.
    #[must_use]
    pub const fn balanced() -> Self {
        Self::new(0.5)
    }

    /// Set the rotation weight.
    #[must_use]
    pub const fn with_rotation_weight(mut self, weight: f32) -> Self {
        self.position_rotation_weight = weight;
        self
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GrabError::InvalidConfig`] if the weight is not finite or
    /// lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let w = self.position_rotation_weight;
        if !w.is_finite() || !(0.0..=1.0).contains(&w) {
            return Err(GrabError::invalid_config(format!(
                "position_rotation_weight must be in [0, 1], got {w}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_is_translation_only() {
        let params = PoseMeasureParameters::default();
        assert_eq!(params.position_rotation_weight, 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn presets_validate() {
        assert!(PoseMeasureParameters::rotation_only().validate().is_ok());
        assert!(PoseMeasureParameters::balanced().validate().is_ok());
    }

    #[test]
    fn builder_sets_weight() {
        let params = PoseMeasureParameters::default().with_rotation_weight(0.3);
        assert_eq!(params.position_rotation_weight, 0.3);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(PoseMeasureParameters::new(-0.1).validate().is_err());
        assert!(PoseMeasureParameters::new(1.5).validate().is_err());
        assert!(PoseMeasureParameters::new(f32::NAN).validate().is_err());
    }

    #[test]
    fn serialization() {
        let params = PoseMeasureParameters::balanced();
        let json = serde_json::to_string(&params).unwrap();
        let parsed: PoseMeasureParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }
}
