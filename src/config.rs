//! Generator configuration
//!
//! Holds the fixed metadata written into every generated file and the intensity curve
//! used to synthesize the chromatogram.

use crate::{
    error::{BuilderError, Result},
    trace::DEFAULT_CURVE,
};

/// Mobility file referenced by the `PDMF` records
pub const DEFAULT_MOBILITY_FILE: &str = "KB_3500_POP7_BDTv3.mob";

/// Free text written into the `CMNT` record
pub const DEFAULT_COMMENT: &str = "TS ABIF generator";

/// Signal strength per dye in `GATC` order, written into the `S/N%` record
pub const DEFAULT_DYE_STRENGTH: [i16; 4] = [53, 75, 79, 48];

/// Lane written into the `LANE` record
pub const DEFAULT_LANE: i16 = 1;

/// Settings shared by every file generated in one run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Intensity samples for one fully present base
    pub(crate) curve: Vec<f64>,
    pub(crate) lane: i16,
    pub(crate) mobility_file: String,
    pub(crate) comment: String,
    pub(crate) dye_strength: [i16; 4],
    /// Prepend the fixed demonstration records
    pub(crate) diagnostics: bool,
}
impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            curve: DEFAULT_CURVE.to_vec(),
            lane: DEFAULT_LANE,
            mobility_file: DEFAULT_MOBILITY_FILE.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
            dye_strength: DEFAULT_DYE_STRENGTH,
            diagnostics: false,
        }
    }
}
impl GeneratorConfig {
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Number of intensity samples per base
    #[must_use]
    pub fn vals_per_base(&self) -> usize {
        self.curve.len()
    }

    #[must_use]
    pub fn curve(&self) -> &[f64] {
        &self.curve
    }

    #[must_use]
    pub fn lane(&self) -> i16 {
        self.lane
    }

    #[must_use]
    pub fn mobility_file(&self) -> &str {
        &self.mobility_file
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn dye_strength(&self) -> [i16; 4] {
        self.dye_strength
    }

    #[must_use]
    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }
}

/// Builder for [`GeneratorConfig`]
///
/// Unset fields fall back to the defaults.
///
/// # Examples
///
/// ```
/// # use abifgen::{GeneratorConfig, Result};
/// # fn main() -> Result<()> {
/// let config = GeneratorConfig::builder()
///     .curve(vec![0.0, 100.0, 0.0])
///     .lane(3)
///     .build()?;
/// assert_eq!(config.vals_per_base(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct GeneratorConfigBuilder {
    curve: Option<Vec<f64>>,
    lane: Option<i16>,
    mobility_file: Option<String>,
    comment: Option<String>,
    dye_strength: Option<[i16; 4]>,
    diagnostics: Option<bool>,
}
impl GeneratorConfigBuilder {
    #[must_use]
    pub fn curve(mut self, curve: Vec<f64>) -> Self {
        self.curve = Some(curve);
        self
    }
    #[must_use]
    pub fn lane(mut self, lane: i16) -> Self {
        self.lane = Some(lane);
        self
    }
    #[must_use]
    pub fn mobility_file(mut self, mobility_file: &str) -> Self {
        self.mobility_file = Some(mobility_file.to_string());
        self
    }
    #[must_use]
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
    #[must_use]
    pub fn dye_strength(mut self, dye_strength: [i16; 4]) -> Self {
        self.dye_strength = Some(dye_strength);
        self
    }
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Validates the curve and assembles the configuration
    ///
    /// # Errors
    ///
    /// Fails if the curve is empty or contains a negative or non-finite value.
    pub fn build(self) -> Result<GeneratorConfig> {
        let defaults = GeneratorConfig::default();
        let curve = self.curve.unwrap_or(defaults.curve);
        if curve.is_empty() {
            return Err(BuilderError::EmptyCurve.into());
        }
        if let Some(&v) = curve.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(BuilderError::InvalidCurveValue(v).into());
        }
        Ok(GeneratorConfig {
            curve,
            lane: self.lane.unwrap_or(defaults.lane),
            mobility_file: self.mobility_file.unwrap_or(defaults.mobility_file),
            comment: self.comment.unwrap_or(defaults.comment),
            dye_strength: self.dye_strength.unwrap_or(defaults.dye_strength),
            diagnostics: self.diagnostics.unwrap_or(defaults.diagnostics),
        })
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use anyhow::Result;

    #[test]
    fn test_builder_defaults() -> Result<()> {
        let config = GeneratorConfig::builder().build()?;
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.vals_per_base(), 10);
        assert_eq!(config.mobility_file(), DEFAULT_MOBILITY_FILE);
        assert_eq!(config.comment(), "TS ABIF generator");
        assert_eq!(config.lane(), DEFAULT_LANE);
        assert!(!config.diagnostics());
        Ok(())
    }

    #[test]
    fn test_builder_overrides() -> Result<()> {
        let config = GeneratorConfig::builder()
            .curve(vec![1.0, 2.0])
            .lane(4)
            .comment("hello")
            .mobility_file("x.mob")
            .dye_strength([1, 2, 3, 4])
            .diagnostics(true)
            .build()?;
        assert_eq!(config.curve(), &[1.0, 2.0]);
        assert_eq!(config.lane(), 4);
        assert_eq!(config.comment(), "hello");
        assert_eq!(config.mobility_file(), "x.mob");
        assert_eq!(config.dye_strength(), [1, 2, 3, 4]);
        assert!(config.diagnostics());
        Ok(())
    }

    #[test]
    fn test_invalid_curves() {
        let err = GeneratorConfig::builder().curve(vec![]).build().unwrap_err();
        assert!(matches!(err, Error::BuilderError(BuilderError::EmptyCurve)));

        let err = GeneratorConfig::builder()
            .curve(vec![0.0, -1.0])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::BuilderError(BuilderError::InvalidCurveValue(_))
        ));

        assert!(GeneratorConfig::builder()
            .curve(vec![f64::NAN])
            .build()
            .is_err());
    }
}
