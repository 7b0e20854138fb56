#![warn(missing_docs)]
//! Numerical settings of a beam tracing run.
//!
//! A [`SimulationConfig`] is created once (usually with [`SimulationConfig::default`] or from a
//! scene file) and then passed by reference to every geometric and physical routine. It is never
//! mutated during a run.
use serde::{Deserialize, Serialize};

use crate::error::{GbtError, GbtResult};

#[derive(PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
/// Configuration data for a beam tracing run.
///
/// The config contains the following info
///   - `zero`: smallest distance regarded as a real propagation (excludes self intersection)
///   - `infinity`: distance used as "infinitely far"
///   - `flat_curvature`: surfaces with a smaller absolute curvature are treated as flat
///   - `clip_factor`: multiple of the beam width kept away from apertures before a (anti-)clipping warning is issued
///   - `anti_clip`: enables the anti-clipping check
///   - `short_output`: exclude beams propagating inside optics from the text output
pub struct SimulationConfig {
    zero: f64,
    infinity: f64,
    flat_curvature: f64,
    clip_factor: f64,
    anti_clip: bool,
    short_output: bool,
}
impl Default for SimulationConfig {
    /// Create a default config with the following parameters:
    ///   - zero: `1e-10 m`
    ///   - infinity: `1e15 m`
    ///   - flat curvature: `1e-5 1/m`
    ///   - clip factor: `2.0`
    ///   - anti clipping check enabled
    ///   - full text output
    fn default() -> Self {
        Self {
            zero: 1e-10,
            infinity: 1e15,
            flat_curvature: 1e-5,
            clip_factor: 2.0,
            anti_clip: true,
            short_output: false,
        }
    }
}
fn check_positive(value: f64, name: &str) -> GbtResult<()> {
    if !value.is_normal() || value.is_sign_negative() {
        return Err(GbtError::Configuration(format!(
            "{name} must be > 0.0 and finite"
        )));
    }
    Ok(())
}
impl SimulationConfig {
    /// Returns the distance below which an intersection is regarded as self intersection.
    #[must_use]
    pub const fn zero(&self) -> f64 {
        self.zero
    }
    /// Returns the distance regarded as infinite.
    #[must_use]
    pub const fn infinity(&self) -> f64 {
        self.infinity
    }
    /// Returns the curvature below which a surface is treated as flat.
    #[must_use]
    pub const fn flat_curvature(&self) -> f64 {
        self.flat_curvature
    }
    /// Returns the clip factor (multiple of the beam width).
    #[must_use]
    pub const fn clip_factor(&self) -> f64 {
        self.clip_factor
    }
    /// Returns `true` if the anti-clipping check should be performed.
    #[must_use]
    pub const fn anti_clip(&self) -> bool {
        self.anti_clip
    }
    /// Returns `true` if beams inside optics should be excluded from text output.
    #[must_use]
    pub const fn short_output(&self) -> bool {
        self.short_output
    }
    /// Returns a config with the given self-intersection distance.
    ///
    /// # Errors
    ///
    /// This function will return an error if the value is not positive and finite.
    pub fn with_zero(self, zero: f64) -> GbtResult<Self> {
        check_positive(zero, "zero distance")?;
        Ok(Self { zero, ..self })
    }
    /// Returns a config with the given "infinite" distance.
    ///
    /// # Errors
    ///
    /// This function will return an error if the value is not positive and finite.
    pub fn with_infinity(self, infinity: f64) -> GbtResult<Self> {
        check_positive(infinity, "infinity distance")?;
        Ok(Self { infinity, ..self })
    }
    /// Returns a config with the given flatness limit for curvatures.
    ///
    /// # Errors
    ///
    /// This function will return an error if the value is not positive and finite.
    pub fn with_flat_curvature(self, flat_curvature: f64) -> GbtResult<Self> {
        check_positive(flat_curvature, "flat curvature limit")?;
        Ok(Self {
            flat_curvature,
            ..self
        })
    }
    /// Returns a config with the given clip factor.
    ///
    /// # Errors
    ///
    /// This function will return an error if the value is not positive and finite.
    pub fn with_clip_factor(self, clip_factor: f64) -> GbtResult<Self> {
        check_positive(clip_factor, "clip factor")?;
        Ok(Self {
            clip_factor,
            ..self
        })
    }
    /// Returns a config with the anti-clipping check switched on or off.
    #[must_use]
    pub const fn with_anti_clip(self, anti_clip: bool) -> Self {
        Self { anti_clip, ..self }
    }
    /// Returns a config with the short text output switched on or off.
    #[must_use]
    pub const fn with_short_output(self, short_output: bool) -> Self {
        Self {
            short_output,
            ..self
        }
    }
    /// Check the values of a config (e.g. after deserialization).
    ///
    /// # Errors
    ///
    /// This function will return an error if one of the numeric values is not positive and finite.
    pub fn validate(&self) -> GbtResult<()> {
        check_positive(self.zero, "zero distance")?;
        check_positive(self.infinity, "infinity distance")?;
        check_positive(self.flat_curvature, "flat curvature limit")?;
        check_positive(self.clip_factor, "clip factor")
    }
}

/// Termination criteria of a beam tree.
#[derive(PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TraceLimits {
    order: Option<u32>,
    threshold: f64,
}
impl TraceLimits {
    /// Creates new [`TraceLimits`].
    ///
    /// `order` is the maximum stray order of a beam (`None` = unlimited), `threshold` the power
    /// below which daughter beams are discarded.
    #[must_use]
    pub const fn new(order: Option<u32>, threshold: f64) -> Self {
        Self { order, threshold }
    }
    /// Returns the maximum stray order or `None` if unlimited.
    #[must_use]
    pub const fn order(&self) -> Option<u32> {
        self.order
    }
    /// Returns the power threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
    /// Returns `true` if the given stray order exceeds the maximum order.
    #[must_use]
    pub fn order_exceeded(&self, stray_order: u32) -> bool {
        self.order.is_some_and(|order| stray_order > order)
    }
    /// Returns `true` if the given power is below the threshold.
    #[must_use]
    pub fn below_threshold(&self, power: f64) -> bool {
        power < self.threshold
    }
    /// Returns `true` if a beam tree built with these limits is guaranteed to be finite.
    #[must_use]
    pub fn terminates(&self) -> bool {
        self.order.is_some() && self.threshold > 0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    #[test]
    fn default() {
        let config = SimulationConfig::default();
        assert_eq!(config.zero(), 1e-10);
        assert_eq!(config.infinity(), 1e15);
        assert_eq!(config.flat_curvature(), 1e-5);
        assert_eq!(config.clip_factor(), 2.0);
        assert!(config.anti_clip());
        assert!(!config.short_output());
        assert!(config.validate().is_ok());
    }
    #[test]
    fn with_values() {
        let config = SimulationConfig::default()
            .with_zero(1e-9)
            .unwrap()
            .with_clip_factor(3.0)
            .unwrap()
            .with_anti_clip(false);
        assert_eq!(config.zero(), 1e-9);
        assert_eq!(config.clip_factor(), 3.0);
        assert!(!config.anti_clip());
        assert_eq!(config.flat_curvature(), 1e-5);
    }
    #[test]
    fn with_invalid_values() {
        let config = SimulationConfig::default();
        assert_matches!(config.with_zero(0.0), Err(GbtError::Configuration(_)));
        assert!(config.with_zero(-1e-10).is_err());
        assert!(config.with_infinity(f64::INFINITY).is_err());
        assert!(config.with_flat_curvature(f64::NAN).is_err());
        assert!(config.with_clip_factor(-2.0).is_err());
    }
    #[test]
    fn deserialize_partial() {
        let config: SimulationConfig = serde_yaml::from_str("clip_factor: 3.0\nshort_output: true").unwrap();
        assert_eq!(config.clip_factor(), 3.0);
        assert!(config.short_output());
        assert_eq!(config.zero(), 1e-10);
    }
    #[test]
    fn validate_deserialized() {
        let config: SimulationConfig = serde_yaml::from_str("zero: -1.0").unwrap();
        assert!(config.validate().is_err());
    }
    #[test]
    fn trace_limits() {
        let limits = TraceLimits::new(Some(1), 1e-3);
        assert!(limits.order_exceeded(2));
        assert!(!limits.order_exceeded(1));
        assert!(limits.below_threshold(1e-4));
        assert!(!limits.below_threshold(1e-3));
        assert!(limits.terminates());
        let unlimited = TraceLimits::new(None, 1e-3);
        assert!(!unlimited.order_exceeded(u32::MAX));
        assert!(!unlimited.terminates());
        assert!(!TraceLimits::new(Some(0), 0.0).terminates());
    }
}
