//! Module for additional computational capabilities
pub mod geom_transformation;
pub mod math_utils;
pub mod test_helper;
