//! Small helpers for 2x2 real and complex matrices.
use nalgebra::Matrix2;
use num::Complex;

use crate::error::{GbtError, GbtResult};

/// 2x2 complex matrix as used for the curvature tensor of a Gaussian beam.
pub type ComplexMatrix2 = Matrix2<Complex<f64>>;

/// Converts a real 2x2 matrix into a complex one.
#[must_use]
pub fn to_complex(m: &Matrix2<f64>) -> ComplexMatrix2 {
    m.map(|x| Complex::new(x, 0.0))
}
/// Returns `true` if all entries of the complex matrix are finite.
#[must_use]
pub fn is_finite(m: &ComplexMatrix2) -> bool {
    m.iter().all(|c| c.re.is_finite() && c.im.is_finite())
}
/// Inverts a complex 2x2 matrix.
///
/// # Errors
///
/// This function will return [`GbtError::SingularTransform`] if the matrix is singular or if the
/// inverse contains non-finite entries. `context` is added to the error message.
pub fn try_inverse_complex(m: &ComplexMatrix2, context: &str) -> GbtResult<ComplexMatrix2> {
    let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
    if det.norm() == 0.0 || !det.re.is_finite() || !det.im.is_finite() {
        return Err(GbtError::SingularTransform(format!(
            "{context}: matrix is not invertible"
        )));
    }
    let inverse = Matrix2::new(m[(1, 1)], -m[(0, 1)], -m[(1, 0)], m[(0, 0)]).map(|c| c / det);
    if !is_finite(&inverse) {
        return Err(GbtError::SingularTransform(format!(
            "{context}: inverse matrix is not finite"
        )));
    }
    Ok(inverse)
}
/// Inverts a real 2x2 basis change matrix.
///
/// Matrices whose determinant is smaller than `f64::EPSILON` in magnitude are regarded as
/// singular since they stem from (nearly) degenerate coordinate systems.
///
/// # Errors
///
/// This function will return [`GbtError::SingularTransform`] if the matrix is (nearly) singular.
pub fn try_inverse_real(m: &Matrix2<f64>, context: &str) -> GbtResult<Matrix2<f64>> {
    if m.determinant().abs() < f64::EPSILON || m.iter().any(|x| !x.is_finite()) {
        return Err(GbtError::SingularTransform(format!(
            "{context}: basis change matrix is singular"
        )));
    }
    m.try_inverse().ok_or_else(|| {
        GbtError::SingularTransform(format!("{context}: basis change matrix is singular"))
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    #[test]
    fn to_complex_values() {
        let m = to_complex(&Matrix2::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m[(0, 1)], Complex::new(2.0, 0.0));
        assert_eq!(m[(1, 0)], Complex::new(3.0, 0.0));
    }
    #[test]
    fn inverse_complex() {
        let m = Matrix2::new(
            Complex::new(1.0, 1.0),
            Complex::new(0.5, 0.0),
            Complex::new(0.5, 0.0),
            Complex::new(0.0, -2.0),
        );
        let inv = try_inverse_complex(&m, "test").unwrap();
        let id = m * inv;
        assert_abs_diff_eq!(id[(0, 0)].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(id[(0, 0)].im, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(id[(0, 1)].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(id[(1, 0)].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(id[(1, 1)].re, 1.0, epsilon = 1e-12);
    }
    #[test]
    fn inverse_complex_singular() {
        let m = to_complex(&Matrix2::new(1.0, 2.0, 2.0, 4.0));
        assert_matches!(
            try_inverse_complex(&m, "test"),
            Err(GbtError::SingularTransform(_))
        );
        let m = to_complex(&Matrix2::new(f64::NAN, 0.0, 0.0, 1.0));
        assert!(try_inverse_complex(&m, "test").is_err());
    }
    #[test]
    fn inverse_real() {
        let m = Matrix2::new(0.0, 1.0, -1.0, 0.0);
        assert_abs_diff_eq!(
            try_inverse_real(&m, "test").unwrap(),
            Matrix2::new(0.0, -1.0, 1.0, 0.0),
            epsilon = 1e-15
        );
        assert_matches!(
            try_inverse_real(&Matrix2::new(1.0, 0.0, 0.0, 0.0), "test"),
            Err(GbtError::SingularTransform(_))
        );
    }
}
