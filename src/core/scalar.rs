//! Scalar field abstraction for real and complex element types.
//!
//! The solvers are written once against [`Scalar`] and run unchanged on
//! `f32`, `f64`, `Complex<f32>` and `Complex<f64>`. `Scalar` extends faer's
//! `ComplexField`, so any scalar can be handed to faer's dense
//! factorizations; its `Real` type is used for norms, energies and
//! regularization weights.

use faer::traits::ComplexField;
use num_complex::Complex;
use num_traits::{Float, FromPrimitive, NumAssign, One, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Element type of operators and vectors.
pub trait Scalar:
    ComplexField<Real: Float + NumAssign + FromPrimitive + Send + Sync + Debug + 'static>
    + NumAssign
    + Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Zero
    + One
    + Neg<Output = Self>
    + 'static
{
    /// Whether the type carries an imaginary part.
    const IS_COMPLEX: bool;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Squared magnitude `|z|²`.
    fn abs_sqr(self) -> Self::Real;

    /// Magnitude `|z|`.
    fn abs(self) -> Self::Real {
        self.abs_sqr().sqrt()
    }

    /// Real part.
    fn re(self) -> Self::Real;

    /// Embed a real value.
    fn from_real(r: Self::Real) -> Self;

    /// `z / |z|`, with `sign(0) = 0`.
    fn sign(self) -> Self;

    /// Multiply by a real factor.
    #[inline]
    fn scale(self, r: Self::Real) -> Self {
        self * Self::from_real(r)
    }
}

/// Convert an `f64` parameter into the real field of `S`.
///
/// Every supported real type represents (a rounding of) any `f64`, so the
/// fallback is never taken for finite inputs.
#[inline]
pub fn real<S: Scalar>(v: f64) -> S::Real {
    <S::Real as FromPrimitive>::from_f64(v).unwrap_or_else(S::Real::nan)
}

macro_rules! impl_real_scalar {
    ($t:ty) => {
        impl Scalar for $t {
            const IS_COMPLEX: bool = false;

            #[inline]
            fn conj(self) -> Self {
                self
            }
            #[inline]
            fn abs_sqr(self) -> $t {
                self * self
            }
            #[inline]
            fn abs(self) -> $t {
                Float::abs(self)
            }
            #[inline]
            fn re(self) -> $t {
                self
            }
            #[inline]
            fn from_real(r: $t) -> Self {
                r
            }
            #[inline]
            fn sign(self) -> Self {
                // f64::signum maps +0 to 1; NaN passes through signum.
                if self == 0.0 { 0.0 } else { Float::signum(self) }
            }
            #[inline]
            fn scale(self, r: $t) -> Self {
                self * r
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty) => {
        impl Scalar for Complex<$t> {
            const IS_COMPLEX: bool = true;

            #[inline]
            fn conj(self) -> Self {
                Complex::conj(&self)
            }
            #[inline]
            fn abs_sqr(self) -> $t {
                self.re * self.re + self.im * self.im
            }
            #[inline]
            fn abs(self) -> $t {
                self.re.hypot(self.im)
            }
            #[inline]
            fn re(self) -> $t {
                self.re
            }
            #[inline]
            fn from_real(r: $t) -> Self {
                Complex::new(r, 0.0)
            }
            #[inline]
            fn sign(self) -> Self {
                let m = Scalar::abs(self);
                if m == 0.0 { Complex::new(0.0, 0.0) } else { Complex::new(self.re / m, self.im / m) }
            }
            #[inline]
            fn scale(self, r: $t) -> Self {
                Complex::new(self.re * r, self.im * r)
            }
        }
    };
}

impl_real_scalar!(f32);
impl_real_scalar!(f64);
impl_complex_scalar!(f32);
impl_complex_scalar!(f64);

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn real_sign_maps_zero_to_zero() {
        assert_eq!(Scalar::sign(0.0f64), 0.0);
        assert_eq!(Scalar::sign(-0.0f64), 0.0);
        assert_eq!(Scalar::sign(-3.5f64), -1.0);
        assert_eq!(Scalar::sign(2.0f32), 1.0);
        assert!(Scalar::sign(f64::NAN).is_nan());
    }

    #[test]
    fn complex_sign_is_unit_phase() {
        let z = Complex64::new(3.0, -4.0);
        let s = Scalar::sign(z);
        assert!((s.re - 0.6).abs() < 1e-15);
        assert!((s.im + 0.8).abs() < 1e-15);
        assert_eq!(Scalar::sign(Complex64::new(0.0, 0.0)), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn complex_magnitude_and_conjugate() {
        let z = Complex64::new(3.0, 4.0);
        assert_eq!(z.abs_sqr(), 25.0);
        assert_eq!(Scalar::abs(z), 5.0);
        assert_eq!(Scalar::conj(z), Complex64::new(3.0, -4.0));
        assert_eq!(z.scale(2.0), Complex64::new(6.0, 8.0));
        assert_eq!(Scalar::re(z), 3.0);
    }

    #[test]
    fn real_parameter_conversion() {
        assert_eq!(real::<f32>(0.5), 0.5f32);
        assert_eq!(real::<Complex64>(1e-3), 1e-3);
    }
}
