//! Common arithmetic type of two scalars.
//!
//! A solver taking an operator with element `T` and a right-hand side with
//! element `U` works in `CommonType<T, U>`: the least type both embed into
//! without loss. Real meets complex gives complex; mixed precision gives the
//! wider one.
//!
//! | T \ U | f32 | f64 | c32 | c64 |
//! |-------|-----|-----|-----|-----|
//! | f32   | f32 | f64 | c32 | c64 |
//! | f64   | f64 | f64 | c64 | c64 |
//! | c32   | c32 | c64 | c32 | c64 |
//! | c64   | c64 | c64 | c64 | c64 |

use crate::core::scalar::Scalar;
use num_complex::{Complex32, Complex64};

/// Lossless embedding of `Self` into `S`.
pub trait Lift<S: Scalar>: Scalar {
    fn lift(self) -> S;
}

/// Promotion rule for a pair of scalar types.
pub trait Promote<U: Scalar>: Scalar {
    type Output: Scalar;
    fn lift_lhs(self) -> <Self as Promote<U>>::Output;
    fn lift_rhs(u: U) -> <Self as Promote<U>>::Output;
}

/// The promoted element type of `T` and `U`.
pub type CommonType<T, U> = <T as Promote<U>>::Output;

macro_rules! lift {
    ($from:ty => $to:ty, |$v:ident| $body:expr) => {
        impl Lift<$to> for $from {
            #[inline]
            fn lift(self) -> $to {
                let $v = self;
                $body
            }
        }
    };
}

lift!(f32 => f32, |v| v);
lift!(f32 => f64, |v| v as f64);
lift!(f32 => Complex32, |v| Complex32::new(v, 0.0));
lift!(f32 => Complex64, |v| Complex64::new(v as f64, 0.0));
lift!(f64 => f64, |v| v);
lift!(f64 => Complex64, |v| Complex64::new(v, 0.0));
lift!(Complex32 => Complex32, |v| v);
lift!(Complex32 => Complex64, |v| Complex64::new(v.re as f64, v.im as f64));
lift!(Complex64 => Complex64, |v| v);

macro_rules! promote {
    ($($t:ty, $u:ty => $out:ty;)*) => {
        $(
            impl Promote<$u> for $t {
                type Output = $out;
                #[inline]
                fn lift_lhs(self) -> $out {
                    Lift::<$out>::lift(self)
                }
                #[inline]
                fn lift_rhs(u: $u) -> $out {
                    Lift::<$out>::lift(u)
                }
            }
        )*
    };
}

promote! {
    f32, f32 => f32;
    f32, f64 => f64;
    f32, Complex32 => Complex32;
    f32, Complex64 => Complex64;
    f64, f32 => f64;
    f64, f64 => f64;
    f64, Complex32 => Complex64;
    f64, Complex64 => Complex64;
    Complex32, f32 => Complex32;
    Complex32, f64 => Complex64;
    Complex32, Complex32 => Complex32;
    Complex32, Complex64 => Complex64;
    Complex64, f32 => Complex64;
    Complex64, f64 => Complex64;
    Complex64, Complex32 => Complex64;
    Complex64, Complex64 => Complex64;
}
