//! Vector primitives shared by the solvers.
//!
//! Hermitian inner product, squared norm and AXPY on slices of any
//! [`Scalar`]. With the `rayon` feature, vectors longer than one chunk are
//! split over fixed-size chunks; partial sums are combined in chunk order, so
//! results do not depend on the thread count. Shorter vectors (a single
//! Kaczmarz row, typically) take the serial path. The solver loops themselves
//! stay sequential.

use crate::core::scalar::Scalar;
use num_traits::{Float, Zero};

#[cfg(feature = "rayon")]
const CHUNK: usize = 4096;

/// Hermitian inner product `Σ conj(x_i) y_i`.
pub fn dotc<S: Scalar>(x: &[S], y: &[S]) -> S {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        if x.len() <= CHUNK {
            return dotc_serial(x, y);
        }
        let partial: Vec<S> = x
            .par_chunks(CHUNK)
            .zip(y.par_chunks(CHUNK))
            .map(|(xc, yc)| dotc_serial(xc, yc))
            .collect();
        partial.into_iter().fold(S::zero(), |acc, v| acc + v)
    }
    #[cfg(not(feature = "rayon"))]
    {
        dotc_serial(x, y)
    }
}

fn dotc_serial<S: Scalar>(x: &[S], y: &[S]) -> S {
    x.iter()
        .zip(y.iter())
        .fold(S::zero(), |acc, (xi, yi)| acc + xi.conj() * *yi)
}

/// Sum of squared magnitudes `Σ |x_i|²`.
pub fn norm_sqr<S: Scalar>(x: &[S]) -> S::Real {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        if x.len() <= CHUNK {
            return norm_sqr_serial(x);
        }
        let partial: Vec<S::Real> = x.par_chunks(CHUNK).map(norm_sqr_serial).collect();
        partial.into_iter().fold(S::Real::zero(), |acc, v| acc + v)
    }
    #[cfg(not(feature = "rayon"))]
    {
        norm_sqr_serial(x)
    }
}

fn norm_sqr_serial<S: Scalar>(x: &[S]) -> S::Real {
    x.iter().fold(S::Real::zero(), |acc, xi| acc + xi.abs_sqr())
}

/// Euclidean norm `‖x‖₂`.
pub fn norm<S: Scalar>(x: &[S]) -> S::Real {
    Float::sqrt(norm_sqr(x))
}

/// y ← y + alpha · x
pub fn axpy<S: Scalar>(alpha: S, x: &[S], y: &mut [S]) {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        if y.len() > CHUNK {
            y.par_chunks_mut(CHUNK)
                .zip(x.par_chunks(CHUNK))
                .for_each(|(yc, xc)| axpy_serial(alpha, xc, yc));
            return;
        }
    }
    axpy_serial(alpha, x, y);
}

fn axpy_serial<S: Scalar>(alpha: S, x: &[S], y: &mut [S]) {
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += alpha * *xi;
    }
}
