//! Integration tests for the reconstruction solvers.
//!
//! Kaczmarz and the direct solve are checked against faer's LU on random
//! diagonally dominant systems; CGNR and SL0 are checked on fixed
//! deterministic matrices where their behavior is known.

use approx::assert_abs_diff_eq;
use faer::Mat;
use faer::linalg::solvers::SolveCore;
use itrecon::{
    CgnrOptions, DirectSolver, IterationCap, KaczmarzOptions, LinearOperator, Operator, Projection, Sl0Options,
    cgnr, cgnr_with_monitor, kaczmarz, kaczmarz_with_monitor, project, sl0, sl0_with_monitor,
};
use num_complex::Complex64;
use rand::Rng;
use std::ops::ControlFlow;

/// Deterministic dense test matrix with entries `sin((i·N + j + 1)² · s)`.
fn trig_matrix(m: usize, n: usize, s: f64) -> Mat<f64> {
    Mat::from_fn(m, n, |i, j| (((i * n + j + 1) as f64).powi(2) * s).sin())
}

fn matvec(a: &Mat<f64>, x: &[f64]) -> Vec<f64> {
    let mut y = vec![0.0; a.nrows()];
    LinearOperator::apply(a, x, &mut y);
    y
}

/// `‖Aᴴ(b − A x)‖₂`
fn normal_residual(a: &Mat<f64>, b: &[f64], x: &[f64]) -> f64 {
    let r: Vec<f64> = matvec(a, x).iter().zip(b).map(|(ax, bi)| bi - ax).collect();
    let mut z = vec![0.0; a.ncols()];
    LinearOperator::apply_adjoint(a, &r, &mut z);
    z.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Random diagonally dominant system and its faer LU solution.
fn random_dominant(n: usize) -> (Mat<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    let a = Mat::from_fn(n, n, |i, j| data[i * n + j] + if i == j { n as f64 } else { 0.0 });
    let b: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let mut x = b.clone();
    let lu = faer::linalg::solvers::FullPivLu::new(a.as_ref());
    let x_mat = faer::MatMut::from_column_major_slice_mut(&mut x, n, 1);
    lu.solve_in_place_with_conj(faer::Conj::No, x_mat);
    (a, b, x)
}

#[test]
fn solutions_have_one_entry_per_column() {
    let a = trig_matrix(5, 3, 0.618);
    let b = vec![1.0f64; 5];
    assert_eq!(kaczmarz(&a, &b, &KaczmarzOptions::new(3, 0.1)).unwrap().len(), 3);
    assert_eq!(cgnr(&a, &b, &CgnrOptions::new(3, 0.1)).unwrap().len(), 3);

    let wide = trig_matrix(3, 7, 1.1);
    assert_eq!(sl0(&wide, &[1.0f64, 0.0, -1.0], &Sl0Options::new(2)).unwrap().len(), 7);
}

#[test]
fn kaczmarz_converges_on_consistent_system() {
    let a = trig_matrix(4, 3, 0.618);
    let x_true = [1.0, -2.0, 0.5];
    let b = matvec(&a, &x_true);
    let x = kaczmarz(&a, &b, &KaczmarzOptions::new(200, 0.0)).unwrap();
    for (xi, ti) in x.iter().zip(&x_true) {
        assert_abs_diff_eq!(*xi, *ti, epsilon = 1e-8);
    }
}

#[test]
fn kaczmarz_vs_direct_on_random_dominant() {
    let n = 10;
    let (a, b, x_direct) = random_dominant(n);
    let x = kaczmarz(&a, &b, &KaczmarzOptions::new(100, 0.0)).unwrap();
    for i in 0..n {
        assert_abs_diff_eq!(x[i], x_direct[i], epsilon = 1e-8);
    }
}

#[test]
fn direct_solver_vs_faer_lu() {
    let n = 12;
    let (a, b, x_direct) = random_dominant(n);
    let x = DirectSolver::<f64>::new(&a).unwrap().solve(&b).unwrap();
    for i in 0..n {
        assert_abs_diff_eq!(x[i], x_direct[i], epsilon = 1e-10);
    }
}

#[test]
fn cgnr_normal_residual_decreases() {
    let a = trig_matrix(4, 3, 0.618);
    let b = matvec(&a, &[1.0, -2.0, 0.5]);
    let mut history = Vec::new();
    cgnr_with_monitor(&a, &b, &CgnrOptions::new(5, 0.0), |_it: usize, x: &[f64]| -> ControlFlow<()> {
        history.push(normal_residual(&a, &b, x));
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(history.len(), 5);
    assert!(history[4] <= history[0], "history = {:?}", history);
    assert!(history[0] < normal_residual(&a, &b, &[0.0; 3]));
}

#[test]
fn sl0_recovers_two_sparse_vector() {
    let a = trig_matrix(8, 20, 1.1);
    let mut x_true = vec![0.0f64; 20];
    x_true[3] = 1.5;
    x_true[14] = -2.0;
    let b = matvec(&a, &x_true);
    let x = sl0(&a, &b, &Sl0Options::new(10)).unwrap();
    for (xi, ti) in x.iter().zip(&x_true) {
        assert_abs_diff_eq!(*xi, *ti, epsilon = 1e-3);
    }
}

#[test]
fn sl0_stays_feasible_after_every_outer_step() {
    let a = trig_matrix(8, 20, 1.1);
    let mut x_true = vec![0.0f64; 20];
    x_true[3] = 1.5;
    x_true[14] = -2.0;
    let b = matvec(&a, &x_true);
    let mut residuals = Vec::new();
    sl0_with_monitor(&a, &b, &Sl0Options::new(10), |_it: usize, x: &[f64]| -> ControlFlow<()> {
        let r: f64 = matvec(&a, x).iter().zip(&b).map(|(ax, bi)| (ax - bi).powi(2)).sum();
        residuals.push(r.sqrt());
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(residuals.len(), 10);
    for (step, r) in residuals.iter().enumerate() {
        assert!(*r < 1e-9, "step {}: ‖A x − b‖ = {}", step + 1, r);
    }
}

#[test]
fn zero_rows_leave_iterate_finite() {
    let a = Mat::from_fn(3, 2, |i, j| if i == 1 { 0.0 } else { (i + j + 1) as f64 });
    let b = vec![1.0f64, 7.0, 2.0];
    let x = kaczmarz(&a, &b, &KaczmarzOptions::new(25, 0.0)).unwrap();
    assert!(x.iter().all(|v| v.is_finite()));
}

#[test]
fn positive_projection_is_idempotent_on_random_vectors() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let mut once: Vec<f64> = (0..16).map(|_| rng.gen_range(-5.0..5.0)).collect();
        project(&mut once, Projection::POSITIVE);
        let mut twice = once.clone();
        project(&mut twice, Projection::POSITIVE);
        assert_eq!(once, twice);
        assert!(once.iter().all(|v| *v >= 0.0));
    }
}

#[test]
fn single_precision_operator_with_double_rhs() {
    let a = Mat::from_fn(2, 2, |i, j| if i == j { 2.0f32 } else { 0.5 });
    let b = vec![2.5f64, 2.5];
    let x: Vec<f64> = kaczmarz(&a, &b, &KaczmarzOptions::new(100, 0.0)).unwrap();
    assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-12);
}

#[test]
fn real_operator_with_complex_rhs() {
    let a = trig_matrix(3, 2, 0.618);
    let x_true = vec![Complex64::new(1.0, 2.0), Complex64::new(-0.5, 0.25)];
    let mut b = vec![Complex64::new(0.0, 0.0); 3];
    LinearOperator::apply(&a, &x_true[..], &mut b[..]);
    let x: Vec<Complex64> = kaczmarz(&a, &b, &KaczmarzOptions::new(300, 0.0)).unwrap();
    for (xi, ti) in x.iter().zip(&x_true) {
        assert!((xi - ti).norm() < 1e-8, "xi = {}, expected = {}", xi, ti);
    }
    let projected = kaczmarz(&a, &b, &KaczmarzOptions::new(300, 0.0).enforce_real(true)).unwrap();
    assert!(projected.iter().all(|v| v.im == 0.0));
}

#[test]
fn iteration_cap_matches_shorter_run() {
    let a = trig_matrix(4, 3, 0.618);
    let b = matvec(&a, &[1.0, -2.0, 0.5]);
    let capped = kaczmarz_with_monitor(&a, &b, &KaczmarzOptions::new(50, 0.1), IterationCap(3)).unwrap();
    let short = kaczmarz(&a, &b, &KaczmarzOptions::new(3, 0.1)).unwrap();
    assert_eq!(capped, short);
    assert_eq!(Operator::shape(&a), (4, 3));
}
