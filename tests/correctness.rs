use approx::assert_relative_eq;
use num_traits::{NumCast, ToPrimitive};
use rand::{rngs::StdRng, Rng, SeedableRng};
use strided_blas::{ddot, dgemm, Blas, BlasError, MatMulEngine, NaiveEngine, Real};

const PAD: f64 = 1.0e6;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_vec(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn cast<T: Real>(data: &[f64]) -> Vec<T> {
    data.iter()
        .map(|&x| <T as NumCast>::from(x).unwrap())
        .collect()
}

fn to_f64<T: Real>(data: &[T]) -> Vec<f64> {
    data.iter().map(|x| x.to_f64().unwrap()).collect()
}

fn tolerance<T: Real>() -> f64 {
    if std::mem::size_of::<T>() == 4 {
        1e-4
    } else {
        1e-10
    }
}

/// Column-major buffer for an `nrow x ncol` matrix; padding rows hold `PAD`.
fn padded_matrix(rng: &mut StdRng, nrow: usize, ncol: usize, ld: usize) -> Vec<f64> {
    let mut data = vec![PAD; ld.max(1) * ncol.max(1)];
    for j in 0..ncol {
        for i in 0..nrow {
            data[i + j * ld] = rng.gen_range(-1.0..1.0);
        }
    }
    data
}

#[allow(clippy::too_many_arguments)]
fn reference_gemm(
    trans_a: bool,
    trans_b: bool,
    m: usize,
    n: usize,
    k: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    beta: f64,
    c: &mut [f64],
    ldc: usize,
) {
    for j in 0..n {
        for i in 0..m {
            let mut acc = 0.0;
            for p in 0..k {
                let av = if trans_a { a[p + i * lda] } else { a[i + p * lda] };
                let bv = if trans_b { b[j + p * ldb] } else { b[p + j * ldb] };
                acc += av * bv;
            }
            let idx = i + j * ldc;
            let prev = if beta == 0.0 { 0.0 } else { beta * c[idx] };
            c[idx] = alpha * acc + prev;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn reference_gemv(
    trans: bool,
    m: usize,
    n: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    x: &[f64],
    incx: usize,
    beta: f64,
    y: &mut [f64],
    incy: usize,
) {
    let (x_len, y_len) = if trans { (m, n) } else { (n, m) };
    for i in 0..y_len {
        let mut acc = 0.0;
        for p in 0..x_len {
            let av = if trans { a[p + i * lda] } else { a[i + p * lda] };
            acc += av * x[p * incx];
        }
        y[i * incy] = alpha * acc + beta * y[i * incy];
    }
}

fn check_gemm<T, E>(blas: &Blas<E>, seed: u64)
where
    T: Real,
    E: MatMulEngine<T>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let tol = tolerance::<T>();
    let dims = [(3, 4, 5), (1, 7, 2), (6, 1, 3), (4, 4, 1), (5, 3, 8)];
    let scalars = [(1.0, 0.0), (2.5, 0.0), (1.5, -0.5), (0.0, 2.0), (1.0, 1.0)];

    for &ta in &['N', 'T', 'c'] {
        for &tb in &['n', 't', 'C'] {
            let (trans_a, trans_b) = (ta != 'N' && ta != 'n', tb != 'N' && tb != 'n');
            for &(m, n, k) in &dims {
                for pad in [0, 2] {
                    for &(alpha, beta) in &scalars {
                        let (ar, ac) = if trans_a { (k, m) } else { (m, k) };
                        let (br, bc) = if trans_b { (n, k) } else { (k, n) };
                        let (lda, ldb, ldc) = (ar + pad, br + pad, m + pad);
                        let a = padded_matrix(&mut rng, ar, ac, lda);
                        let b = padded_matrix(&mut rng, br, bc, ldb);
                        let c0 = padded_matrix(&mut rng, m, n, ldc);

                        let mut expected = c0.clone();
                        reference_gemm(
                            trans_a, trans_b, m, n, k, alpha, &a, lda, &b, ldb, beta,
                            &mut expected, ldc,
                        );

                        let (at, bt) = (cast::<T>(&a), cast::<T>(&b));
                        let mut c = cast::<T>(&c0);
                        blas.gemm(
                            ta,
                            tb,
                            m as i32,
                            n as i32,
                            k as i32,
                            <T as NumCast>::from(alpha).unwrap(),
                            &at,
                            lda as i32,
                            &bt,
                            ldb as i32,
                            <T as NumCast>::from(beta).unwrap(),
                            &mut c,
                            ldc as i32,
                        )
                        .unwrap();

                        for (got, want) in to_f64(&c).iter().zip(expected.iter()) {
                            assert_relative_eq!(*got, *want, epsilon = tol * (k as f64 + 1.0));
                        }
                    }
                }
            }
        }
    }
}

fn check_gemv<T, E>(blas: &Blas<E>, seed: u64)
where
    T: Real,
    E: MatMulEngine<T>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let tol = tolerance::<T>();
    let scalars = [(1.0, 0.0), (-2.0, 0.0), (0.5, 1.5), (0.0, -1.0)];

    for &trans in &['N', 't'] {
        let transposed = trans == 't';
        for &(m, n) in &[(3, 3), (2, 5), (6, 1), (1, 4)] {
            for &(incx, incy, pad) in &[(1, 1, 0), (2, 3, 1), (1, 2, 2)] {
                for &(alpha, beta) in &scalars {
                    let lda = m + pad;
                    let a = padded_matrix(&mut rng, m, n, lda);
                    let (x_len, y_len) = if transposed { (m, n) } else { (n, m) };
                    let x = random_vec(&mut rng, (x_len - 1) * incx + 1);
                    let y0 = random_vec(&mut rng, (y_len - 1) * incy + 1);

                    let mut expected = y0.clone();
                    reference_gemv(
                        transposed, m, n, alpha, &a, lda, &x, incx, beta, &mut expected, incy,
                    );

                    let mut y = cast::<T>(&y0);
                    blas.gemv(
                        trans,
                        m as i32,
                        n as i32,
                        <T as NumCast>::from(alpha).unwrap(),
                        &cast::<T>(&a),
                        lda as i32,
                        &cast::<T>(&x),
                        incx as i32,
                        <T as NumCast>::from(beta).unwrap(),
                        &mut y,
                        incy as i32,
                    )
                    .unwrap();

                    for (got, want) in to_f64(&y).iter().zip(expected.iter()) {
                        assert_relative_eq!(*got, *want, epsilon = tol * (m + n) as f64);
                    }
                }
            }
        }
    }
}

fn check_dot<T, E>(blas: &Blas<E>, seed: u64)
where
    T: Real,
    E: MatMulEngine<T>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let tol = tolerance::<T>();
    for n in [0usize, 1, 2, 17, 64] {
        for &(incx, incy) in &[(1, 1), (3, 1), (2, 5)] {
            let x = random_vec(&mut rng, n.saturating_sub(1) * incx + 1);
            let y = random_vec(&mut rng, n.saturating_sub(1) * incy + 1);
            let expected: f64 = (0..n).map(|i| x[i * incx] * y[i * incy]).sum();
            let got = blas
                .dot(
                    n as i32,
                    &cast::<T>(&x),
                    incx as i32,
                    &cast::<T>(&y),
                    incy as i32,
                )
                .unwrap();
            assert_relative_eq!(got.to_f64().unwrap(), expected, epsilon = tol * (n as f64 + 1.0));
        }
    }
}

#[test]
fn test_gemm_random_default_engine() {
    init_logger();
    check_gemm::<f64, _>(&Blas::new(), 1);
    check_gemm::<f32, _>(&Blas::new(), 2);
}

#[test]
fn test_gemm_random_naive_engine() {
    init_logger();
    let blas = Blas::with_engine(NaiveEngine);
    check_gemm::<f64, _>(&blas, 3);
    check_gemm::<f32, _>(&blas, 4);
}

#[test]
fn test_gemv_random() {
    init_logger();
    check_gemv::<f64, _>(&Blas::new(), 5);
    check_gemv::<f32, _>(&Blas::new(), 6);
    check_gemv::<f64, _>(&Blas::with_engine(NaiveEngine), 7);
}

#[test]
fn test_dot_random() {
    init_logger();
    check_dot::<f64, _>(&Blas::new(), 8);
    check_dot::<f32, _>(&Blas::new(), 9);
    check_dot::<f64, _>(&Blas::with_engine(NaiveEngine), 10);
}

#[test]
fn test_gemm_padding_untouched() {
    let mut rng = StdRng::seed_from_u64(11);
    let (m, n, k, ldc) = (3, 4, 2, 5);
    let a = random_vec(&mut rng, m * k);
    let b = random_vec(&mut rng, k * n);
    for beta in [0.0, 1.0] {
        let mut c = padded_matrix(&mut rng, m, n, ldc);
        dgemm('N', 'N', 3, 4, 2, 1.0, &a, 3, &b, 2, beta, &mut c, 5).unwrap();
        for j in 0..n {
            for i in m..ldc {
                assert_eq!(c[i + j * ldc], PAD);
            }
        }
    }
}

#[test]
fn test_gemm_beta_zero_ignores_nan() {
    let a = [1.0, 3.0, 2.0, 4.0];
    let b = [5.0, 7.0, 6.0, 8.0];
    for ldc in [2, 3] {
        let mut c = vec![f64::NAN; ldc * 2];
        dgemm('N', 'N', 2, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, ldc as i32).unwrap();
        assert_eq!([c[0], c[1], c[ldc], c[ldc + 1]], [19.0, 43.0, 22.0, 50.0]);
    }
}

#[test]
fn test_gemm_concrete_scenario() {
    // A = [[1, 2], [3, 4]], B = [[5, 6], [7, 8]] in column-major order.
    let a = [1.0, 3.0, 2.0, 4.0];
    let b = [5.0, 7.0, 6.0, 8.0];
    let mut c = [0.0; 4];
    dgemm('N', 'N', 2, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, 2).unwrap();
    // C = [[19, 22], [43, 50]]
    assert_eq!(c, [19.0, 43.0, 22.0, 50.0]);
}

#[test]
fn test_dot_concrete_scenario() {
    assert_eq!(ddot(3, &[1.0, 2.0, 3.0], 1, &[4.0, 5.0, 6.0], 1).unwrap(), 32.0);
}

#[test]
fn test_negative_arguments_rejected() {
    let blas = Blas::new();
    let a = [0.0f64; 16];
    let mut c = [0.0f64; 16];

    let gemm_args = [[2, 2, 2, 2, 2, 2]; 6];
    for (pos, mut args) in gemm_args.into_iter().enumerate() {
        args[pos] = -1;
        let [m, n, k, lda, ldb, ldc] = args;
        let err = blas
            .gemm('N', 'N', m, n, k, 1.0, &a, lda, &a, ldb, 0.0, &mut c, ldc)
            .unwrap_err();
        assert!(matches!(err, BlasError::NegativeArgument { routine: "dgemm_" }));
    }

    let gemv_args = [[2, 2, 2, 1, 1]; 5];
    for (pos, mut args) in gemv_args.into_iter().enumerate() {
        args[pos] = -3;
        let [m, n, lda, incx, incy] = args;
        let err = blas
            .gemv('N', m, n, 1.0f32, &[0.0; 4], lda, &[0.0; 2], incx, 0.0, &mut [0.0; 2], incy)
            .unwrap_err();
        assert!(matches!(err, BlasError::NegativeArgument { routine: "sgemv_" }));
    }

    let dot_args = [[2, 1, 1]; 3];
    for (pos, mut args) in dot_args.into_iter().enumerate() {
        args[pos] = -1;
        let [n, incx, incy] = args;
        let err = blas.dot(n, &a, incx, &a, incy).unwrap_err();
        assert!(matches!(err, BlasError::NegativeArgument { routine: "ddot_" }));
        assert_eq!(
            err.to_string(),
            "the integer arguments passed to ddot_ must all be at least 0"
        );
    }
}

#[test]
fn test_invalid_transpose_rejected() {
    let blas = Blas::new();
    let mut c = [0.0f64; 4];
    let err = blas
        .gemm('X', 'N', 2, 2, 2, 1.0, &[0.0; 4], 2, &[0.0; 4], 2, 0.0, &mut c, 2)
        .unwrap_err();
    assert!(matches!(
        err,
        BlasError::InvalidTranspose {
            routine: "dgemm_",
            flag: 'X'
        }
    ));

    let err = blas
        .gemv('h', 2, 2, 1.0, &[0.0; 4], 2, &[0.0; 2], 1, 0.0, &mut c[..2], 1)
        .unwrap_err();
    assert!(matches!(err, BlasError::InvalidTranspose { flag: 'h', .. }));
}

#[test]
fn test_gemm_empty_output_skips_flag_check() {
    let blas = Blas::with_engine(NaiveEngine);
    let mut c = [3.0f64; 2];
    blas.gemm('X', 'N', 0, 2, 2, 1.0, &[], 1, &[0.0; 4], 2, 0.0, &mut c, 1)
        .unwrap();
    blas.gemm('N', 'X', 2, 0, 2, 1.0, &[0.0; 4], 2, &[], 2, 0.0, &mut c, 2)
        .unwrap();
    assert_eq!(c, [3.0; 2]);

    // GEMV checks its flag before looking at the dimensions.
    let mut empty: [f64; 0] = [];
    let err = blas
        .gemv('X', 0, 0, 1.0, &[], 1, &[], 1, 0.0, &mut empty, 1)
        .unwrap_err();
    assert!(matches!(err, BlasError::InvalidTranspose { routine: "dgemv_", flag: 'X' }));
}

#[test]
fn test_gemv_empty_matrix_requires_empty_output() {
    let blas = Blas::new();
    let mut empty: [f64; 0] = [];
    // Transposed 3x0: output length N == 0.
    blas.gemv('T', 3, 0, 1.0, &[], 3, &[0.0; 3], 1, 0.0, &mut empty, 1)
        .unwrap();

    let mut y = [5.0f64; 2];
    let err = blas
        .gemv('T', 0, 2, 1.0, &[], 1, &[], 1, 0.0, &mut y, 1)
        .unwrap_err();
    assert!(matches!(
        err,
        BlasError::NonEmptyOutput {
            routine: "dgemv_",
            len: 2
        }
    ));
    assert_eq!(y, [5.0, 5.0]);
}

#[test]
fn test_undersized_buffer_reports_step() {
    let mut c = [0.0f64; 3];
    let err = dgemm('N', 'N', 2, 2, 2, 1.0, &[0.0; 4], 2, &[0.0; 4], 2, 1.0, &mut c, 2)
        .unwrap_err();
    assert_eq!(err.routine(), Some("dgemm_"));
    assert!(matches!(err, BlasError::Step { step: "wrap C", .. }));
}
