#[macro_export]
macro_rules! assert_approx_eq {
    ($expected:expr, $actual:expr) => {
        $crate::assert_approx_eq!($expected, $actual, 1e-10)
    };
    ($expected:expr, $actual:expr, $eps:expr) => {{
        let expected: f64 = $expected;
        let actual: f64 = $actual;
        assert!(
            (expected - actual).abs() < $eps,
            "Expected {},  but got {}",
            expected,
            actual
        );
    }};
}

#[macro_export]
macro_rules! assert_approx_complex_eq {
    ($expected_re:expr, $expected_im:expr, $actual:expr) => {{
        #[inline(always)]
        fn approx_eq(expected_re: f64, expected_im: f64, actual: $crate::Qbit, eps: f64) -> bool {
            (expected_re - actual.re).abs() < eps && (expected_im - actual.im).abs() < eps
        }

        let actual: $crate::Qbit = $actual;
        assert!(
            approx_eq($expected_re, $expected_im, actual, 1e-10),
            "Expected {}+{}i,  but got {}",
            $expected_re,
            $expected_im,
            actual
        );
    }};
}

/// Compares two 2x2 complex matrices entry by entry.
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($expected:expr, $actual:expr) => {{
        let expected: nalgebra::Matrix2<$crate::Qbit> = $expected;
        let actual: nalgebra::Matrix2<$crate::Qbit> = $actual;
        for (e, a) in expected.iter().zip(actual.iter()) {
            assert!(
                (e - a).norm() < 1e-10,
                "Expected\n{}but got\n{}",
                expected,
                actual
            );
        }
    }};
}
