macro_rules! assert_close {
    ($left:expr, $right:expr $(,)?) => {
        assert_close!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $eps:expr $(,)?) => {{
        let (left, right): (f64, f64) = ($left, $right);

        assert!(
            (left - right).abs() <= $eps,
            "assertion failed: `{} ≈ {}` (eps {})",
            left,
            right,
            $eps
        );
    }};
}
