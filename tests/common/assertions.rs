//! Assertion macros with context-rich failure messages.

/// Assert that two floats agree to within `1e-9`.
///
/// ```rust
/// assert_close!(shape.area(), 4.0);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        if (actual - expected).abs() > 1e-9 {
            panic!(
                "assert_close! failed:\n  expected: {}\n  actual:   {}\n  diff:     {}",
                expected,
                actual,
                (actual - expected).abs()
            );
        }
    }};
}

/// Assert that a result is an error whose message contains `$needle`.
///
/// ```rust
/// assert_err_contains!(yaml::from_str::<dyn Shape>("!nope 1"), "Could not find tag");
/// ```
#[macro_export]
macro_rules! assert_err_contains {
    ($result:expr, $needle:expr) => {{
        match $result {
            Ok(_) => panic!(
                "assert_err_contains! failed: expected an error containing {:?}, got Ok",
                $needle
            ),
            Err(err) => {
                let message = err.to_string();
                if !message.contains($needle) {
                    panic!(
                        "assert_err_contains! failed:\n  expected substring: {:?}\n  actual message:     {:?}",
                        $needle, message
                    );
                }
            }
        }
    }};
}

/// Assert the keys of a list of search entries, in order.
#[macro_export]
macro_rules! assert_keys {
    ($entries:expr, [$($key:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $entries.iter().map(|e| e.key.as_str()).collect();
        let expected: Vec<&str> = vec![$($key),*];
        if actual != expected {
            panic!(
                "assert_keys! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}
