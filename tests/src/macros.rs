/// Asserts that two collections hold equal contents in separate allocations.
#[macro_export]
macro_rules! assert_fresh {
    ($actual:expr, $expect:expr) => {{
        let actual = &$actual;
        let expect = &$expect;

        assert_eq!(actual.len(), expect.len());
        for (a, e) in actual.iter().zip(expect.iter()) {
            assert_eq!(a, e);
        }

        if !expect.is_empty() {
            assert_ne!(
                actual.as_ptr(),
                expect.as_ptr(),
                "`{}` shares its buffer with the source",
                stringify!($actual)
            );
        }
    }};
}
