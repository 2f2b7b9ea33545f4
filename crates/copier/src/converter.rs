/// A value conversion selected with `#[copy_field(converter = ..)]`.
///
/// Generated code creates the converter through `Default` once per routine
/// and calls it in both directions, so a converter used by a two-way
/// projection implements `TypeConverter<S, T>` and `TypeConverter<T, S>`.
pub trait TypeConverter<S: ?Sized, T> {
    /// Converts `source`. `format` is the directive's format string, empty
    /// when none was given.
    fn convert(&self, source: &S, format: &str) -> T;
}

/// Placeholder meaning "no converter". A field naming it is mapped as if the
/// directive had no converter at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoOp;

impl<T: Clone> TypeConverter<T, T> for NoOp {
    fn convert(&self, source: &T, _format: &str) -> T {
        source.clone()
    }
}
