pub mod converter;
pub use converter::TypeConverter;

mod projection;
pub use projection::Projection;

pub use copier_macros::{projections, CopyTarget};
