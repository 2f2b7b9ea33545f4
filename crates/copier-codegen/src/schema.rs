mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::Field;

mod field_attr;
pub(crate) use field_attr::{FieldAttr, MethodRef};

mod helper;
pub(crate) use helper::{Helper, HelperMethod};

mod input;
pub(crate) use input::Input;

mod record;
pub(crate) use record::Record;

mod record_attr;
pub(crate) use record_attr::RecordAttr;

mod ty;
pub(crate) use ty::{ContainerFamily, ContainerKind, Ty, TyKind};
