//! Type classification over [`Ty`] descriptors.
//!
//! Every function here is pure: classifying the same descriptor twice gives
//! the same answer, and nothing fails. Types the classifier cannot make sense
//! of land in [`Category::Other`].

use crate::schema::{ContainerFamily, Ty, TyKind};

use quote::ToTokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Scalar,
    Boxed,
    Text,
    Sequence,
    Set,
    Map,
    Array,
    RawContainer,
    UnresolvedWildcardContainer,
    Record,
    Other,
}

pub(crate) fn classify(ty: &Ty) -> Category {
    match &ty.kind {
        TyKind::Scalar(_) => Category::Scalar,
        TyKind::Text => Category::Text,
        TyKind::Option(inner) => match classify(inner) {
            Category::Scalar => Category::Boxed,
            category => category,
        },
        TyKind::Container { container, .. } => {
            if is_raw_container(ty) {
                Category::RawContainer
            } else if has_unresolved_wildcard(ty) {
                Category::UnresolvedWildcardContainer
            } else {
                match container.family() {
                    ContainerFamily::Sequence => Category::Sequence,
                    ContainerFamily::Set => Category::Set,
                    ContainerFamily::Map => Category::Map,
                }
            }
        }
        TyKind::Array(_) | TyKind::Slice(_) => Category::Array,
        TyKind::Record(_) => Category::Record,
        TyKind::Other => Category::Other,
    }
}

/// Element, key and value arguments in declaration order. `None` marks an
/// argument that cannot be resolved.
pub(crate) fn type_arguments(ty: &Ty) -> Vec<Option<&Ty>> {
    match &ty.kind {
        TyKind::Option(inner) => vec![Some(inner)],
        TyKind::Container { container, args } => args
            .iter()
            .take(container.arity())
            .map(|arg| arg.resolved())
            .collect(),
        TyKind::Array(elem) | TyKind::Slice(elem) => vec![Some(elem)],
        _ => vec![],
    }
}

/// Innermost component of a possibly multi-dimensional array.
pub(crate) fn array_component(ty: &Ty) -> &Ty {
    match &ty.kind {
        TyKind::Array(elem) | TyKind::Slice(elem) => array_component(elem),
        _ => ty,
    }
}

/// A container written with fewer type arguments than it needs.
pub(crate) fn is_raw_container(ty: &Ty) -> bool {
    match &ty.non_null().kind {
        TyKind::Container { container, args } => args.len() < container.arity(),
        _ => false,
    }
}

/// True when an unresolvable argument appears anywhere inside the type.
pub(crate) fn has_unresolved_wildcard(ty: &Ty) -> bool {
    match &ty.kind {
        TyKind::Option(inner) | TyKind::Array(inner) | TyKind::Slice(inner) => {
            has_unresolved_wildcard(inner)
        }
        TyKind::Container { .. } => type_arguments(ty)
            .into_iter()
            .any(|arg| arg.map_or(true, has_unresolved_wildcard)),
        _ => false,
    }
}

/// Values of this type are rebuilt rather than shared. Containers are not
/// included: their elements are examined on their own.
pub(crate) fn requires_deep_copy(ty: &Ty) -> bool {
    match &ty.kind {
        TyKind::Scalar(_) | TyKind::Text => false,
        TyKind::Option(inner) => requires_deep_copy(inner),
        TyKind::Array(_) | TyKind::Slice(_) => requires_deep_copy(array_component(ty)),
        // `Ty` only produces records for paths outside the standard library
        TyKind::Record(_) => true,
        TyKind::Container { .. } | TyKind::Other => false,
    }
}

/// `i32` against `Option<i32>`, in either order.
pub(crate) fn is_boxed_pair(a: &Ty, b: &Ty) -> bool {
    let (boxed, scalar) = match (classify(a), classify(b)) {
        (Category::Boxed, Category::Scalar) => (a, b),
        (Category::Scalar, Category::Boxed) => (b, a),
        _ => return false,
    };

    boxed.non_null().scalar() == scalar.scalar()
}

/// Same-name fields may be mapped when their types are equal, form a
/// scalar/boxed pair, or can be rebuilt one from the other in both
/// directions: containers of one family with compatible arguments, arrays
/// of one length, records, and nullable values whose non-null side has a
/// default to fall back on.
pub(crate) fn is_compatible(a: &Ty, b: &Ty) -> bool {
    if a.same_as(b) || is_boxed_pair(a, b) {
        return true;
    }

    match (&a.kind, &b.kind) {
        (TyKind::Option(a), TyKind::Option(b)) => is_compatible(a, b),
        (TyKind::Option(inner), _) => has_default(b) && is_compatible(inner, b),
        (_, TyKind::Option(inner)) => has_default(a) && is_compatible(a, inner),
        (
            TyKind::Container { container: ca, .. },
            TyKind::Container { container: cb, .. },
        ) => {
            if ca.family() != cb.family() || !is_resolved(a) || !is_resolved(b) {
                return false;
            }

            let (args_a, args_b) = (type_arguments(a), type_arguments(b));
            args_a.len() == args_b.len()
                && args_a
                    .iter()
                    .zip(&args_b)
                    .all(|(a, b)| matches!((a, b), (Some(a), Some(b)) if is_compatible(a, b)))
        }
        (TyKind::Array(ea), TyKind::Array(eb)) => {
            array_len(a) == array_len(b) && is_compatible(ea, eb)
        }
        (TyKind::Slice(ea), TyKind::Slice(eb)) => is_compatible(ea, eb),
        (TyKind::Record(_), TyKind::Record(_)) => true,
        _ => false,
    }
}

fn is_resolved(ty: &Ty) -> bool {
    !is_raw_container(ty) && !has_unresolved_wildcard(ty)
}

/// Types whose `Default` the generated code may rely on. Records and
/// arrays are not assumed to have one.
fn has_default(ty: &Ty) -> bool {
    matches!(
        ty.kind,
        TyKind::Scalar(_)
            | TyKind::Text
            | TyKind::Option(_)
            | TyKind::Container { .. }
            | TyKind::Slice(_)
    )
}

fn array_len(ty: &Ty) -> Option<String> {
    match &ty.ast {
        syn::Type::Array(array) => Some(array.len.to_token_stream().to_string()),
        _ => None,
    }
}
