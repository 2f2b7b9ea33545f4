use crate::schema::{Field, MethodRef, Ty};

/// How one target field is populated. Produced by the resolver and consumed
/// once per direction by the synthesizer.
#[derive(Debug)]
pub(crate) struct FieldMapping<'a> {
    /// Field being populated
    pub(crate) target: &'a Field,

    /// Source field bound for simple, converter and named-method mappings
    pub(crate) source: Option<&'a Field>,

    /// Source field names listed by the directive
    pub(crate) source_names: Vec<syn::Ident>,

    /// Type of the bound source field, or of the whole source record when an
    /// expression drives the mapping
    pub(crate) source_ty: Ty,

    pub(crate) ty: MappingType<'a>,
}

#[derive(Debug)]
pub(crate) enum MappingType<'a> {
    Simple,
    ManyToOne { expr: syn::Expr },
    Expression { expr: syn::Expr },
    Converter { converter: &'a syn::Path, format: String },
    QualifiedByName { method: &'a MethodRef },
}

impl<'a> FieldMapping<'a> {
    pub(crate) fn simple(target: &'a Field, source: &'a Field) -> Self {
        Self::bound(target, source, MappingType::Simple)
    }

    pub(crate) fn converter(
        target: &'a Field,
        source: &'a Field,
        converter: &'a syn::Path,
        format: String,
    ) -> Self {
        Self::bound(target, source, MappingType::Converter { converter, format })
    }

    pub(crate) fn qualified_by_name(
        target: &'a Field,
        source: &'a Field,
        method: &'a MethodRef,
    ) -> Self {
        Self::bound(target, source, MappingType::QualifiedByName { method })
    }

    /// Expression over the whole source record. Two or more source names make
    /// it a many-to-one mapping.
    pub(crate) fn expression(
        target: &'a Field,
        record_ty: &Ty,
        source_names: Vec<syn::Ident>,
        expr: syn::Expr,
    ) -> Self {
        let ty = if source_names.len() >= 2 {
            MappingType::ManyToOne { expr }
        } else {
            MappingType::Expression { expr }
        };

        Self {
            target,
            source: None,
            source_names,
            source_ty: record_ty.clone(),
            ty,
        }
    }

    fn bound(target: &'a Field, source: &'a Field, ty: MappingType<'a>) -> Self {
        Self {
            target,
            source: Some(source),
            source_names: vec![source.ident.clone()],
            source_ty: source.ty.clone(),
            ty,
        }
    }
}

impl MappingType<'_> {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::ManyToOne { .. } => "many-to-one",
            Self::Expression { .. } => "expression",
            Self::Converter { .. } => "converter",
            Self::QualifiedByName { .. } => "qualified-by-name",
        }
    }
}
