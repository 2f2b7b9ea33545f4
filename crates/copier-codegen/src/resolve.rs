use crate::classify;
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::expr;
use crate::mapping::FieldMapping;
use crate::schema::{Field, FieldAttr, Record, Ty};

use quote::ToTokens;

/// Resolves every target field against the source record's fields.
///
/// Fields are independent of each other; the output follows target
/// declaration order. Fields that cannot be mapped are left out, with a
/// diagnostic unless the omission is a plain "no such source field".
pub(crate) fn resolve<'a>(
    source: &'a Record,
    source_ty: &Ty,
    target: &'a Record,
    ignore: &[syn::Ident],
    diagnostics: &mut Diagnostics,
) -> Vec<FieldMapping<'a>> {
    let mut resolver = Resolver {
        source,
        source_ty,
        target,
        diagnostics,
    };
    let mut mappings = vec![];

    for field in &target.fields {
        if ignore
            .iter()
            .any(|ident| *ident == field.name || *ident == field.ident)
        {
            tracing::debug!(record = %target.ident, field = %field.ident, "ignored");
            continue;
        }

        let mapping = match field.directive() {
            None => resolver.same_name(field),
            Some(attr) => resolver.directive(field, attr),
        };

        if let Some(mapping) = mapping {
            tracing::debug!(
                record = %target.ident,
                field = %field.ident,
                mapping = mapping.ty.name(),
                "resolved"
            );
            mappings.push(mapping);
        }
    }

    mappings
}

struct Resolver<'a, 'd> {
    source: &'a Record,
    source_ty: &'d Ty,
    target: &'a Record,
    diagnostics: &'d mut Diagnostics,
}

impl<'a> Resolver<'a, '_> {
    fn same_name(&mut self, field: &'a Field) -> Option<FieldMapping<'a>> {
        let Some(source) = self.source.field(&field.name) else {
            tracing::trace!(field = %field.ident, "no source field, keeping default");
            return None;
        };

        self.simple(field, source)
    }

    fn simple(&mut self, field: &'a Field, source: &'a Field) -> Option<FieldMapping<'a>> {
        if !classify::is_compatible(&source.ty, &field.ty) {
            self.warning(
                field,
                format!(
                    "type mismatch: `{}` cannot be mapped to `{}`",
                    source.ty.key(),
                    field.ty.key()
                ),
            );
            return None;
        }

        Some(FieldMapping::simple(field, source))
    }

    fn directive(&mut self, field: &'a Field, attr: &'a FieldAttr) -> Option<FieldMapping<'a>> {
        if let Some(lit) = &attr.expression {
            return self.expression(field, attr, lit);
        }

        if let Some(converter) = attr.converter() {
            let source = self.bound_source(field, attr)?;
            return Some(FieldMapping::converter(field, source, converter, attr.format()));
        }

        if let Some(method) = &attr.qualified_by_name {
            let source = self.bound_source(field, attr)?;
            return Some(FieldMapping::qualified_by_name(field, source, method));
        }

        match &attr.source[..] {
            [name] => {
                let source = self.source_field(field, name)?;
                self.simple(field, source)
            }
            names => {
                self.error(
                    field,
                    format!(
                        "{} source fields given without an `expression` to combine them",
                        names.len()
                    ),
                );
                None
            }
        }
    }

    fn expression(
        &mut self,
        field: &'a Field,
        attr: &FieldAttr,
        lit: &syn::LitStr,
    ) -> Option<FieldMapping<'a>> {
        let expr = match expr::validate_syntax(&lit.value(), lit.span()) {
            Ok(expr) => expr,
            Err(err) => {
                self.error(field, err.to_string());
                return None;
            }
        };

        let tokens = expr.to_token_stream();

        for name in expr::source_fields(&tokens) {
            if self.source.field(&name).is_none() {
                self.warning(
                    field,
                    format!("expression reads `source.{name}`, which `{}` does not have", self.source.ident),
                );
            }
        }

        for name in expr::free_variables(&expr) {
            if name != "source" {
                self.warning(
                    field,
                    format!("expression uses `{name}`, which is not in scope; fields are read through `source`"),
                );
            }
        }

        for name in &attr.source {
            if self.source.field(&name.to_string()).is_none() {
                self.warning(field, format!("source field `{name}` not found"));
            }
        }

        Some(FieldMapping::expression(
            field,
            self.source_ty,
            attr.source.clone(),
            expr,
        ))
    }

    /// Source field for converter and named-method mappings: the first
    /// explicit name, or the target's own name. These mappings read a single
    /// field, so further names are reported and dropped.
    fn bound_source(&mut self, field: &'a Field, attr: &FieldAttr) -> Option<&'a Field> {
        match &attr.source[..] {
            [] => {
                let name = syn::Ident::new(&field.name, field.span);
                self.source_field(field, &name)
            }
            [name, rest @ ..] => {
                if !rest.is_empty() {
                    let ignored = rest
                        .iter()
                        .map(|name| format!("`{name}`"))
                        .collect::<Vec<_>>()
                        .join(", ");

                    self.warning(
                        field,
                        format!(
                            "converters and named methods read one source field; using `{name}`, ignoring {ignored}"
                        ),
                    );
                }

                self.source_field(field, name)
            }
        }
    }

    fn source_field(&mut self, field: &'a Field, name: &syn::Ident) -> Option<&'a Field> {
        let found = self.source.field(&name.to_string());

        if found.is_none() {
            self.warning(field, format!("source field `{name}` not found"));
        }

        found
    }

    fn warning(&mut self, field: &Field, message: String) {
        self.diagnostics.push(
            Diagnostic::warning(field.span, message)
                .in_record(&self.target.ident)
                .on_field(&field.ident),
        );
    }

    fn error(&mut self, field: &Field, message: String) {
        self.diagnostics.push(
            Diagnostic::error(field.span, message)
                .in_record(&self.target.ident)
                .on_field(&field.ident),
        );
    }
}
