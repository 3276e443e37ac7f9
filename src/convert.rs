//! Type Converter: one use-site type node → structural definition.

use tracing::warn;

use crate::error::{Error, Result};
use crate::options::{CompileOptions, UnknownScalarPolicy};
use crate::schema::TypeRef;
use crate::shape::{Primitive, Schema};

/// Built-in scalars. `ID` and `String` share a kind.
pub const BUILTIN_SCALARS: [(&str, Primitive); 5] = [
    ("Int", Primitive::Integer),
    ("Float", Primitive::Number),
    ("String", Primitive::String),
    ("ID", Primitive::String),
    ("Boolean", Primitive::Boolean),
];

pub fn builtin_scalar(name: &str) -> Option<Primitive> {
    BUILTIN_SCALARS.iter().find(|(n, _)| *n == name).map(|(_, k)| *k)
}

/// Resolve a scalar name to its primitive kind under `opts`.
pub fn scalar_kind(name: &str, opts: &CompileOptions) -> Result<Primitive> {
    if let Some(kind) = opts.custom_scalars.get(name) {
        return Ok(*kind);
    }
    if let Some(kind) = builtin_scalar(name) {
        return Ok(kind);
    }
    match opts.unknown_scalars {
        UnknownScalarPolicy::Fail => Err(Error::UnknownScalar(name.to_owned())),
        UnknownScalarPolicy::AsString => {
            warn!(scalar = name, "unknown scalar, representing it as a string");
            Ok(Primitive::String)
        }
    }
}

pub fn convert(ty: &TypeRef, opts: &CompileOptions) -> Result<Schema> {
    match ty {
        TypeRef::NonNull(inner) => Ok(convert(inner, opts)?.into_required()),
        TypeRef::List(inner) => Ok(Schema::array_of(convert(inner, opts)?)),
        TypeRef::Named { name, kind } if kind.is_scalar() => {
            Ok(Schema::scalar(scalar_kind(name, opts)?))
        }
        TypeRef::Named { name, .. } => Ok(Schema::reference(name.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn conv(ty: &TypeRef) -> serde_json::Value {
        convert(ty, &CompileOptions::default()).unwrap().to_value()
    }

    #[test]
    fn builtin_scalars_have_no_extra_keys() {
        let expected = [
            ("Int", "integer"),
            ("Float", "number"),
            ("String", "string"),
            ("ID", "string"),
            ("Boolean", "boolean"),
        ];
        for (name, kind) in expected {
            assert_eq!(conv(&TypeRef::scalar(name)), json!({ "type": kind }), "{name}");
        }
    }

    #[test]
    fn non_null_merges_required_at_top_level() {
        assert_eq!(
            conv(&TypeRef::non_null(TypeRef::scalar("Int"))),
            json!({ "type": "integer", "required": true }),
        );
        assert_eq!(
            conv(&TypeRef::non_null(TypeRef::named("Widget", TypeKind::Object))),
            json!({ "$ref": "#/definitions/Widget", "required": true }),
        );
    }

    #[test]
    fn double_non_null_merges_once() {
        let once = conv(&TypeRef::non_null(TypeRef::scalar("ID")));
        let twice = conv(&TypeRef::non_null(TypeRef::non_null(TypeRef::scalar("ID"))));
        assert_eq!(once, twice);
    }

    #[test]
    fn lists_nest_items() {
        assert_eq!(
            conv(&TypeRef::list(TypeRef::list(TypeRef::scalar("Float")))),
            json!({ "type": "array", "items": { "type": "array", "items": { "type": "number" } } }),
        );
    }

    #[test]
    fn wrappers_compose_by_descent() {
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::scalar("Boolean"))));
        assert_eq!(conv(&ty), json!({
            "type": "array",
            "items": { "type": "boolean", "required": true },
            "required": true,
        }));
    }

    #[test]
    fn named_types_are_never_inlined() {
        for kind in [TypeKind::Object, TypeKind::Interface, TypeKind::Union, TypeKind::Enum, TypeKind::InputObject] {
            let deep = TypeRef::list(TypeRef::list(TypeRef::named("Node", kind)));
            assert_eq!(
                conv(&deep),
                json!({ "type": "array", "items": { "type": "array", "items": { "$ref": "#/definitions/Node" } } }),
            );
        }
    }

    #[test]
    fn unknown_scalar_follows_policy() {
        let ty = TypeRef::scalar("DateTime");
        assert_eq!(conv(&ty), json!({ "type": "string" }));

        let err = convert(&ty, &CompileOptions::strict()).unwrap_err();
        assert!(matches!(err, Error::UnknownScalar(ref s) if s == "DateTime"));

        let opts = CompileOptions::strict().with_scalar("DateTime", Primitive::Integer);
        assert_eq!(convert(&ty, &opts).unwrap().to_value(), json!({ "type": "integer" }));
    }

    #[test]
    fn custom_mapping_overrides_builtin() {
        let opts = CompileOptions::default().with_scalar("ID", Primitive::Integer);
        assert_eq!(convert(&TypeRef::scalar("ID"), &opts).unwrap().to_value(), json!({ "type": "integer" }));
    }
}
