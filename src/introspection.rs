//! Load a [`SchemaGraph`] from GraphQL introspection JSON.
//!
//! Accepts the bare `__schema` object, `{ "__schema": … }`, or a full response
//! `{ "data": { "__schema": … } }`. Deserialization errors carry the JSON path.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::schema::{Deprecation, EnumValue, Field, InputValue, NamedType, SchemaGraph, TypeKind, TypeRef};

pub fn from_str(src: &str) -> Result<SchemaGraph> {
    from_value(serde_json::from_str(src)?)
}

pub fn from_slice(bytes: &[u8]) -> Result<SchemaGraph> {
    from_value(serde_json::from_slice(bytes)?)
}

pub fn from_value(value: Value) -> Result<SchemaGraph> {
    let (prefix, value) = unwrap_envelope(value);
    let raw: RawSchema = serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        // a root-level error renders its path as "."
        let path = if prefix.is_empty() {
            path
        } else if path == "." {
            prefix.trim_end_matches('.').to_owned()
        } else {
            format!("{prefix}{path}")
        };
        Error::Introspection {
            path,
            message: err.into_inner().to_string(),
        }
    })?;
    raw.into_graph()
}

fn unwrap_envelope(mut value: Value) -> (&'static str, Value) {
    if let Some(schema) = value.pointer_mut("/data/__schema") {
        return ("data.__schema.", schema.take());
    }
    if let Some(schema) = value.get_mut("__schema") {
        return ("__schema.", schema.take());
    }
    ("", value)
}

// ————————————————————————————————————————————————————————————————————————————
// WIRE TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum RawKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    query_type: Option<RawName>,
    mutation_type: Option<RawName>,
    subscription_type: Option<RawName>,
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawType {
    kind: RawKind,
    name: String,
    description: Option<String>,
    fields: Option<Vec<RawField>>,
    input_fields: Option<Vec<RawInputValue>>,
    interfaces: Option<Vec<RawName>>,
    possible_types: Option<Vec<RawName>>,
    enum_values: Option<Vec<RawEnumValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    description: Option<String>,
    args: Option<Vec<RawInputValue>>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnumValue {
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: RawKind,
    name: Option<String>,
    of_type: Option<Box<RawTypeRef>>,
}

// ————————————————————————————————————————————————————————————————————————————
// LOWERING
// ————————————————————————————————————————————————————————————————————————————

fn named_kind(kind: RawKind) -> Option<TypeKind> {
    match kind {
        RawKind::Scalar => Some(TypeKind::Scalar),
        RawKind::Object => Some(TypeKind::Object),
        RawKind::Interface => Some(TypeKind::Interface),
        RawKind::Union => Some(TypeKind::Union),
        RawKind::Enum => Some(TypeKind::Enum),
        RawKind::InputObject => Some(TypeKind::InputObject),
        RawKind::List | RawKind::NonNull => None,
    }
}

impl RawSchema {
    fn into_graph(self) -> Result<SchemaGraph> {
        Ok(SchemaGraph {
            query_type: self.query_type.map(|r| r.name),
            mutation_type: self.mutation_type.map(|r| r.name),
            subscription_type: self.subscription_type.map(|r| r.name),
            types: self.types.into_iter().map(RawType::into_named).collect::<Result<_>>()?,
        })
    }
}

impl RawType {
    fn into_named(self) -> Result<NamedType> {
        let kind = named_kind(self.kind).ok_or_else(|| {
            Error::MalformedTypeRef(format!("type `{}` declared with a wrapper kind", self.name))
        })?;
        Ok(NamedType {
            name: self.name,
            kind,
            description: self.description,
            fields: self.fields.unwrap_or_default()
                .into_iter()
                .map(RawField::into_field)
                .collect::<Result<_>>()?,
            input_fields: input_values(self.input_fields)?,
            interfaces: names(self.interfaces),
            possible_types: names(self.possible_types),
            enum_values: self.enum_values.unwrap_or_default()
                .into_iter()
                .map(|v| EnumValue {
                    name: v.name,
                    description: v.description,
                    deprecation: Deprecation { is_deprecated: v.is_deprecated, reason: v.deprecation_reason },
                })
                .collect(),
        })
    }
}

impl RawField {
    fn into_field(self) -> Result<Field> {
        Ok(Field {
            name: self.name,
            description: self.description,
            args: input_values(self.args)?,
            ty: self.ty.into_type_ref()?,
            deprecation: Deprecation { is_deprecated: self.is_deprecated, reason: self.deprecation_reason },
        })
    }
}

impl RawTypeRef {
    fn into_type_ref(self) -> Result<TypeRef> {
        if let Some(kind) = named_kind(self.kind) {
            let name = self.name
                .ok_or_else(|| Error::MalformedTypeRef(format!("{:?} reference without a name", self.kind)))?;
            return Ok(TypeRef::named(name, kind));
        }
        let inner = self.of_type
            .ok_or_else(|| Error::MalformedTypeRef(format!("{:?} without ofType", self.kind)))?
            .into_type_ref()?;
        Ok(match self.kind {
            RawKind::List => TypeRef::list(inner),
            _ => TypeRef::non_null(inner),
        })
    }
}

fn input_values(raw: Option<Vec<RawInputValue>>) -> Result<Vec<InputValue>> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|v| Ok::<_, Error>(InputValue { name: v.name, description: v.description, ty: v.ty.into_type_ref()? }))
        .collect()
}

fn names(raw: Option<Vec<RawName>>) -> Vec<String> {
    raw.unwrap_or_default().into_iter().map(|r| r.name).collect()
}
