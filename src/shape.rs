//! Structural definitions: a tagged internal form plus its JSON-Schema-shaped encoding.
//!
//! The compiler works on [`Schema`]/[`Shape`]; downstream consumers only ever see
//! the `serde_json::Value` produced by [`Schema::to_value`]. That encoding has no
//! "kind" discriminant, so e.g. enums are recovered structurally by
//! [`crate::classify::is_enum`].

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Prefix of every `$ref` the compiler produces.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Integer,
    Number,
    String,
    Boolean,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
        }
    }
}

impl std::str::FromStr for Primitive {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(Primitive::Integer),
            "number" | "float" => Ok(Primitive::Number),
            "string" => Ok(Primitive::String),
            "boolean" | "bool" => Ok(Primitive::Boolean),
            other => Err(format!("not a primitive kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub value: String,
    pub description: Option<String>,
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Scalar(Primitive),
    ArrayOf(Box<Schema>),
    /// By-name reference into the definitions table; never inlined.
    Reference(String),
    EnumChoice(Vec<EnumMember>),
    UnionChoice(Vec<String>),
    Object {
        properties: IndexMap<String, Schema>,
        /// Concrete implementations, for interfaces.
        implementations: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub shape: Shape,
    pub required: bool,
    pub description: Option<String>,
    pub deprecated: bool,
    pub deprecation_reason: Option<String>,
    pub arguments: IndexMap<String, Schema>,
}

impl From<Shape> for Schema {
    fn from(shape: Shape) -> Self {
        Self {
            shape,
            required: false,
            description: None,
            deprecated: false,
            deprecation_reason: None,
            arguments: IndexMap::new(),
        }
    }
}

impl Schema {
    pub fn scalar(kind: Primitive) -> Self {
        Shape::Scalar(kind).into()
    }
    pub fn array_of(items: Schema) -> Self {
        Shape::ArrayOf(Box::new(items)).into()
    }
    pub fn reference(name: impl Into<String>) -> Self {
        Shape::Reference(name.into()).into()
    }

    /// Non-null is a modifier on the produced shape, not a container.
    pub fn into_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_owned);
        self
    }

    /// Tag-based answer; agrees with the structural test on the encoded value.
    pub fn is_enum(&self) -> bool {
        matches!(&self.shape, Shape::EnumChoice(members) if !members.is_empty())
    }

    pub fn to_value(&self) -> Value {
        let mut o = shape_to_map(&self.shape);
        if self.required {
            o.insert("required".into(), Value::Bool(true));
        }
        if let Some(d) = &self.description {
            o.insert("description".into(), Value::from(d.clone()));
        }
        if self.deprecated {
            o.insert("deprecated".into(), Value::Bool(true));
            if let Some(reason) = &self.deprecation_reason {
                o.insert("deprecationReason".into(), Value::from(reason.clone()));
            }
        }
        if !self.arguments.is_empty() {
            let args = self.arguments.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect::<Map<_, _>>();
            o.insert("arguments".into(), Value::Object(args));
        }
        Value::Object(o)
    }
}

pub fn ref_path(name: &str) -> String {
    format!("{DEFINITIONS_PREFIX}{name}")
}

fn shape_to_map(shape: &Shape) -> Map<String, Value> {
    let mut o = Map::new();
    match shape {
        Shape::Scalar(kind) => {
            o.insert("type".into(), Value::from(kind.as_str()));
        }
        Shape::ArrayOf(items) => {
            o.insert("type".into(), Value::from("array"));
            o.insert("items".into(), items.to_value());
        }
        Shape::Reference(name) => {
            o.insert("$ref".into(), Value::from(ref_path(name)));
        }
        Shape::EnumChoice(members) => {
            let arms = members.iter().map(|m| {
                let mut arm = json!({ "enum": [m.value], "title": m.value });
                if let Some(d) = &m.description {
                    arm["description"] = Value::from(d.clone());
                }
                if m.deprecated {
                    arm["deprecated"] = Value::Bool(true);
                }
                arm
            }).collect::<Vec<_>>();
            o.insert("type".into(), Value::from("string"));
            o.insert("anyOf".into(), Value::Array(arms));
        }
        Shape::UnionChoice(names) => {
            o.insert("anyOf".into(), Value::Array(refs(names)));
        }
        Shape::Object { properties, implementations } => {
            let props = properties.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect::<Map<_, _>>();
            o.insert("type".into(), Value::from("object"));
            o.insert("properties".into(), Value::Object(props));
            if !implementations.is_empty() {
                o.insert("anyOf".into(), Value::Array(refs(implementations)));
            }
        }
    }
    o
}

fn refs(names: &[String]) -> Vec<Value> {
    names.iter().map(|n| json!({ "$ref": ref_path(n) })).collect()
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Compiled type-name → definition mapping, in schema declaration order.
/// Frozen once built; there is no mutating API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions {
    table: IndexMap<String, Schema>,
}

impl Definitions {
    pub(crate) fn from_table(table: IndexMap<String, Schema>) -> Self {
        Self { table }
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.table.get(name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.iter().map(|(k, v)| (k.to_owned(), v.to_value())).collect())
    }
}

impl Serialize for Definitions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.table.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn required_merges_into_reference() {
        let s = Schema::reference("Widget").into_required();
        assert_eq!(s.to_value(), json!({ "$ref": "#/definitions/Widget", "required": true }));
    }

    #[test]
    fn enum_arms_are_singleton_literals() {
        let s: Schema = Shape::EnumChoice(vec![
            EnumMember { value: "RED".into(), description: Some("warm".into()), deprecated: false },
            EnumMember { value: "BLUE".into(), description: None, deprecated: true },
        ]).into();
        assert_eq!(s.to_value(), json!({
            "type": "string",
            "anyOf": [
                { "enum": ["RED"], "title": "RED", "description": "warm" },
                { "enum": ["BLUE"], "title": "BLUE", "deprecated": true },
            ]
        }));
        assert!(s.is_enum());
    }

    #[test]
    fn deprecation_reason_needs_deprecated_flag() {
        let mut s = Schema::scalar(Primitive::Boolean);
        s.deprecation_reason = Some("gone".into());
        assert_eq!(s.to_value(), json!({ "type": "boolean" }));
        s.deprecated = true;
        assert_eq!(s.to_value(), json!({ "type": "boolean", "deprecated": true, "deprecationReason": "gone" }));
    }

    #[test]
    fn primitive_parses_loose_names() {
        assert_eq!("Int".parse::<Primitive>(), Ok(Primitive::Integer));
        assert_eq!("string".parse::<Primitive>(), Ok(Primitive::String));
        assert!("date".parse::<Primitive>().is_err());
    }
}
