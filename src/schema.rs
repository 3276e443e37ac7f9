//! In-memory schema graph handed to the compiler. Read-only to this crate.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    pub fn is_scalar(self) -> bool {
        matches!(self, TypeKind::Scalar)
    }
}

/// A type as it appears at a use site (field, argument, input field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named { name: String, kind: TypeKind },
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeRef::Named { name: name.into(), kind }
    }
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::named(name, TypeKind::Scalar)
    }
    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List(_))
    }

    /// Inner node of a wrapper, `None` for named types.
    pub fn of_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::NonNull(inner) | TypeRef::List(inner) => Some(inner),
            TypeRef::Named { .. } => None,
        }
    }

    /// Name of the named type at the bottom of the wrapper chain.
    pub fn named_type(&self) -> (&str, TypeKind) {
        let mut cur = self;
        loop {
            match cur {
                TypeRef::Named { name, kind } => return (name, *kind),
                TypeRef::NonNull(inner) | TypeRef::List(inner) => cur = inner,
            }
        }
    }
}

/// SDL-style rendering: `[String!]!`.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, .. } => f.write_str(name),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deprecation {
    pub is_deprecated: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<InputValue>,
    pub ty: TypeRef,
    pub deprecation: Deprecation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: Deprecation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub fields: Vec<Field>,             // Object, Interface
    pub input_fields: Vec<InputValue>,  // InputObject
    pub interfaces: Vec<String>,        // Object, Interface
    pub possible_types: Vec<String>,    // Union, Interface
    pub enum_values: Vec<EnumValue>,    // Enum
}

impl NamedType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            fields: Vec::new(),
            input_fields: Vec::new(),
            interfaces: Vec::new(),
            possible_types: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// Built-in introspection types (`__Schema`, `__Type`, ...).
    pub fn is_introspection(&self) -> bool {
        self.name.starts_with("__")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaGraph {
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    /// Declaration order. Duplicates are representable so the compiler can reject them.
    pub types: Vec<NamedType>,
}

impl SchemaGraph {
    pub fn named_types(&self) -> impl Iterator<Item = &NamedType> {
        self.types.iter()
    }

    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.iter().find(|t| t.name == name)
    }
}
