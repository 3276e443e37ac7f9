//! Compile-time configuration.

use indexmap::IndexMap;

use crate::shape::Primitive;

/// What to do with a scalar that is neither built in nor configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownScalarPolicy {
    /// Emit `{ "type": "string" }` and log a warning naming the scalar.
    #[default]
    AsString,
    /// Fail with [`crate::Error::UnknownScalar`].
    Fail,
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub unknown_scalars: UnknownScalarPolicy,
    /// Custom scalar name → primitive kind. Consulted before the built-in table.
    pub custom_scalars: IndexMap<String, Primitive>,
    /// Keep `__Schema`, `__Type`, ... in the definitions table.
    pub include_introspection: bool,
}

impl CompileOptions {
    pub fn strict() -> Self {
        Self { unknown_scalars: UnknownScalarPolicy::Fail, ..Self::default() }
    }

    pub fn with_scalar(mut self, name: impl Into<String>, kind: Primitive) -> Self {
        self.custom_scalars.insert(name.into(), kind);
        self
    }

    pub fn with_introspection(mut self, include: bool) -> Self {
        self.include_introspection = include;
        self
    }
}

/// Parse a `Name=kind` pair as given on the command line.
pub fn parse_scalar_mapping(src: &str) -> Result<(String, Primitive), String> {
    let (name, kind) = src
        .split_once('=')
        .ok_or_else(|| format!("expected Name=kind, got `{src}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing scalar name in `{src}`"));
    }
    Ok((name.to_owned(), kind.trim().parse()?))
}
