//! Errors raised while compiling definitions or resolving references.

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Placeholder category is not one of `Queries`, `Mutations`, `Types`.
    /// Carries the placeholder exactly as it was given.
    #[error("unsupported interpolation: {0}")]
    UnsupportedInterpolation(String),

    /// Two type nodes in one schema graph claim the same name.
    #[error("duplicate type name in schema graph: {0}")]
    DuplicateTypeName(String),

    /// Scalar is neither built in nor configured, under the strict policy.
    #[error("unknown scalar type: {0}")]
    UnknownScalar(String),

    /// Wrapper without an inner type, or a named reference without a name.
    #[error("malformed type reference: {0}")]
    MalformedTypeRef(String),

    #[error("at JSON path {path} → {message}")]
    Introspection { path: String, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
