//! Definition Compiler: schema graph → definitions table.
//!
//! Every named type becomes exactly one entry. Use sites refer to other named
//! types through `$ref` only, so cyclic graphs (A → B → A) compile without
//! recursion through the graph itself.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use crate::convert::{convert, scalar_kind};
use crate::error::{Error, Result};
use crate::options::CompileOptions;
use crate::schema::{Field, InputValue, NamedType, SchemaGraph, TypeKind};
use crate::shape::{Definitions, EnumMember, Schema, Shape};

pub fn compile(graph: &SchemaGraph, opts: &CompileOptions) -> Result<Definitions> {
    // the whole graph is checked for duplicate names before any type is compiled
    let mut names = IndexSet::with_capacity(graph.types.len());
    for ty in graph.named_types() {
        if !names.insert(ty.name.as_str()) {
            return Err(Error::DuplicateTypeName(ty.name.clone()));
        }
    }

    let mut table: IndexMap<String, Schema> = IndexMap::with_capacity(graph.types.len());
    let mut skipped = 0usize;

    for ty in graph.named_types() {
        if ty.is_introspection() && !opts.include_introspection {
            skipped += 1;
            continue;
        }
        table.insert(ty.name.clone(), compile_type(ty, opts)?);
        debug!(name = %ty.name, kind = ?ty.kind, "compiled definition");
    }

    info!(definitions = table.len(), skipped, "definitions table built");
    Ok(Definitions::from_table(table))
}

pub fn compile_type(ty: &NamedType, opts: &CompileOptions) -> Result<Schema> {
    let schema = match ty.kind {
        TypeKind::Scalar => Schema::scalar(scalar_kind(&ty.name, opts)?),
        TypeKind::Object => object(&ty.fields, Vec::new(), opts)?,
        TypeKind::Interface => object(&ty.fields, ty.possible_types.clone(), opts)?,
        TypeKind::InputObject => input_object(&ty.input_fields, opts)?,
        TypeKind::Enum => Shape::EnumChoice(
            ty.enum_values.iter().map(|v| EnumMember {
                value: v.name.clone(),
                description: v.description.clone(),
                deprecated: v.deprecation.is_deprecated,
            }).collect(),
        ).into(),
        TypeKind::Union => Shape::UnionChoice(ty.possible_types.clone()).into(),
    };
    Ok(schema.with_description(ty.description.as_deref()))
}

fn object(fields: &[Field], implementations: Vec<String>, opts: &CompileOptions) -> Result<Schema> {
    let mut properties = IndexMap::with_capacity(fields.len());
    for field in fields {
        let mut prop = convert(&field.ty, opts)?.with_description(field.description.as_deref());
        prop.deprecated = field.deprecation.is_deprecated;
        prop.deprecation_reason = field.deprecation.reason.clone();
        prop.arguments = input_values(&field.args, opts)?;
        properties.insert(field.name.clone(), prop);
    }
    Ok(Shape::Object { properties, implementations }.into())
}

fn input_object(fields: &[InputValue], opts: &CompileOptions) -> Result<Schema> {
    Ok(Shape::Object { properties: input_values(fields, opts)?, implementations: Vec::new() }.into())
}

fn input_values(values: &[InputValue], opts: &CompileOptions) -> Result<IndexMap<String, Schema>> {
    values.iter()
        .map(|v| {
            let schema = convert(&v.ty, opts)?.with_description(v.description.as_deref());
            Ok::<_, Error>((v.name.clone(), schema))
        })
        .collect()
}
