//! Minimal CLI: introspection JSON → definitions table, plus anchor resolution.
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use indexmap::IndexSet;
use tracing::{debug, info};

use crate::options::{CompileOptions, UnknownScalarPolicy, parse_scalar_mapping};
use crate::shape::Primitive;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile GraphQL introspection schemas into a JSON definitions table and resolve documentation anchors
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CommandLineInterface {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile one or more introspection documents into definitions tables
    Definitions(DefinitionsOut),
    /// resolve `Category.Name` placeholders (or `$ref` paths) to anchors
    Resolve(ResolveArgs),
    /// rewrite `{{Category.Name}}` tokens inside prose files
    Interpolate(InterpolateOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the schema inside each document (e.g. /payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct DefinitionsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// fail on scalars that are neither built in nor mapped with --scalar
    #[arg(long, default_value_t = false)]
    strict_scalars: bool,

    /// map a custom scalar to a primitive kind, e.g. DateTime=string
    #[arg(long = "scalar", value_parser = parse_scalar_mapping)]
    scalars: Vec<(String, Primitive)>,

    /// keep `__Schema`, `__Type`, ... in the output
    #[arg(long, default_value_t = false)]
    include_introspection: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ResolveArgs {
    /// treat inputs as `$ref` paths (`#/definitions/Name`) instead of placeholders
    #[arg(long, default_value_t = false)]
    ref_path: bool,

    #[arg(num_args = 1.., required = true)]
    placeholders: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct InterpolateOut {
    /// One or more prose files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// directory to write rewritten files into, mirroring the input layout (stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(&Path, serde_json::Value) -> Result<()>) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            debug!(path = %source_path.display(), "reading schema");
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {}", source_path.display()))?;
            let mut json_value = serde_json::from_str::<serde_json::Value>(&source)
                .with_context(|| format!("failed to parse JSON source file ({})", source_path.display()))?;
            if let Some(pointer) = self.json_pointer.as_deref() {
                json_value = json_value
                    .pointer_mut(pointer)
                    .map(serde_json::Value::take)
                    .ok_or_else(|| anyhow!("JSON pointer {pointer} not found in {}", source_path.display()))?;
            }
            apply(&source_path, json_value)?;
        }
        Ok(())
    }
}

impl DefinitionsOut {
    fn options(&self) -> CompileOptions {
        CompileOptions {
            unknown_scalars: if self.strict_scalars { UnknownScalarPolicy::Fail } else { UnknownScalarPolicy::AsString },
            custom_scalars: self.scalars.iter().cloned().collect(),
            include_introspection: self.include_introspection,
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Definitions(target) => {
                let opts = target.options();
                let mut outputs = serde_json::Map::new();
                target.input_settings.load_process(|path, value| {
                    let graph = crate::introspection::from_value(value)
                        .with_context(|| format!("failed to load schema graph from {}", path.display()))?;
                    let defs = crate::compile::compile(&graph, &opts)
                        .with_context(|| format!("failed to compile definitions for {}", path.display()))?;
                    let key = path.display().to_string();
                    if outputs.insert(key.clone(), defs.to_value()).is_some() {
                        return Err(anyhow!("two inputs share the display path {key}"));
                    }
                    Ok(())
                })?;

                // a single input prints its table directly
                let output = if outputs.len() == 1 {
                    outputs.into_iter().next().map(|(_, v)| v).unwrap_or_default()
                } else {
                    serde_json::Value::Object(outputs)
                };
                let src = serde_json::to_string_pretty(&output)?;
                write_or_print(target.out.as_deref(), &src)
            }
            Command::Resolve(target) => {
                for placeholder in &target.placeholders {
                    let anchor = if target.ref_path {
                        crate::anchor::definition_anchor(placeholder)?
                    } else {
                        crate::anchor::resolve(placeholder)?
                    };
                    println!("{anchor}");
                }
                Ok(())
            }
            Command::Interpolate(target) => {
                let source_paths = resolve_file_path_patterns(&target.input)
                    .context("failed to resolve input file paths")?;
                let outputs: Vec<Option<PathBuf>> = match target.out_dir.as_deref() {
                    Some(dir) => output_paths(dir, &source_paths)?.into_iter().map(Some).collect(),
                    None => vec![None; source_paths.len()],
                };
                for (source_path, out) in source_paths.iter().zip(outputs) {
                    let source = std::fs::read_to_string(source_path)
                        .with_context(|| format!("failed to read source file {}", source_path.display()))?;
                    let rewritten = crate::anchor::interpolate(&source)
                        .with_context(|| format!("broken reference in {}", source_path.display()))?;
                    write_or_print(out.as_deref(), &rewritten)?;
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_or_print(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "wrote output");
        }
        None => println!("{src}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    // repeated inputs are read once, first occurrence wins
    let mut out = IndexSet::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.insert(entry?);
            }
            if !matched_any {
                // explicit glob that matched nothing is an error, not an empty run
                return Err(anyhow!("glob pattern matched no files: {pattern}"));
            }
        } else {
            out.insert(PathBuf::from(pattern));
        }
    }

    Ok(out.into_iter().collect())
}

/// Deepest directory containing every source path.
fn common_root(paths: &[PathBuf]) -> PathBuf {
    let mut parents = paths.iter().filter_map(|p| p.parent());
    let Some(first) = parents.next() else { return PathBuf::new() };
    let mut root: Vec<Component> = first.components().collect();
    for parent in parents {
        let shared = root.iter().zip(parent.components()).take_while(|(a, b)| **a == *b).count();
        root.truncate(shared);
    }
    root.iter().collect()
}

/// Mirror each source under `out_dir`, relative to the inputs' common root.
/// Two sources landing on one output path is an error.
fn output_paths(out_dir: &Path, sources: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let root = common_root(sources);
    let mut seen = IndexSet::with_capacity(sources.len());
    let mut out = Vec::with_capacity(sources.len());
    for source in sources {
        let relative = source.strip_prefix(&root).unwrap_or(source);
        let relative: PathBuf = relative.components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        let target = out_dir.join(relative);
        if !seen.insert(target.clone()) {
            return Err(anyhow!("inputs collide on output path {}", target.display()));
        }
        out.push(target);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["schema.json", "other/schema.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("schema.json"), PathBuf::from("other/schema.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        assert!(resolve_file_path_patterns(["/definitely/not/here/*.json"]).is_err());
    }

    #[test]
    fn repeated_inputs_are_read_once() {
        let paths = resolve_file_path_patterns(["a.json", "b.json", "a.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn output_paths_mirror_input_layout() {
        let sources = [PathBuf::from("docs/a/README.md"), PathBuf::from("docs/b/README.md")];
        let outs = output_paths(Path::new("out"), &sources).unwrap();
        assert_eq!(outs, vec![PathBuf::from("out/a/README.md"), PathBuf::from("out/b/README.md")]);

        let single = output_paths(Path::new("out"), &[PathBuf::from("docs/a/README.md")]).unwrap();
        assert_eq!(single, vec![PathBuf::from("out/README.md")]);
    }

    #[test]
    fn colliding_output_paths_are_rejected() {
        let sources = [PathBuf::from("a.md"), PathBuf::from("./a.md")];
        assert!(output_paths(Path::new("out"), &sources).is_err());
    }

    fn run(args: &[&str]) -> Result<()> {
        CommandLineInterface::try_parse_from(std::iter::once("gql-defs").chain(args.iter().copied()))?.run()
    }

    #[test]
    fn interpolate_keeps_same_named_files_apart() {
        let dir = tempfile::tempdir().unwrap();
        for (sub, text) in [("a", "A {{Types.A}}"), ("b", "B {{Types.B}}")] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
            std::fs::write(dir.path().join(sub).join("README.md"), text).unwrap();
        }
        let pattern = dir.path().join("*").join("README.md");
        let out_dir = dir.path().join("out");
        run(&["interpolate", "-i", pattern.to_str().unwrap(), "-o", out_dir.to_str().unwrap()]).unwrap();

        let read = |sub: &str| std::fs::read_to_string(out_dir.join(sub).join("README.md")).unwrap();
        assert_eq!(read("a"), "A #definition-A");
        assert_eq!(read("b"), "B #definition-B");
    }

    #[test]
    fn interpolate_fails_on_broken_reference() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("broken.md");
        std::fs::write(&src, "see {{Bogus.whatever}}").unwrap();
        let out_dir = dir.path().join("out");
        assert!(run(&["interpolate", "-i", src.to_str().unwrap(), "-o", out_dir.to_str().unwrap()]).is_err());
        assert!(!out_dir.join("broken.md").exists());
    }

    #[test]
    fn definitions_key_tables_by_input_path() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        std::fs::write(&first, LIBRARY).unwrap();
        std::fs::write(&second, LIBRARY).unwrap();
        let out = dir.path().join("defs.json");
        let read_out = || -> serde_json::Value {
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap()
        };

        // the same input twice is still a single table
        let first_str = first.to_str().unwrap();
        run(&["definitions", "-i", first_str, first_str, "-o", out.to_str().unwrap()]).unwrap();
        let single = read_out();
        assert!(single.get("Book").is_some());

        run(&["definitions", "-i", first_str, second.to_str().unwrap(), "-o", out.to_str().unwrap()]).unwrap();
        let keyed = read_out();
        assert_eq!(keyed[first_str], single);
        assert_eq!(keyed[second.to_str().unwrap()], single);
    }

    const LIBRARY: &str = include_str!("../tests/fixtures/library.json");

    #[test]
    fn definitions_flags_build_options() {
        let cli = CommandLineInterface::try_parse_from([
            "gql-defs", "definitions", "-i", "schema.json",
            "--strict-scalars", "--scalar", "DateTime=string", "--scalar", "Big=number",
        ]).unwrap();
        let Command::Definitions(target) = &cli.cmd else { panic!("wrong subcommand") };
        let opts = target.options();
        assert_eq!(opts.unknown_scalars, UnknownScalarPolicy::Fail);
        assert_eq!(opts.custom_scalars.get("DateTime"), Some(&Primitive::String));
        assert_eq!(opts.custom_scalars.get("Big"), Some(&Primitive::Number));
        assert!(!opts.include_introspection);
    }
}
