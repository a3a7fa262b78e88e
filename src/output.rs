//! One generation run, end to end.
//!
//! `document → lower → codegen → template → file`. Nothing touches the
//! output directory until the whole document has been generated, and the
//! final write goes through a uniquely named temp file that is renamed over
//! the target, so a reader never sees a partial header.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::codegen::Codegen;
use crate::error::{GenError, InvocationError};
use crate::lower::lower_document;
use crate::names::is_identifier;
use crate::path_de::{parse_document, DocumentError, DocumentFormat};
use crate::template;

/// Knobs that sit outside the schema document.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// template file; `None` uses the embedded default
    pub template: Option<PathBuf>,
    /// output file extension, without the dot
    pub extension: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { template: None, extension: "h".to_string() }
    }
}

/// Generate the output document from an already-parsed schema document.
pub fn generate(document: &Value, target: &str, template_src: &str) -> Result<String, GenError> {
    if !is_identifier(target) {
        return Err(InvocationError::InvalidTarget { target: target.to_string() }.into());
    }
    let schema = lower_document(document, target)?;
    debug!(target_name = %schema.target, parameters = schema.leaf_count(), "lowered schema");

    let mut cg = Codegen::new();
    cg.emit(&schema);
    let artifact = cg.into_artifact();

    Ok(template::render(template_src, target, &artifact))
}

/// Read, parse and generate from a schema document on disk.
pub fn generate_document(
    schema_path: &Path,
    target: &str,
    options: &GeneratorOptions,
) -> Result<String, GenError> {
    let path_str = schema_path.display().to_string();
    let source = fs::read_to_string(schema_path).map_err(|source| GenError::DocumentRead {
        path: path_str.clone(),
        source,
    })?;
    let format = DocumentFormat::from_path(schema_path);
    debug!(path = %path_str, ?format, "parsing schema document");
    let document = parse_document(&source, format).map_err(|err| match err {
        DocumentError::Syntax(detail) => GenError::DocumentParse { path: path_str, detail },
        DocumentError::Type { parameter, source } => GenError::SchemaType { parameter, source },
    })?;

    let template_src = template::load(options.template.as_deref())?;
    generate(&document, target, &template_src)
}

/// Path of the generated file for `target` inside `out_dir`.
pub fn output_path(out_dir: &Path, target: &str, options: &GeneratorOptions) -> PathBuf {
    out_dir.join(format!("{target}.{}", options.extension))
}

/// Check the output directory, generate, and write `<target>.<ext>` into it.
pub fn generate_to_dir(
    out_dir: &Path,
    schema_path: &Path,
    target: &str,
    options: &GeneratorOptions,
) -> Result<PathBuf, GenError> {
    check_output_dir(out_dir)?;
    let contents = generate_document(schema_path, target, options)?;
    let path = output_path(out_dir, target, options);
    write_atomic(&path, &contents)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote parameter header");
    Ok(path)
}

pub fn check_output_dir(out_dir: &Path) -> Result<(), GenError> {
    let path = out_dir.display().to_string();
    if !out_dir.exists() {
        return Err(InvocationError::OutputDirMissing { path }.into());
    }
    if !out_dir.is_dir() {
        return Err(InvocationError::OutputNotDirectory { path }.into());
    }
    Ok(())
}

/// Writes content to a file atomically: a fresh temp file in the same
/// directory, persisted over `path` by rename.
///
/// The parent directory must already exist. No fixed sibling name is used,
/// so unrelated files next to `path` are never touched.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GenError> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let write_err = |source| GenError::Write { path: path.display().to_string(), source };

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(content.as_bytes()).map_err(write_err)?;
    temp.persist(path).map_err(|err| write_err(err.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DEFAULT_TEMPLATE;
    use serde_json::json;

    #[test]
    fn invalid_target_is_an_invocation_error() {
        let err = generate(&json!({"a b": {}}), "a b", DEFAULT_TEMPLATE).unwrap_err();
        assert!(matches!(
            err,
            GenError::Invocation(InvocationError::InvalidTarget { ref target }) if target == "a b"
        ));
    }

    #[test]
    fn generate_is_deterministic() {
        let doc = json!({"ctrl": {"limits": {"max_speed": {"default_value": 2.5}}, "name": {"default_value": "arm"}}});
        let a = generate(&doc, "ctrl", DEFAULT_TEMPLATE).unwrap();
        let b = generate(&doc, "ctrl", DEFAULT_TEMPLATE).unwrap();
        assert_eq!(a, b);
        assert!(a.contains("namespace ctrl_parameters {"));
        assert!(a.contains("    double max_speed_ = 2.5;\n"));
    }

    #[test]
    fn output_path_uses_target_and_extension() {
        let options = GeneratorOptions { extension: "hpp".into(), ..GeneratorOptions::default() };
        assert_eq!(output_path(Path::new("out"), "ctrl", &options), Path::new("out/ctrl.hpp"));
        assert_eq!(output_path(Path::new("out"), "ctrl", &GeneratorOptions::default()), Path::new("out/ctrl.h"));
    }

    #[test]
    fn write_atomic_leaves_sibling_files_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("ctrl.h");
        let sibling = dir.path().join("ctrl.tmp");
        fs::write(&sibling, "keep me").unwrap();

        write_atomic(&target, "first").unwrap();
        write_atomic(&target, "second").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        assert_eq!(fs::read_to_string(&sibling).unwrap(), "keep me");
        let mut names = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        names.sort();
        assert_eq!(names, ["ctrl.h", "ctrl.tmp"]);
    }

    #[test]
    fn write_atomic_into_missing_dir_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("gone/ctrl.h");
        let err = write_atomic(&target, "x").unwrap_err();
        assert!(matches!(err, GenError::Write { ref path, .. } if path.ends_with("ctrl.h")));
    }

    #[test]
    fn missing_output_dir() {
        let err = check_output_dir(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, GenError::Invocation(InvocationError::OutputDirMissing { .. })));
    }
}
