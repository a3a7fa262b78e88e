//! Boilerplate assembly: stitch the generated fragments into a template.
//!
//! The template is plain text with `**MARKER**` placeholders. Markers are
//! substituted in a single pass over the template, so generated text (for
//! example a string default that happens to contain `**PARAM_SET**`) is
//! never re-scanned. Anything else in the template passes through verbatim.

use std::borrow::Cow;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::codegen::Artifact;
use crate::error::GenError;

pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/param_struct.h.in");

pub const COMMENTS: &str = "// this is auto-generated code ";
pub const INCLUDES: [&str; 3] = ["rclcpp/node.hpp", "vector", "string"];

pub const PLACEHOLDERS: [&str; 7] = [
    "COMMENTS",
    "INCLUDES",
    "NAMESPACE",
    "STRUCT_NAME",
    "STRUCT_CONTENT",
    "PARAM_SET",
    "DECLARE_PARAMS",
];

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(COMMENTS|INCLUDES|NAMESPACE|STRUCT_NAME|STRUCT_CONTENT|PARAM_SET|DECLARE_PARAMS)\*\*")
        .expect("placeholder regex is valid")
});

pub fn namespace(target: &str) -> String {
    format!("{target}_parameters")
}

pub fn includes() -> String {
    INCLUDES
        .iter()
        .map(|header| format!("#include <{header}>"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill every placeholder of `template`.
pub fn render(template: &str, target: &str, artifact: &Artifact) -> String {
    let includes = includes();
    let namespace = namespace(target);
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| -> String {
            match &caps[1] {
                "COMMENTS" => COMMENTS.to_string(),
                "INCLUDES" => includes.clone(),
                "NAMESPACE" => namespace.clone(),
                "STRUCT_NAME" => target.to_string(),
                "STRUCT_CONTENT" => artifact.struct_body.clone(),
                "PARAM_SET" => artifact.param_set.clone(),
                "DECLARE_PARAMS" => artifact.declare_params.clone(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// The user's template if one was given, else the embedded default.
pub fn load(path: Option<&Path>) -> Result<Cow<'static, str>, GenError> {
    match path {
        None => Ok(Cow::Borrowed(DEFAULT_TEMPLATE)),
        Some(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| GenError::TemplateRead {
                path: path.display().to_string(),
                source,
            }),
    }
}
