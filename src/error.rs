//! Error taxonomy for a generation run.
//!
//! Every failure is fatal: a run either produces the whole document or
//! nothing. The three families below line up with how the failure is
//! reported to the user; I/O failures around them carry the offending path.

use thiserror::Error;

use crate::ir::ScalarKind;

/// Top-level error for one generation run.
#[derive(Debug, Error)]
pub enum GenError {
    /// Bad invocation (output directory, target name)
    #[error("invocation error")]
    Invocation(#[from] InvocationError),

    /// A leaf's `default_value` has an unsupported or inconsistent type
    #[error("invalid default for parameter '{parameter}'")]
    SchemaType {
        parameter: String,
        #[source]
        source: SchemaTypeError,
    },

    /// The schema document does not have the expected structure
    #[error("invalid schema shape")]
    SchemaShape(#[from] SchemaShapeError),

    /// Failed to read the schema document
    #[error("failed to read schema document '{path}'")]
    DocumentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the schema document
    #[error("failed to parse schema document '{path}' {detail}")]
    DocumentParse { path: String, detail: String },

    /// Failed to read a user supplied template
    #[error("failed to read template '{path}'")]
    TemplateRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the generated document
    #[error("failed to write output file '{path}'")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("the specified output directory does not exist: {path}")]
    OutputDirMissing { path: String },

    #[error("the specified output path is not a directory: {path}")]
    OutputNotDirectory { path: String },

    #[error("target '{target}' is not a valid identifier")]
    InvalidTarget { target: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaTypeError {
    #[error("unsupported default value type: {found}")]
    Unsupported { found: &'static str },

    #[error("array default must have at least one element")]
    EmptyArray,

    #[error("array element {index} is {found}, expected {expected} like the first element")]
    ElementMismatch {
        index: usize,
        expected: ScalarKind,
        found: &'static str,
    },

    #[error("integer {value} does not fit in a 32-bit int")]
    IntegerOutOfRange { value: String },

    #[error("double {value} is not finite")]
    NonFinite { value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaShapeError {
    #[error("the schema document root must be a mapping, found {found}")]
    RootNotMapping { found: &'static str },

    #[error("the schema document must have exactly one root element, found {count}")]
    RootEntryCount { count: usize },

    #[error("the schema document root is '{found}', expected '{target}'")]
    TargetMismatch { target: String, found: String },

    #[error("root '{target}' must be a group of parameters")]
    RootNotGroup { target: String },

    #[error("group '{group}' has no entries")]
    EmptyGroup { group: String },

    #[error("parameter '{parameter}' has no default_value")]
    MissingDefault { parameter: String },

    #[error("'{name}' is not a valid identifier")]
    InvalidIdentifier { name: String },
}
