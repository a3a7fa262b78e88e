//! Parameter naming.
//!
//! Every leaf is addressed three ways, all derived from the same ancestor
//! path (root excluded) and leaf name:
//! - dotted name `limits.max_speed`, the external parameter identifier
//! - field path `limits_.max_speed`, the access path inside the generated struct
//! - registration temporary `p_limits_max_speed`, a collision-free local

use once_cell::sync::Lazy;
use regex::Regex;

pub const REGISTRATION_PREFIX: &str = "p_";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid")
});

/// Whether `name` can be used verbatim as a struct, field or namespace name.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Ancestor group names of the node currently being visited.
#[derive(Debug, Clone, Default)]
pub struct NamePath {
    segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamNames {
    pub dotted: String,
    pub field_path: String,
    pub registration_temp: String,
}

impl NamePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: &str) {
        self.segments.push(group.to_string());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Dotted name of `leaf` under the current path.
    pub fn dotted(&self, leaf: &str) -> String {
        join_with_suffix(&self.segments, ".") + leaf
    }

    pub fn names(&self, leaf: &str) -> ParamNames {
        build(&self.segments, leaf)
    }
}

pub fn build(ancestors: &[String], leaf: &str) -> ParamNames {
    ParamNames {
        dotted: join_with_suffix(ancestors, ".") + leaf,
        field_path: join_with_suffix(ancestors, "_.") + leaf,
        registration_temp: format!(
            "{REGISTRATION_PREFIX}{}{leaf}",
            join_with_suffix(ancestors, "_")
        ),
    }
}

// each segment followed by `sep`, so an empty path contributes nothing
fn join_with_suffix(segments: &[String], sep: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push_str(segment);
        out.push_str(sep);
    }
    out
}
