//! Lower a parsed schema document into the typed tree in [`crate::ir`].
//!
//! All validation happens here, before anything is emitted: by the time
//! codegen sees a [`Schema`] every name is an identifier, every group is
//! non-empty and every default value is classified.
//!
//! Group vs leaf: a mapping whose values are all mappings is a group. The
//! first non-mapping value found marks the whole mapping as one leaf
//! definition instead; its keys are definition fields (`default_value`,
//! `description`, ...), never sub-groups. A mapping cannot mix sub-groups
//! with a leaf definition.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{GenError, SchemaShapeError};
use crate::inference;
use crate::ir::{LeafDefinition, Schema, SchemaNode};
use crate::names::{is_identifier, NamePath};

pub const DEFAULT_VALUE_KEY: &str = "default_value";
pub const DESCRIPTION_KEY: &str = "description";

/// How a mapping is interpreted, decided by inspecting its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    AllChildrenAreGroups,
    IsLeafDefinition,
}

pub fn classify(map: &Map<String, Value>) -> NodeShape {
    match map.values().find(|v| !v.is_object()) {
        Some(_) => NodeShape::IsLeafDefinition,
        None => NodeShape::AllChildrenAreGroups,
    }
}

pub fn lower_document(doc: &Value, target: &str) -> Result<Schema, GenError> {
    let Value::Object(top) = doc else {
        return Err(SchemaShapeError::RootNotMapping { found: inference::kind_name(doc) }.into());
    };
    if top.len() != 1 {
        return Err(SchemaShapeError::RootEntryCount { count: top.len() }.into());
    }
    let Some((found, root)) = top.iter().next() else {
        return Err(SchemaShapeError::RootEntryCount { count: 0 }.into());
    };
    if found != target {
        return Err(SchemaShapeError::TargetMismatch {
            target: target.to_string(),
            found: found.clone(),
        }.into());
    }

    let root_group = match root {
        Value::Object(map) if map.is_empty() => {
            return Err(SchemaShapeError::EmptyGroup { group: target.to_string() }.into());
        }
        Value::Object(map) if classify(map) == NodeShape::AllChildrenAreGroups => map,
        _ => return Err(SchemaShapeError::RootNotGroup { target: target.to_string() }.into()),
    };

    // the root never contributes to names
    let mut path = NamePath::new();
    let root = lower_group(root_group, &mut path)?;
    Ok(Schema { target: target.to_string(), root })
}

fn lower_group(
    map: &Map<String, Value>,
    path: &mut NamePath,
) -> Result<IndexMap<String, SchemaNode>, GenError> {
    let mut children = IndexMap::with_capacity(map.len());
    // every value of a group is a mapping (see `classify`)
    for (name, child) in map.iter().filter_map(|(k, v)| v.as_object().map(|m| (k, m))) {
        if !is_identifier(name) {
            return Err(SchemaShapeError::InvalidIdentifier { name: path.dotted(name) }.into());
        }
        children.insert(name.clone(), lower_node(name, child, path)?);
    }
    Ok(children)
}

fn lower_node(
    name: &str,
    map: &Map<String, Value>,
    path: &mut NamePath,
) -> Result<SchemaNode, GenError> {
    if map.is_empty() {
        return Err(SchemaShapeError::EmptyGroup { group: path.dotted(name) }.into());
    }
    match classify(map) {
        NodeShape::AllChildrenAreGroups => {
            debug!(group = %path.dotted(name), entries = map.len(), "group");
            path.push(name);
            let children = lower_group(map, path);
            path.pop();
            Ok(SchemaNode::Group(children?))
        }
        NodeShape::IsLeafDefinition => lower_leaf(name, map, path).map(SchemaNode::Leaf),
    }
}

fn lower_leaf(
    name: &str,
    map: &Map<String, Value>,
    path: &NamePath,
) -> Result<LeafDefinition, GenError> {
    let parameter = path.dotted(name);
    let Some(raw_default) = map.get(DEFAULT_VALUE_KEY) else {
        return Err(SchemaShapeError::MissingDefault { parameter }.into());
    };
    let default_value = inference::resolve(raw_default).map_err(|source| GenError::SchemaType {
        parameter: parameter.clone(),
        source,
    })?;

    for (key, value) in map {
        if value.is_object() {
            warn!(%parameter, %key, "ignoring mapping-valued entry in parameter definition");
        }
    }

    Ok(LeafDefinition {
        default_value,
        description: map.get(DESCRIPTION_KEY).and_then(Value::as_str).map(str::to_string),
    })
}
