//! Emit the three synchronized C++ fragments for a [`Schema`].
//!
//! Every leaf contributes, as one unit:
//! - a field declaration in the struct body (inside one `struct` block per
//!   enclosing group)
//! - a dispatch clause that assigns the field when a parameter change with
//!   its dotted name arrives
//! - a registration clause that declares the parameter with the compiled
//!   default, or adopts the value already registered under that name
//!
//! All three address the field through the same [`ParamNames`].

use tracing::debug;

use crate::inference::render_default;
use crate::ir::{LeafDefinition, Schema, SchemaNode};
use crate::names::{NamePath, ParamNames};

// indentation of the placeholders' surroundings in the template
const STRUCT_INDENT: &str = "  ";
const PARAM_SET_INDENT: &str = "      ";
const DECLARE_INDENT: &str = "    ";

/// Generated text, consumed once by the template step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    pub struct_body: String,
    pub param_set: String,
    pub declare_params: String,
}

/// Traversal context: ancestor path plus the growing output buffers.
#[derive(Debug, Default)]
pub struct Codegen {
    path: NamePath,
    out: Artifact,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit every entry of the root group. The root itself is never wrapped.
    pub fn emit(&mut self, schema: &Schema) {
        for (name, node) in &schema.root {
            self.emit_node(name, node);
        }
    }

    pub fn into_artifact(self) -> Artifact {
        self.out
    }

    fn indent(&self) -> String {
        STRUCT_INDENT.repeat(self.path.depth() + 1)
    }

    fn emit_node(&mut self, name: &str, node: &SchemaNode) {
        match node {
            SchemaNode::Group(children) => {
                let indent = self.indent();
                self.out.struct_body.push_str(&format!("{indent}struct {name} {{\n"));
                self.path.push(name);
                for (child, node) in children {
                    self.emit_node(child, node);
                }
                self.path.pop();
                self.out.struct_body.push_str(&format!("{indent}}} {name}_;\n"));
            }
            SchemaNode::Leaf(def) => self.emit_leaf(name, def),
        }
    }

    fn emit_leaf(&mut self, name: &str, def: &LeafDefinition) {
        let ParamNames { dotted, field_path, registration_temp } = self.path.names(name);
        let ty = def.default_value.leaf_type();
        let conversion = ty.conversion();
        debug!(
            parameter = %dotted,
            ty = %ty.cpp_type(),
            description = def.description.as_deref(),
            "leaf"
        );

        // field
        let indent = self.indent();
        self.out.struct_body.push_str(&format!(
            "{indent}{} {name}_ = {};\n",
            ty.cpp_type(),
            render_default(&def.default_value),
        ));

        // dispatch
        let i = PARAM_SET_INDENT;
        let s = &mut self.out.param_set;
        s.push_str(&format!("{i}if (param.get_name() == \"{dotted}\") {{\n"));
        s.push_str(&format!("{i}  params_.{field_path}_ = param.{conversion};\n"));
        s.push_str(&format!("{i}}}\n"));

        // registration: declare the compiled default, or adopt the existing value
        let i = DECLARE_INDENT;
        let s = &mut self.out.declare_params;
        s.push_str(&format!("{i}if (!parameters_interface->has_parameter(\"{dotted}\")) {{\n"));
        s.push_str(&format!("{i}  auto {registration_temp} = rclcpp::ParameterValue(params_.{field_path}_);\n"));
        s.push_str(&format!("{i}  parameters_interface->declare_parameter(\"{dotted}\", {registration_temp});\n"));
        s.push_str(&format!("{i}}} else {{\n"));
        s.push_str(&format!(
            "{i}  params_.{field_path}_ = parameters_interface->get_parameter(\"{dotted}\").{conversion};\n"
        ));
        s.push_str(&format!("{i}}}\n"));
    }
}
