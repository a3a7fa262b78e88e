//! Schema-driven generator for typed rclcpp parameter structs.
//!
//! Pipeline: parse the schema document ([`path_de`]), lower it into a typed
//! tree ([`lower`], [`inference`]), emit the struct, dispatch and
//! registration fragments ([`codegen`], [`names`]), and stitch them into a
//! template ([`template`]). [`output`] drives one whole run.
pub mod cli;
pub mod codegen;
pub mod error;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod names;
pub mod output;
pub mod path_de;
pub mod template;

pub use error::GenError;
pub use output::{generate, generate_document, generate_to_dir, GeneratorOptions};
