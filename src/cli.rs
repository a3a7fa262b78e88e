//! Minimal CLI: schema document → parameter struct header
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::output::{generate_document, generate_to_dir, GeneratorOptions};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate a typed rclcpp parameter struct, with update and declaration code, from a YAML schema
#[derive(Parser, Debug)]
#[command(name = "gen-param-struct", version)]
pub struct CommandLineInterface {
    /// directory the generated header is written into (must already exist)
    out_dir: PathBuf,

    /// schema document (YAML, or JSON with a .json extension)
    schema: PathBuf,

    /// the schema's single top-level entry; names the struct and the output file
    target: String,

    /// template file to use instead of the embedded default
    #[arg(long)]
    template: Option<PathBuf>,

    /// output file extension
    #[arg(long, default_value = "h")]
    extension: String,

    /// print the generated header to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Log to stderr. `RUST_LOG` directives refine the `-v` default.
    pub fn init_tracing(&self) {
        let level = match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            template: self.template.clone(),
            extension: self.extension.clone(),
        }
    }

    pub fn run(&self) -> Result<()> {
        let options = self.options();
        let context = || format!("generating '{}' from {}", self.target, self.schema.display());

        if self.dry_run {
            let header = generate_document(&self.schema, &self.target, &options).with_context(context)?;
            print!("{header}");
            return Ok(());
        }

        generate_to_dir(&self.out_dir, &self.schema, &self.target, &options).with_context(context)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CommandLineInterface::command().debug_assert();
    }

    #[test]
    fn three_positionals_are_required() {
        assert!(CommandLineInterface::try_parse_from(["gen-param-struct", "out", "schema.yaml"]).is_err());
        assert!(CommandLineInterface::try_parse_from(["gen-param-struct", "out", "s.yaml", "ctrl", "extra"]).is_err());

        let cli = CommandLineInterface::try_parse_from(["gen-param-struct", "out", "s.yaml", "ctrl", "-vv"]).unwrap();
        assert_eq!(cli.out_dir, PathBuf::from("out"));
        assert_eq!(cli.target, "ctrl");
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.options().extension, "h");
        assert!(cli.options().template.is_none());
    }
}
