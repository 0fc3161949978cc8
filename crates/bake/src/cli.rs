//! bake CLI.

use std::path::PathBuf;

use bake_common::Environment;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use tabled::{Table, Tabled};

use crate::config::Config;
use crate::extract::load_config;

/// bake - Turn compose services into build targets
#[derive(Parser)]
#[command(name = "bake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the compose file (default: compose.yaml, docker-compose.yml, ...)
    #[arg(short, long, global = true, env = "BAKE_FILE")]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// bake commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the build definition
    Print {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// List build targets
    List,

    /// Check that every service can be built or pulled
    Validate,
}

/// Output format for `bake print`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CONTEXT")]
    context: String,
    #[tabled(rename = "DOCKERFILE")]
    dockerfile: String,
    #[tabled(rename = "TAGS")]
    tags: String,
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        let file = match self.file {
            Some(file) => file,
            None => bake_compose::find_compose_file(&std::env::current_dir()?)?,
        };
        let env = Environment::from_process();
        let config = load_config(&file, &env)?;

        match self.command {
            Commands::Print { format } => {
                let output = match format {
                    OutputFormat::Json => config.to_json()?,
                    OutputFormat::Yaml => config.to_yaml()?,
                };
                println!("{}", output.trim_end());
                Ok(())
            }

            Commands::List => {
                if config.is_empty() {
                    println!("No build targets");
                } else {
                    println!("{}", Table::new(rows(&config)));
                }
                Ok(())
            }

            Commands::Validate => {
                println!(
                    "{} is valid: {} build target(s)",
                    file.display(),
                    config.targets.len()
                );
                Ok(())
            }
        }
    }
}

fn rows(config: &Config) -> Vec<TargetRow> {
    let or_dash = |value: Option<&String>| value.map_or_else(|| "-".to_string(), Clone::clone);
    config
        .targets
        .iter()
        .map(|t| TargetRow {
            name: t.name.clone(),
            context: or_dash(t.context.as_ref()),
            dockerfile: or_dash(t.dockerfile.as_ref()),
            tags: if t.tags.is_empty() {
                "-".to_string()
            } else {
                t.tags.join(", ")
            },
        })
        .collect()
}
