//! Template Creator CLI
//!
//! Usage:
//!   template-creator generate [OPTIONS] <SCREEN>
//!   template-creator instantiate [OPTIONS] <TEMPLATE>
//!
//! `generate` converts a screen description (plain JSON or a framed `.scm`
//! screen file) into a template. `instantiate` flattens a template with
//! parameter values, the way the runtime extension does.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use template_creator::{
    generate_template_with_config, instantiate, parse_screen_source, validate, ConvertConfig,
    ExtensionMap, TemplateDocument,
};

#[derive(Parser)]
#[command(name = "template-creator", version)]
#[command(about = "Generate DynamicComponents templates from app-builder screens")]
struct Cli {
    /// Log every rewrite and filter decision
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a screen description into a template
    Generate {
        /// Screen file (`.scm` or plain JSON); reads from stdin when omitted
        input: Option<PathBuf>,

        /// Screen name used for the output file name (default: input file stem)
        #[arg(short, long)]
        screen: Option<String>,

        /// Flat JSON map of extension short names to full class names
        #[arg(short, long)]
        extensions: Option<PathBuf>,

        /// Extension descriptor (`components.json`); may be repeated
        #[arg(short, long = "descriptor")]
        descriptors: Vec<PathBuf>,

        /// Configuration file (TOML format)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fail on malformed colors and child lists instead of keeping raw values
        #[arg(long)]
        strict: bool,

        /// Output file (default: "<AppName> - <screen>.json")
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the template to stdout
        #[arg(long)]
        stdout: bool,
    },
    /// Flatten a template with parameter values
    Instantiate {
        /// Template JSON file
        template: PathBuf,

        /// Value for the next template key, in key order; may be repeated
        #[arg(short, long = "param")]
        params: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            screen,
            extensions,
            descriptors,
            config,
            strict,
            output,
            stdout,
        } => {
            let config = load_config(config.as_deref(), strict);
            let extensions = load_extensions(extensions.as_deref(), &descriptors);
            let (source, filename) = read_input(input.as_deref());

            let screen_value = match parse_screen_source(&source) {
                Ok(value) => value,
                Err(e) => {
                    eprint!("{}", e.format(&source, &filename));
                    process::exit(1);
                }
            };
            let doc = match generate_template_with_config(
                &screen_value,
                &extensions,
                &config.rewrite,
                &config.template,
            ) {
                Ok(doc) => doc,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            for issue in validate(&doc) {
                tracing::warn!("{}", issue);
            }

            let json = match doc.to_json_pretty() {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error serializing template: {}", e);
                    process::exit(1);
                }
            };
            if stdout {
                println!("{}", json);
                return;
            }

            let screen_name = screen
                .or_else(|| {
                    input
                        .as_deref()
                        .and_then(Path::file_stem)
                        .map(|s| s.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| "Screen1".to_string());
            let path = output.unwrap_or_else(|| PathBuf::from(doc.file_name(&screen_name)));
            if let Err(e) = fs::write(&path, json) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                process::exit(1);
            }
            tracing::info!(path = %path.display(), "template written");
        }
        Commands::Instantiate { template, params } => {
            let content = match fs::read_to_string(&template) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", template.display(), e);
                    process::exit(1);
                }
            };
            let doc = match TemplateDocument::from_json(&content) {
                Ok(doc) => doc,
                Err(e) => {
                    eprintln!("Error parsing template '{}': {}", template.display(), e);
                    process::exit(1);
                }
            };
            match instantiate(&doc, &params) {
                Ok(instances) => match serde_json::to_string_pretty(&instances) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, strict: bool) -> ConvertConfig {
    let config = match path {
        Some(path) => match ConvertConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ConvertConfig::default(),
    };
    if strict {
        config.with_strict(true)
    } else {
        config
    }
}

fn load_extensions(map: Option<&Path>, descriptors: &[PathBuf]) -> ExtensionMap {
    let mut extensions = match map {
        Some(path) => match ExtensionMap::from_file(path) {
            Ok(map) => map,
            Err(e) => {
                eprintln!("Error loading extensions '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ExtensionMap::new(),
    };
    for path in descriptors {
        if let Err(e) = extensions.load_descriptor_file(path) {
            eprintln!("Error loading descriptor '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
    extensions
}

/// Read the screen source and the name to show in error reports
fn read_input(input: Option<&Path>) -> (String, String) {
    match input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
