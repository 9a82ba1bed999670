// crates/cps-xml-dump/src/main.rs
//! Prints the object tree built from one or more control panel XML files.
//!
//! ```text
//! cps-xml-dump SampleXMLs/testListProperty.xml
//! cps-xml-dump --format json controlPanel.xml
//! cps-xml-dump --find hint controlPanel.xml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cps_xml::{LoadOptions, Node, ROOT_NAME, load_from_path_with_options};
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented `field=value` lines.
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// XML files to load
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print only the values of this field, collected at any depth
    #[arg(long, value_name = "FIELD")]
    find: Option<String>,

    /// Name of the synthetic root node
    #[arg(long, default_value = ROOT_NAME)]
    root_name: String,

    /// Accept end tags whose name does not match the open element
    #[arg(long, default_value_t = false)]
    no_check_end_names: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = LoadOptions {
        root_name: args.root_name.clone(),
        check_end_names: !args.no_check_end_names,
    };

    for path in &args.files {
        info!("Processing xmlfile: {}", path.display());
        let root = load_from_path_with_options(path, &options)
            .with_context(|| format!("failed to load {}", path.display()))?;
        debug!("{} top-level field(s) in {}", root.fields.len(), path.display());

        if args.files.len() > 1 {
            println!("==> {} <==", path.display());
        }
        print_tree(&args, path, &root)?;
    }
    Ok(())
}

fn print_tree(args: &Args, path: &Path, root: &Node) -> Result<()> {
    match (&args.find, args.format) {
        (Some(field), Format::Text) => {
            for value in root.find_field(field) {
                match value.as_node() {
                    Some(node) => print!("{}", node),
                    None => println!("{}", value.text()),
                }
            }
        }
        (Some(field), Format::Json) => {
            let found = root.find_field(field);
            let json = serde_json::to_string_pretty(&found)
                .with_context(|| format!("failed to serialize {}", path.display()))?;
            println!("{}", json);
        }
        (None, Format::Text) => print!("{}", root),
        (None, Format::Json) => {
            let json = serde_json::to_string_pretty(root)
                .with_context(|| format!("failed to serialize {}", path.display()))?;
            println!("{}", json);
        }
    }
    Ok(())
}
