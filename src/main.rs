//! brill-templates CLI
//!
//! Generates a template library from a TOML expansion config and prints one
//! line per template: the registry id, a tab, and the canonical form.
//!
//! Usage:
//!   brill-templates [OPTIONS] [CONFIG]
//!
//! Options:
//!   -l, --limit <N>        Stop after generating N templates
//!   --keep-intersecting    Keep templates whose features share positions
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use brill_templates::{ExpansionConfig, Template, TemplateRegistry};

#[derive(Parser)]
#[command(name = "brill-templates")]
#[command(about = "Template library generator for transformation-based taggers")]
struct Cli {
    /// Expansion config file in TOML format (reads from stdin if not provided)
    config: Option<PathBuf>,

    /// Stop after generating this many templates
    #[arg(short, long)]
    limit: Option<usize>,

    /// Keep templates whose features share positions
    #[arg(long)]
    keep_intersecting: bool,
}

fn main() {
    let cli = Cli::parse();

    // No config file and an interactive stdin: nothing to do
    if cli.config.is_none() && io::stdin().is_terminal() {
        eprintln!("usage: brill-templates [OPTIONS] [CONFIG]");
        eprintln!("see --help for details");
        std::process::exit(2);
    }

    let content = match &cli.config {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = match ExpansionConfig::from_toml_str(&content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let feature_lists = match config.feature_lists() {
        Ok(lists) => lists,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let skip_intersecting = !cli.keep_intersecting && config.expand.skip_intersecting;

    let mut registry = TemplateRegistry::new();
    let expansion = Template::expand(
        &mut registry,
        &feature_lists,
        config.combinations(),
        skip_intersecting,
    );

    let mut count = 0usize;
    for template in expansion {
        println!("{}\t{}", template.id(), template);
        count += 1;
        if cli.limit.is_some_and(|limit| count >= limit) {
            break;
        }
    }
    eprintln!("{} templates", count);
}
