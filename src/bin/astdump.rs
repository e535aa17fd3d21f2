//! Standalone dump of the depth-bounded syntax tree view

use anyhow::Result;
use cc_context::{build_view, Reporter, TreeSitterAdapter};
use clap::Parser;
use console::style;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "astdump",
    about = "Prints the depth-bounded syntax tree of a C/C++ source file"
)]
struct Args {
    /// C/C++ source file to parse
    file: PathBuf,

    /// Levels of the tree shown below the root
    #[arg(short = 'd', long, default_value = "3")]
    max_depth: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.file.is_file() {
        eprintln!(
            "{} file not found: {}",
            style("error:").red().bold(),
            args.file.display()
        );
        std::process::exit(1);
    }

    let mut adapter = TreeSitterAdapter::new()?;
    let root = adapter.parse_file(&args.file)?;
    let view = build_view(&root, &args.file, args.max_depth);

    match args.format {
        OutputFormat::Human => {
            let reporter = Reporter::new(console::colors_enabled());
            print!("{}", reporter.format_tree(&view));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}
