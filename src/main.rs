/*!
# cc-context CLI

Command-line interface for the C/C++ diagnostic context tool.
*/

use anyhow::{Context, Result};
use cc_context::{
    build_view, parse_diagnostics, AnalyzerConfig, CompilerRunner, ContextResolver,
    DiagnosticSeverity, Reporter, ResolvedDiagnostic, TreeSitterAdapter,
};
use clap::{CommandFactory, Parser};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(
    name = "cc-context",
    version = env!("CARGO_PKG_VERSION"),
    about = "Augments C/C++ compiler diagnostics with syntax-tree context"
)]
struct Cli {
    /// C/C++ source file to check
    file: Option<PathBuf>,

    /// Compiler binary to invoke
    #[arg(long)]
    compiler: Option<String>,

    /// Language standard passed to the compiler
    #[arg(long)]
    std: Option<String>,

    /// Levels of the syntax tree shown below the root
    #[arg(long)]
    max_depth: Option<usize>,

    /// Skip the syntax tree view
    #[arg(long)]
    no_tree: bool,

    /// Report errors only, dropping warnings
    #[arg(short, long)]
    errors_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Configuration file (defaults to ./cc-context.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: no banner, spinner or summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.format == OutputFormat::Json {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!("cc_context={}", log_level))
        .init();

    let Some(file) = cli.file else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if !file.is_file() {
        eprintln!(
            "{} file not found: {}",
            style("error:").red().bold(),
            file.display()
        );
        std::process::exit(1);
    }

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load_from_file(path)?,
        None => AnalyzerConfig::load_or_default()?,
    };
    // Command-line flags override the config file
    let config = config.with_overrides(cli.compiler, cli.std, cli.max_depth, cli.no_tree);
    let max_depth = config.view.max_depth;
    let show_tree = config.view.show_tree;

    let runner = CompilerRunner::new()
        .with_binary(config.compiler.binary)
        .with_std(config.compiler.std)
        .with_extra_args(config.compiler.args);

    let human = cli.format == OutputFormat::Human;
    let term = Term::stdout();

    if human && !cli.quiet {
        term.write_line(&format!(
            "🔍 {} v{}",
            style("cc-context").bold().cyan(),
            env!("CARGO_PKG_VERSION")
        ))?;
    }

    let start_time = Instant::now();

    let pb = if human && !cli.quiet {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Failed to set progress style")?,
    );
    pb.set_message(format!("Compiling {}...", file.display()));

    let raw = match runner.run(&file) {
        Ok(raw) => raw,
        Err(err) => {
            pb.finish_and_clear();
            eprintln!("{} {}", style("error:").red().bold(), err);
            std::process::exit(1);
        }
    };

    pb.set_message("Resolving context...");

    let mut records = parse_diagnostics(&raw);
    if cli.errors_only {
        records.retain(|record| record.severity == DiagnosticSeverity::Error);
    }

    if records.is_empty() {
        pb.finish_and_clear();
        match cli.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Human if !cli.quiet => {
                term.write_line(&format!("✅ {}", style("No diagnostics reported").green()))?;
            }
            OutputFormat::Human => {}
        }
        return Ok(());
    }

    let mut resolver = ContextResolver::new()?;
    let mut resolved = Vec::with_capacity(records.len());
    for record in records {
        let context = match resolver.resolve(&record.file, record.line) {
            Ok(context) => Some(context),
            Err(err) => {
                warn!(
                    "context unavailable for {}:{}: {}",
                    record.file.display(),
                    record.line,
                    err
                );
                None
            }
        };
        resolved.push(ResolvedDiagnostic { record, context });
    }

    pb.finish_and_clear();

    let error_count = resolved
        .iter()
        .filter(|item| item.record.severity == DiagnosticSeverity::Error)
        .count();
    let warning_count = resolved.len() - error_count;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        OutputFormat::Human => {
            print_human(&resolved, show_tree, max_depth)?;
        }
    }

    if human && !cli.quiet {
        term.write_line(&format!("📊 {}", style("Summary").bold()))?;
        term.write_line(&format!(
            "   Errors: {}",
            if error_count > 0 {
                style(error_count).red()
            } else {
                style(error_count).green()
            }
        ))?;
        term.write_line(&format!("   Warnings: {}", style(warning_count).yellow()))?;
        term.write_line(&format!(
            "   Analysis time: {:.2?}",
            style(start_time.elapsed()).dim()
        ))?;
    }

    // Non-zero exit when errors were reported, same as the compiler itself
    if error_count > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_human(resolved: &[ResolvedDiagnostic], show_tree: bool, max_depth: usize) -> Result<()> {
    let reporter = Reporter::new(console::colors_enabled());
    let mut adapter = if show_tree && max_depth > 0 {
        Some(TreeSitterAdapter::new()?)
    } else {
        None
    };

    for item in resolved {
        print!("{}", reporter.format_diagnostic(&item.record));

        match &item.context {
            Some(context) => print!("{}", reporter.format_context(context, item.record.line)),
            None => println!("  {}", style("context unavailable").yellow()),
        }

        // The tree is rebuilt per diagnostic because different records can
        // point into different files.
        if let Some(adapter) = adapter.as_mut() {
            match adapter.parse_file(&item.record.file) {
                Ok(root) => {
                    let view = build_view(&root, &item.record.file, max_depth);
                    print!("{}", reporter.format_tree(&view));
                }
                Err(err) => {
                    println!("  {}", style(format!("tree unavailable: {}", err)).dim());
                }
            }
        }

        println!();
    }

    io::stdout().flush()?;
    Ok(())
}
