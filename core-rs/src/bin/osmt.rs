//! OSMT - skills graph builder CLI
//!
//! Converts OSMT rich skill descriptors into a merged ontology, label
//! reports and property-graph bulk-load files.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::Level;

use osmt_graph::{
    export_property_graph, generate_reports, Assembler, BuilderConfig, BuildReport, ProjectionSummary, ReportKind,
    ReportOptions, SkillMapper,
};

#[derive(Parser)]
#[command(name = "osmt")]
#[command(version)]
#[command(about = "OSMT skills graph builder", long_about = None)]
struct Cli {
    /// Config file (defaults to ./osmt.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one JSON record into a Turtle fragment
    Convert {
        /// Source JSON record
        src: PathBuf,
        /// Destination .ttl file
        dst: PathBuf,
    },
    /// Convert every record under the JSON root and merge the fragments
    Build(BuildArgs),
    /// Write label reports from the merged ontology
    Validate(ValidateArgs),
    /// Write property-graph node and relationship CSVs
    Graph(GraphArgs),
    /// build, then validate, then graph
    Run,
}

#[derive(Args)]
struct BuildArgs {
    /// Directory scanned recursively for *.json records
    #[arg(long)]
    json_root: Option<PathBuf>,
    /// Directory for Turtle output
    #[arg(long)]
    ttl_out: Option<PathBuf>,
    /// Merged ontology file
    #[arg(long)]
    merged: Option<PathBuf>,
    /// Keep per-record fragments in the staging directory
    #[arg(long)]
    keep_fragments: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// Merged ontology to read
    #[arg(long)]
    ttl: Option<PathBuf>,
    /// Directory for the label reports
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Preferred label language
    #[arg(long)]
    lang: Option<String>,
    /// Include skos:altLabel in the alignment report
    #[arg(long)]
    alt: bool,
    #[arg(long)]
    alignments: bool,
    #[arg(long)]
    bls: bool,
    #[arg(long)]
    keywords: bool,
    #[arg(long)]
    rsd: bool,
    /// Every report (the default when none is selected)
    #[arg(long)]
    all: bool,
}

#[derive(Args)]
struct GraphArgs {
    /// Merged ontology to read
    #[arg(long)]
    ttl: Option<PathBuf>,
    /// Directory for the CSV files
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Preferred label language
    #[arg(long)]
    lang: Option<String>,
}

impl ValidateArgs {
    fn kinds(&self) -> Vec<ReportKind> {
        if self.all {
            return ReportKind::ALL.to_vec();
        }
        let selected = [
            (self.alignments, ReportKind::Alignments),
            (self.bls, ReportKind::Bls),
            (self.keywords, ReportKind::Keywords),
            (self.rsd, ReportKind::Rsd),
        ];
        selected.iter().filter(|(on, _)| *on).map(|(_, kind)| *kind).collect()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let mut config = BuilderConfig::discover(cli.config.as_deref(), &cwd).context("Failed to load config")?;
    config.apply_env();

    init_logging(cli.verbose, &config.log_level);

    match cli.command {
        Commands::Convert { src, dst } => handle_convert(&config, &src, &dst),
        Commands::Build(args) => {
            if let Some(root) = args.json_root {
                config.paths.json_root = root;
            }
            if let Some(dir) = args.ttl_out {
                config.paths.ttl_out = dir;
            }
            if args.merged.is_some() {
                config.paths.merged = args.merged;
            }
            config.keep_fragments |= args.keep_fragments;
            handle_build(&config).map(|_| ())
        }
        Commands::Validate(args) => {
            let ttl = args.ttl.clone().unwrap_or_else(|| config.merged_path());
            let out_dir = args.out_dir.clone().unwrap_or_else(|| config.paths.reports.clone());
            let options = ReportOptions {
                lang: args.lang.clone().unwrap_or_else(|| config.lang.clone()),
                include_alt: args.alt,
                kinds: args.kinds(),
            };
            handle_validate(&ttl, &out_dir, &options)
        }
        Commands::Graph(args) => {
            let ttl = args.ttl.unwrap_or_else(|| config.merged_path());
            let out_dir = args.out_dir.unwrap_or_else(|| config.paths.graph.clone());
            let lang = args.lang.unwrap_or_else(|| config.lang.clone());
            handle_graph(&ttl, &out_dir, &lang)
        }
        Commands::Run => handle_run(&config),
    }
}

fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose {
        Level::DEBUG
    } else {
        Level::from_str(configured).unwrap_or(Level::INFO)
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn mapper_for(config: &BuilderConfig) -> SkillMapper {
    SkillMapper::new()
        .with_policy(config.creator.clone())
        .with_lang(config.lang.clone())
}

fn handle_convert(config: &BuilderConfig, src: &Path, dst: &Path) -> Result<()> {
    let assembler = Assembler::new(mapper_for(config));
    match assembler.convert_file(src, dst) {
        Ok(subject) => {
            println!("{} {} -> {} ({})", "✓".green(), src.display(), dst.display(), subject);
            Ok(())
        }
        Err(e) if e.is_not_a_record() => {
            println!("{} {}: {}", "skipped".yellow(), src.display(), e);
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to convert {}", src.display())),
    }
}

fn handle_build(config: &BuilderConfig) -> Result<BuildReport> {
    let merged = config.merged_path();
    let assembler = Assembler::new(mapper_for(config)).keep_fragments(config.keep_fragments);
    let report = assembler
        .process_directory(&config.paths.json_root, &config.paths.ttl_out, &merged)
        .with_context(|| format!("Build failed for {}", config.paths.json_root.display()))?;

    println!("\n{}", "Build".bold());
    println!("  Converted: {}", report.converted.len().to_string().green());
    println!("  Skipped:   {}", report.skipped.len());
    println!("  Failed:    {}", paint_failures(report.failed.len()));
    for (path, reason) in &report.failed {
        println!("    {} {}", path.display(), reason.dimmed());
    }
    println!("  Merged:    {} fragments, {} triples", report.merge.merged.len(), report.merge.triples);
    if !report.merge.failed.is_empty() {
        println!("  Unparsed:  {}", paint_failures(report.merge.failed.len()));
        for (path, reason) in &report.merge.failed {
            println!("    {} {}", path.display(), reason.dimmed());
        }
    }
    match &report.merge.output {
        Some(path) => println!("  Output:    {}", path.display()),
        None => println!("  Output:    {}", "none (no fragment parsed)".yellow()),
    }

    Ok(report)
}

fn handle_validate(ttl: &Path, out_dir: &Path, options: &ReportOptions) -> Result<()> {
    let totals = generate_reports(ttl, out_dir, options)
        .with_context(|| format!("Failed to write label reports from {}", ttl.display()))?;

    println!("\n{}", "Label reports".bold());
    for (kind, count) in totals {
        println!("  {:<12} {:>6}  {}", kind.to_string(), count, out_dir.join(kind.file_name()).display());
    }
    Ok(())
}

fn handle_graph(ttl: &Path, out_dir: &Path, lang: &str) -> Result<()> {
    let summary = export_property_graph(ttl, out_dir, lang)
        .with_context(|| format!("Failed to project {}", ttl.display()))?;
    print_projection(&summary, out_dir);
    Ok(())
}

fn handle_run(config: &BuilderConfig) -> Result<()> {
    let report = handle_build(config)?;
    let Some(merged) = report.merge.output else {
        bail!("No merged ontology was written; skipping validate and graph");
    };

    let options = ReportOptions {
        lang: config.lang.clone(),
        ..ReportOptions::default()
    };
    handle_validate(&merged, &config.paths.reports, &options)?;
    handle_graph(&merged, &config.paths.graph, &config.lang)
}

fn print_projection(summary: &ProjectionSummary, out_dir: &Path) {
    println!("\n{}", "Property graph".bold());
    for (kind, count) in &summary.nodes {
        println!("  {:<20} {:>6}", kind.class_name(), count);
    }
    for (rel_type, count) in &summary.relationships {
        println!("  {:<20} {:>6}", rel_type, count);
    }
    println!(
        "  {} nodes, {} relationships -> {}",
        summary.total_nodes().to_string().green(),
        summary.total_relationships().to_string().green(),
        out_dir.display()
    );
}

fn paint_failures(n: usize) -> colored::ColoredString {
    if n == 0 {
        n.to_string().normal()
    } else {
        n.to_string().red()
    }
}
