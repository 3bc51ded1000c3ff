use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use settings::Settings;
use toolflow_flow::{stage_scores, FlowDirection, FlowEngine};
use toolflow_protocol::{
    flow_links_schema, serialize_json_pretty, CatalogSummary, ErrorEnvelope, FlowLinksResponse,
    RankResponse, RankedLink, StageCount, StageHits, StageReport,
};

mod report;
mod settings;

#[derive(Parser)]
#[command(name = "toolflow")]
#[command(about = "Suggest which tools come before and after a tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Catalog file, .json or .toml (overrides TOOLFLOW_CATALOG; default: built-in)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Engine config file, TOML (overrides TOOLFLOW_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the before/after links for a tool
    Links(LinksArgs),

    /// Explain which stage a tool is classified into
    Stage(StageArgs),

    /// List every scored candidate for one direction
    Rank(RankArgs),

    /// Write links for every tool as JSON
    Export(ExportArgs),

    /// Validate the catalog and summarize stages
    Catalog(CatalogArgs),

    /// Print the JSON Schema of the links response
    Schema,
}

#[derive(Args)]
struct LinksArgs {
    /// Tool slug
    slug: String,

    /// Maximum links per direction (default: config default_limit)
    #[arg(long, short = 'n')]
    limit: Option<usize>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct StageArgs {
    /// Tool slug
    slug: String,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RankArgs {
    /// Tool slug
    slug: String,

    /// Which side of the tool to rank
    #[arg(long, short = 'd', value_enum, default_value_t = DirectionArg::After)]
    direction: DirectionArg,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    /// Maximum links per direction (default: config default_limit)
    #[arg(long, short = 'n')]
    limit: Option<usize>,

    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct CatalogArgs {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Before,
    After,
}

impl DirectionArg {
    fn as_domain(self) -> FlowDirection {
        match self {
            DirectionArg::Before => FlowDirection::Before,
            DirectionArg::After => FlowDirection::After,
        }
    }
}

/// Failure with a stable machine-readable code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct CodedError {
    code: &'static str,
    message: String,
    hint: Option<String>,
}

fn unknown_tool(slug: &str) -> anyhow::Error {
    CodedError {
        code: "unknown_tool",
        message: format!("No tool with slug {slug:?}"),
        hint: Some("Run `toolflow catalog` to list the catalog".to_string()),
    }
    .into()
}

fn error_envelope(err: &anyhow::Error) -> ErrorEnvelope {
    match err.downcast_ref::<CodedError>() {
        Some(coded) => ErrorEnvelope {
            code: coded.code.to_string(),
            message: coded.message.clone(),
            hint: coded.hint.clone(),
        },
        None => ErrorEnvelope {
            code: "error".to_string(),
            message: format!("{err:#}"),
            hint: None,
        },
    }
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn main() {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Links(args) => args.json,
        Commands::Stage(args) => args.json,
        Commands::Rank(args) => args.json,
        Commands::Catalog(args) => args.json,
        Commands::Export(_) | Commands::Schema => true,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if let Err(err) = run(cli) {
        if json_output {
            let envelope = error_envelope(&err);
            match serialize_json_pretty(&envelope) {
                Ok(body) => {
                    let _ = print_stdout(&body);
                }
                Err(_) => eprintln!("Error: {err:#}"),
            }
        } else {
            eprintln!("Error: {err:#}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli.catalog, cli.config);

    match cli.command {
        Commands::Links(args) => run_links(&settings.build_engine()?, args),
        Commands::Stage(args) => run_stage(&settings.build_engine()?, args),
        Commands::Rank(args) => run_rank(&settings.build_engine()?, args),
        Commands::Export(args) => run_export(&settings.build_engine()?, args),
        Commands::Catalog(args) => run_catalog(&settings.build_engine()?, args),
        Commands::Schema => print_stdout(&flow_links_schema()?),
    }
}

fn run_links(engine: &FlowEngine, args: LinksArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(engine.config().default_limit);
    let response = FlowLinksResponse::resolve(engine, &args.slug, limit);

    if args.json {
        print_stdout(&serialize_json_pretty(&response)?)
    } else {
        print_stdout(report::render_links(&response).trim_end())
    }
}

fn run_stage(engine: &FlowEngine, args: StageArgs) -> Result<()> {
    let tool = engine
        .catalog()
        .get(&args.slug)
        .ok_or_else(|| unknown_tool(&args.slug))?;
    let stage = engine
        .stage_of(&tool.slug)
        .ok_or_else(|| unknown_tool(&args.slug))?;

    let names = |stages: &[toolflow_flow::Stage]| -> Vec<String> {
        stages.iter().map(|s| s.as_str().to_string()).collect()
    };
    let out = StageReport {
        slug: tool.slug.clone(),
        stage: stage.as_str().to_string(),
        scores: stage_scores(&tool.combined_text())
            .into_iter()
            .map(|(stage, hits)| StageHits {
                stage: stage.as_str().to_string(),
                hits,
            })
            .collect(),
        before_targets: names(toolflow_flow::target_stages(stage, FlowDirection::Before)),
        after_targets: names(toolflow_flow::target_stages(stage, FlowDirection::After)),
    };

    if args.json {
        print_stdout(&serialize_json_pretty(&out)?)
    } else {
        print_stdout(report::render_stage(&out).trim_end())
    }
}

fn run_rank(engine: &FlowEngine, args: RankArgs) -> Result<()> {
    if !engine.catalog().contains(&args.slug) {
        return Err(unknown_tool(&args.slug));
    }
    let direction = args.direction.as_domain();
    let response = RankResponse {
        slug: args.slug.clone(),
        direction: direction.as_str().to_string(),
        candidates: engine
            .rank(&args.slug, direction)
            .iter()
            .map(RankedLink::from)
            .collect(),
    };

    if args.json {
        print_stdout(&serialize_json_pretty(&response)?)
    } else {
        print_stdout(report::render_rank(&response).trim_end())
    }
}

fn run_export(engine: &FlowEngine, args: ExportArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(engine.config().default_limit);
    let entries: Vec<FlowLinksResponse> = engine
        .catalog()
        .iter()
        .map(|tool| FlowLinksResponse::resolve(engine, &tool.slug, limit))
        .collect();
    let body = serialize_json_pretty(&entries)?;

    match args.out {
        Some(path) => {
            fs::write(&path, format!("{body}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote links for {} tools to {}", entries.len(), path.display());
            Ok(())
        }
        None => print_stdout(&body),
    }
}

fn run_catalog(engine: &FlowEngine, args: CatalogArgs) -> Result<()> {
    let catalog = engine.catalog();
    if catalog.is_empty() {
        log::warn!("catalog is empty; every lookup will return no links");
    }
    let categories: BTreeSet<&str> = catalog.iter().map(|t| t.category.as_str()).collect();
    let summary = CatalogSummary {
        tools: catalog.len(),
        categories: categories.into_iter().map(str::to_string).collect(),
        stages: engine
            .stage_histogram()
            .into_iter()
            .map(|(stage, tools)| StageCount {
                stage: stage.as_str().to_string(),
                tools,
            })
            .collect(),
    };

    if args.json {
        print_stdout(&serialize_json_pretty(&summary)?)
    } else {
        print_stdout(report::render_catalog(&summary).trim_end())
    }
}
