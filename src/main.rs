mod cli;
mod console;

use docforge::{
    config, converter, intake, BatchCoordinator, ConversionJob, DocumentConverter,
    OfficeConverter,
};
use docforge_common::ConversionKind;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use console::ConsoleSink;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "docforge=trace,docforge_common=debug".to_string()
        } else {
            "docforge=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            kind,
        } => convert_file(&input, output, kind, cli.config.as_deref()),
        Commands::Batch {
            inputs,
            kind,
            output_dir,
            jobs,
            recursive,
            json,
        } => {
            let options = BatchOptions {
                kind,
                output_dir,
                jobs,
                recursive,
                json,
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_batch(&inputs, options, cli.config.as_deref()))
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("docforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Build the office converter, failing early if `soffice` cannot be found.
fn office_converter(settings: &config::ConverterConfig) -> Result<Arc<dyn DocumentConverter>> {
    converter::resolve_tool(&settings.soffice_path).with_context(|| {
        format!(
            "LibreOffice is required for conversion; install it or set converter.soffice_path (currently {:?})",
            settings.soffice_path
        )
    })?;
    Ok(Arc::new(OfficeConverter::new(settings)))
}

fn convert_file(
    input: &Path,
    output: Option<PathBuf>,
    kind: Option<ConversionKind>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let kind = match kind.or_else(|| ConversionKind::infer(input)) {
        Some(kind) => kind,
        None => anyhow::bail!(
            "Cannot tell the conversion direction for {:?}; pass --kind",
            input
        ),
    };
    intake::validate_input(input, kind)?;

    let output = output.unwrap_or_else(|| {
        intake::output_path_for(input, kind, config.output.directory.as_deref())
    });
    let converter = office_converter(&config.converter)?;

    tracing::info!("Converting {:?} -> {:?}", input, output);
    let sink = ConsoleSink::new(false);
    let job = ConversionJob::new(input, &output, kind);
    match docforge::convert_single(converter, &sink, job) {
        Ok(()) => {
            println!("Output: {}", output.display());
            Ok(())
        }
        Err(e) => anyhow::bail!("Conversion failed: {}", e),
    }
}

struct BatchOptions {
    kind: ConversionKind,
    output_dir: Option<PathBuf>,
    jobs: Option<usize>,
    recursive: bool,
    json: bool,
}

async fn run_batch(inputs: &[PathBuf], options: BatchOptions, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let files = intake::collect_inputs(inputs, options.kind, options.recursive)?;
    if files.is_empty() {
        anyhow::bail!("No .{} files found to convert", options.kind.input_extension());
    }

    let output_dir = options.output_dir.or(config.output.directory.clone());
    let jobs = intake::plan_jobs(&files, options.kind, output_dir.as_deref())?;
    if let Some(ref dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }

    let converter = office_converter(&config.converter)?;
    let limit = options.jobs.unwrap_or(config.batch.concurrency_limit);
    let (events, printer) = console::spawn_printer(options.json);
    let coordinator = BatchCoordinator::with_limit(converter, Arc::new(events), limit)?;

    tracing::info!(
        "Converting {} files ({}), up to {} at a time",
        jobs.len(),
        options.kind,
        limit
    );
    coordinator.submit_all(jobs);
    let summary = coordinator.wait().await;

    // Dropping the last coordinator handle closes the event channel.
    drop(coordinator);
    printer.await.context("Event printer stopped unexpectedly")?;

    if !summary.all_succeeded() {
        anyhow::bail!("{} of {} conversions failed", summary.failed, summary.total);
    }
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Checking external tools...\n");

    let tools = converter::check_tools(&config.converter.soffice_path);
    let available = tools.iter().any(|t| t.available);

    for tool in &tools {
        let status = if tool.available { "✓" } else { "✗" };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if available {
        println!("An office suite is available; conversions can run.");
    } else {
        println!("LibreOffice was not found. Install it to enable conversions.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            print_config(&config);
        }
    }

    Ok(())
}

fn print_config(config: &config::Config) {
    println!("  Concurrency limit: {}", config.batch.concurrency_limit);
    println!("  soffice: {}", config.converter.soffice_path);
    match config.output.directory {
        Some(ref dir) => println!("  Output directory: {}", dir.display()),
        None => println!("  Output directory: next to each input"),
    }
}
