use anyhow::Result;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// Import from cineprog-core
use cineprog_core::{
    MetadataProvider, PipelineStages, ProgramConfig, ProgramOutput, ProgramProcessor, RuleSet,
    TmdbProvider,
};

// Import CLI utilities
use cineprog::{load_config, load_rules, resolve_cache_dir};

#[derive(Parser)]
#[command(name = "cineprog")]
#[command(about = "Extract screening events from OCR'd weekly cinema programs")]
struct Args {
    /// Path to the OCR output (JSON response or form-feed separated text)
    #[arg(short, long, default_value = "ocr_output.json")]
    input: String,

    /// Path to the rules file (cinema aliases, title fixes, version rules)
    #[arg(short, long)]
    rules: Option<String>,

    /// Path to custom config file (YAML or JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Target year for every screening date (required unless the config file sets it)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output file path (if not specified, auto-generated based on input)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format: json (screening array) or js (window.PROGRAM script)
    #[arg(short = 'f', long, default_value = "json", value_parser = ["json", "js"])]
    output_format: String,

    /// Also write the movie catalog (.json, or .js for window.MOVIES)
    #[arg(long)]
    movies_output: Option<String>,

    /// Enrich titles from The Movie Database (requires TMDB_API_KEY)
    #[arg(long)]
    enrich: bool,

    /// Directory for the persistent enrichment cache (default: ~/.cache/cineprog)
    #[arg(long)]
    cache_dir: Option<String>,

    /// Skip the enrichment cache and query the catalog for every title
    #[arg(long)]
    skip_cache: bool,

    /// Enable detailed profiling of all pipeline steps
    #[arg(long)]
    profile: bool,

    /// Dump all intermediate pipeline stage outputs to a directory
    #[arg(long)]
    dump_stages: bool,

    /// Directory for stage dump output (default: test_outputs/stages)
    #[arg(long, default_value = "test_outputs/stages")]
    stages_dir: String,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    println!("🎬 Cineprog Program Extractor");

    // Check if input file exists
    if !Path::new(&args.input).exists() {
        println!("⚠️  Input not found at: {}", args.input);
        println!("   Please check the file path.");
        return Ok(());
    }

    let mut config = match load_config(args.config.as_deref(), args.year) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e:#}");
            std::process::exit(1);
        }
    };
    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using built-in config");
    }
    println!("📅 Target year: {}", config.year);

    // Apply CLI overrides to config
    if args.enrich {
        config.enrichment.enabled = true;
    }

    let rules = match load_rules(args.rules.as_deref()) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("❌ Invalid rules: {e:#}");
            std::process::exit(1);
        }
    };
    if let Some(rules_path) = &args.rules {
        println!(
            "📋 Loaded rules from: {} ({} aliases, {} title fixes)",
            rules_path,
            rules.cinema_aliases.len(),
            rules.title_fixes.len()
        );
    }

    let processor = create_processor(&args, config, rules)?;
    let input_path = Path::new(&args.input);

    // Stage dump mode: capture and save all intermediates
    if args.dump_stages {
        println!("\n🔬 Pipeline stage dump mode");
        match processor.read_pages(input_path) {
            Ok(pages) => {
                let stages = processor.capture_stages(&pages);
                save_stages(&stages, &args.input, &args.stages_dir)?;
                println!("\n✅ All stages dumped to: {}", args.stages_dir);
            }
            Err(e) => {
                eprintln!("❌ Stage dump failed: {e:#}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    match processor.process_file_with_profiling(input_path, args.profile) {
        Ok(output) => {
            println!("✅ Successfully processed program");
            print_metrics(&output);

            let output_path = args
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(&args.input, &args.output_format));
            save_output(&output, &output_path, &args.output_format)?;

            if let Some(movies_path) = &args.movies_output {
                let format = if movies_path.ends_with(".js") { "movies-js" } else { "movies" };
                save_output(&output, movies_path, format)?;
            }
        }
        Err(e) => {
            eprintln!("❌ Processing failed: {e:#}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; progress lines stay on stdout
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cineprog=info,cineprog_core=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Create ProgramProcessor, wiring the metadata catalog and its cache when
/// enrichment was requested
fn create_processor(args: &Args, config: ProgramConfig, rules: RuleSet) -> Result<ProgramProcessor> {
    let provider: Option<Box<dyn MetadataProvider>> = if args.enrich {
        match TmdbProvider::from_env(&config.enrichment) {
            Ok(provider) => {
                println!("🔧 Enrichment enabled ({})", provider.name());
                Some(Box::new(provider) as Box<dyn MetadataProvider>)
            }
            Err(e) => {
                println!("⚠️  {e}, continuing without enrichment");
                None
            }
        }
    } else {
        None
    };

    let cache_dir = if provider.is_none() {
        None
    } else if args.skip_cache {
        println!("🚫 Skipping enrichment cache (--skip-cache enabled)");
        None
    } else {
        let explicit = args.cache_dir.as_deref().or(config.enrichment.cache_dir.as_deref());
        let dir = resolve_cache_dir(explicit)?;
        println!("🗂️  Enrichment cache: {}", dir.display());
        Some(dir.to_string_lossy().into_owned())
    };

    tracing::debug!(
        input = %args.input,
        year = config.year,
        cache_dir = ?cache_dir,
        "Creating program processor"
    );

    ProgramProcessor::new_cli(
        Path::new(&args.input),
        config,
        rules,
        provider,
        cache_dir.as_deref(),
    )
}

fn default_output_path(input: &str, format: &str) -> String {
    let input_name = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    match format {
        "js" => format!("{input_name}_data.js"),
        _ => format!("{input_name}_screenings.json"),
    }
}

fn print_metrics(output: &ProgramOutput) {
    let cinemas: BTreeSet<&str> = output.screenings.iter().map(|s| s.cinema.as_str()).collect();
    let enriched = output
        .screenings
        .iter()
        .filter(|s| s.original_language.is_some())
        .count();

    println!("📊 Program metrics:");
    println!("   - Screenings: {}", output.screenings.len());
    println!("   - Cinemas: {}", cinemas.len());
    println!("   - Movies: {}", output.movies.len());
    println!("   - Enriched screenings: {}", enriched);
}

fn save_stages(stages: &PipelineStages, input: &str, output_dir: &str) -> Result<()> {
    use std::fs;
    fs::create_dir_all(output_dir)?;

    let write_stage = |name: &str, json: String, count: usize| -> Result<()> {
        let path = format!("{}/{}", output_dir, name);
        fs::write(&path, json)?;
        println!("  💾 {} ({} items)", path, count);
        Ok(())
    };

    write_stage("stage0_pages.json", serde_json::to_string_pretty(&stages.pages)?, stages.pages.len())?;
    write_stage(
        "stage1_raw_screenings.json",
        serde_json::to_string_pretty(&stages.raw_screenings)?,
        stages.raw_screenings.len(),
    )?;
    write_stage(
        "stage2_unique_screenings.json",
        serde_json::to_string_pretty(&stages.unique_screenings)?,
        stages.unique_screenings.len(),
    )?;
    write_stage(
        "stage3_ruled_records.json",
        serde_json::to_string_pretty(&stages.ruled_records)?,
        stages.ruled_records.len(),
    )?;
    write_stage(
        "stage4_enriched_records.json",
        serde_json::to_string_pretty(&stages.enriched_records)?,
        stages.enriched_records.len(),
    )?;
    write_stage(
        "stage5_screenings.json",
        serde_json::to_string_pretty(&stages.screenings)?,
        stages.screenings.len(),
    )?;
    write_stage("stage6_blurbs.json", serde_json::to_string_pretty(&stages.blurbs)?, stages.blurbs.len())?;
    write_stage("stage6_movies.json", serde_json::to_string_pretty(&stages.movies)?, stages.movies.len())?;

    // Summary file: quick reference for validation scripts
    let summary = serde_json::json!({
        "input": input,
        "input_hash": stages.input_hash,
        "captured_at": chrono::Utc::now().to_rfc3339(),
        "stage_counts": {
            "pages": stages.pages.len(),
            "raw_screenings": stages.raw_screenings.len(),
            "unique_screenings": stages.unique_screenings.len(),
            "screenings": stages.screenings.len(),
            "blurbs": stages.blurbs.len(),
            "movies": stages.movies.len(),
        }
    });
    let summary_path = format!("{}/summary.json", output_dir);
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    println!("  💾 {}", summary_path);

    Ok(())
}

fn save_output(output: &ProgramOutput, output_path: &str, format: &str) -> Result<()> {
    output.save_with_format(output_path, format)?;

    match format {
        "js" => println!("💾 Program script saved to: {}", output_path),
        "movies" => println!("💾 Movie catalog saved to: {}", output_path),
        "movies-js" => println!("💾 Movie catalog script saved to: {}", output_path),
        _ => println!("💾 Screenings saved to: {}", output_path),
    }

    Ok(())
}
