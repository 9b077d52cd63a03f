use crate::config::{ProgramConfig, RuleSet};
use crate::dedup::deduplicate;
use crate::enrichment::{apply_enrichment, EnrichmentCache, MetadataProvider};
use crate::movies::{build_movies, extract_movie_blurbs, TitleDetector};
use crate::parsing::ProgramScanner;
use crate::preprocessors::{preprocessor_for, OcrJsonPreprocessor, PagePreprocessor};
use crate::rules::apply_rules;
use crate::storage::{calculate_text_hash, EnrichmentStorage, FileStorage, NoOpStorage};
use crate::types::*;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

/// Captured intermediate outputs from each pipeline stage
/// Used for testing and diagnostics: lets you inspect/compare each boundary
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineStages {
    pub input_hash: String,
    pub pages: Vec<PageText>,
    pub raw_screenings: Vec<Screening>,
    pub unique_screenings: Vec<Screening>,
    pub ruled_records: Vec<ScreeningRecord>,
    pub enriched_records: Vec<ScreeningRecord>,
    pub screenings: Vec<ScreeningRecord>,
    pub blurbs: Vec<MovieBlurb>,
    pub movies: Vec<MovieEntry>,
}

impl PipelineStages {
    pub fn output(&self) -> ProgramOutput {
        ProgramOutput {
            screenings: self.screenings.clone(),
            movies: self.movies.clone(),
        }
    }
}

/// Simple profiler that collects timings for pipeline steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        self.timings.push((step_name.to_string(), elapsed));
        println!("⏱️  {}: {:.0}ms", step_name, elapsed.as_millis());

        result
    }

    pub fn print_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        println!("\n📊 Performance Summary:");
        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();

        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            println!(
                "   {:.<35} {:.0}ms ({:.1}%)",
                step,
                duration.as_millis(),
                percentage
            );
        }
        println!("   {:.<35} {:.0}ms", "Total", total.as_millis());
    }
}

pub struct ProgramProcessor {
    preprocessor: Box<dyn PagePreprocessor + Send + Sync>,
    provider: Option<Box<dyn MetadataProvider>>,
    storage: Box<dyn EnrichmentStorage>,
    config: ProgramConfig,
    rules: RuleSet,
    scanner: ProgramScanner,
    titles: TitleDetector,
}

impl ProgramProcessor {
    /// Create ProgramProcessor with full dependency injection
    pub fn new_with_dependencies(
        preprocessor: Box<dyn PagePreprocessor + Send + Sync>,
        provider: Option<Box<dyn MetadataProvider>>,
        storage: Box<dyn EnrichmentStorage>,
        config: ProgramConfig,
        rules: RuleSet,
    ) -> Self {
        let scanner = ProgramScanner::from_config(&config);
        let titles = TitleDetector::new(&config.catalog.ignored_headings);
        Self {
            preprocessor,
            provider,
            storage,
            config,
            rules,
            scanner,
            titles,
        }
    }

    /// OCR JSON input, no enrichment, no persistent cache
    pub fn new(config: ProgramConfig, rules: RuleSet) -> Self {
        Self::new_with_dependencies(
            Box::new(OcrJsonPreprocessor::new()),
            None,
            Box::new(NoOpStorage::new()),
            config,
            rules,
        )
    }

    /// Convenience constructor for CLI usage: preprocessor chosen from the
    /// input extension, file cache when a directory is given
    pub fn new_cli(
        input_path: &Path,
        config: ProgramConfig,
        rules: RuleSet,
        provider: Option<Box<dyn MetadataProvider>>,
        cache_dir: Option<&str>,
    ) -> Result<Self> {
        let storage: Box<dyn EnrichmentStorage> = match cache_dir {
            Some(dir) => Box::new(FileStorage::new(dir)?),
            None => Box::new(NoOpStorage::new()),
        };
        Ok(Self::new_with_dependencies(
            preprocessor_for(input_path),
            provider,
            storage,
            config,
            rules,
        ))
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Read the input document into page texts
    pub fn read_pages(&self, input_path: &Path) -> Result<Vec<PageText>> {
        let pages = self.preprocessor.process_file(input_path)?;
        tracing::info!(
            preprocessor = self.preprocessor.name(),
            pages = pages.len(),
            "Read input pages"
        );
        Ok(pages)
    }

    /// Process an input document end to end
    pub fn process_file(&self, input_path: &Path) -> Result<ProgramOutput> {
        self.process_file_with_profiling(input_path, false)
    }

    pub fn process_file_with_profiling(&self, input_path: &Path, enable_profiling: bool) -> Result<ProgramOutput> {
        let start_time = Instant::now();
        let mut profiler = StepProfiler::new(enable_profiling);

        println!("📄 Processing program: {}", input_path.display());
        let pages = profiler.time_step("0. Read Pages", || self.read_pages(input_path))?;
        let output = self.process_pages_with_profiler(&pages, &mut profiler);

        profiler.print_summary();
        println!(
            "⏱️  Total processing time: {:.0}ms",
            start_time.elapsed().as_millis()
        );
        Ok(output)
    }

    /// Pages -> screenings + movie catalog
    pub fn process_pages(&self, pages: &[PageText]) -> ProgramOutput {
        self.process_pages_with_profiler(pages, &mut StepProfiler::new(false))
    }

    pub fn process_pages_with_profiler(&self, pages: &[PageText], profiler: &mut StepProfiler) -> ProgramOutput {
        let raw = profiler.time_step("1. Table Scan", || self.scanner.scan(pages));
        let unique = profiler.time_step("2. Deduplication", || deduplicate(raw));
        let records: Vec<ScreeningRecord> = unique.into_iter().map(ScreeningRecord::from).collect();

        // Aliases and title fixes first, so enrichment keys on corrected titles
        let records = profiler.time_step("3. Rules", || apply_rules(records, &self.rules));
        let (records, enrichments) = profiler.time_step("4. Enrichment", || self.enrich(records));
        // Again, now that the version rule can see original languages
        let screenings = profiler.time_step("5. Rules (enriched)", || apply_rules(records, &self.rules));

        let movies = profiler.time_step("6. Movie Catalog", || {
            let blurbs = extract_movie_blurbs(pages, &self.titles);
            build_movies(&screenings, &blurbs, &enrichments, self.config.catalog.match_threshold)
        });

        tracing::info!(
            screenings = screenings.len(),
            movies = movies.len(),
            "Program processed"
        );
        ProgramOutput { screenings, movies }
    }

    /// Process pages and capture all intermediate stage outputs
    /// Used for pipeline diagnostics and testing stage boundaries
    pub fn capture_stages(&self, pages: &[PageText]) -> PipelineStages {
        let input_hash = calculate_text_hash(&pages.join("\u{0C}"));

        let raw_screenings = self.scanner.scan(pages);
        println!("📋 Stage 1: {} raw screenings captured", raw_screenings.len());

        let unique_screenings = deduplicate(raw_screenings.clone());
        println!("📋 Stage 2: {} unique screenings", unique_screenings.len());

        let records: Vec<ScreeningRecord> = unique_screenings
            .iter()
            .cloned()
            .map(ScreeningRecord::from)
            .collect();
        let ruled_records = apply_rules(records, &self.rules);
        println!("📋 Stage 3: rules applied ({} records)", ruled_records.len());

        let (enriched_records, enrichments) = self.enrich(ruled_records.clone());
        println!("📋 Stage 4: {} titles enriched", enrichments.len());

        let screenings = apply_rules(enriched_records.clone(), &self.rules);

        let blurbs = extract_movie_blurbs(pages, &self.titles);
        let movies = build_movies(&screenings, &blurbs, &enrichments, self.config.catalog.match_threshold);
        println!(
            "📋 Stage 5: {} blurbs, {} catalog entries",
            blurbs.len(),
            movies.len()
        );

        PipelineStages {
            input_hash,
            pages: pages.to_vec(),
            raw_screenings,
            unique_screenings,
            ruled_records,
            enriched_records,
            screenings,
            blurbs,
            movies,
        }
    }

    fn active_provider(&self) -> Option<&dyn MetadataProvider> {
        if !self.config.enrichment.enabled {
            return None;
        }
        self.provider.as_deref()
    }

    fn enrich(&self, records: Vec<ScreeningRecord>) -> (Vec<ScreeningRecord>, HashMap<String, Enrichment>) {
        let Some(provider) = self.active_provider() else {
            return (records, HashMap::new());
        };

        let mut cache = EnrichmentCache::new(provider, self.storage.as_ref(), &self.config.enrichment.language);
        let records = apply_enrichment(records, &mut cache);
        (records, cache.into_resolved())
    }
}
