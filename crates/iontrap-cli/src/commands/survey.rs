use crate::cli::SurveyArgs;
use crate::config::{DefaultsConfig, FileDesignConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::utils::table::{candidate_table, summary_block};
use iontrap::engine::export::write_candidates_to_path;
use iontrap::engine::progress::ProgressReporter;
use iontrap::workflows;
use tracing::{info, warn};

pub fn run(args: SurveyArgs) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let file_config = FileDesignConfig::load(&args.design)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = file_config.merge_engine_config(&args.design, &defaults)?;
    let settings = file_config.merge_survey(&args, &defaults);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting geometry survey...");
    let result = workflows::survey::run(
        &config,
        &settings.fixed_plan,
        &settings.full_plan,
        settings.top,
        &reporter,
    )?;

    println!();
    print!("{}", summary_block("Fixed a' sweep", &result.fixed.summary()));
    println!();
    print!("{}", summary_block("Full (a', b') sweep", &result.full.summary()));
    println!();

    let best = &result.best;
    if best.is_empty() {
        warn!("Survey completed but no design meets every criterion.");
        println!("Warning: no design meets every criterion.");
    } else {
        println!("Top {} design(s) by required RF amplitude:", best.len());
        print!("{}", candidate_table(best.as_slice(), settings.top));
    }

    if let Some(path) = &args.output {
        info!("Writing {} candidates to {:?}", result.full.len(), path);
        write_candidates_to_path(path, &result.full.candidates)
            .map_err(|e| CliError::Engine(e.into()))?;
        println!("✓ Full sweep written to: {}", path.display());
    }
    Ok(())
}
