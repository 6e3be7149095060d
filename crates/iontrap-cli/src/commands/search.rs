use crate::cli::SearchArgs;
use crate::config::{DefaultsConfig, FileDesignConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::utils::table::{candidate_table, summary_block};
use iontrap::engine::export::write_candidates_to_path;
use iontrap::engine::progress::ProgressReporter;
use iontrap::workflows;
use tracing::info;

pub fn run(args: SearchArgs) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let file_config = FileDesignConfig::load(&args.design)?;
    let config = file_config.merge_engine_config(&args.design, &defaults)?;
    let params = file_config.merge_search(&args, &defaults);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting design search...");
    let result = workflows::search::run(&config, &params, &reporter)?;

    println!();
    print!("{}", summary_block("Search window", &result.all.summary()));
    println!();

    if result.feasible.is_empty() {
        println!("Warning: no design meets every criterion. Consider relaxing the target specification.");
    } else {
        println!("{} design(s) by required RF amplitude:", result.feasible.len());
        print!("{}", candidate_table(result.feasible.as_slice(), params.max_solutions));
    }

    if let Some(path) = &args.output {
        info!("Writing {} ranked designs to {:?}", result.feasible.len(), path);
        write_candidates_to_path(path, result.feasible.as_slice())
            .map_err(|e| CliError::Engine(e.into()))?;
        println!("✓ Ranked designs written to: {}", path.display());
    }
    Ok(())
}
