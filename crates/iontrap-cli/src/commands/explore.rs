use crate::cli::{ExploreArgs, ScanArgs, ScanWindowArgs};
use crate::config::{DefaultsConfig, FileDesignConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::utils::table::{candidate_table, operating_point_table, summary_block};
use iontrap::core::formulas::corrected_trap_height;
use iontrap::core::geometry::{GeometryPoint, HeightContour};
use iontrap::engine::config::EngineConfig;
use iontrap::engine::error::EngineError;
use iontrap::engine::export::write_candidates_to_path;
use iontrap::engine::progress::ProgressReporter;
use iontrap::engine::ranking::{SweepSummary, feasible_subset};
use iontrap::engine::scan::{DriveWindow, ScanMode, scan};
use iontrap::engine::sweep::{self, SweepPlan, evaluate_point};
use std::path::Path;
use tracing::info;

fn scan_mode(args: &ScanArgs) -> Option<ScanMode> {
    args.fix_voltage
        .map(ScanMode::FixedVoltage)
        .or(args.fix_frequency.map(ScanMode::FixedFrequency))
        .or(args.fix_q.map(ScanMode::FixedQ))
}

fn drive_window(args: &ScanWindowArgs) -> DriveWindow {
    let default = DriveWindow::default();
    DriveWindow {
        v_min: args.v_min.unwrap_or(default.v_min),
        v_max: args.v_max.unwrap_or(default.v_max),
        v_step: args.v_step.unwrap_or(default.v_step),
        f_min_mhz: args.scan_f_min.unwrap_or(default.f_min_mhz),
        f_max_mhz: args.scan_f_max.unwrap_or(default.f_max_mhz),
        f_step_mhz: args.scan_f_step.unwrap_or(default.f_step_mhz),
    }
}

pub fn run(args: ExploreArgs) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let file_config = FileDesignConfig::load(&args.design)?;
    let config = file_config.merge_engine_config(&args.design, &defaults)?;

    if let Some(height) = args.target.height {
        return explore_contour(&config, height, &args);
    }

    let (Some(a_prime), Some(b_prime)) = (args.target.a_prime, args.target.b_prime) else {
        return Err(CliError::Config(
            "Either --height or both --a-prime and --b-prime are required.".to_string(),
        ));
    };
    let geometry = GeometryPoint::new(a_prime, b_prime).map_err(EngineError::from)?;
    println!(
        "Geometry a' = {:.2} µm, b' = {:.2} µm, trap height {:.2} µm",
        a_prime,
        b_prime,
        corrected_trap_height(a_prime, b_prime, config.slot_correction.factor())
    );

    match scan_mode(&args.scan) {
        Some(mode) => {
            let window = drive_window(&args.window);
            info!("Running drive scan: {:?} over {:?}", mode, window);
            let points = scan(&config, geometry, mode, &window).map_err(EngineError::from)?;
            let meeting = points.iter().filter(|p| p.meets_criteria()).count();
            println!(
                "{} operating point(s), {} meeting every criterion:",
                points.len(),
                meeting
            );
            print!("{}", operating_point_table(&points, args.limit));
        }
        None => {
            let candidates = evaluate_point(&config, geometry, &config.frequencies.candidates());
            print!(
                "{}",
                summary_block(
                    "Drive frequency candidates",
                    &SweepSummary::from_candidates(&candidates)
                )
            );
            println!();
            print!("{}", candidate_table(&candidates, args.limit));
            write_output(args.output.as_deref(), &candidates)?;
        }
    }
    Ok(())
}

fn explore_contour(config: &EngineConfig, height: f64, args: &ExploreArgs) -> Result<()> {
    let plan = SweepPlan::ConstantHeight(HeightContour::new(height));
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Sweeping geometries with trap height {height:.2} µm...");
    let result = reporter.phase("Constant-Height Sweep", || {
        sweep::run(config, &plan, &reporter)
    })?;

    println!();
    print!(
        "{}",
        summary_block(
            &format!("{} geometries at h = {:.2} µm", result.grid_points, height),
            &result.summary()
        )
    );
    println!();

    let feasible = feasible_subset(&result.candidates);
    if !feasible.is_empty() {
        print!("{}", candidate_table(feasible.as_slice(), args.limit));
    }
    write_output(args.output.as_deref(), &result.candidates)
}

fn write_output(
    path: Option<&Path>,
    candidates: &[iontrap::engine::candidate::EvaluatedCandidate],
) -> Result<()> {
    if let Some(path) = path {
        write_candidates_to_path(path, candidates).map_err(EngineError::from)?;
        println!("✓ {} candidates written to: {}", candidates.len(), path.display());
    }
    Ok(())
}
