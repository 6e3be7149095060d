mod defaults;
mod file;

pub use defaults::DefaultsConfig;
pub use file::{FileAxisConfig, FileDesignConfig};

use crate::cli::{DesignArgs, SearchArgs, SurveyArgs};
use crate::error::{CliError, Result};
use iontrap::core::geometry::SlotCorrection;
use iontrap::core::grid::GridAxis;
use iontrap::core::species::IonSpecies;
use iontrap::engine::config::{
    EngineConfig, EngineConfigBuilder, FrequencyRange, TrapSpecificationBuilder,
};
use iontrap::engine::sweep::SweepPlan;
use iontrap::workflows::search::SearchParams;
use std::str::FromStr;
use tracing::debug;

/// Sweep plans and report size of the `survey` command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveySettings {
    pub fixed_plan: SweepPlan,
    pub full_plan: SweepPlan,
    pub top: usize,
}

/// Overrides for one grid axis coming from the command line.
#[derive(Debug, Default, Clone, Copy)]
struct AxisOverride {
    min: Option<f64>,
    max: Option<f64>,
    points: Option<usize>,
}

fn merge_axis(cli: AxisOverride, file: Option<FileAxisConfig>, default: GridAxis) -> GridAxis {
    let file = file.unwrap_or_default();
    GridAxis {
        start: cli.min.or(file.min).unwrap_or(default.start),
        stop: cli.max.or(file.max).unwrap_or(default.stop),
        points: cli.points.or(file.points).unwrap_or(default.points),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            std::any::type_name::<T>(),
            key,
            value
        ))
    })
}

impl FileDesignConfig {
    /// Reads the config file named by `args` (if any) and applies its
    /// `--set` overrides.
    pub fn load(args: &DesignArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_set_values(&args.set_values)?;
        Ok(config)
    }

    pub fn merge_engine_config(
        &self,
        args: &DesignArgs,
        defaults: &DefaultsConfig,
    ) -> Result<EngineConfig> {
        let species = self.merge_species(args, defaults)?;

        let target_file = self.target.clone().unwrap_or_default();
        let target = TrapSpecificationBuilder::new()
            .secular_frequency_mhz(
                args.secular_frequency
                    .or(target_file.secular_frequency)
                    .unwrap_or(defaults.target.secular_frequency_mhz()),
            )
            .q_max(
                args.q_max
                    .or(target_file.q_max)
                    .unwrap_or(defaults.target.q_max()),
            )
            .v_rf_max(
                args.v_rf_max
                    .or(target_file.v_rf_max)
                    .unwrap_or(defaults.target.v_rf_max()),
            )
            .depth_min_ev(
                args.depth_min
                    .or(target_file.depth_min)
                    .unwrap_or(defaults.target.depth_min_ev()),
            )
            .depth_max_ev(
                args.depth_max
                    .or(target_file.depth_max)
                    .unwrap_or(defaults.target.depth_max_ev()),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let drive_file = self.drive.clone().unwrap_or_default();
        let frequencies = FrequencyRange::new(
            args.f_min
                .or(drive_file.f_min)
                .unwrap_or(defaults.frequencies.min_mhz),
            args.f_max
                .or(drive_file.f_max)
                .unwrap_or(defaults.frequencies.max_mhz),
            args.f_points
                .or(drive_file.f_points)
                .unwrap_or(defaults.frequencies.points),
        )
        .map_err(|e| CliError::Config(e.to_string()))?;

        let slot_correction = args
            .slot_correction
            .or(self.geometry.as_ref().and_then(|g| g.slot_correction))
            .map(SlotCorrection::new)
            .unwrap_or_default();

        let config = EngineConfigBuilder::new()
            .species(species)
            .target(target)
            .frequencies(frequencies)
            .slot_correction(slot_correction)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        debug!("Resolved engine configuration: {:?}", config);
        Ok(config)
    }

    fn merge_species(&self, args: &DesignArgs, defaults: &DefaultsConfig) -> Result<IonSpecies> {
        let ion = self.ion.clone().unwrap_or_default();
        if ion.species.is_some() && ion.mass_number.is_some() {
            return Err(CliError::Config(
                "`ion.species` and `ion.mass-number` cannot both be set.".to_string(),
            ));
        }

        let species = if let Some(mass_number) = args.mass_number {
            IonSpecies::new(mass_number, args.charge.unwrap_or(1))
        } else if let Some(symbol) = &args.species {
            IonSpecies::from_symbol(symbol)
        } else if let Some(mass_number) = ion.mass_number {
            IonSpecies::new(mass_number, ion.charge.unwrap_or(1))
        } else {
            IonSpecies::from_symbol(ion.species.as_deref().unwrap_or(&defaults.species))
        };
        species.map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_survey(&self, args: &SurveyArgs, defaults: &DefaultsConfig) -> SurveySettings {
        let survey = self.survey.clone().unwrap_or_default();
        SurveySettings {
            fixed_plan: SweepPlan::FixedA {
                a_prime: args
                    .fixed_a
                    .or(survey.fixed_a)
                    .unwrap_or(defaults.fixed_a),
                b_axis: merge_axis(AxisOverride::default(), survey.fixed_b, defaults.fixed_b),
            },
            full_plan: SweepPlan::Full {
                a_axis: merge_axis(AxisOverride::default(), survey.full_a, defaults.full_a),
                b_axis: merge_axis(AxisOverride::default(), survey.full_b, defaults.full_b),
            },
            top: args.top.or(survey.top).unwrap_or(defaults.survey_top),
        }
    }

    pub fn merge_search(&self, args: &SearchArgs, defaults: &DefaultsConfig) -> SearchParams {
        let search = self.search.clone().unwrap_or_default();
        SearchParams {
            a_axis: merge_axis(
                AxisOverride {
                    min: args.a_min,
                    max: args.a_max,
                    points: args.a_points,
                },
                search.a,
                defaults.search.a_axis,
            ),
            b_axis: merge_axis(
                AxisOverride {
                    min: args.b_min,
                    max: args.b_max,
                    points: args.b_points,
                },
                search.b,
                defaults.search.b_axis,
            ),
            max_solutions: args
                .max_solutions
                .or(search.max_solutions)
                .unwrap_or(defaults.search.max_solutions),
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "ion.species" => {
                    self.ion.get_or_insert_with(Default::default).species =
                        Some(value_str.to_string());
                }
                "ion.mass-number" => {
                    self.ion.get_or_insert_with(Default::default).mass_number =
                        Some(parse_value(key, value_str)?);
                }
                "ion.charge" => {
                    self.ion.get_or_insert_with(Default::default).charge =
                        Some(parse_value(key, value_str)?);
                }
                "target.secular-frequency" => {
                    self.target
                        .get_or_insert_with(Default::default)
                        .secular_frequency = Some(parse_value(key, value_str)?);
                }
                "target.q-max" => {
                    self.target.get_or_insert_with(Default::default).q_max =
                        Some(parse_value(key, value_str)?);
                }
                "target.v-rf-max" => {
                    self.target.get_or_insert_with(Default::default).v_rf_max =
                        Some(parse_value(key, value_str)?);
                }
                "target.depth-min" => {
                    self.target.get_or_insert_with(Default::default).depth_min =
                        Some(parse_value(key, value_str)?);
                }
                "target.depth-max" => {
                    self.target.get_or_insert_with(Default::default).depth_max =
                        Some(parse_value(key, value_str)?);
                }
                "drive.f-min" => {
                    self.drive.get_or_insert_with(Default::default).f_min =
                        Some(parse_value(key, value_str)?);
                }
                "drive.f-max" => {
                    self.drive.get_or_insert_with(Default::default).f_max =
                        Some(parse_value(key, value_str)?);
                }
                "drive.f-points" => {
                    self.drive.get_or_insert_with(Default::default).f_points =
                        Some(parse_value(key, value_str)?);
                }
                "geometry.slot-correction" => {
                    self.geometry
                        .get_or_insert_with(Default::default)
                        .slot_correction = Some(parse_value(key, value_str)?);
                }
                "survey.fixed-a" => {
                    self.survey.get_or_insert_with(Default::default).fixed_a =
                        Some(parse_value(key, value_str)?);
                }
                "survey.top" => {
                    self.survey.get_or_insert_with(Default::default).top =
                        Some(parse_value(key, value_str)?);
                }
                "search.max-solutions" => {
                    self.search
                        .get_or_insert_with(Default::default)
                        .max_solutions = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
