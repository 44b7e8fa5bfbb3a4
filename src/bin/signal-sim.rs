use signal_sim::cli::{self, Command, FormatArg};
use signal_sim::config;
use signal_sim::error::{Error, ErrorKind, Result};
use signal_sim::estimate::{DensityEstimator, SeededEstimator};
use signal_sim::evaluator;
use signal_sim::graph;
use signal_sim::models::{NewRun, SignalInput};
use signal_sim::output::{
    CycleReport, Formatter, HumanFormatter, JsonFormatter, Report, SavedResult, SummaryFormatter,
};
use signal_sim::store::HistoryStore;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        let code = match err.kind() {
            ErrorKind::Validation => 2,
            ErrorKind::Storage | ErrorKind::Internal => 1,
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args()?;
    let formatter = formatter_for(&args.format);
    let mut store = HistoryStore::open(&args.store);

    let report = match args.command {
        Command::Calculate {
            pedestrians,
            vehicles,
            peak_hour,
            config,
            save,
        } => {
            let input = match config {
                Some(path) => config::load_scenario(&path)?,
                None => SignalInput {
                    pedestrians: pedestrians.ok_or_else(|| {
                        Error::Cli("--pedestrians is required without --config".to_string())
                    })?,
                    vehicles: vehicles.ok_or_else(|| {
                        Error::Cli("--vehicles is required without --config".to_string())
                    })?,
                    is_peak_hour: peak_hour,
                },
            };
            let result = evaluator::evaluate(&input)?;
            if save {
                let stored = store.append(NewRun::from_result(&input, &result))?;
                log::info!("saved run #{}", stored.id);
                Report::SavedResult(SavedResult {
                    result,
                    saved_run_id: stored.id,
                })
            } else {
                Report::Result(result)
            }
        }
        Command::Save {
            pedestrians,
            vehicles,
            peak_hour,
            green_time,
            risk,
            explanation,
        } => {
            let input = SignalInput {
                pedestrians,
                vehicles,
                is_peak_hour: peak_hour,
            };
            evaluator::validate(&input)?;
            if green_time < 0 {
                return Err(Error::NegativeGreenTime(green_time));
            }
            let stored = store.append(NewRun {
                pedestrians,
                vehicles,
                is_peak_hour: peak_hour,
                calculated_green_time: green_time,
                risk_level: risk.into(),
                explanation,
            })?;
            Report::Saved(stored)
        }
        Command::History => Report::History(store.list_all()?),
        Command::Graph => Report::Graph(graph::sample_curve()),
        Command::Estimate {
            seed,
            peak_hour,
            cycles,
            save,
        } => {
            let mut estimator = SeededEstimator::new(seed);
            let mut reports = Vec::with_capacity(cycles);
            for cycle in 1..=cycles {
                let estimate = estimator.estimate();
                let input = estimate.to_input(peak_hour);
                let result = evaluator::evaluate(&input)?;
                let saved_run_id = if save {
                    let stored = store.append(NewRun::from_result(&input, &result))?;
                    log::info!("saved run #{}", stored.id);
                    Some(stored.id)
                } else {
                    None
                };
                reports.push(CycleReport {
                    cycle,
                    estimate,
                    result,
                    saved_run_id,
                });
            }
            Report::Cycles(reports)
        }
    };

    print!("{}", formatter.write(&report)?);
    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
