//! Simulator entry point — CLI wiring and config-driven scenario runs.

use std::path::Path;
use std::process;

use bess_sim::config::ScenarioConfig;
use bess_sim::diag::LogSink;
use bess_sim::reporting::{print_fleet_report, print_household_report, print_single_report};
use bess_sim::runner::{run_fleet, run_household, run_single};
use bess_sim::telemetry::{export_fleet_csv, export_household_csv, export_single_csv};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    days_override: Option<usize>,
    telemetry_out: Option<String>,
}

fn print_help() {
    eprintln!("bess-sim — energy-storage fleet simulator");
    eprintln!();
    eprintln!("Usage: bess-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (fleet, household, single)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --days <usize>           Override simulated days");
    eprintln!("  --telemetry-out <path>   Export recorded histories to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the household preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        days_override: None,
        telemetry_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--days" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --days requires a usize argument");
                    process::exit(1);
                }
                if let Ok(d) = args[i].parse::<usize>() {
                    cli.days_override = Some(d);
                } else {
                    eprintln!("error: --days value \"{}\" is not a valid usize", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Resolves the scenario configuration from CLI arguments.
fn load_config(cli: &CliArgs) -> ScenarioConfig {
    if cli.scenario_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --scenario and --preset are mutually exclusive");
        process::exit(1);
    }

    let mut config = if let Some(path) = &cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    } else if let Some(name) = &cli.preset {
        match ScenarioConfig::preset(name) {
            Some(config) => config,
            None => {
                eprintln!("error: unknown preset \"{name}\" (try fleet, household, single)");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::household()
    };

    if let Some(seed) = cli.seed_override {
        config.simulation.seed = seed;
    }
    if let Some(days) = cli.days_override {
        config.simulation.days = days;
    }

    if let Err(e) = config.validate() {
        eprintln!("error: {e}");
        process::exit(1);
    }
    config
}

fn main() {
    env_logger::init();

    let cli = parse_args();
    let config = load_config(&cli);
    let mut diag = LogSink;

    let telemetry_path = cli.telemetry_out.as_deref().map(Path::new);
    let export = match config.simulation.scenario.as_str() {
        "fleet" => {
            let result = run_fleet(&config, &mut diag);
            print_fleet_report(&result);
            telemetry_path.map(|path| export_fleet_csv(&result, path))
        }
        "household" => {
            let result = match run_household(&config, &mut diag) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("error: household schedule: {e}");
                    process::exit(1);
                }
            };
            print_household_report(&result);
            telemetry_path.map(|path| export_household_csv(&result, path))
        }
        "single" => {
            let result = run_single(&config, &mut diag);
            print_single_report(&result);
            telemetry_path.map(|path| export_single_csv(&result, path))
        }
        // validate() already rejected anything else
        other => unreachable!("unvalidated scenario {other}"),
    };

    if let (Some(Err(e)), Some(path)) = (export, &cli.telemetry_out) {
        eprintln!("error: failed to write telemetry to \"{path}\": {e}");
        process::exit(1);
    }
}
