use clap::{Parser, Subcommand, ValueEnum};
use om_app::{AppError, AppResult, RunManifest, RunOptions, RunProgressEvent, RunRequest};
use om_components::{CellRounding, FailureTable, WeibullParams};
use om_core::ComponentKey;
use om_plant::{PlantLedger, UnitView};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "om-cli")]
#[command(about = "Wind plant O&M cost estimator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a plant configuration and its catalog and report problems
    Validate {
        /// Path to the plant YAML file
        config_path: PathBuf,
    },
    /// Estimate annual O&M costs
    Estimate {
        /// Path to the plant YAML file
        config_path: PathBuf,
        /// Units of the printed tables
        #[arg(long, value_enum, default_value_t = ViewArg::Project)]
        view: ViewArg,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// Print the year-by-year account of one catalog part
    Component {
        /// Path to the plant YAML file
        config_path: PathBuf,
        system: String,
        component: String,
    },
    /// Print a multi-generation Weibull failure table
    FailureTable {
        /// Weibull shape k
        #[arg(long)]
        shape: f64,
        /// Weibull scale c (years)
        #[arg(long)]
        scale: f64,
        /// Installed population
        #[arg(long)]
        parts: f64,
        /// Horizon in years (at most 100)
        #[arg(long, default_value_t = 20)]
        years: usize,
        /// Round cells to one decimal like the legacy sheet
        #[arg(long)]
        round: bool,
    },
    /// List cached runs for a plant
    Runs {
        /// Path to the plant YAML file
        config_path: PathBuf,
    },
    /// Show a cached run
    ShowRun {
        /// Path to the plant YAML file
        config_path: PathBuf,
        /// Run ID to display
        run_id: String,
        #[arg(long, value_enum, default_value_t = ViewArg::Project)]
        view: ViewArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Project,
    Turbine,
    Kw,
    Kwh,
    All,
}

impl ViewArg {
    fn views(self) -> Vec<UnitView> {
        match self {
            ViewArg::Project => vec![UnitView::Project],
            ViewArg::Turbine => vec![UnitView::PerTurbine],
            ViewArg::Kw => vec![UnitView::PerKw],
            ViewArg::Kwh => vec![UnitView::CentsPerKwh],
            ViewArg::All => UnitView::ALL.to_vec(),
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Estimate {
            config_path,
            view,
            no_cache,
        } => cmd_estimate(&config_path, view, !no_cache),
        Commands::Component {
            config_path,
            system,
            component,
        } => cmd_component(&config_path, &ComponentKey::new(system, component)),
        Commands::FailureTable {
            shape,
            scale,
            parts,
            years,
            round,
        } => cmd_failure_table(shape, scale, parts, years, round),
        Commands::Runs { config_path } => cmd_runs(&config_path),
        Commands::ShowRun {
            config_path,
            run_id,
            view,
        } => cmd_show_run(&config_path, &run_id, view),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating plant: {}", config_path.display());
    let report = om_app::validate_plant(config_path)?;
    println!(
        "  {}: {} components over {} years",
        report.name, report.component_count, report.horizon_years
    );
    for system in &report.systems {
        println!(
            "  {} - {} components ({} crane-required)",
            system.name, system.component_count, system.crane_count
        );
    }
    if report.diagnostics.is_empty() {
        println!("✓ Plant is valid");
    } else {
        println!("{} configuration problem(s):", report.diagnostics.len());
        for diagnostic in &report.diagnostics {
            println!("  - {}", diagnostic);
        }
    }
    Ok(())
}

fn cmd_estimate(config_path: &Path, view: ViewArg, use_cache: bool) -> AppResult<()> {
    println!("Estimating O&M costs for: {}", config_path.display());

    let request = RunRequest {
        config_path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };
    let response = om_app::ensure_run_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| render_cli_progress(&event)),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Estimate completed: {}", response.run_id);
        let t = &response.timing;
        println!(
            "  load {:.3}s  components {:.3}s  aggregate {:.3}s  save {:.3}s",
            t.load_time_s, t.compute_time_s, t.aggregate_time_s, t.save_time_s
        );
    }

    print_run(&response.run.manifest, &response.run.ledger, view)
}

fn cmd_component(config_path: &Path, key: &ComponentKey) -> AppResult<()> {
    let plant = om_app::load_plant(config_path)?;
    let account = om_app::component_account(&plant, key)?;
    print!("{}", account);
    match account.median_life() {
        Some(life) => println!("Median life: {:.2} years", life),
        None => println!("Median life: n/a (constant rate)"),
    }
    for diagnostic in account.diagnostics() {
        println!("  - {}", diagnostic);
    }
    if let Some(table) = account.failure_table() {
        println!();
        print!("{}", table);
    }
    Ok(())
}

fn cmd_failure_table(shape: f64, scale: f64, parts: f64, years: usize, round: bool) -> AppResult<()> {
    let rounding = if round {
        CellRounding::Tenths
    } else {
        CellRounding::Exact
    };
    let table = WeibullParams::new(shape, scale)
        .and_then(|params| FailureTable::build(params, parts, years, rounding))
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    print!("{}", table);
    let params = table.params();
    println!(
        "Median life {:.2} years; {:.1}% of original parts survive {} years",
        params.median_life(),
        100.0 * params.reliability(years as f64),
        years
    );
    Ok(())
}

fn cmd_runs(config_path: &Path) -> AppResult<()> {
    let runs = om_app::list_runs(config_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", config_path.display());
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {} - {} ({}, {} components, {} events)",
                manifest.run_id,
                manifest.timestamp,
                manifest.plant_name,
                manifest.component_count,
                manifest.total_events
            );
        }
    }
    Ok(())
}

fn cmd_show_run(config_path: &Path, run_id: &str, view: ViewArg) -> AppResult<()> {
    let run = om_app::load_run(config_path, run_id)?;
    println!("Run: {}", run.manifest.run_id);
    println!("  Plant: {}", run.manifest.plant_name);
    println!("  Timestamp: {}", run.manifest.timestamp);
    println!("  Engine: {}", run.manifest.engine_version);
    print_run(&run.manifest, &run.ledger, view)
}

fn print_run(manifest: &RunManifest, ledger: &PlantLedger, view: ViewArg) -> AppResult<()> {
    let summary = om_app::get_run_summary(manifest, ledger)?;
    println!(
        "  {} components, {} repair events over {} years",
        summary.component_count, summary.total_events, summary.years
    );
    println!("  Lifetime O&M: ${:.0}", summary.lifetime_cost);
    println!("  Mean O&M: {:.4} \u{a2}/kWh", summary.mean_cents_per_kwh);
    if summary.diagnostic_count > 0 {
        println!("  {} configuration problem(s):", summary.diagnostic_count);
        for diagnostic in &manifest.diagnostics {
            println!("    - {}", diagnostic);
        }
    }

    for unit_view in view.views() {
        println!();
        print!("{}", ledger.view(unit_view));
        println!("Parts replacement by system");
        for (system, series) in om_app::system_parts_view(ledger, unit_view) {
            let total: f64 = series.iter().sum();
            println!("  {:<16} {:>14.2}", system, total);
        }
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    let mut line = format!(
        "\r{:<10} elapsed={:.2}s",
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    print!("{}", line);
    let _ = io::stdout().flush();
}
