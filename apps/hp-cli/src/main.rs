use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hp_devices::{DeviceDatabase, DeviceParams, ReferenceCurve};
use hp_model::{CycleSolver, DesignPointSolver, OperatingPoint};
use hp_props::CorrelationModel;
use hp_sweep::{render_summary, run_sweep, save_report, simulate_point};

#[derive(Parser)]
#[command(name = "hp-cli")]
#[command(about = "Heat pump model validation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the validation sweep over the six standard test points
    Sweep {
        /// Device name to look up in the database
        #[arg(long)]
        device: Option<String>,
        /// Path to the device database CSV
        #[arg(long)]
        database: Option<PathBuf>,
        /// Directory with manufacturer datasheet CSVs
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Output directory for validation.csv and manifest.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Simulate a single operating point
    Point {
        /// Source temperature in °C
        t_source: f64,
        /// Supply temperature in °C
        t_supply: f64,
        /// Device name to look up in the database
        #[arg(long)]
        device: Option<String>,
        /// Path to the device database CSV
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Search the device database
    Devices {
        /// Search term (substring of model or manufacturer)
        term: String,
        /// Path to the device database CSV
        #[arg(long)]
        database: PathBuf,
    },
    /// Write an empty datasheet template for a device
    Template {
        /// Device name
        device: String,
        /// Directory to write the template into
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Sweep(#[from] hp_sweep::SweepError),

    #[error(transparent)]
    Device(#[from] hp_devices::DeviceError),
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sweep {
            device,
            database,
            data_dir,
            output,
        } => cmd_sweep(
            device.as_deref(),
            database.as_deref(),
            data_dir.as_deref(),
            output.as_deref(),
        ),
        Commands::Point {
            t_source,
            t_supply,
            device,
            database,
        } => cmd_point(t_source, t_supply, device.as_deref(), database.as_deref()),
        Commands::Devices { term, database } => cmd_devices(&term, &database),
        Commands::Template { device, data_dir } => cmd_template(&device, &data_dir),
    }
}

/// Resolve device parameters: database lookup when a device name is given,
/// documented defaults otherwise.
fn resolve_params(device: Option<&str>, database: Option<&Path>) -> CliResult<DeviceParams> {
    match (device, database) {
        (Some(name), Some(db_path)) => {
            let db = DeviceDatabase::load(db_path)?;
            let record = db.lookup(name)?;
            Ok(DeviceParams::from_device(record))
        }
        (Some(name), None) => {
            println!("No database given; using default parameters for '{name}'");
            Ok(DeviceParams {
                device_name: Some(name.to_string()),
                ..DeviceParams::default()
            })
        }
        _ => Ok(DeviceParams::default()),
    }
}

fn cmd_sweep(
    device: Option<&str>,
    database: Option<&Path>,
    data_dir: Option<&Path>,
    output: Option<&Path>,
) -> CliResult<()> {
    let params = resolve_params(device, database)?;

    let reference = match (&params.device_name, data_dir) {
        (Some(name), Some(dir)) => ReferenceCurve::load_or_example(name, dir)?,
        _ => ReferenceCurve::synthetic_example(),
    };

    let props = CorrelationModel::new();
    let solver = DesignPointSolver::new();
    let report = run_sweep(&params, &props, &solver, &reference)?;

    print!("{}", render_summary(&report));

    if let Some(dir) = output {
        save_report(dir, &report, solver.name())?;
        println!("✓ Wrote validation.csv and manifest.json to {}", dir.display());
    }
    Ok(())
}

fn cmd_point(
    t_source: f64,
    t_supply: f64,
    device: Option<&str>,
    database: Option<&Path>,
) -> CliResult<()> {
    let params = resolve_params(device, database)?;
    let point = OperatingPoint::from_celsius(t_source, t_supply);
    println!("Simulating {point}");

    let props = CorrelationModel::new();
    let solver = DesignPointSolver::new();
    match simulate_point(&point, &params, &props, &solver)? {
        Some(result) => {
            println!("✓ Converged");
            println!("  COP:      {:.2}", result.cop);
            println!("  P_th:     {:.2} kW", result.p_th_kw);
            println!("  P_el:     {:.2} kW", result.p_el_kw);
            println!("  Q_source: {:.2} kW", result.q_source_kw);
            if let (Some(t_evap), Some(t_cond)) = (result.t_evaporation_c, result.t_condensation_c)
            {
                println!("  T_evap:   {:.1} °C, T_cond: {:.1} °C", t_evap, t_cond);
            }
            if let Some(m_ref) = result.m_refrigerant_kgps {
                println!("  m_ref:    {:.4} kg/s", m_ref);
            }
        }
        None => println!("✗ No convergence at {point}"),
    }
    Ok(())
}

fn cmd_devices(term: &str, database: &Path) -> CliResult<()> {
    let db = DeviceDatabase::load(database)?;
    let hits = db.search(term);

    if hits.is_empty() {
        println!("No devices matching '{term}'");
    } else {
        println!("Devices matching '{term}':");
        for rec in hits {
            let duty = rec
                .p_th_nominal_kw
                .map(|v| format!("{v:.1} kW"))
                .unwrap_or_else(|| "?".to_string());
            println!(
                "  {} ({}) - {}, {}",
                rec.model, rec.manufacturer, rec.refrigerant, duty
            );
        }
    }
    Ok(())
}

fn cmd_template(device: &str, data_dir: &Path) -> CliResult<()> {
    let path = ReferenceCurve::write_template(device, data_dir)?;
    println!("✓ Wrote datasheet template to {}", path.display());
    Ok(())
}
