use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::Result;

use tidemark_core::{ForecastConfig, TidemarkError};
use tidemark_forecast::model::ForecastMethod;
use tidemark_forecast::output::{self, Indicators};
use tidemark_forecast::series::WeeklySeries;

#[derive(Parser)]
#[command(
    name = "tidemark",
    version,
    about = "Code churn measurement and defect-inflow forecasting",
    long_about = "Tidemark measures how a codebase changes and where defects are heading.\n\n\
                   Two independent pipelines: git churn aggregation per file and module,\n\
                   and weekly defect-inflow forecasting with four simple models.\n\n\
                   Examples:\n  \
                     tidemark churn --repo . --out churn_results.json\n  \
                     tidemark forecast --input defects.csv --method linear\n  \
                     tidemark forecast --method ewma --alpha 0.4 --horizon 6\n  \
                     tidemark init                  Create a default tidemark.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Measure line churn per file and per module from git history
    #[command(long_about = "Measure line churn per file and per module from git history.\n\n\
        Runs git log --numstat, aggregates lines added and removed per file and\n\
        per parent directory, writes a JSON report, and renders two ranked bar\n\
        charts into the working directory.\n\n\
        Examples:\n  tidemark churn --repo . --out churn_results.json\n  tidemark churn --repo ../service --out churn.json --top 15")]
    Churn {
        /// Path to the local git repository
        #[arg(long)]
        repo: PathBuf,

        /// Output JSON report path
        #[arg(long)]
        out: PathBuf,

        /// Number of files to show in the top-files chart (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,
    },
    /// Forecast weekly defect inflow from a defect CSV
    #[command(
        long_about = "Forecast weekly defect inflow from a defect CSV.\n\n\
        The defect-count and week-start columns are auto-detected by substring\n\
        match (\"defect\" / \"week\", case-insensitive, first match wins). Tuning\n\
        knobs come from tidemark.json; flags override file values.\n\n\
        Methods:\n  \
          naive           repeat the last observed value\n  \
          moving_average  rolling mean with forecast feedback (default)\n  \
          ewma            exponentially weighted moving average\n  \
          linear          least-squares trend extrapolation\n\n\
        Examples:\n  tidemark forecast\n  tidemark forecast --input defects.csv --method linear --horizon 6"
    )]
    Forecast {
        /// Weekly defect CSV (default: defect_inflow_data.csv)
        #[arg(long, default_value = "defect_inflow_data.csv")]
        input: PathBuf,

        /// Forecasting method
        #[arg(long, default_value = "moving_average")]
        method: ForecastMethod,

        /// Configuration file (default: tidemark.json, missing file means defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Window size for moving_average (overrides config)
        #[arg(long)]
        window: Option<usize>,

        /// Weeks to forecast ahead (overrides config)
        #[arg(long)]
        horizon: Option<usize>,

        /// Smoothing factor for ewma (overrides config)
        #[arg(long)]
        alpha: Option<f64>,

        /// Output CSV path (default: forecast_output.csv)
        #[arg(long, default_value = "forecast_output.csv")]
        out: PathBuf,
    },
    /// Create a default tidemark.json configuration file
    #[command(long_about = "Create a default tidemark.json configuration file.\n\n\
        The file holds forecast tuning knobs (window_size, forecast_weeks, alpha).\n\
        Fails if tidemark.json already exists.")]
    Init,
}

const DEFAULT_CONFIG_PATH: &str = "tidemark.json";

const DEFAULT_CONFIG: &str = r#"{
  "window_size": 3,
  "forecast_weeks": 4,
  "alpha": 0.3
}
"#;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    match cli.command {
        Command::Churn { repo, out, top } => run_churn(&repo, &out, top, cli.verbose),
        Command::Forecast {
            input,
            method,
            config,
            window,
            horizon,
            alpha,
            out,
        } => run_forecast(ForecastArgs {
            input,
            method,
            config,
            window,
            horizon,
            alpha,
            out,
            verbose: cli.verbose,
        }),
        Command::Init => run_init(),
    }
}

fn run_churn(repo: &Path, out: &Path, top: usize, verbose: bool) -> Result<()> {
    // Hint: not a git repository
    if !repo.join(".git").exists() && git2::Repository::discover(repo).is_err() {
        miette::bail!(miette::miette!(
            help = "Point --repo at a local git repository",
            "Not a git repository: {}",
            repo.display()
        ));
    }

    println!("Running git log on {} ...", repo.display());
    let log = tidemark_churn::extract::run_git_log(repo)?;

    println!("Parsing {} lines of git log ...", log.lines().count());
    let records = tidemark_churn::numstat::parse_numstat(&log);

    println!("Found {} file entries with churn ...", records.len());
    let report = tidemark_churn::aggregate::aggregate_churn(&records);

    if verbose {
        eprintln!(
            "{} files across {} modules",
            report.files.len(),
            report.modules.len()
        );
    }

    tidemark_churn::report::write_report(&report, out)?;
    println!("Results saved to {}", out.display());

    println!("Plotting top files by churn ...");
    println!("Plotting churn per module ...");
    let charts = tidemark_churn::report::render_charts(&report, top, Path::new("."))?;
    for chart in &charts {
        println!("Chart saved to {}", chart.display());
    }

    Ok(())
}

struct ForecastArgs {
    input: PathBuf,
    method: ForecastMethod,
    config: Option<PathBuf>,
    window: Option<usize>,
    horizon: Option<usize>,
    alpha: Option<f64>,
    out: PathBuf,
    verbose: bool,
}

fn run_forecast(args: ForecastArgs) -> Result<()> {
    let series = match WeeklySeries::from_file(&args.input) {
        Ok(series) => series,
        Err(err @ TidemarkError::MissingColumn(_)) => {
            miette::bail!(miette::miette!(
                help = "The CSV needs one defect-count column and one week-start column; \
                        detection matches 'defect' and 'week' in the header, case-insensitive",
                "{err}"
            ));
        }
        Err(err) => return Err(err.into()),
    };

    let mut config = match &args.config {
        Some(path) => ForecastConfig::from_file(path)?,
        None => ForecastConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    if let Some(window) = args.window {
        config.window_size = window;
    }
    if let Some(horizon) = args.horizon {
        config.forecast_weeks = horizon;
    }
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    config.validate()?;

    println!(
        "Loaded {} weeks of defect data ({} to {})",
        series.points.len(),
        series.points[0].week_start.format("%Y-%m-%d"),
        series.last_week().format("%Y-%m-%d"),
    );
    if args.verbose {
        eprintln!(
            "method={} window={} horizon={} alpha={}",
            args.method, config.window_size, config.forecast_weeks, config.alpha
        );
    }

    let values = series.values();
    let forecast = args
        .method
        .forecast(&values, config.forecast_weeks, &config)?;
    let points = output::build_forecast(series.last_week(), &forecast);

    println!(
        "\nForecast ({}, {} weeks ahead):",
        args.method, config.forecast_weeks
    );
    print!("{}", output::forecast_table(&points));

    let indicators = Indicators::from_series(&series);
    println!("\nIndicators:");
    println!("  Total defects:          {}", indicators.total_defects);
    println!(
        "  Average weekly defects: {:.1}",
        indicators.average_weekly
    );
    println!("  Peak weekly defects:    {}", indicators.peak_weekly);

    let chart = output::render_chart(&series, &points, Path::new("."))?;
    println!("\nChart saved to {}", chart.display());

    output::write_forecast_csv(&points, &args.out)?;
    println!("Forecast results saved to {}", args.out.display());

    Ok(())
}

fn run_init() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        miette::bail!("tidemark.json already exists");
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(TidemarkError::from)?;
    println!("Created tidemark.json with default configuration");
    Ok(())
}
