use std::path::{Path, PathBuf};

use clap::Parser;
use common::{BlankLines, TableSettings, tabulate_file, util::output_path};
use eyre::{Result, WrapErr};
use tracing::{error, info};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const CRATES: &[&str] = &["bench_tabulator", "common"];

/// Turns a `<workload> <database> <load> <run>` results log into a tab separated table
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Results log to tabulate
    input: PathBuf,
    /// YAML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output file, defaults to the input path with the output suffix appended
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Width every field is padded to
    #[arg(long)]
    column_width: Option<usize>,
    /// Cell text for missing (workload, database) pairs
    #[arg(long)]
    placeholder: Option<String>,
    /// Fail on blank lines instead of skipping them
    #[arg(long, default_value_t = false)]
    reject_blank_lines: bool,
    /// Extra tracing directives, ie. `common=trace`
    #[arg(short, long)]
    log: Vec<String>,
    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<TableSettings> {
        let mut settings = match &self.config {
            Some(path) => TableSettings::from_yaml_file(path)?,
            None => TableSettings::default(),
        };
        if let Some(width) = self.column_width {
            settings.column_width = width;
        }
        if let Some(placeholder) = &self.placeholder {
            settings.placeholder = placeholder.clone();
        }
        if self.reject_blank_lines {
            settings.blank_lines = BlankLines::Reject;
        }
        Ok(settings)
    }
}

fn init_logging(args: &Cli) -> Result<Option<WorkerGuard>> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let mut env_filter = EnvFilter::new("");
    for krate in CRATES {
        if !args.log.iter().any(|x| x.starts_with(krate)) {
            env_filter = env_filter.add_directive(format!("{krate}={log_level}").parse()?);
        }
    }
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }

    let (file_layer, guard) = match &args.log_file {
        Some(path) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(log_file_writer(path)?);
            (
                Some(layer().with_ansi(false).with_writer(non_blocking)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(file_layer)
        .init();
    Ok(guard)
}

fn log_file_writer(path: &Path) -> Result<RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or("log.log".to_owned());
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file)
        .build(dir)
        .wrap_err_with(|| format!("Opening log file {}", path.display()))
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let _guard = init_logging(&args)?;

    if let Err(err) = run(&args) {
        error!("{err:#}");
        return Err(err);
    }
    Ok(())
}

fn run(args: &Cli) -> Result<()> {
    let settings = args.settings()?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(&args.input, &settings.output_suffix));

    let summary = tabulate_file(&args.input, &output, &settings)
        .wrap_err_with(|| format!("Tabulating {}", args.input.display()))?;
    info!(
        "{} workloads x {} databases",
        summary.workloads, summary.databases
    );
    println!("Table written to {}", summary.output.display());
    Ok(())
}
