mod echo;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use verkehr_core::{
    DEFAULT_SLOTS, FetchConfig, Incident, Loader, Poller, PollerConfig, Snapshot, TRAFFIC_URL, TextConfig,
    TrafficApi, extract_incidents, incidents_to_json, incidents_to_text, signal_slots, signals_for, signals_to_json,
    signals_to_text,
};

use crate::echo::{
    format_size, print_banner, print_extraction_details, print_info, print_step, print_success, print_timing,
    print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted incidents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Read traffic reports from the Bremen Vier traffic page
#[derive(Parser, Debug)]
#[command(name = "verkehr")]
#[command(version)]
#[command(about = "Read traffic reports from the Bremen Vier traffic page", long_about = None)]
struct Args {
    /// URL to fetch or local HTML file (default: the Bremen Vier traffic page)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Number incidents in text output
    #[arg(long)]
    numbered: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "20", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Show fixed on/off slots instead of the plain incident list
    #[arg(long)]
    signals: bool,

    /// Number of slots for --signals
    #[arg(long, default_value_t = DEFAULT_SLOTS, value_name = "NUM")]
    slots: usize,

    /// Keep polling and print every refresh
    #[arg(short, long)]
    watch: bool,

    /// Seconds between refreshes in --watch mode
    #[arg(long, default_value = "60", value_name = "SECS")]
    interval: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn source(&self) -> &str {
        self.input.as_deref().unwrap_or(TRAFFIC_URL)
    }

    fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig { timeout: self.timeout, ..Default::default() };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "verkehr=debug,verkehr_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn render_incidents(args: &Args, incidents: &[Incident]) -> anyhow::Result<String> {
    let output = match (args.format, args.signals) {
        (OutputFormat::Json, false) => incidents_to_json(incidents, args.pretty)?,
        (OutputFormat::Json, true) => signals_to_json(&signals_for(incidents, args.slots), args.pretty)?,
        (OutputFormat::Text, false) => {
            let config = TextConfig { numbered: args.numbered, ..Default::default() };
            incidents_to_text(incidents, &config)
        }
        (OutputFormat::Text, true) => signals_to_text(&signals_for(incidents, args.slots)),
    };
    Ok(output)
}

fn render_snapshot(args: &Args, snapshot: &Snapshot) -> anyhow::Result<String> {
    if args.signals {
        let signals = signal_slots(snapshot, args.slots);
        return match args.format {
            OutputFormat::Json => Ok(signals_to_json(&signals, args.pretty)?),
            OutputFormat::Text => Ok(signals_to_text(&signals)),
        };
    }

    render_incidents(args, &snapshot.incidents)
}

fn write_output(path: Option<&PathBuf>, output: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
        }
        None => println!("{}", output),
    }
    Ok(())
}

async fn run_once(args: &Args) -> anyhow::Result<()> {
    let source = args.source();
    let loader = Loader::new(args.fetch_config());

    if args.verbose {
        print_step(1, 3, &format!("Loading {}", source.bright_white().underline()));
    }

    let started = Instant::now();
    let html = loader
        .load(source)
        .await
        .with_context(|| format!("Failed to load {}", source))?;
    let load_time = started.elapsed();

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(html.len()).bright_white());
        print_timing("Load", load_time);
        eprintln!();
        print_step(2, 3, "Extracting traffic incidents");
    }

    let started = Instant::now();
    let incidents = extract_incidents(&html);

    if args.verbose {
        print_timing("Extract", started.elapsed());
        print_extraction_details(&incidents);
        print_step(3, 3, "Writing output");
    }

    let output = render_incidents(args, &incidents)?;
    write_output(args.output.as_ref(), &output)?;

    if let Some(path) = &args.output {
        print_success(&format!("Output written to {}", path.display().bright_white()));
    }

    Ok(())
}

async fn run_watch(args: &Args) -> anyhow::Result<()> {
    let interval = Duration::from_secs(args.interval.max(1));
    let api = TrafficApi::with_config(args.fetch_config());
    let config = PollerConfig::builder().interval(interval).source(args.source()).build();
    let mut poller = Poller::new(api, config);

    if args.verbose {
        print_info(&format!(
            "Polling {} every {}s (Ctrl-C to stop)",
            args.source().bright_white(),
            interval.as_secs()
        ));
    }

    let on_update = |snapshot: &Snapshot| {
        if !snapshot.available {
            print_warning(&format!(
                "Traffic data unavailable: {}",
                snapshot.last_error.as_deref().unwrap_or("unknown error")
            ));
        }

        let written = render_snapshot(args, snapshot).and_then(|output| write_output(args.output.as_ref(), &output));
        if let Err(err) = written {
            tracing::error!(error = %err, "failed to write traffic update");
        }
    };

    tokio::select! {
        _ = poller.watch(on_update) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            if args.verbose {
                print_info("Stopped polling");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    if args.watch { run_watch(&args).await } else { run_once(&args).await }
}
