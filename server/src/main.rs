use anyhow::Context;
use calccore::interface::{format_matrix, format_matrix_fixed, parse_matrix};
use clap::{Parser, Subcommand};
use generator::samples::{build_samples, SampleConfig};
use log::info;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ServerConfig;
use workflow::runner::Runner;

mod generator;
mod web;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Form calculators: nth largest, matrix product, even numbers")]
struct Args {
    /// Load server settings and limits from YAML
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the k-th largest of a comma-separated list
    NthLargest {
        #[arg(long)]
        numbers: String,
        #[arg(short, long)]
        k: usize,
    },
    /// Multiply two matrices stored as text files (one row per line)
    Multiply {
        #[arg(long)]
        left: PathBuf,
        #[arg(long)]
        right: PathBuf,
        /// Parse cells as integers instead of floats
        #[arg(long, default_value_t = false)]
        integer: bool,
    },
    /// Print the first N even numbers
    Evens {
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Run every calculator once on seeded random input
    Demo {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 3)]
        matrix_dim: usize,
    },
    /// Serve the HTML forms and JSON API until Ctrl+C
    Serve {
        #[arg(long)]
        bind: Option<IpAddr>,
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    match args.command {
        Command::NthLargest { numbers, k } => {
            let runner = Runner::new(config);
            let found = runner
                .nth_largest_text(&numbers, k)
                .with_context(|| format!("finding rank {} in \"{}\"", k, numbers))?;
            println!("{}", found.value);
            println!(
                "sorted: {}",
                found
                    .sorted_descending
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Command::Multiply {
            left,
            right,
            integer,
        } => {
            let runner = Runner::new(config);
            let (left_text, right_text) = (read_matrix_file(&left)?, read_matrix_file(&right)?);
            let rendered = if integer {
                let lhs = parse_matrix::<i64>(&left_text)
                    .with_context(|| format!("parsing {}", left.display()))?;
                let rhs = parse_matrix::<i64>(&right_text)
                    .with_context(|| format!("parsing {}", right.display()))?;
                let product = runner
                    .multiply(lhs.view(), rhs.view())
                    .context("multiplying integer matrices")?;
                format_matrix(product.view())
            } else {
                let product = runner
                    .multiply_text(&left_text, &right_text)
                    .context("multiplying matrices")?;
                format_matrix_fixed(product.view(), 2)
            };
            println!("{}", rendered);
        }
        Command::Evens { count } => {
            let runner = Runner::new(config);
            let numbers = runner
                .evens(count)
                .with_context(|| format!("generating {} even numbers", count))?;
            println!(
                "{}",
                numbers
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
        Command::Demo { seed, matrix_dim } => run_demo(config, seed, matrix_dim)?,
        Command::Serve { bind, port } => {
            let config = config.with_overrides(bind, port);
            let addr = config.socket_addr();
            let runner = Arc::new(Runner::new(config));
            let runtime = TokioBuilder::new_multi_thread()
                .enable_all()
                .build()
                .context("creating runtime for HTTP server")?;
            runtime.block_on(async move {
                let shutdown = async {
                    if let Err(err) = signal::ctrl_c().await {
                        log::error!("awaiting Ctrl+C failed: {}", err);
                    }
                };
                web::routes::serve(runner, addr, shutdown)
                    .await
                    .with_context(|| format!("serving on {}", addr))
            })?;
        }
    }

    Ok(())
}

fn read_matrix_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading matrix file {}", path.display()))
}

fn run_demo(config: ServerConfig, seed: u64, matrix_dim: usize) -> anyhow::Result<()> {
    let sample_config = SampleConfig {
        seed,
        matrix_dim,
        ..Default::default()
    }
    .fit_to(&config.limits);
    let samples = build_samples(&sample_config)?;
    let runner = Runner::new(config);

    let found = runner
        .nth_largest(&samples.numbers, samples.rank)
        .context("demo nth-largest")?;
    println!(
        "nth-largest: rank {} of {:?} -> {}",
        samples.rank, samples.numbers, found.value
    );

    let product = runner
        .multiply(samples.left.view(), samples.right.view())
        .context("demo matrix product")?;
    println!(
        "matrix:\n{}\n  x\n{}\n  =\n{}",
        format_matrix(samples.left.view()),
        format_matrix(samples.right.view()),
        format_matrix(product.view())
    );

    let echoed = runner
        .multiply(samples.left.view(), samples.identity.view())
        .context("demo identity product")?;
    anyhow::ensure!(
        echoed == samples.left,
        "multiplying by the identity changed the matrix"
    );
    println!("identity check: ok");

    let evens = runner
        .evens(samples.even_count)
        .context("demo even numbers")?;
    println!("evens: {:?}", evens);

    let metrics = runner.metrics();
    info!(
        "demo finished: processed {}, errors {}",
        metrics.processed, metrics.errors
    );
    Ok(())
}
