//! blink-bench Binary
//!
//! Runs the benchmark and validation phases against a Blink Store and exits
//! 0 when every check passed, 1 otherwise.

use clap::Parser;
use blink_bench::{Config, Runner};
use tracing_subscriber::{fmt, EnvFilter};

/// blink-bench
#[derive(Parser, Debug)]
#[command(name = "blink-bench")]
#[command(about = "Throughput, latency and eviction validation for Blink Store")]
#[command(version)]
struct Args {
    /// Store host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Store port
    #[arg(short, long, default_value = "8765")]
    port: u16,

    /// Operations per throughput and latency run
    #[arg(short = 'n', long, default_value = "10000")]
    ops: usize,

    /// Byte ceiling the store is expected to enforce
    #[arg(long, default_value = "2097152")]
    capacity_limit: u64,

    /// Number of inserts used to overfill the store
    #[arg(long, default_value = "4000")]
    capacity_inserts: usize,

    /// Value size of each capacity insert, in bytes
    #[arg(long, default_value = "1024")]
    capacity_value_size: usize,

    /// Minimum fraction of early keys that must be evicted
    #[arg(long, default_value = "0.5")]
    eviction_threshold: f64,

    /// Per-response read timeout in milliseconds
    #[arg(long, default_value = "5000")]
    read_timeout_ms: u64,

    /// Per-request write timeout in milliseconds
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,

    /// Only run the validation phase
    #[arg(long)]
    skip_bench: bool,
}

fn main() {
    // Logs go to stderr so the report on stdout stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,blink_bench=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("blink-bench v{}", blink_bench::VERSION);
    tracing::info!("Store address: {}:{}", args.host, args.port);

    // Build config from args
    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .ops(args.ops)
        .capacity_limit(args.capacity_limit)
        .capacity_inserts(args.capacity_inserts)
        .capacity_value_size(args.capacity_value_size)
        .eviction_threshold(args.eviction_threshold)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .skip_bench(args.skip_bench)
        .build();

    let runner = match Runner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            eprintln!("blink-bench: {}", e);
            std::process::exit(1);
        }
    };

    let report = runner.run();
    println!("{}", report);

    std::process::exit(report.exit_code());
}
