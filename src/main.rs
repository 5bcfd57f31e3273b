use clap::Parser;
use creator_curve::cli::{Cli, Commands};
use creator_curve::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = creator_curve::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Price(args) => args.execute(&config)?,
        Commands::Quote(args) => args.execute(&config)?,
        Commands::OptimalSize(args) => args.execute(&config)?,
        Commands::Score(args) => args.execute(&config)?,
        Commands::Aggregate(args) => args.execute()?,
        Commands::Config => {
            println!("Current configuration:");
            for (name, params) in [
                ("new_coin", &config.curve.new_coin),
                ("established", &config.curve.established),
            ] {
                println!(
                    "  Curve[{}]: k={}, cap={}, max_slippage={:.2}%, decay={}",
                    name,
                    params.base_k,
                    params.total_supply_cap,
                    params.max_slippage * 100.0,
                    params.time_decay_factor
                );
            }
            println!(
                "  Quote: deadline={}s (+<{}s jitter)",
                config.quote.deadline_secs, config.quote.deadline_jitter_secs
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={:?}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
