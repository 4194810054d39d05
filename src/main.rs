use anyhow::Result;
use clap::Parser;
use shopping_cart_cli::{
    cli::{Args, CliApp},
    utils::Config,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?.with_cart_file(args.file.clone());

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&config.log_level)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "Shopping cart starting ({} environment, cart file {})",
        config.environment,
        config.cart_file.display()
    );

    let mut app = CliApp::new(&config);
    app.run(args.command)?;

    tracing::info!("Shopping cart stopped");
    Ok(())
}
