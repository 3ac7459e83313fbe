use anyhow::Context;
use clap::Parser;
use remote_ui::cli::Cli;
use remote_ui::config::Config;
use remote_ui::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_path = init_tracing(cli.log_file.as_deref());

    let file_config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;
    let config = cli.apply(file_config);
    config.validate().context("Invalid configuration")?;

    if cli.print_config {
        print!("{}", config.to_toml().context("Failed to serialize config")?);
        return Ok(());
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log = ?log_path,
        screen = ?config.defaults.screen,
        "Starting remote-ui"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = remote_ui::ui::run(&config, runtime.handle().clone());
    runtime.shutdown_timeout(std::time::Duration::from_millis(200));
    result.context("Terminal UI failed")?;

    tracing::info!("Exited cleanly");
    Ok(())
}
