use clap::Parser;
use color_eyre::Result;
use stockroom::{
    app::App,
    cli::{Cli, Cmd},
    config::{self, Config},
    errors, listing, logging,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    errors::init()?;
    let _log_guard = logging::init()?;

    let args = Cli::parse();
    config::ensure_data_and_config_dirs_exist()?;
    let config = Config::new()?;
    let gateway = config.gateway.build(&config.data_dir)?;

    match args.command() {
        Cmd::List { json } => {
            let mut out = std::io::stdout().lock();
            listing::print_items(gateway.as_ref(), json, &mut out).await
        }
        cmd => {
            let tick_rate = args.tick_rate.unwrap_or(config.tick_rate);
            let frame_rate = args.frame_rate.unwrap_or(config.frame_rate);
            info!(?cmd, tick_rate, frame_rate, "starting");
            let mut app = App::new(gateway, &cmd, tick_rate, frame_rate)?;
            app.run().await
        }
    }
}
