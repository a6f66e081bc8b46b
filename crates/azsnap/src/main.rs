use clap::Parser;

use azsnap::config::CliArgs;

#[tokio::main]
async fn main() {
    azsnap::logging::init_logging();

    let cli = CliArgs::parse();
    if let Err(err) = azsnap::run(cli).await {
        eprintln!("snapshot report failed: {err}");
        std::process::exit(1);
    }
}
