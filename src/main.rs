use anyhow::Result;
use comptoir::config::Config;
use comptoir::ledger;
use comptoir::logger::Logger;
use comptoir::ui;

fn print_usage() {
    println!("Usage: comptoir [--generate-config [PATH]]");
    println!();
    println!("  --generate-config [PATH]  Write a default configuration file and exit");
    println!("  --help                    Show this message");
    println!();
    println!("Set {} to a JSON file of entries to browse your own data.", ledger::DATA_ENV_VAR);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--help") | Some("-h") => {
            print_usage();
            return Ok(());
        }
        Some("--generate-config") => {
            let path = match args.get(1) {
                Some(path) => path.into(),
                None => Config::get_default_config_path()?,
            };
            return Config::generate_default_config(path);
        }
        Some(other) => {
            eprintln!("❌ Error: unknown argument '{}'", other);
            print_usage();
            return Ok(());
        }
        None => {}
    }

    let config = Config::load()?;
    let logger = Logger::from_config(config.logging.enabled)?;
    logger.init_global(&config.logging)?;

    let entries = ledger::load(chrono::Local::now().date_naive())?;

    // Run the TUI application
    ui::run_app(config, logger, entries).await?;

    Ok(())
}
