mod config;
mod engine;
mod export;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    logging::init(&config)?;
    let store = store::Store::open(&config.db_path)?;

    match args.len() {
        1 => run::as_tui(&store),
        2.. => run::as_cli(&args, &store),
        _ => {
            eprintln!("Usage: budgetwidget [command]");
            Ok(())
        }
    }
}
