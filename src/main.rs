#![allow(non_snake_case)]

use std::env;

use medCalendar::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            eprintln!("Unable to read config file {}: {}", path, err);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .init();

    if let Err(err) = medCalendar::cli::cli(config).await {
        tracing::error!(error = %err, "medCalendar exited with an error");
        std::process::exit(1);
    }
}
