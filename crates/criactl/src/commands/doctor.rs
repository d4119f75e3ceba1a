//! Configuration sanity report.

use anyhow::Result;
use owo_colors::OwoColorize;

use cria::config::API_KEY_ENV;
use cria::CriaConfig;

use crate::errors::{EXIT_CONFIG_MISSING, EXIT_SUCCESS};

pub fn run() -> Result<i32> {
    let config = CriaConfig::load();
    let kw = 14;

    match CriaConfig::path() {
        Some(path) if path.exists() => {
            println!("{:kw$} {}", "config file", path.display());
        }
        Some(path) => {
            println!("{:kw$} {} (not present)", "config file", path.display());
        }
        None => println!("{:kw$} no config directory", "config file"),
    }

    println!("{:kw$} {}", "model", config.model);
    println!("{:kw$} {}", "endpoint", config.endpoint);
    println!("{:kw$} {}s", "timeout", config.request_timeout_secs);

    match config.resolved_api_key() {
        Some(key) => {
            println!("{:kw$} {} ({})", "api key", mask(key), "OK".green());
            Ok(EXIT_SUCCESS)
        }
        None => {
            println!(
                "{:kw$} {} — set {} or add api_key to the config file",
                "api key",
                "missing".red().bold(),
                API_KEY_ENV
            );
            Ok(EXIT_CONFIG_MISSING)
        }
    }
}

/// Show just enough of the credential to recognize it.
fn mask(key: &str) -> String {
    if key.len() <= 6 {
        "******".to_string()
    } else {
        format!("{}…{}", &key[..4], &key[key.len() - 2..])
    }
}
