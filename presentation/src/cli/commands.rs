//! CLI command definitions

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;

/// CLI arguments for agendai
#[derive(Parser, Debug)]
#[command(name = "agendai")]
#[command(author, version, about = "Scheduling assistant webhook backed by Gemini function calling")]
#[command(long_about = r#"
AgendAI answers Dialogflow CX webhook calls. Each intent becomes a prompt for a
Gemini model that can call calendar and spreadsheet tools before replying.

Configuration files are loaded from (in priority order):
1. AGENDAI_<SECTION>__<KEY> and GOOGLE_CLOUD_PROJECT environment variables
2. --config <path>     Explicit config file
3. ./agendai.toml      Project-level config
4. ~/.config/agendai/config.toml   Global config

Example:
  agendai serve --bind 127.0.0.1:8080
  agendai invoke --intent consultar_agenda --param data_consulta=2025-05-24
  agendai show-config
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the webhook HTTP server
    Serve {
        /// Listen address (overrides webhook.bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },

    /// Handle a single intent locally and print the reply
    Invoke {
        /// Intent display name (e.g. consultar_agenda)
        #[arg(long)]
        intent: String,

        /// Intent parameter as key=value; JSON values are parsed
        #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        params: Vec<(String, Value)>,

        /// Session identifier
        #[arg(long, default_value = "cli-session")]
        session: String,

        /// Language code (defaults to webhook.default_language)
        #[arg(long)]
        language: Option<String>,

        /// Print the reply, round count and executed tools as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configuration file locations and the effective configuration
    ShowConfig,
}

/// Parse `key=value`. The value is taken as JSON when it parses, otherwise as
/// a plain string, so `horas=24` is a number and `inicio=09:00` a string.
pub fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
