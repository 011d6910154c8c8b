//! HEALTH command - Show server status.

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, endpoint, make_request, output};

/// Arguments for the health command.
#[derive(Args)]
pub struct HealthArgs {}

/// Response from the health endpoint.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub uptime_sec: u64,
    pub server_time: String,
    pub env: EnvSummary,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvSummary {
    pub provider: Option<String>,
    pub openai_model: String,
    pub gemini_model: String,
    pub strict_model: bool,
    pub required: bool,
    pub dual: bool,
    pub has_keys: HasKeys,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HasKeys {
    pub openai: bool,
    pub gemini: bool,
}

fn yes_no(flag: bool) -> colored::ColoredString {
    if flag { "yes".green() } else { "no".dimmed() }
}

impl HumanReadable for HealthResponse {
    fn print_human(&self) {
        let status = if self.ok { "OK".green().bold() } else { "DOWN".red().bold() };
        println!("{} {}", "Server:".cyan(), status);
        println!("  {} {}s", "Uptime:".cyan(), self.uptime_sec);
        println!("  {} {}", "Server time:".cyan(), format_server_time(&self.server_time));

        let env = &self.env;
        println!();
        println!("{}", "Refinement:".yellow());
        println!(
            "  {} {}",
            "Provider:".cyan(),
            env.provider.as_deref().unwrap_or("disabled")
        );
        println!(
            "  {} {} (key: {})",
            "OpenAI:".cyan(),
            env.openai_model,
            yes_no(env.has_keys.openai)
        );
        println!(
            "  {} {} (key: {})",
            "Gemini:".cyan(),
            env.gemini_model,
            yes_no(env.has_keys.gemini)
        );
        println!(
            "  {} required={} strict={} dual={}",
            "Flags:".cyan(),
            yes_no(env.required),
            yes_no(env.strict_model),
            yes_no(env.dual)
        );
    }
}

/// Server time in local time, or as received when it is not RFC 3339.
fn format_server_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| {
            ts.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

/// Execute the health command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    _args: HealthArgs,
) -> Result<()> {
    let response: HealthResponse = make_request(client.get(endpoint(base_url, "/health"))).await?;
    output(&response, human)
}
