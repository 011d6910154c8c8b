//! ANALYZE command - Run the SEO analysis on a text.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use seo_analysis::Analyzer;
use seo_core::{AnalysisReport, DocumentInput, SeoSource};
use serde::{Deserialize, Serialize};

use super::{HumanReadable, endpoint, make_request, output, truncate};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Read the text from this file instead of stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Document title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Run the deterministic pipeline locally instead of calling the server
    #[arg(long)]
    pub offline: bool,

    /// Model used for refinement (e.g. gpt-4o-mini, gemini-2.5-flash)
    #[arg(long, conflicts_with = "offline")]
    pub model: Option<String>,
}

/// Request body for the analyze endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

/// Response from the analyze endpoint.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalysisReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_comparison: Option<serde_json::Value>,
}

impl HumanReadable for AnalyzeResponse {
    fn print_human(&self) {
        let report = &self.data;

        println!("{}", "SEO Analysis".green().bold());
        println!("{}", "=".repeat(60));
        println!();

        let summary = &report.summary;
        println!("  {} {}", "Focus:".cyan(), summary.recommended_focus);
        println!(
            "  {} {} ({:.0}%)",
            "Intent:".cyan(),
            report.search_intent.intent_type.as_str(),
            report.search_intent.confidence * 100.0
        );
        println!("  {} {:.1}", "Readability:".cyan(), summary.readability_score);
        if !summary.main_topics.is_empty() {
            println!("  {} {}", "Topics:".cyan(), summary.main_topics.join(", "));
        }
        println!(
            "  {} {} words, ~{} min",
            "Length:".cyan(),
            report.author_metrics.word_count,
            report.author_metrics.reading_time_min
        );

        println!();
        println!("{}", "SEO Outputs:".yellow());
        let source = match &report.seo_source {
            SeoSource::Deterministic => "deterministic".to_string(),
            SeoSource::Llm { provider, model } => format!("{provider} / {model}"),
        };
        println!("  {} {}", "Source:".cyan(), source);
        println!("  {} {}", "Title:".cyan(), report.seo_outputs.title);
        println!("  {} {}", "Meta:".cyan(), report.seo_outputs.meta_description);
        println!("  {} {}", "Keywords:".cyan(), report.seo_outputs.keywords_line);

        if !report.prioritized_keywords.items.is_empty() {
            println!();
            println!("{}", "Top Keywords:".yellow());
            for keyword in report.prioritized_keywords.items.iter().take(10) {
                println!(
                    "  {:>3}  {:<40} {}",
                    keyword.score,
                    truncate(&keyword.term, 40),
                    keyword.category.as_str().dimmed()
                );
            }
        }

        for category in &report.author_recommendations.categories {
            println!();
            println!("{}", format!("{}:", category.category).yellow());
            for item in &category.items {
                println!("  - {}", item);
            }
        }

        if self.llm_comparison.is_some() {
            println!();
            println!("{}", "Provider comparison included (see JSON output).".dimmed());
        }
    }
}

/// Execute the analyze command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: AnalyzeArgs,
) -> Result<()> {
    let text = read_text(args.file.as_ref())?;
    if text.trim().is_empty() {
        bail!("no text to analyze");
    }

    let response = if args.offline {
        let mut input = DocumentInput::new(text);
        if let Some(title) = args.title {
            input = input.with_title(title);
        }
        AnalyzeResponse {
            success: true,
            data: Analyzer::default().analyze(&input).into_report(),
            llm_comparison: None,
        }
    } else {
        let request = AnalyzeRequest {
            text: &text,
            title: args.title.as_deref(),
            model: args.model.as_deref(),
        };
        make_request(
            client
                .post(endpoint(base_url, "/api/analyze-text"))
                .json(&request),
        )
        .await?
    };

    output(&response, human)
}

fn read_text(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
