//! EXTRACT command - Pull the article text out of a web page.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use seo_core::ExtractedContent;
use serde::Serialize;

use super::{HumanReadable, endpoint, make_request, output, truncate};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Page URL (http or https)
    pub page_url: String,

    /// Show at most this many characters of content in human output
    #[arg(long, default_value_t = 600)]
    pub preview: usize,
}

/// Extraction result with the display preview length.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ExtractResponse {
    pub content: ExtractedContent,
    #[serde(skip)]
    pub preview: usize,
}

impl HumanReadable for ExtractResponse {
    fn print_human(&self) {
        let page = &self.content;

        println!("{}", page.title.green().bold());
        println!("{}", "=".repeat(60));
        println!();
        println!("  {} {}", "Method:".cyan(), page.extraction_method);
        println!("  {} {}", "Words:".cyan(), page.word_count);
        if !page.metadata.author.is_empty() {
            println!("  {} {}", "Author:".cyan(), page.metadata.author);
        }
        if !page.metadata.publish_date.is_empty() {
            println!("  {} {}", "Published:".cyan(), page.metadata.publish_date);
        }
        if !page.metadata.description.is_empty() {
            println!("  {} {}", "Description:".cyan(), page.metadata.description);
        }

        println!();
        println!("{}", "Content:".yellow());
        println!("{}", "-".repeat(60));
        println!("{}", truncate(&page.clean_text, self.preview));
        println!("{}", "-".repeat(60));
    }
}

/// Execute the extract command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ExtractArgs,
) -> Result<()> {
    let content: ExtractedContent = make_request(
        client
            .get(endpoint(base_url, "/api/extract-content"))
            .query(&[("url", args.page_url.as_str())]),
    )
    .await?;

    output(
        &ExtractResponse {
            content,
            preview: args.preview,
        },
        human,
    )
}
