//! Terminal reviewer lookup.

use std::path::Path;

use console::style;

use super::OutputFormat;
use crate::config::Settings;
use crate::models::{ReviewQuery, ReviewerNames};
use crate::report::render_report;
use crate::server::{AppState, ReviewsResponse};
use crate::services::local_today;

/// Look up reviewers for `link` on `date` and print them.
pub async fn cmd_reviewers(
    settings: &Settings,
    link: &str,
    date: &str,
    format: OutputFormat,
    pdf: Option<&Path>,
) -> anyhow::Result<()> {
    let query = ReviewQuery::from_params(Some(link), Some(date), local_today())?;
    let state = AppState::new(settings)?;

    if format == OutputFormat::Table {
        eprintln!(
            "{} Fetching up to {} reviews for {}...",
            style("→").cyan(),
            settings.max_count,
            style(&query.app_id).bold()
        );
    }

    let names = state.reviewers.reviewers(&query).await?;

    if let Some(path) = pdf {
        let bytes = render_report(query.target_date, &names)?;
        tokio::fs::write(path, bytes).await?;
        if format == OutputFormat::Table {
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                path.display()
            );
        }
    }

    match format {
        OutputFormat::Table => print_table(&query, &names),
        OutputFormat::Json => {
            let body = ReviewsResponse::success(names);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

fn print_table(query: &ReviewQuery, names: &ReviewerNames) {
    println!(
        "{} reviewer(s) for {} on {}",
        style(names.len()).bold(),
        query.app_id,
        query.target_date
    );
    if names.is_empty() {
        println!("  {}", style("No reviews on this day").dim());
        return;
    }

    let width = names.len().to_string().len();
    for (i, name) in names.iter().enumerate() {
        println!("  {:>width$}. {}", i + 1, name, width = width);
    }
}
