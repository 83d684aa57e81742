//! Rendering of the merged job list to the terminal.

use owo_colors::OwoColorize;

use aigis_client::ApiClient;
use aigis_models::{JobRecord, StyleKey};

/// Print the merged view, one line per job, newest first.
pub fn print_jobs(records: &[JobRecord], client: &ApiClient) {
    if records.is_empty() {
        println!("no jobs yet");
        return;
    }

    for job in records {
        let badge = status_badge(job);
        let short_id = job.id.get(..8).unwrap_or(&job.id);
        let mut line = format!(
            "[{:8}] {}  {:>3}%  {}  {}",
            job.kind,
            short_id,
            job.progress,
            badge,
            job.subject
        );

        if let Some(score) = job.virality_score {
            line.push_str(&format!("  virality {score:.0}"));
        }
        if job.download_available() {
            if let Some(path) = &job.output_url {
                line.push_str(&format!("  -> {}", client.download_url(path)));
            }
        }
        if let Some(error) = &job.error {
            line.push_str(&format!("  ({error})"));
        }

        println!("{line}");
    }
}

/// Status text colored by its style key.
fn status_badge(job: &JobRecord) -> String {
    let text = format!("{:11}", job.status.as_str());
    match job.status.style_key() {
        StyleKey::Amber => text.yellow().to_string(),
        StyleKey::Blue => text.blue().to_string(),
        StyleKey::Green => text.green().to_string(),
        StyleKey::Red => text.red().to_string(),
    }
}
