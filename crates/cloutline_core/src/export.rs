//! crates/cloutline_core/src/export.rs
//!
//! Serializes a selection of hooks into a downloadable file.
//!
//! "pdf" and "docx" produce the plain-text report with the document MIME type;
//! no binary document encoding is performed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Audience, Hook, Platform, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Txt,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Txt => "text/plain",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Which hooks an export starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportSource {
    #[default]
    All,
    Favorites,
    /// Hooks created in the last 30 days.
    Recent,
}

const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: ExportFormat,
    #[serde(default = "default_true")]
    pub include_metadata: bool,
    /// Keep only hooks in these categories. Empty or absent keeps everything.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Export buffer error: {0}")]
    Buffer(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRecord<'a> {
    text: &'a str,
    topic: &'a str,
    category: &'a str,
    engagement: u32,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    metadata: Option<ExportMetadata<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportMetadata<'a> {
    id: &'a str,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audience: Option<Audience>,
}

/// Picks the starting set of hooks for `source`.
pub fn select_hooks(
    source: ExportSource,
    generated: Vec<Hook>,
    favorites: Vec<Hook>,
    now: DateTime<Utc>,
) -> Vec<Hook> {
    match source {
        ExportSource::All => generated,
        ExportSource::Favorites => favorites,
        ExportSource::Recent => {
            let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
            generated
                .into_iter()
                .filter(|hook| hook.created_at >= cutoff)
                .collect()
        }
    }
}

/// Applies the date and category filters, then encodes the result.
pub fn export_hooks(
    hooks: &[Hook],
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<ExportedFile, ExportError> {
    let selected: Vec<&Hook> = hooks.iter().filter(|hook| keep(hook, options)).collect();
    let records: Vec<ExportRecord<'_>> = selected
        .iter()
        .map(|hook| to_record(hook, options.include_metadata))
        .collect();

    let body = match options.format {
        ExportFormat::Json => serde_json::to_vec_pretty(&records)?,
        ExportFormat::Csv => encode_csv(&records, options.include_metadata)?,
        ExportFormat::Txt => encode_listing(&records).into_bytes(),
        ExportFormat::Pdf | ExportFormat::Docx => encode_report(&records, now).into_bytes(),
    };

    Ok(ExportedFile {
        file_name: format!(
            "cloutline-export-{}.{}",
            now.timestamp_millis(),
            options.format.extension()
        ),
        mime_type: options.format.mime_type(),
        body,
    })
}

fn keep(hook: &Hook, options: &ExportOptions) -> bool {
    if options.start.is_some_and(|start| hook.created_at < start) {
        return false;
    }
    if options.end.is_some_and(|end| hook.created_at > end) {
        return false;
    }
    match &options.categories {
        Some(categories) if !categories.is_empty() => categories.contains(&hook.category),
        _ => true,
    }
}

fn to_record(hook: &Hook, include_metadata: bool) -> ExportRecord<'_> {
    ExportRecord {
        text: &hook.text,
        topic: &hook.topic,
        category: &hook.category,
        engagement: hook.engagement,
        metadata: include_metadata.then(|| ExportMetadata {
            id: &hook.id,
            created_at: hook.created_at,
            platform: hook.platform,
            style: hook.style,
            audience: hook.audience,
        }),
    }
}

fn encode_csv(records: &[ExportRecord<'_>], include_metadata: bool) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    let mut header = vec!["text", "topic", "category", "engagement"];
    if include_metadata {
        header.extend(["id", "createdAt", "platform", "style", "audience"]);
    }
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.text.to_string(),
            record.topic.to_string(),
            record.category.to_string(),
            record.engagement.to_string(),
        ];
        if let Some(meta) = &record.metadata {
            row.push(meta.id.to_string());
            row.push(meta.created_at.to_rfc3339());
            row.push(meta.platform.map(|p| p.as_str()).unwrap_or_default().to_string());
            row.push(meta.style.map(|s| s.as_str()).unwrap_or_default().to_string());
            row.push(meta.audience.map(|a| a.as_str()).unwrap_or_default().to_string());
        }
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}

fn encode_listing(records: &[ExportRecord<'_>]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(index, r)| {
            format!(
                "{}. {}\n   Topic: {}\n   Category: {}\n   Engagement: {}%\n",
                index + 1,
                r.text,
                r.topic,
                r.category,
                r.engagement
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn encode_report(records: &[ExportRecord<'_>], now: DateTime<Utc>) -> String {
    let entries = records
        .iter()
        .enumerate()
        .map(|(index, r)| {
            format!(
                "{}. {}\n   Topic: {} | Category: {} | Engagement: {}%\n",
                index + 1,
                r.text,
                r.topic,
                r.category,
                r.engagement
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Cloutline Export Report\n\nGenerated: {}\nTotal Hooks: {}\n\n{}",
        now.format("%Y-%m-%d %H:%M:%S UTC"),
        records.len(),
        entries
    )
}
