//! Axum route handler for resume analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::extractor::{extract_text, DocumentFormat};
use crate::analysis::gaps::GapTarget;
use crate::analysis::pipeline::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;
use crate::trends::handlers::non_blank;
use crate::trends::{build_trend_report, TrendReport};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct UploadedDocument {
    filename: String,
    data: Bytes,
}

/// Fields of the multipart analysis form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    resume: Option<UploadedDocument>,
    job_description: Option<UploadedDocument>,
    target_job: Option<String>,
    include_trends: Option<bool>,
    trend_query: Option<String>,
    trend_location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub report: AnalysisReport,
    #[serde(flatten)]
    pub trends: Option<TrendReport>,
}

impl AnalyzeForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "resume" | "jobDescription" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let data = field.bytes().await?;
                    // Browsers send an empty part for an untouched file input.
                    if filename.is_empty() {
                        continue;
                    }
                    let doc = Some(UploadedDocument { filename, data });
                    if name == "resume" {
                        form.resume = doc;
                    } else {
                        form.job_description = doc;
                    }
                }
                "targetJob" => form.target_job = non_blank(Some(field.text().await?)),
                "includeTrends" => form.include_trends = Some(parse_flag(&field.text().await?)),
                "trendQuery" => form.trend_query = non_blank(Some(field.text().await?)),
                "trendLocation" => form.trend_location = non_blank(Some(field.text().await?)),
                other => debug!("Ignoring multipart field '{other}'"),
            }
        }

        Ok(form)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Extracts text off the async runtime. Unknown formats and empty output are
/// both extraction failures.
async fn extract_document(doc: UploadedDocument) -> Result<String, AppError> {
    let Some(format) = DocumentFormat::from_filename(&doc.filename) else {
        return Err(AppError::Extraction(format!(
            "unsupported file type: {}",
            doc.filename
        )));
    };

    let data = doc.data;
    let text = tokio::task::spawn_blocking(move || extract_text(&data, format))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    if text.trim().is_empty() {
        return Err(AppError::Extraction(format!(
            "no text extracted from {}",
            doc.filename
        )));
    }
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze-resume
///
/// Multipart: `resume` (required), `jobDescription`, `targetJob`,
/// `includeTrends`, `trendQuery`, `trendLocation`.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = AnalyzeForm::read(multipart).await?;

    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
    info!("Analyzing resume '{}' ({} bytes)", resume.filename, resume.data.len());

    let resume_text = extract_document(resume).await?;
    let job_description_text = match form.job_description {
        Some(doc) => Some(extract_document(doc).await?),
        None => None,
    };

    let target = match form.target_job.or_else(|| state.config.default_target_job.clone()) {
        Some(title) => GapTarget::Job(title),
        None => GapTarget::MatchedJobs,
    };
    let report = state
        .analyzer
        .analyze(&resume_text, job_description_text.as_deref(), target);

    let trends = if form.include_trends.unwrap_or(state.config.include_trends) {
        let query = form
            .trend_query
            .unwrap_or_else(|| state.config.trend_query.clone());
        let location = form
            .trend_location
            .unwrap_or_else(|| state.config.trend_location.clone());
        Some(
            build_trend_report(
                state.job_search.as_ref(),
                &state.analyzer,
                &query,
                &location,
            )
            .await,
        )
    } else {
        None
    };

    Ok(Json(AnalyzeResponse { report, trends }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("1"));
        assert!(parse_flag("on"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("maybe"));
    }

    #[tokio::test]
    async fn test_extract_document_rejects_unknown_extension() {
        let doc = UploadedDocument {
            filename: "resume.odt".to_string(),
            data: Bytes::from_static(b"python"),
        };
        assert!(matches!(
            extract_document(doc).await,
            Err(AppError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_document_rejects_blank_text() {
        let doc = UploadedDocument {
            filename: "resume.txt".to_string(),
            data: Bytes::from_static(b"  \n "),
        };
        assert!(matches!(
            extract_document(doc).await,
            Err(AppError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_document_plain_text() {
        let doc = UploadedDocument {
            filename: "resume.TXT".to_string(),
            data: Bytes::from_static(b"Docker and AWS"),
        };
        assert_eq!(extract_document(doc).await.unwrap(), "Docker and AWS");
    }
}
