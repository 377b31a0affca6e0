//! The JSON document pairing a video with a document.
//!
//! ```json
//! {
//!   "videoUrl": "lecture.mp4",
//!   "documentUrl": "slides.pdf",
//!   "sync": [{ "time": 0, "page": 1 }, { "time": 42.5, "page": 2 }]
//! }
//! ```
//!
//! `pdfUrl` is accepted in place of `documentUrl`.

use super::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use syncdeck_core::{SyncPoint, SyncTable};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub video_url: String,
    pub document_url: String,
    /// In the order they were listed; [`SyncConfig::table`] sorts them.
    pub sync: Vec<SyncPoint>,
}

impl SyncConfig {
    pub fn table(&self) -> SyncTable {
        SyncTable::new(self.sync.iter().copied())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSyncConfig {
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default, alias = "pdfUrl")]
    document_url: Option<String>,
    #[serde(default)]
    sync: Option<Vec<RawSyncPoint>>,
}

#[derive(Debug, Deserialize)]
struct RawSyncPoint {
    time: f64,
    page: i64,
}

/// Load from a filesystem path or an `http(s)://` URL.
pub fn load_sync_config(source: &str) -> Result<SyncConfig, ConfigError> {
    let contents = if is_remote(source) {
        fetch(source)?
    } else {
        fs::read_to_string(source).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                ConfigError::NotFound(source.to_string())
            } else {
                ConfigError::Io {
                    path: source.to_string(),
                    source: err,
                }
            }
        })?
    };
    let config = parse_sync_config(&contents)?;
    info!(
        source,
        video = %config.video_url,
        document = %config.document_url,
        sync_points = config.sync.len(),
        "Loaded sync configuration"
    );
    Ok(config)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch(url: &str) -> Result<String, ConfigError> {
    debug!(url, "Fetching sync configuration");
    let response = reqwest::blocking::get(url).map_err(|source| ConfigError::Fetch {
        url: url.to_string(),
        source,
    })?;
    if !response.status().is_success() {
        debug!(url, status = %response.status(), "Sync configuration request failed");
        return Err(ConfigError::NotFound(url.to_string()));
    }
    response.text().map_err(|source| ConfigError::Fetch {
        url: url.to_string(),
        source,
    })
}

/// Parse and validate the JSON text of a sync configuration.
pub fn parse_sync_config(contents: &str) -> Result<SyncConfig, ConfigError> {
    let raw: RawSyncConfig = serde_json::from_str(contents)?;

    let video_url = raw.video_url.filter(|url| !url.trim().is_empty());
    let document_url = raw.document_url.filter(|url| !url.trim().is_empty());
    let mut missing = Vec::new();
    if video_url.is_none() {
        missing.push("videoUrl");
    }
    if document_url.is_none() {
        missing.push("documentUrl");
    }
    if raw.sync.is_none() {
        missing.push("sync");
    }
    let (Some(video_url), Some(document_url), Some(raw_points)) =
        (video_url, document_url, raw.sync)
    else {
        return Err(ConfigError::MissingFields(missing));
    };

    let sync = raw_points
        .into_iter()
        .enumerate()
        .map(|(index, point)| validate_point(index, point))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SyncConfig {
        video_url,
        document_url,
        sync,
    })
}

fn validate_point(index: usize, point: RawSyncPoint) -> Result<SyncPoint, ConfigError> {
    if !point.time.is_finite() || point.time < 0.0 {
        return Err(ConfigError::InvalidSyncPoint {
            index,
            reason: format!("time must be a non-negative number, got {}", point.time),
        });
    }
    let page = u32::try_from(point.page)
        .ok()
        .filter(|page| *page >= 1)
        .ok_or_else(|| ConfigError::InvalidSyncPoint {
            index,
            reason: format!("page must be a positive integer, got {}", point.page),
        })?;
    Ok(SyncPoint::new(point.time, page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_sorts_table() {
        let config = parse_sync_config(
            r#"{
                "videoUrl": "talk.mp4",
                "documentUrl": "slides.pdf",
                "sync": [{"time": 30, "page": 3}, {"time": 0, "page": 1}, {"time": 12.5, "page": 2}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.video_url, "talk.mp4");
        assert_eq!(config.sync[0], SyncPoint::new(30.0, 3));
        let table = config.table();
        assert_eq!(table.points()[0], SyncPoint::new(0.0, 1));
        assert_eq!(table.resolve_page(20.0), 2);
    }

    #[test]
    fn accepts_pdf_url_alias() {
        let config =
            parse_sync_config(r#"{"videoUrl": "v.webm", "pdfUrl": "doc.pdf", "sync": []}"#)
                .unwrap();
        assert_eq!(config.document_url, "doc.pdf");
        assert!(config.sync.is_empty());
    }

    #[test]
    fn reports_every_missing_field() {
        let err = parse_sync_config(r#"{"videoUrl": ""}"#).unwrap_err();
        match err {
            ConfigError::MissingFields(fields) => {
                assert_eq!(fields, vec!["videoUrl", "documentUrl", "sync"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_fields_message_names_fields() {
        let err = parse_sync_config(r#"{"videoUrl": "a", "documentUrl": "b"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: missing required fields (sync)"
        );
    }

    #[test]
    fn rejects_negative_time_and_zero_page() {
        let err = parse_sync_config(
            r#"{"videoUrl": "a", "documentUrl": "b", "sync": [{"time": 0, "page": 1}, {"time": -1, "page": 2}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSyncPoint { index: 1, .. }));

        let err = parse_sync_config(
            r#"{"videoUrl": "a", "documentUrl": "b", "sync": [{"time": 4, "page": 0}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSyncPoint { index: 0, .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_sync_config("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_sync_config("/definitely/not/here/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
