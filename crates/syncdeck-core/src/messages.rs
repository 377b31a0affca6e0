use crate::clock::ClockDisplay;
use crate::sync_table::SyncTable;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

/// Direction of a manual page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NavDirection {
    Previous,
    Next,
}

/// Styling hint for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StatusSeverity {
    Info,
    Loading,
    Success,
    Error,
}

impl std::fmt::Display for StatusSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StatusSeverity::Info => "info",
            StatusSeverity::Loading => "loading",
            StatusSeverity::Success => "success",
            StatusSeverity::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// Why a render was requested. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderReason {
    Initial,
    Manual,
    Auto,
    Refresh,
}

impl std::fmt::Display for RenderReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RenderReason::Initial => "initial",
            RenderReason::Manual => "manual",
            RenderReason::Auto => "auto",
            RenderReason::Refresh => "refresh",
        };
        write!(f, "{}", label)
    }
}

/// Page counter and navigation button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PageIndicator {
    pub current: u32,
    pub total: u32,
    pub can_previous: bool,
    pub can_next: bool,
}

/// Inputs to [`crate::SyncSession::reduce`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    ConfigLoaded {
        table: SyncTable,
    },
    DocumentLoading,
    DocumentLoaded {
        total_pages: u32,
    },
    DocumentFailed {
        error: String,
    },
    Navigate(NavDirection),
    TimeUpdated {
        time: f64,
    },
    MetadataLoaded {
        duration: f64,
    },
    RenderCompleted {
        page: u32,
        generation: u64,
    },
    RenderFailed {
        page: u32,
        generation: u64,
        error: String,
    },
    ReleaseSuppression {
        epoch: u64,
    },
    /// The drawable area changed; draw the current page again.
    RefreshPage,
}

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Pause,
    Seek(f64),
    RenderPage {
        page: u32,
        generation: u64,
        reason: RenderReason,
    },
    /// Put the finished raster for `generation` on screen.
    PresentPage {
        page: u32,
        generation: u64,
    },
    ScheduleSuppressionRelease {
        epoch: u64,
        after: Duration,
    },
    ReportStatus {
        message: String,
        severity: StatusSeverity,
    },
    UpdateClock(ClockDisplay),
    UpdatePageIndicator(PageIndicator),
}

impl Effect {
    pub(crate) fn status(message: impl Into<String>, severity: StatusSeverity) -> Self {
        Effect::ReportStatus {
            message: message.into(),
            severity,
        }
    }
}
