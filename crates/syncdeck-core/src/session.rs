//! Runtime state of one video/document pairing.
//!
//! `SyncSession` owns the current page, the suppression guard and the render
//! generations. Hosts feed it [`SessionEvent`]s and carry out the returned
//! [`Effect`]s; the session itself never blocks, sleeps or talks to a player.
//!
//! Two paths change the page:
//! - manual navigation pauses playback, seeks to the page's first sync point
//!   and suppresses time-driven paging for a short window;
//! - time updates resolve a page from the sync table and render it when it
//!   differs from what is on screen.
//!
//! In both cases `current_page` only moves once the renderer reports success.

use crate::clock::ClockDisplay;
use crate::messages::{Effect, NavDirection, PageIndicator, RenderReason, SessionEvent, StatusSeverity};
use crate::render::RenderTracker;
use crate::suppression::SuppressionGuard;
use crate::sync_table::{FIRST_PAGE, SyncPoint, SyncTable};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use ts_rs::TS;

pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// How long time-driven paging stays off after a manual page change.
    pub suppression_window: Duration,
    /// Drop render completions that a newer request has superseded. With this
    /// off, whichever render finishes last decides the page.
    pub guard_stale_renders: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            suppression_window: DEFAULT_SUPPRESSION_WINDOW,
            guard_stale_renders: true,
        }
    }
}

/// Serializable view of the session for front ends.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    pub current_page: u32,
    pub total_pages: u32,
    pub can_previous: bool,
    pub can_next: bool,
    pub suppressed: bool,
    pub current_time: f64,
    pub clock: ClockDisplay,
    pub sync_points: Vec<SyncPoint>,
}

#[derive(Debug, Clone)]
pub struct SyncSession {
    settings: SessionSettings,
    table: Option<SyncTable>,
    total_pages: u32,
    current_page: u32,
    current_time: f64,
    duration: Option<f64>,
    suppression: SuppressionGuard,
    renders: RenderTracker,
}

impl SyncSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            table: None,
            total_pages: 0,
            current_page: FIRST_PAGE,
            current_time: 0.0,
            duration: None,
            suppression: SuppressionGuard::new(),
            renders: RenderTracker::default(),
        }
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn table(&self) -> Option<&SyncTable> {
        self.table.as_ref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppression.is_active()
    }

    /// Page the newest outstanding render is heading to, if any.
    pub fn pending_page(&self) -> Option<u32> {
        self.renders.pending_page()
    }

    pub fn page_indicator(&self) -> PageIndicator {
        PageIndicator {
            current: self.current_page,
            total: self.total_pages,
            can_previous: self.current_page > FIRST_PAGE,
            can_next: self.current_page < self.total_pages,
        }
    }

    pub fn clock(&self) -> ClockDisplay {
        ClockDisplay::new(self.current_time, self.duration)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let indicator = self.page_indicator();
        SessionSnapshot {
            current_page: indicator.current,
            total_pages: indicator.total,
            can_previous: indicator.can_previous,
            can_next: indicator.can_next,
            suppressed: self.is_suppressed(),
            current_time: self.current_time,
            clock: self.clock(),
            sync_points: self
                .table
                .as_ref()
                .map(|table| table.points().to_vec())
                .unwrap_or_default(),
        }
    }

    pub fn reduce(&mut self, event: SessionEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            SessionEvent::ConfigLoaded { table } => self.handle_config_loaded(table, &mut effects),
            SessionEvent::DocumentLoading => {
                effects.push(Effect::status("Loading document...", StatusSeverity::Loading));
            }
            SessionEvent::DocumentLoaded { total_pages } => {
                self.handle_document_loaded(total_pages, &mut effects)
            }
            SessionEvent::DocumentFailed { error } => {
                warn!(%error, "Document failed to load");
                effects.push(Effect::status(
                    format!("Error loading document: {error}"),
                    StatusSeverity::Error,
                ));
            }
            SessionEvent::Navigate(direction) => self.handle_navigate(direction, &mut effects),
            SessionEvent::TimeUpdated { time } => self.handle_time_updated(time, &mut effects),
            SessionEvent::MetadataLoaded { duration } => {
                self.duration = Some(duration);
                effects.push(Effect::UpdateClock(self.clock()));
            }
            SessionEvent::RenderCompleted { page, generation } => {
                self.handle_render_completed(page, generation, &mut effects)
            }
            SessionEvent::RenderFailed {
                page,
                generation,
                error,
            } => self.handle_render_failed(page, generation, error, &mut effects),
            SessionEvent::ReleaseSuppression { epoch } => {
                if self.suppression.release(epoch) {
                    debug!(epoch, "Time-driven paging resumed");
                } else {
                    trace!(epoch, "Ignoring superseded suppression release");
                }
            }
            SessionEvent::RefreshPage => self.handle_refresh_page(&mut effects),
        }

        effects
    }

    fn handle_config_loaded(&mut self, table: SyncTable, effects: &mut Vec<Effect>) {
        info!(sync_points = table.len(), "Sync table loaded");
        self.table = Some(table);
        effects.push(Effect::status(
            "Configuration loaded successfully",
            StatusSeverity::Success,
        ));
    }

    fn handle_document_loaded(&mut self, total_pages: u32, effects: &mut Vec<Effect>) {
        self.total_pages = total_pages;
        if total_pages == 0 {
            warn!("Document has no pages");
            effects.push(Effect::status(
                "Error loading document: no pages",
                StatusSeverity::Error,
            ));
            effects.push(Effect::UpdatePageIndicator(self.page_indicator()));
            return;
        }
        if let Some(max_page) = self.table.as_ref().and_then(SyncTable::max_page) {
            if max_page > total_pages {
                warn!(
                    max_page,
                    total_pages, "Sync table references pages past the end of the document"
                );
            }
        }
        self.current_page = self.current_page.clamp(FIRST_PAGE, total_pages);
        info!(total_pages, "Document loaded");
        self.request_render(FIRST_PAGE, RenderReason::Initial, effects);
        effects.push(Effect::UpdatePageIndicator(self.page_indicator()));
        effects.push(Effect::status(
            "Document loaded successfully",
            StatusSeverity::Success,
        ));
        effects.push(Effect::status("Ready", StatusSeverity::Success));
    }

    fn neighbour(&self, direction: NavDirection) -> Option<u32> {
        match direction {
            NavDirection::Previous if self.current_page > FIRST_PAGE => Some(self.current_page - 1),
            NavDirection::Next if self.current_page < self.total_pages => Some(self.current_page + 1),
            _ => None,
        }
    }

    fn handle_navigate(&mut self, direction: NavDirection, effects: &mut Vec<Effect>) {
        let Some(new_page) = self.neighbour(direction) else {
            debug!(
                ?direction,
                page = self.current_page,
                total_pages = self.total_pages,
                "Navigation would leave the document; ignoring"
            );
            return;
        };

        let epoch = self.suppression.engage();
        effects.push(Effect::Pause);

        match self.table.as_ref().and_then(|t| t.seek_time_for_page(new_page)) {
            Some(time) => {
                self.current_time = time;
                effects.push(Effect::Seek(time));
            }
            None => debug!(page = new_page, "No sync point for page; leaving playback time alone"),
        }

        info!(?direction, from = self.current_page, to = new_page, "Manual page change");
        self.request_render(new_page, RenderReason::Manual, effects);
        effects.push(Effect::ScheduleSuppressionRelease {
            epoch,
            after: self.settings.suppression_window,
        });
    }

    fn handle_time_updated(&mut self, time: f64, effects: &mut Vec<Effect>) {
        self.current_time = time;

        if self.suppression.is_active() {
            trace!(time, "Time update during suppression window");
        } else if let Some(target) = self.table.as_ref().map(|t| t.resolve_page(time)) {
            let showing = self.renders.pending_page().unwrap_or(self.current_page);
            if target != showing {
                if (FIRST_PAGE..=self.total_pages).contains(&target) {
                    debug!(time, from = showing, to = target, "Following playback to new page");
                    self.request_render(target, RenderReason::Auto, effects);
                } else {
                    debug!(
                        time,
                        target,
                        total_pages = self.total_pages,
                        "Resolved page is outside the document; skipping"
                    );
                }
            }
        }

        effects.push(Effect::UpdateClock(self.clock()));
    }

    fn handle_render_completed(&mut self, page: u32, generation: u64, effects: &mut Vec<Effect>) {
        let stale = self.renders.is_stale(generation);
        self.renders.settle(generation);
        if stale && self.settings.guard_stale_renders {
            debug!(
                page,
                generation,
                latest = self.renders.latest_generation(),
                "Discarding superseded render"
            );
            return;
        }
        self.current_page = page;
        effects.push(Effect::PresentPage { page, generation });
        effects.push(Effect::UpdatePageIndicator(self.page_indicator()));
    }

    fn handle_render_failed(
        &mut self,
        page: u32,
        generation: u64,
        error: String,
        effects: &mut Vec<Effect>,
    ) {
        self.renders.settle(generation);
        warn!(page, generation, %error, "Page render failed");
        effects.push(Effect::status(
            format!("Error rendering page: {error}"),
            StatusSeverity::Error,
        ));
    }

    fn handle_refresh_page(&mut self, effects: &mut Vec<Effect>) {
        if self.total_pages == 0 {
            return;
        }
        let page = self.renders.pending_page().unwrap_or(self.current_page);
        self.request_render(page, RenderReason::Refresh, effects);
    }

    fn request_render(&mut self, page: u32, reason: RenderReason, effects: &mut Vec<Effect>) {
        let generation = self.renders.request(page);
        trace!(page, generation, %reason, "Render requested");
        effects.push(Effect::RenderPage {
            page,
            generation,
            reason,
        });
    }
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}
