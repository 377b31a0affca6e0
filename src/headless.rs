//! Stand-ins for the player, renderer and display so the sync core can run
//! without a browser: a clock-driven fake video, blank page rasters and a
//! surface that optionally writes frames to disk.

use crate::runtime::{
    DocumentRenderer, PageSurface, Playback, RenderError, RenderedPage, SessionHandle, StatusSink,
};
use async_trait::async_trait;
use image::{Rgba, RgbaImage};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use syncdeck_core::{
    ClockDisplay, PageIndicator, PageSize, SplitSizes, StatusSeverity, Viewport, fit_scale,
};
use tracing::{debug, error, info, trace, warn};

#[derive(Debug)]
struct PlaybackState {
    source: Option<String>,
    time: f64,
    duration: f64,
    paused: bool,
}

/// Outcome of one [`SimulatedPlayback::advance`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Paused or nothing loaded; the playhead stayed put.
    Idle,
    Playing,
    /// The playhead is at the end of the video.
    Ended,
}

/// A video that only exists as a position on a timeline.
///
/// Clones share state, so the driver can own one while a ticker advances
/// another. Seeks and loads are echoed back through the handle the way a
/// media element fires `timeupdate` and `loadedmetadata`.
#[derive(Debug, Clone)]
pub struct SimulatedPlayback {
    state: Arc<Mutex<PlaybackState>>,
    events: SessionHandle,
}

impl SimulatedPlayback {
    pub fn new(duration: f64, events: SessionHandle) -> Self {
        Self {
            state: Arc::new(Mutex::new(PlaybackState {
                source: None,
                time: 0.0,
                duration: duration.max(0.0),
                paused: true,
            })),
            events,
        }
    }

    fn state(&self) -> MutexGuard<'_, PlaybackState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Move the playhead forward by `secs` if playing. Reaching the end
    /// pauses. A paused video reports [`Progress::Idle`] unless it sits at
    /// the end.
    pub fn advance(&self, secs: f64) -> Progress {
        let (time, progress) = {
            let mut state = self.state();
            if state.source.is_none() {
                return Progress::Idle;
            }
            if state.time >= state.duration {
                return Progress::Ended;
            }
            if state.paused {
                return Progress::Idle;
            }
            state.time = (state.time + secs).min(state.duration);
            if state.time >= state.duration {
                debug!("Playback reached the end");
                state.paused = true;
                (state.time, Progress::Ended)
            } else {
                (state.time, Progress::Playing)
            }
        };
        self.events.time_updated(time);
        progress
    }
}

impl Playback for SimulatedPlayback {
    fn load(&mut self, url: &str) {
        let duration = {
            let mut state = self.state();
            state.source = Some(url.to_string());
            state.time = 0.0;
            state.paused = true;
            state.duration
        };
        info!(url, duration, "Video source set");
        self.events.metadata_loaded(duration);
    }

    fn current_time(&self) -> f64 {
        self.state().time
    }

    fn duration(&self) -> Option<f64> {
        let state = self.state();
        state.source.as_ref().map(|_| state.duration)
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }

    fn play(&mut self) {
        let mut state = self.state();
        if state.source.is_some() && state.time < state.duration {
            state.paused = false;
        }
    }

    fn pause(&mut self) {
        self.state().paused = true;
    }

    fn seek(&mut self, time: f64) {
        let time = {
            let mut state = self.state();
            state.time = time.clamp(0.0, state.duration);
            state.time
        };
        self.events.time_updated(time);
    }
}

/// Produces white pages of the right size with a progress bar along the top
/// showing how far into the document the page is.
#[derive(Debug)]
pub struct BlankRenderer {
    page_count: u32,
    page_size: PageSize,
    max_scale: f32,
    loaded: AtomicU32,
}

const BAR_HEIGHT: u32 = 8;
const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([40, 90, 200, 255]);

impl BlankRenderer {
    pub fn new(page_count: u32, max_scale: f32) -> Self {
        Self {
            page_count,
            page_size: PageSize::LETTER,
            max_scale,
            loaded: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl DocumentRenderer for BlankRenderer {
    async fn load(&self, url: &str) -> Result<u32, RenderError> {
        if url.trim().is_empty() {
            return Err(RenderError::Backend("empty document URL".to_string()));
        }
        self.loaded.store(self.page_count, Ordering::SeqCst);
        info!(url, pages = self.page_count, "Opened document");
        Ok(self.page_count)
    }

    async fn render_page(
        &self,
        page: u32,
        viewport: Viewport,
    ) -> Result<RenderedPage, RenderError> {
        let total = self.loaded.load(Ordering::SeqCst);
        if total == 0 {
            return Err(RenderError::NoDocument);
        }
        if page == 0 || page > total {
            return Err(RenderError::PageOutOfRange { page, total });
        }

        let scale = fit_scale(viewport, self.page_size, self.max_scale);
        let size = self.page_size.scaled(scale);
        let width = (size.width.round() as u32).max(1);
        let height = (size.height.round() as u32).max(1);

        let mut image = RgbaImage::from_pixel(width, height, PAPER);
        let filled = (u64::from(width) * u64::from(page) / u64::from(total)) as u32;
        for y in 0..BAR_HEIGHT.min(height) {
            for x in 0..filled.min(width) {
                image.put_pixel(x, y, INK);
            }
        }
        trace!(page, width, height, scale, "Rasterized blank page");

        Ok(RenderedPage { page, scale, image })
    }
}

/// Logs what would be on screen and, given a directory, writes each
/// presented page there as `page-NNNN.png`.
#[derive(Debug, Default)]
pub struct FrameDumpSurface {
    dir: Option<PathBuf>,
}

impl FrameDumpSurface {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }
}

impl PageSurface for FrameDumpSurface {
    fn present(&mut self, frame: &RenderedPage) {
        info!(
            page = frame.page,
            scale = frame.scale,
            width = frame.image.width(),
            height = frame.image.height(),
            "Page on screen"
        );
        let Some(dir) = &self.dir else {
            return;
        };
        if let Err(err) = std::fs::create_dir_all(dir) {
            warn!(path = %dir.display(), "Failed to create frame directory: {err}");
            return;
        }
        let path = dir.join(format!("page-{:04}.png", frame.page));
        match frame.image.save(&path) {
            Ok(()) => debug!(path = %path.display(), "Wrote frame"),
            Err(err) => warn!(path = %path.display(), "Failed to write frame: {err}"),
        }
    }

    fn show_page_indicator(&mut self, indicator: PageIndicator) {
        debug!(
            current = indicator.current,
            total = indicator.total,
            "Page {} of {}",
            indicator.current,
            indicator.total
        );
    }

    fn show_clock(&mut self, clock: &ClockDisplay) {
        trace!("{clock}");
    }

    fn apply_split(&mut self, sizes: SplitSizes) {
        debug!(video = sizes.video, document = sizes.document, "Panels resized");
    }
}

/// Status bar replacement that writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn report(&mut self, message: &str, severity: StatusSeverity) {
        match severity {
            StatusSeverity::Error => error!(%severity, "{message}"),
            StatusSeverity::Loading => debug!(%severity, "{message}"),
            StatusSeverity::Info | StatusSeverity::Success => info!(%severity, "{message}"),
        }
    }
}
