//! Interfaces to the pieces the sync core does not own: the video player, the
//! document renderer, the status bar and the surface pages are drawn on.

use async_trait::async_trait;
use image::RgbaImage;
use syncdeck_core::{ClockDisplay, PageIndicator, SplitSizes, StatusSeverity, Viewport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no document loaded")]
    NoDocument,
    #[error("page {page} is outside the document (1..={total})")]
    PageOutOfRange { page: u32, total: u32 },
    #[error("{0}")]
    Backend(String),
}

/// A page rasterized for a specific viewport.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: u32,
    pub scale: f32,
    pub image: RgbaImage,
}

/// Decodes a document and rasterizes its pages.
///
/// Renders run as spawned tasks and may overlap; implementations must not
/// assume one finishes before the next starts.
#[async_trait]
pub trait DocumentRenderer: Send + Sync + 'static {
    /// Open the document at `url` and return its page count.
    async fn load(&self, url: &str) -> Result<u32, RenderError>;

    async fn render_page(&self, page: u32, viewport: Viewport)
    -> Result<RenderedPage, RenderError>;
}

/// The video element.
///
/// Time-changed and metadata-loaded notifications are not part of this trait:
/// implementations post them through the driver's
/// [`SessionHandle`](super::SessionHandle).
pub trait Playback {
    fn load(&mut self, url: &str);
    fn current_time(&self) -> f64;
    fn duration(&self) -> Option<f64>;
    fn is_paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, time: f64);
}

pub trait StatusSink {
    fn report(&mut self, message: &str, severity: StatusSeverity);
}

/// Where finished pages, the page counter and the clock end up.
pub trait PageSurface {
    fn present(&mut self, frame: &RenderedPage);
    fn show_page_indicator(&mut self, indicator: PageIndicator);
    fn show_clock(&mut self, clock: &ClockDisplay);
    /// Resize the video and document panels, as percentages of the container.
    fn apply_split(&mut self, sizes: SplitSizes);
}
