//! Single-threaded event loop around [`SyncSession`].
//!
//! Everything the session asks for comes back as an [`Effect`]; the driver
//! carries those out against the collaborators. Renders and timers run as
//! spawned tasks and report back through the same channel as player and
//! keyboard input, so the session only ever sees one event at a time.

mod collaborators;
mod shortcuts;

pub use collaborators::{
    DocumentRenderer, PageSurface, Playback, RenderError, RenderedPage, StatusSink,
};
pub use shortcuts::{FocusTarget, KeyAction, KeyInput, Modifiers, Shortcuts};

use crate::config::{AppConfig, SyncConfig};
use crate::debounce::Debouncer;
use std::sync::Arc;
use syncdeck_core::{
    DividerDrag, Effect, NavDirection, SessionEvent, StatusSeverity, SyncSession, Viewport,
};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// Consecutive empty polls before [`SyncDriver::run_until_idle`] gives up.
const IDLE_POLLS: usize = 4;

/// Everything that can wake the driver.
#[derive(Debug)]
pub enum DriverEvent {
    Session(SessionEvent),
    Key(KeyInput),
    /// Play/pause button.
    TogglePlayback,
    /// The window is being resized; the document container now has this size.
    /// Re-rendering waits for the resize to settle.
    WindowResized {
        container_width: f32,
        container_height: f32,
    },
    /// The divider between the panels was grabbed. `window_width` picks the
    /// split orientation; `video_flex_basis` is the video panel's computed
    /// `flex-basis` at that moment.
    DividerPressed {
        pointer: (f32, f32),
        window_width: f32,
        container_size: f32,
        video_flex_basis: String,
    },
    /// The pointer moved while the divider is held.
    DividerMoved {
        pointer: (f32, f32),
        container_size: f32,
    },
    /// The panel divider was let go; re-render right away.
    DividerReleased {
        container_width: f32,
        container_height: f32,
    },
    Rendered {
        page: u32,
        generation: u64,
        result: Result<RenderedPage, RenderError>,
    },
    Shutdown,
}

/// Cloneable sender used by input sources and collaborators.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<DriverEvent>,
}

impl SessionHandle {
    /// Returns false once the driver is gone.
    pub fn send(&self, event: DriverEvent) -> bool {
        let delivered = self.tx.send(event).is_ok();
        if !delivered {
            trace!("Driver stopped; dropping event");
        }
        delivered
    }

    pub fn session(&self, event: SessionEvent) -> bool {
        self.send(DriverEvent::Session(event))
    }

    pub fn time_updated(&self, time: f64) -> bool {
        self.session(SessionEvent::TimeUpdated { time })
    }

    pub fn metadata_loaded(&self, duration: f64) -> bool {
        self.session(SessionEvent::MetadataLoaded { duration })
    }

    pub fn navigate(&self, direction: NavDirection) -> bool {
        self.session(SessionEvent::Navigate(direction))
    }

    pub fn key(&self, input: KeyInput) -> bool {
        self.send(DriverEvent::Key(input))
    }

    pub fn shutdown(&self) -> bool {
        self.send(DriverEvent::Shutdown)
    }
}

/// Receiving half of the driver's channel.
#[derive(Debug)]
pub struct EventInbox {
    handle: SessionHandle,
    rx: mpsc::UnboundedReceiver<DriverEvent>,
}

impl EventInbox {
    pub async fn recv(&mut self) -> Option<DriverEvent> {
        self.rx.recv().await
    }

    /// Next event if one is already queued.
    pub fn try_next(&mut self) -> Option<DriverEvent> {
        self.rx.try_recv().ok()
    }
}

/// Create the channel first so collaborators can hold a handle before the
/// driver exists.
pub fn channel() -> (SessionHandle, EventInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = SessionHandle { tx };
    (handle.clone(), EventInbox { handle, rx })
}

pub struct Collaborators {
    pub playback: Box<dyn Playback>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub status: Box<dyn StatusSink>,
    pub surface: Box<dyn PageSurface>,
}

pub struct SyncDriver {
    session: SyncSession,
    playback: Box<dyn Playback>,
    renderer: Arc<dyn DocumentRenderer>,
    status: Box<dyn StatusSink>,
    surface: Box<dyn PageSurface>,
    shortcuts: Shortcuts,
    config: AppConfig,
    viewport: Viewport,
    resize: Debouncer,
    drag: Option<DividerDrag>,
    inbox: EventInbox,
    /// Raster of the render currently being reported to the session.
    finished: Option<(u64, RenderedPage)>,
    stopped: bool,
}

impl SyncDriver {
    pub fn new(config: AppConfig, inbox: EventInbox, collaborators: Collaborators) -> Self {
        Self {
            session: SyncSession::new(config.session_settings()),
            playback: collaborators.playback,
            renderer: collaborators.renderer,
            status: collaborators.status,
            surface: collaborators.surface,
            shortcuts: Shortcuts::from_config(&config),
            viewport: config.initial_viewport(),
            resize: Debouncer::new(config.resize_debounce()),
            drag: None,
            inbox,
            finished: None,
            stopped: false,
            config,
        }
    }

    pub fn session(&self) -> &SyncSession {
        &self.session
    }

    pub fn handle(&self) -> SessionHandle {
        self.inbox.handle.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Hand the table to the session, point the player at the video and open
    /// the document. A document that fails to open is reported and leaves the
    /// driver running without pages.
    pub async fn start(&mut self, sync: &SyncConfig) {
        self.dispatch(SessionEvent::ConfigLoaded {
            table: sync.table(),
        });
        self.playback.load(&sync.video_url);
        debug!(duration = ?self.playback.duration(), "Video source set");

        self.dispatch(SessionEvent::DocumentLoading);
        match self.renderer.load(&sync.document_url).await {
            Ok(total_pages) => self.dispatch(SessionEvent::DocumentLoaded { total_pages }),
            Err(err) => self.dispatch(SessionEvent::DocumentFailed {
                error: err.to_string(),
            }),
        }
    }

    /// Process events until [`DriverEvent::Shutdown`].
    pub async fn run(mut self) {
        info!("Sync driver running");
        while !self.stopped {
            let Some(event) = self.inbox.recv().await else {
                break;
            };
            self.handle_event(event);
        }
        info!("Sync driver stopped");
    }

    /// Process whatever is ready, letting spawned renders and timers that are
    /// already due run in between. Returns once nothing more arrives.
    pub async fn run_until_idle(&mut self) {
        let mut empty_polls = 0;
        while empty_polls < IDLE_POLLS && !self.stopped {
            tokio::task::yield_now().await;
            match self.inbox.try_next() {
                Some(event) => {
                    empty_polls = 0;
                    self.handle_event(event);
                }
                None => empty_polls += 1,
            }
        }
    }

    pub fn handle_event(&mut self, event: DriverEvent) {
        match event {
            DriverEvent::Session(event) => self.dispatch(event),
            DriverEvent::Key(input) => match self.shortcuts.action_for(&input) {
                Some(KeyAction::PreviousPage) => {
                    self.dispatch(SessionEvent::Navigate(NavDirection::Previous))
                }
                Some(KeyAction::NextPage) => {
                    self.dispatch(SessionEvent::Navigate(NavDirection::Next))
                }
                Some(KeyAction::TogglePlayPause) => self.toggle_playback(),
                None => trace!(code = %input.code, "Unbound key"),
            },
            DriverEvent::TogglePlayback => self.toggle_playback(),
            DriverEvent::WindowResized {
                container_width,
                container_height,
            } => {
                self.viewport = self.config.viewport_for(container_width, container_height);
                debug!(
                    viewport = ?self.viewport(),
                    superseded = self.resize.is_pending(),
                    "Window resized"
                );
                let handle = self.handle();
                self.resize.call(async move {
                    handle.session(SessionEvent::RefreshPage);
                });
            }
            DriverEvent::DividerPressed {
                pointer,
                window_width,
                container_size,
                video_flex_basis,
            } => {
                let orientation = self.config.split_orientation(window_width);
                debug!(?orientation, ?pointer, "Divider grabbed");
                self.drag = Some(DividerDrag::begin(
                    orientation,
                    pointer,
                    &video_flex_basis,
                    container_size,
                    self.config.panel_limits(),
                ));
            }
            DriverEvent::DividerMoved {
                pointer,
                container_size,
            } => match self.drag {
                Some(drag) => {
                    let sizes = drag.drag_to(pointer, container_size);
                    self.surface.apply_split(sizes);
                }
                None => trace!(?pointer, "Pointer moved without a divider drag"),
            },
            DriverEvent::DividerReleased {
                container_width,
                container_height,
            } => {
                self.drag = None;
                self.viewport = self.config.viewport_for(container_width, container_height);
                debug!(viewport = ?self.viewport(), "Divider released");
                self.dispatch(SessionEvent::RefreshPage);
            }
            DriverEvent::Rendered {
                page,
                generation,
                result,
            } => match result {
                Ok(frame) => {
                    self.finished = Some((generation, frame));
                    self.dispatch(SessionEvent::RenderCompleted { page, generation });
                    self.finished = None;
                }
                Err(err) => self.dispatch(SessionEvent::RenderFailed {
                    page,
                    generation,
                    error: err.to_string(),
                }),
            },
            DriverEvent::Shutdown => {
                self.resize.cancel();
                self.stopped = true;
            }
        }
    }

    pub fn dispatch(&mut self, event: SessionEvent) {
        for effect in self.session.reduce(event) {
            self.run_effect(effect);
        }
    }

    fn toggle_playback(&mut self) {
        let time = self.playback.current_time();
        if self.playback.is_paused() {
            debug!(time, "Resuming playback");
            self.playback.play();
        } else {
            debug!(time, "Pausing playback");
            self.playback.pause();
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Pause => self.playback.pause(),
            Effect::Seek(time) => {
                debug!(time, "Seeking playback");
                self.playback.seek(time);
            }
            Effect::RenderPage {
                page,
                generation,
                reason,
            } => {
                let renderer = Arc::clone(&self.renderer);
                let handle = self.handle();
                let viewport = self.viewport;
                debug!(page, generation, %reason, "Rendering page");
                tokio::spawn(async move {
                    let result = renderer.render_page(page, viewport).await;
                    handle.send(DriverEvent::Rendered {
                        page,
                        generation,
                        result,
                    });
                });
            }
            Effect::PresentPage { page, generation } => match &self.finished {
                Some((finished, frame)) if *finished == generation => {
                    info!(page, "Showing page");
                    self.surface.present(frame);
                }
                _ => warn!(page, generation, "No finished frame to present"),
            },
            Effect::ScheduleSuppressionRelease { epoch, after } => {
                let handle = self.handle();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    handle.session(SessionEvent::ReleaseSuppression { epoch });
                });
            }
            Effect::ReportStatus { message, severity } => {
                self.status.report(&message, severity);
            }
            Effect::UpdateClock(clock) => self.surface.show_clock(&clock),
            Effect::UpdatePageIndicator(indicator) => {
                self.surface.show_page_indicator(indicator)
            }
        }
    }
}

/// Report a startup failure that happens before a driver exists.
pub fn report_fatal(status: &mut dyn StatusSink, message: &str) {
    status.report(&format!("Error: {message}"), StatusSeverity::Error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::SimulatedPlayback;
    use async_trait::async_trait;
    use image::RgbaImage;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use syncdeck_core::{ClockDisplay, PageIndicator, SplitSizes, SyncPoint};

    #[derive(Default)]
    struct Record {
        presented: Vec<u32>,
        statuses: Vec<(String, StatusSeverity)>,
        indicators: Vec<PageIndicator>,
        splits: Vec<SplitSizes>,
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Record>>);

    impl Recorder {
        fn presented(&self) -> Vec<u32> {
            self.0.lock().unwrap().presented.clone()
        }

        fn has_status(&self, message: &str, severity: StatusSeverity) -> bool {
            self.0
                .lock()
                .unwrap()
                .statuses
                .iter()
                .any(|(m, s)| m == message && *s == severity)
        }

        fn last_indicator(&self) -> Option<PageIndicator> {
            self.0.lock().unwrap().indicators.last().copied()
        }

        fn splits(&self) -> Vec<SplitSizes> {
            self.0.lock().unwrap().splits.clone()
        }
    }

    impl PageSurface for Recorder {
        fn present(&mut self, frame: &RenderedPage) {
            self.0.lock().unwrap().presented.push(frame.page);
        }

        fn show_page_indicator(&mut self, indicator: PageIndicator) {
            self.0.lock().unwrap().indicators.push(indicator);
        }

        fn show_clock(&mut self, _clock: &ClockDisplay) {}

        fn apply_split(&mut self, sizes: SplitSizes) {
            self.0.lock().unwrap().splits.push(sizes);
        }
    }

    impl StatusSink for Recorder {
        fn report(&mut self, message: &str, severity: StatusSeverity) {
            self.0
                .lock()
                .unwrap()
                .statuses
                .push((message.to_string(), severity));
        }
    }

    #[derive(Default)]
    struct ScriptedRenderer {
        pages: u32,
        failing: Vec<u32>,
        delays: HashMap<u32, Duration>,
        renders: AtomicUsize,
    }

    #[async_trait]
    impl DocumentRenderer for ScriptedRenderer {
        async fn load(&self, _url: &str) -> Result<u32, RenderError> {
            Ok(self.pages)
        }

        async fn render_page(
            &self,
            page: u32,
            _viewport: Viewport,
        ) -> Result<RenderedPage, RenderError> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delays.get(&page) {
                tokio::time::sleep(*delay).await;
            }
            if self.failing.contains(&page) {
                return Err(RenderError::Backend("corrupt page".to_string()));
            }
            Ok(RenderedPage {
                page,
                scale: 1.0,
                image: RgbaImage::new(1, 1),
            })
        }
    }

    struct Harness {
        driver: SyncDriver,
        playback: SimulatedPlayback,
        recorder: Recorder,
        renderer: Arc<ScriptedRenderer>,
    }

    fn sync_config() -> SyncConfig {
        SyncConfig {
            video_url: "talk.mp4".to_string(),
            document_url: "slides.pdf".to_string(),
            sync: vec![
                SyncPoint::new(0.0, 1),
                SyncPoint::new(10.0, 2),
                SyncPoint::new(20.0, 3),
            ],
        }
    }

    async fn started(renderer: ScriptedRenderer) -> Harness {
        let (handle, inbox) = channel();
        let playback = SimulatedPlayback::new(60.0, handle);
        let recorder = Recorder::default();
        let renderer = Arc::new(renderer);
        let mut driver = SyncDriver::new(
            AppConfig::default(),
            inbox,
            Collaborators {
                playback: Box::new(playback.clone()),
                renderer: renderer.clone(),
                status: Box::new(recorder.clone()),
                surface: Box::new(recorder.clone()),
            },
        );
        driver.start(&sync_config()).await;
        driver.run_until_idle().await;
        Harness {
            driver,
            playback,
            recorder,
            renderer,
        }
    }

    fn three_pages() -> ScriptedRenderer {
        ScriptedRenderer {
            pages: 3,
            ..ScriptedRenderer::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn start_shows_first_page_and_reports_ready() {
        let h = started(three_pages()).await;
        assert_eq!(h.recorder.presented(), vec![1]);
        assert!(h.recorder.has_status("Ready", StatusSeverity::Success));
        assert_eq!(h.driver.session().total_pages(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn document_failure_is_reported() {
        struct Broken;
        #[async_trait]
        impl DocumentRenderer for Broken {
            async fn load(&self, _url: &str) -> Result<u32, RenderError> {
                Err(RenderError::Backend("not a PDF".to_string()))
            }
            async fn render_page(
                &self,
                _page: u32,
                _viewport: Viewport,
            ) -> Result<RenderedPage, RenderError> {
                Err(RenderError::NoDocument)
            }
        }

        let (handle, inbox) = channel();
        let recorder = Recorder::default();
        let mut driver = SyncDriver::new(
            AppConfig::default(),
            inbox,
            Collaborators {
                playback: Box::new(SimulatedPlayback::new(10.0, handle)),
                renderer: Arc::new(Broken),
                status: Box::new(recorder.clone()),
                surface: Box::new(recorder.clone()),
            },
        );
        driver.start(&sync_config()).await;
        driver.run_until_idle().await;

        assert!(recorder.has_status("Error loading document: not a PDF", StatusSeverity::Error));
        assert!(recorder.presented().is_empty());
        assert_eq!(driver.session().total_pages(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_navigation_holds_page_until_window_elapses() {
        let mut h = started(three_pages()).await;

        h.driver.handle().key(KeyInput::new("ArrowRight"));
        h.driver.run_until_idle().await;
        assert_eq!(h.recorder.presented(), vec![1, 2]);
        assert_eq!(h.playback.current_time(), 10.0);
        assert!(h.playback.is_paused());
        assert!(h.driver.session().is_suppressed());

        // Time jumps far ahead while suppressed; the page stays put.
        h.driver.handle().time_updated(25.0);
        h.driver.run_until_idle().await;
        assert_eq!(h.driver.session().current_page(), 2);

        tokio::time::advance(Duration::from_millis(499)).await;
        h.driver.run_until_idle().await;
        assert!(h.driver.session().is_suppressed());

        tokio::time::advance(Duration::from_millis(1)).await;
        h.driver.run_until_idle().await;
        assert!(!h.driver.session().is_suppressed());

        h.driver.handle().time_updated(25.0);
        h.driver.run_until_idle().await;
        assert_eq!(h.driver.session().current_page(), 3);
        assert_eq!(h.recorder.presented(), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_render_keeps_counter_and_releases_on_schedule() {
        let mut h = started(ScriptedRenderer {
            pages: 3,
            failing: vec![2],
            ..ScriptedRenderer::default()
        })
        .await;

        h.driver.handle().navigate(NavDirection::Next);
        h.driver.run_until_idle().await;

        assert!(h.recorder.has_status("Error rendering page: corrupt page", StatusSeverity::Error));
        assert_eq!(h.driver.session().current_page(), 1);
        assert_eq!(h.recorder.last_indicator().map(|i| i.current), Some(1));
        // The seek already happened even though the page did not change.
        assert_eq!(h.playback.current_time(), 10.0);

        tokio::time::advance(Duration::from_millis(500)).await;
        h.driver.run_until_idle().await;
        assert!(!h.driver.session().is_suppressed());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_render_does_not_overwrite_newer_page() {
        let mut h = started(ScriptedRenderer {
            pages: 3,
            delays: HashMap::from([
                (2, Duration::from_millis(300)),
                (3, Duration::from_millis(10)),
            ]),
            ..ScriptedRenderer::default()
        })
        .await;

        h.driver.handle().time_updated(12.0);
        h.driver.handle().time_updated(21.0);
        h.driver.run_until_idle().await;

        tokio::time::advance(Duration::from_millis(10)).await;
        h.driver.run_until_idle().await;
        assert_eq!(h.driver.session().current_page(), 3);

        tokio::time::advance(Duration::from_millis(300)).await;
        h.driver.run_until_idle().await;
        assert_eq!(h.driver.session().current_page(), 3);
        assert_eq!(h.recorder.presented(), vec![1, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn window_resizes_are_debounced() {
        let mut h = started(three_pages()).await;
        assert_eq!(h.renderer.renders.load(Ordering::SeqCst), 1);

        for width in [800.0, 820.0, 840.0] {
            h.driver.handle().send(DriverEvent::WindowResized {
                container_width: width,
                container_height: 700.0,
            });
            h.driver.run_until_idle().await;
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        // 100ms have passed since the last resize.
        tokio::time::advance(Duration::from_millis(149)).await;
        h.driver.run_until_idle().await;
        assert_eq!(h.renderer.renders.load(Ordering::SeqCst), 1);
        assert_eq!(h.driver.viewport(), Viewport::new(800.0, 600.0));

        tokio::time::advance(Duration::from_millis(1)).await;
        h.driver.run_until_idle().await;
        assert_eq!(h.renderer.renders.load(Ordering::SeqCst), 2);
        assert_eq!(h.recorder.presented(), vec![1, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn divider_release_renders_immediately() {
        let mut h = started(three_pages()).await;
        h.driver.handle().send(DriverEvent::DividerReleased {
            container_width: 500.0,
            container_height: 400.0,
        });
        h.driver.run_until_idle().await;
        assert_eq!(h.renderer.renders.load(Ordering::SeqCst), 2);
        assert_eq!(h.driver.viewport(), Viewport::new(460.0, 300.0));
    }

    #[tokio::test(start_paused = true)]
    async fn space_toggles_playback_only_from_body() {
        let mut h = started(three_pages()).await;
        assert!(h.playback.is_paused());

        h.driver
            .handle()
            .key(KeyInput::new("Space").with_focus(FocusTarget::TextInput));
        h.driver.run_until_idle().await;
        assert!(h.playback.is_paused());

        h.driver.handle().key(KeyInput::new("Space"));
        h.driver.run_until_idle().await;
        assert!(!h.playback.is_paused());

        h.driver.handle().send(DriverEvent::TogglePlayback);
        h.driver.run_until_idle().await;
        assert!(h.playback.is_paused());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_processing() {
        let mut h = started(three_pages()).await;
        h.driver.handle().shutdown();
        h.driver.handle().navigate(NavDirection::Next);
        h.driver.run_until_idle().await;
        assert_eq!(h.driver.session().current_page(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn second_navigation_pushes_window_out() {
        let mut h = started(three_pages()).await;

        h.driver.handle().navigate(NavDirection::Next);
        h.driver.run_until_idle().await;
        tokio::time::advance(Duration::from_millis(300)).await;
        h.driver.handle().navigate(NavDirection::Next);
        h.driver.run_until_idle().await;
        assert_eq!(h.driver.session().current_page(), 3);

        // The first window would have closed at 500ms.
        tokio::time::advance(Duration::from_millis(300)).await;
        h.driver.run_until_idle().await;
        assert!(h.driver.session().is_suppressed());

        tokio::time::advance(Duration::from_millis(199)).await;
        h.driver.run_until_idle().await;
        assert!(h.driver.session().is_suppressed());

        tokio::time::advance(Duration::from_millis(1)).await;
        h.driver.run_until_idle().await;
        assert!(!h.driver.session().is_suppressed());
    }

    #[tokio::test(start_paused = true)]
    async fn divider_drag_resizes_panels_within_limits() {
        let mut h = started(three_pages()).await;
        let handle = h.driver.handle();

        handle.send(DriverEvent::DividerMoved {
            pointer: (10.0, 0.0),
            container_size: 1000.0,
        });
        handle.send(DriverEvent::DividerPressed {
            pointer: (500.0, 300.0),
            window_width: 1200.0,
            container_size: 1000.0,
            video_flex_basis: "50%".to_string(),
        });
        handle.send(DriverEvent::DividerMoved {
            pointer: (600.0, 20.0),
            container_size: 1000.0,
        });
        handle.send(DriverEvent::DividerMoved {
            pointer: (-400.0, 300.0),
            container_size: 1000.0,
        });
        handle.send(DriverEvent::DividerReleased {
            container_width: 440.0,
            container_height: 900.0,
        });
        handle.send(DriverEvent::DividerMoved {
            pointer: (700.0, 300.0),
            container_size: 1000.0,
        });
        h.driver.run_until_idle().await;

        assert_eq!(
            h.recorder.splits(),
            vec![
                SplitSizes {
                    video: 60.0,
                    document: 40.0
                },
                SplitSizes {
                    video: 20.0,
                    document: 80.0
                },
            ]
        );
        assert_eq!(h.renderer.renders.load(Ordering::SeqCst), 2);
        assert_eq!(h.driver.viewport(), Viewport::new(400.0, 800.0));
    }

    #[tokio::test(start_paused = true)]
    async fn narrow_window_drags_along_the_vertical_axis() {
        let mut h = started(three_pages()).await;
        let handle = h.driver.handle();
        handle.send(DriverEvent::DividerPressed {
            pointer: (100.0, 400.0),
            window_width: 700.0,
            container_size: 800.0,
            video_flex_basis: "400px".to_string(),
        });
        handle.send(DriverEvent::DividerMoved {
            pointer: (300.0, 480.0),
            container_size: 800.0,
        });
        h.driver.run_until_idle().await;

        assert_eq!(
            h.recorder.splits(),
            vec![SplitSizes {
                video: 60.0,
                document: 40.0
            }]
        );
    }
}
