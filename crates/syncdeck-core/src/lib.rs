//! Video/document page synchronization core.
//!
//! Pure state and lookups with no I/O: the sync table and its resolvers, the
//! suppression guard, the session reducer that turns player and user events
//! into effects, and the layout math used to size rendered pages.

pub mod clock;
pub mod layout;
pub mod messages;
mod render;
pub mod session;
pub mod suppression;
pub mod sync_table;

pub use clock::{ClockDisplay, format_clock};
pub use layout::{
    DividerDrag, PageSize, PanelLimits, SplitOrientation, SplitSizes, Viewport, fit_scale,
};
pub use messages::{Effect, NavDirection, PageIndicator, RenderReason, SessionEvent, StatusSeverity};
pub use session::{DEFAULT_SUPPRESSION_WINDOW, SessionSettings, SessionSnapshot, SyncSession};
pub use suppression::SuppressionGuard;
pub use sync_table::{FIRST_PAGE, SyncPoint, SyncTable};
