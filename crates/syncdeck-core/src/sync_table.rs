//! The timetable mapping playback time to document pages.
//!
//! A table is built once from configuration and never changes. Entries are
//! ordered by time with a stable sort, so entries sharing a timestamp keep the
//! order they were listed in. That order is what breaks ties during lookup.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Page shown when no sync point has been reached yet.
pub const FIRST_PAGE: u32 = 1;

/// "At or after `time` seconds, show `page`."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SyncPoint {
    pub time: f64,
    pub page: u32,
}

impl SyncPoint {
    pub fn new(time: f64, page: u32) -> Self {
        Self { time, page }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncTable {
    points: Vec<SyncPoint>,
}

impl SyncTable {
    /// Build a table from raw records, sorting them ascending by time.
    pub fn new(points: impl IntoIterator<Item = SyncPoint>) -> Self {
        let mut points: Vec<SyncPoint> = points.into_iter().collect();
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyncPoint> {
        self.points.iter()
    }

    pub fn points(&self) -> &[SyncPoint] {
        &self.points
    }

    /// Earliest entry that references `page`.
    pub fn first_entry_for_page(&self, page: u32) -> Option<SyncPoint> {
        self.points.iter().copied().find(|point| point.page == page)
    }

    /// Page that should be on screen at playback time `time`.
    ///
    /// The last entry with `entry.time <= time` wins, so equal timestamps
    /// resolve to whichever was listed later. Pages are not required to be
    /// monotonic: `[(5, 3), (10, 1)]` resolves `12.0` to page 1. Before the
    /// first entry, or with an empty table, the answer is [`FIRST_PAGE`].
    pub fn resolve_page(&self, time: f64) -> u32 {
        let mut target = FIRST_PAGE;
        for point in &self.points {
            if point.time <= time {
                target = point.page;
            } else {
                break;
            }
        }
        target
    }

    /// Playback time to seek to when the user jumps to `page`, if any entry
    /// references it.
    pub fn seek_time_for_page(&self, page: u32) -> Option<f64> {
        self.first_entry_for_page(page).map(|point| point.time)
    }

    /// Highest page referenced by any entry.
    pub fn max_page(&self) -> Option<u32> {
        self.points.iter().map(|point| point.page).max()
    }
}

impl FromIterator<SyncPoint> for SyncTable {
    fn from_iter<I: IntoIterator<Item = SyncPoint>>(iter: I) -> Self {
        SyncTable::new(iter)
    }
}
