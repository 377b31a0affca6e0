//! Geometry helpers for the video/document split view.
//!
//! Nothing here touches a real window. Hosts feed in container sizes and
//! pointer positions and apply the returned percentages and scales.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Space available for drawing a page, in CSS-like pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Drawable area of a container once its padding and page controls are
    /// taken out. Never negative.
    pub fn inside_container(
        container_width: f32,
        container_height: f32,
        padding_horizontal: f32,
        padding_vertical: f32,
    ) -> Self {
        Self {
            width: (container_width - padding_horizontal).max(0.0),
            height: (container_height - padding_vertical).max(0.0),
        }
    }
}

/// Natural (scale 1.0) size of a document page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter at 72 dpi.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    pub fn scaled(self, scale: f32) -> PageSize {
        PageSize {
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}

/// Largest scale that fits `page` inside `viewport` without exceeding
/// `max_scale`.
pub fn fit_scale(viewport: Viewport, page: PageSize, max_scale: f32) -> f32 {
    if page.width <= 0.0 || page.height <= 0.0 {
        return 0.0;
    }
    (viewport.width / page.width)
        .min(viewport.height / page.height)
        .min(max_scale)
        .max(0.0)
}

/// Side-by-side on wide windows, stacked on narrow ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SplitOrientation {
    Horizontal,
    Vertical,
}

impl SplitOrientation {
    pub fn for_window_width(window_width: f32, stacked_breakpoint_px: f32) -> Self {
        if window_width <= stacked_breakpoint_px {
            SplitOrientation::Vertical
        } else {
            SplitOrientation::Horizontal
        }
    }
}

/// Panel shares in percent; always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SplitSizes {
    pub video: f32,
    pub document: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLimits {
    pub min_panel_px: f32,
    pub min_panel_percent: f32,
}

impl PanelLimits {
    /// Clamp a proposed video share so neither panel drops below the minimum.
    /// The minimum is whichever is smaller of `min_panel_px` (as a share of
    /// `container_size`) and `min_panel_percent`.
    pub fn constrain(self, video_percent: f32, container_size: f32) -> SplitSizes {
        let min_percent = if container_size > 0.0 {
            (self.min_panel_px / container_size * 100.0).min(self.min_panel_percent)
        } else {
            self.min_panel_percent
        };
        let max_percent = 100.0 - min_percent;
        let video = if video_percent < min_percent {
            min_percent
        } else if video_percent > max_percent {
            max_percent
        } else {
            video_percent
        };
        SplitSizes {
            video,
            document: 100.0 - video,
        }
    }
}

/// Read a computed `flex-basis` value as a percentage of `container_size`.
/// `auto` and anything unparseable count as an even split.
pub fn parse_flex_basis(value: &str, container_size: f32) -> f32 {
    const EVEN: f32 = 50.0;
    let value = value.trim();
    if let Some(percent) = value.strip_suffix('%') {
        percent.trim().parse().unwrap_or(EVEN)
    } else if let Some(px) = value.strip_suffix("px") {
        match px.trim().parse::<f32>() {
            Ok(px) if container_size > 0.0 => px / container_size * 100.0,
            _ => EVEN,
        }
    } else {
        EVEN
    }
}

/// An in-progress drag of the divider between the two panels.
#[derive(Debug, Clone, Copy)]
pub struct DividerDrag {
    orientation: SplitOrientation,
    start_pointer: (f32, f32),
    start_video_percent: f32,
    limits: PanelLimits,
}

impl DividerDrag {
    pub fn begin(
        orientation: SplitOrientation,
        pointer: (f32, f32),
        video_flex_basis: &str,
        container_size: f32,
        limits: PanelLimits,
    ) -> Self {
        Self {
            orientation,
            start_pointer: pointer,
            start_video_percent: parse_flex_basis(video_flex_basis, container_size),
            limits,
        }
    }

    /// Panel sizes for the pointer at `pointer`; only the axis matching the
    /// orientation matters.
    pub fn drag_to(&self, pointer: (f32, f32), container_size: f32) -> SplitSizes {
        let delta = match self.orientation {
            SplitOrientation::Horizontal => pointer.0 - self.start_pointer.0,
            SplitOrientation::Vertical => pointer.1 - self.start_pointer.1,
        };
        let delta_percent = if container_size > 0.0 {
            delta / container_size * 100.0
        } else {
            0.0
        };
        self.limits
            .constrain(self.start_video_percent + delta_percent, container_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: PanelLimits = PanelLimits {
        min_panel_px: 200.0,
        min_panel_percent: 20.0,
    };

    #[test]
    fn fit_scale_is_capped() {
        let huge = Viewport::new(5000.0, 5000.0);
        assert_eq!(fit_scale(huge, PageSize::LETTER, 2.0), 2.0);
    }

    #[test]
    fn fit_scale_uses_tighter_axis() {
        let viewport = Viewport::new(612.0, 396.0);
        assert!((fit_scale(viewport, PageSize::LETTER, 2.0) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn container_padding_never_goes_negative() {
        let viewport = Viewport::inside_container(30.0, 500.0, 40.0, 100.0);
        assert_eq!(viewport, Viewport::new(0.0, 400.0));
        assert_eq!(fit_scale(viewport, PageSize::LETTER, 2.0), 0.0);
    }

    #[test]
    fn narrow_windows_stack_panels() {
        assert_eq!(
            SplitOrientation::for_window_width(768.0, 768.0),
            SplitOrientation::Vertical
        );
        assert_eq!(
            SplitOrientation::for_window_width(1024.0, 768.0),
            SplitOrientation::Horizontal
        );
    }

    #[test]
    fn constrain_uses_smaller_minimum() {
        // 200px of 2000px is 10%, smaller than the 20% cap.
        let sizes = LIMITS.constrain(2.0, 2000.0);
        assert_eq!(sizes.video, 10.0);
        assert_eq!(sizes.document, 90.0);

        // 200px of 500px is 40%, so the 20% cap applies.
        let sizes = LIMITS.constrain(95.0, 500.0);
        assert_eq!(sizes.video, 80.0);
        assert_eq!(sizes.document, 20.0);
    }

    #[test]
    fn parses_flex_basis_forms() {
        assert_eq!(parse_flex_basis("35%", 1000.0), 35.0);
        assert_eq!(parse_flex_basis("250px", 1000.0), 25.0);
        assert_eq!(parse_flex_basis("auto", 1000.0), 50.0);
        assert_eq!(parse_flex_basis("calc(1px)", 1000.0), 50.0);
    }

    #[test]
    fn drag_follows_matching_axis() {
        let drag = DividerDrag::begin(
            SplitOrientation::Horizontal,
            (500.0, 300.0),
            "50%",
            1000.0,
            LIMITS,
        );
        let sizes = drag.drag_to((600.0, 900.0), 1000.0);
        assert_eq!(sizes.video, 60.0);
        assert_eq!(sizes.document, 40.0);

        let stacked = DividerDrag::begin(
            SplitOrientation::Vertical,
            (500.0, 300.0),
            "auto",
            800.0,
            LIMITS,
        );
        let sizes = stacked.drag_to((0.0, 220.0), 800.0);
        assert_eq!(sizes.video, 40.0);
    }
}
