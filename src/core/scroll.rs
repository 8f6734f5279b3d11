//! Scroll-driven header collapse.
//!
//! A screen reports the displacement of a zero-height sentinel at the top of
//! its scroll content. The controller turns that into a collapse progress in
//! `[0, 1]` and the header layout derived from it. Fades follow the progress
//! continuously; alignment and which title block renders snap at 0.5.

use tracing::{debug, trace};

/// Scroll distance in pixels over which the header fully collapses.
pub const DEFAULT_COLLAPSE_DISTANCE: f64 = 100.0;

/// Progress above which the header counts as collapsed.
pub const COLLAPSE_THRESHOLD: f64 = 0.5;

const EXPANDED_VERTICAL_PADDING: f64 = 20.0;
const PADDING_SHRINK: f64 = 10.0;

/// Horizontal alignment of the header title block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderAlignment {
    /// Expanded header: title hugs the leading edge
    Leading,
    /// Collapsed header: title centred
    Center,
}

/// Which title block the header renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TitleStyle {
    /// Large title with subtitle above it
    Large,
    /// Minimised single-line title
    Compact,
}

/// Everything a header needs to lay itself out for the current offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderLayout {
    /// Normalised collapse progress
    pub progress: f64,
    /// `progress > 0.5`
    pub is_collapsed: bool,
    /// Title alignment, snaps at the threshold
    pub alignment: HeaderAlignment,
    /// Title block, snaps at the threshold
    pub title_style: TitleStyle,
    /// Subtitle keeps its height only while expanded
    pub subtitle_visible: bool,
    /// `1 - progress`
    pub subtitle_opacity: f64,
    /// Detail headers fade faster: `clamp(1 - 2 * progress, 0, 1)`
    pub detail_subtitle_opacity: f64,
    /// Trailing icon renders only while `progress < 0.5`
    pub show_trailing_icon: bool,
    /// `clamp(1 - 2 * progress, 0, 1)`
    pub trailing_icon_opacity: f64,
    /// Detail screens swap in a centred minimised title once collapsed
    pub show_minimized_title: bool,
    /// Vertical padding in points, 20 expanded down to 10 collapsed
    pub vertical_padding: f64,
}

impl HeaderLayout {
    /// Layout for a given progress value. Out-of-range input is clamped.
    #[must_use]
    pub fn for_progress(progress: f64) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let is_collapsed = progress > COLLAPSE_THRESHOLD;
        let fast_fade = 2.0f64.mul_add(-progress, 1.0).clamp(0.0, 1.0);

        Self {
            progress,
            is_collapsed,
            alignment: if is_collapsed {
                HeaderAlignment::Center
            } else {
                HeaderAlignment::Leading
            },
            title_style: if is_collapsed {
                TitleStyle::Compact
            } else {
                TitleStyle::Large
            },
            subtitle_visible: !is_collapsed,
            subtitle_opacity: 1.0 - progress,
            detail_subtitle_opacity: fast_fade,
            show_trailing_icon: progress < COLLAPSE_THRESHOLD,
            trailing_icon_opacity: fast_fade,
            show_minimized_title: is_collapsed,
            vertical_padding: PADDING_SHRINK.mul_add(-progress, EXPANDED_VERTICAL_PADDING),
        }
    }
}

/// Returned by [`ScrollCollapseController::scroll_to_top`] when a reset happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollReset {
    /// Offset the reset animation starts from
    pub from_offset: f64,
}

/// Tracks a scroll pane's offset and derives the header collapse state.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollCollapseController {
    offset_pixels: f64,
    collapse_distance: f64,
}

impl Default for ScrollCollapseController {
    fn default() -> Self {
        Self::new(DEFAULT_COLLAPSE_DISTANCE)
    }
}

impl ScrollCollapseController {
    /// Controller at rest. A non-positive or non-finite distance falls back to the default.
    #[must_use]
    pub fn new(collapse_distance: f64) -> Self {
        let collapse_distance = if collapse_distance.is_finite() && collapse_distance > 0.0 {
            collapse_distance
        } else {
            DEFAULT_COLLAPSE_DISTANCE
        };
        Self {
            offset_pixels: 0.0,
            collapse_distance,
        }
    }

    /// Records a new sentinel displacement. Overscroll and NaN both count as 0.
    pub fn report_offset(&mut self, raw_offset: f64) {
        let offset = if raw_offset.is_finite() {
            raw_offset.max(0.0)
        } else {
            0.0
        };
        trace!(raw_offset, offset, "scroll offset reported");
        self.offset_pixels = offset;
    }

    /// Current non-negative offset in pixels.
    #[must_use]
    pub const fn offset_pixels(&self) -> f64 {
        self.offset_pixels
    }

    /// Distance over which the header collapses.
    #[must_use]
    pub const fn collapse_distance(&self) -> f64 {
        self.collapse_distance
    }

    /// `clamp(offset / distance, 0, 1)`
    #[must_use]
    pub fn collapse_progress(&self) -> f64 {
        (self.offset_pixels / self.collapse_distance).clamp(0.0, 1.0)
    }

    /// Strictly above the 0.5 threshold.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapse_progress() > COLLAPSE_THRESHOLD
    }

    /// Header layout for the current offset.
    #[must_use]
    pub fn header_layout(&self) -> HeaderLayout {
        HeaderLayout::for_progress(self.collapse_progress())
    }

    /// Brings the pane back to the top. Returns `None` when it is already there.
    pub fn scroll_to_top(&mut self) -> Option<ScrollReset> {
        if self.offset_pixels <= 0.0 {
            return None;
        }
        let from_offset = self.offset_pixels;
        self.offset_pixels = 0.0;
        debug!(from_offset, "scrolled to top");
        Some(ScrollReset { from_offset })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn at(offset: f64) -> ScrollCollapseController {
        let mut controller = ScrollCollapseController::default();
        controller.report_offset(offset);
        controller
    }

    #[test]
    fn test_progress_is_clamped_ratio_of_offset() {
        assert_eq!(at(0.0).collapse_progress(), 0.0);
        assert_eq!(at(25.0).collapse_progress(), 0.25);
        assert_eq!(at(50.0).collapse_progress(), 0.5);
        assert_eq!(at(100.0).collapse_progress(), 1.0);
        assert_eq!(at(150.0).collapse_progress(), 1.0);
    }

    #[test]
    fn test_negative_and_nan_offsets_count_as_zero() {
        assert_eq!(at(-40.0).offset_pixels(), 0.0);
        assert_eq!(at(f64::NAN).offset_pixels(), 0.0);
        assert_eq!(at(f64::INFINITY).offset_pixels(), 0.0);
        assert_eq!(at(-40.0).collapse_progress(), 0.0);
    }

    #[test]
    fn test_collapse_threshold_is_strict() {
        assert!(!at(50.0).is_collapsed());
        assert!(at(50.5).is_collapsed());
        assert!(!at(49.0).is_collapsed());
    }

    #[test]
    fn test_layout_at_exact_threshold_stays_expanded() {
        let layout = at(50.0).header_layout();

        assert!(!layout.is_collapsed);
        assert_eq!(layout.alignment, HeaderAlignment::Leading);
        assert_eq!(layout.title_style, TitleStyle::Large);
        assert!(layout.subtitle_visible);
        assert!(!layout.show_minimized_title);
        // The trailing icon is already gone at exactly half way.
        assert!(!layout.show_trailing_icon);
        assert_eq!(layout.trailing_icon_opacity, 0.0);
        assert_eq!(layout.subtitle_opacity, 0.5);
    }

    #[test]
    fn test_layout_fades_continuously_and_snaps_modes() {
        let expanded = at(0.0).header_layout();
        assert_eq!(expanded.subtitle_opacity, 1.0);
        assert_eq!(expanded.trailing_icon_opacity, 1.0);
        assert_eq!(expanded.vertical_padding, 20.0);
        assert!(expanded.show_trailing_icon);

        let quarter = at(25.0).header_layout();
        assert_eq!(quarter.subtitle_opacity, 0.75);
        assert_eq!(quarter.trailing_icon_opacity, 0.5);
        assert_eq!(quarter.vertical_padding, 17.5);
        assert_eq!(quarter.alignment, HeaderAlignment::Leading);

        let collapsed = at(80.0).header_layout();
        assert!(collapsed.is_collapsed);
        assert_eq!(collapsed.alignment, HeaderAlignment::Center);
        assert_eq!(collapsed.title_style, TitleStyle::Compact);
        assert!(!collapsed.subtitle_visible);
        assert!(collapsed.show_minimized_title);
        assert_eq!(collapsed.trailing_icon_opacity, 0.0);

        let full = at(300.0).header_layout();
        assert_eq!(full.subtitle_opacity, 0.0);
        assert_eq!(full.vertical_padding, 10.0);
    }

    #[test]
    fn test_detail_subtitle_fades_twice_as_fast() {
        assert_eq!(at(0.0).header_layout().detail_subtitle_opacity, 1.0);
        assert_eq!(at(25.0).header_layout().detail_subtitle_opacity, 0.5);

        let half = at(50.0).header_layout();
        assert_eq!(half.detail_subtitle_opacity, 0.0);
        assert_eq!(half.subtitle_opacity, 0.5);
        assert!(half.subtitle_visible);

        let collapsed = at(60.0).header_layout();
        assert_eq!(collapsed.detail_subtitle_opacity, 0.0);
        assert!(!collapsed.subtitle_visible);
    }

    #[test]
    fn test_scroll_to_top_is_noop_at_rest() {
        let mut controller = ScrollCollapseController::default();
        assert_eq!(controller.scroll_to_top(), None);
        assert_eq!(controller.offset_pixels(), 0.0);
        assert_eq!(controller.scroll_to_top(), None);
    }

    #[test]
    fn test_scroll_to_top_resets_offset() {
        let mut controller = at(240.0);
        assert!(controller.is_collapsed());

        assert_eq!(
            controller.scroll_to_top(),
            Some(ScrollReset { from_offset: 240.0 })
        );
        assert_eq!(controller.collapse_progress(), 0.0);
        assert!(!controller.is_collapsed());
    }

    #[test]
    fn test_custom_collapse_distance() {
        let mut controller = ScrollCollapseController::new(200.0);
        controller.report_offset(100.0);
        assert_eq!(controller.collapse_progress(), 0.5);

        assert_eq!(
            ScrollCollapseController::new(0.0).collapse_distance(),
            DEFAULT_COLLAPSE_DISTANCE
        );
        assert_eq!(
            ScrollCollapseController::new(f64::NAN).collapse_distance(),
            DEFAULT_COLLAPSE_DISTANCE
        );
    }
}
