// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis solver and the two-axis convenience wrapper.

use kurbo::{Point, Rect, Size};

use crate::mode::{Align, Placement};

/// Result of aligning a box on both axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Alignment {
    /// Top-left origin for the placed box.
    pub origin: Point,
    /// Placement used on the horizontal axis.
    pub horizontal: Placement,
    /// Placement used on the vertical axis.
    pub vertical: Placement,
}

impl Alignment {
    /// The placed box, given the size that was aligned.
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin, size)
    }
}

/// Whether a span of `len` starting at `origin` lies entirely within the viewport span.
pub fn fits(view_origin: f64, view_len: f64, origin: f64, len: f64) -> bool {
    origin >= view_origin && origin + len <= view_origin + view_len
}

/// Align a span of `target_len` against a reference span inside a viewport span.
///
/// Returns the target origin and the placement actually used. See the crate docs for the
/// flip and contain rules.
///
/// ```
/// use understory_align::{Align, Placement, align_axis};
///
/// // Viewport [0, 50], reference [0, 5], target 100 long: nothing fits.
/// let (origin, placement) = align_axis(Align::Start, 100.0, 0.0, 5.0, 0.0, 50.0);
/// assert_eq!(placement, Placement::Contain);
/// assert_eq!(origin, -50.0);
/// ```
pub fn align_axis(
    mode: Align,
    target_len: f64,
    ref_origin: f64,
    ref_len: f64,
    view_origin: f64,
    view_len: f64,
) -> (f64, Placement) {
    let mut origin = ref_origin + mode.offset(ref_len, target_len);
    let mut used = Placement::from(mode);

    if let Some(opposite) = mode.opposite()
        && !fits(view_origin, view_len, origin, target_len)
    {
        origin = ref_origin + opposite.offset(ref_len, target_len);
        used = Placement::from(opposite);
        tracing::trace!(requested = %mode, flipped = %opposite, "alignment flipped");
    }

    if !fits(view_origin, view_len, origin, target_len) {
        origin = view_origin + view_len - target_len;
        used = Placement::Contain;
        tracing::trace!(requested = %mode, origin, "alignment contained");
    }

    (origin, used)
}

/// Align a box of `size` against `reference` inside `viewport`, one axis at a time.
///
/// The horizontal axis uses `horizontal`, the vertical axis uses `vertical`; the two never
/// interact.
pub fn align_box(
    viewport: Rect,
    size: Size,
    reference: Rect,
    horizontal: Align,
    vertical: Align,
) -> Alignment {
    let (x, h) = align_axis(
        horizontal,
        size.width,
        reference.x0,
        reference.width(),
        viewport.x0,
        viewport.width(),
    );
    let (y, v) = align_axis(
        vertical,
        size.height,
        reference.y0,
        reference.height(),
        viewport.y0,
        viewport.height(),
    );
    Alignment {
        origin: Point::new(x, y),
        horizontal: h,
        vertical: v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn fits_is_inclusive_on_both_edges() {
        assert!(fits(0.0, 100.0, 0.0, 100.0));
        assert!(fits(10.0, 20.0, 10.0, 20.0));
        assert!(!fits(10.0, 20.0, 9.9, 5.0));
        assert!(!fits(10.0, 20.0, 26.0, 5.0));
    }

    #[test]
    fn requested_mode_is_kept_when_it_fits() {
        let reference = Rect::new(40.0, 40.0, 50.0, 50.0);
        let size = Size::new(20.0, 20.0);
        for mode in Align::ALL {
            let placed = align_box(view(), size, reference, mode, mode);
            assert_eq!(placed.horizontal, Placement::from(mode));
            assert_eq!(placed.vertical, Placement::from(mode));
            assert_eq!(placed.origin.x, 40.0 + mode.offset(10.0, 20.0));
        }
    }

    #[test]
    fn end_outside_flips_near_far_edge() {
        // Reference at x=90 with width 5; a 20-wide target would span 95..115.
        let (x, used) = align_axis(Align::EndOutside, 20.0, 90.0, 5.0, 0.0, 100.0);
        assert_eq!(used, Placement::StartOutside);
        assert_eq!(x, 70.0);
    }

    #[test]
    fn start_outside_flips_near_near_edge() {
        let (x, used) = align_axis(Align::StartOutside, 20.0, 5.0, 5.0, 0.0, 100.0);
        assert_eq!(used, Placement::EndOutside);
        assert_eq!(x, 10.0);
    }

    #[test]
    fn start_and_end_flip_into_each_other() {
        // Start would overflow the far edge: 90..120.
        let (x, used) = align_axis(Align::Start, 30.0, 90.0, 10.0, 0.0, 100.0);
        assert_eq!(used, Placement::End);
        assert_eq!(x, 70.0);

        // End would overflow the near edge: -20..10.
        let (x, used) = align_axis(Align::End, 30.0, 0.0, 10.0, 0.0, 100.0);
        assert_eq!(used, Placement::Start);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn center_does_not_flip_and_contains_instead() {
        let (x, used) = align_axis(Align::Center, 40.0, 95.0, 5.0, 0.0, 100.0);
        assert_eq!(used, Placement::Contain);
        assert_eq!(x, 60.0);
    }

    #[test]
    fn oversized_target_contains_for_every_mode() {
        for mode in Align::ALL {
            let (x, used) = align_axis(mode, 100.0, 0.0, 5.0, 0.0, 50.0);
            assert_eq!(used, Placement::Contain, "mode {mode}");
            // One-sided clamp: far edge on the viewport far edge.
            assert_eq!(x, -50.0, "mode {mode}");
        }
    }

    #[test]
    fn contain_respects_viewport_origin() {
        // Viewport spans 50..150; 130..160 overflows, the flipped 90..120 fits.
        let (x, used) = align_axis(Align::EndOutside, 30.0, 120.0, 10.0, 50.0, 100.0);
        assert_eq!(used, Placement::StartOutside);
        assert_eq!(x, 90.0);

        let (x, used) = align_axis(Align::EndOutside, 90.0, 100.0, 10.0, 50.0, 100.0);
        assert_eq!(used, Placement::Contain);
        assert_eq!(x, 60.0);
    }

    #[test]
    fn placement_fits_whenever_possible() {
        // Sweep reference positions; whenever the target is not larger than the
        // viewport, the result must lie inside the viewport.
        let size = Size::new(30.0, 30.0);
        let mut pos = 0.0;
        while pos <= 100.0 {
            let reference = Rect::new(pos, pos, pos + 5.0, pos + 5.0);
            for mode in Align::ALL {
                let placed = align_box(view(), size, reference, mode, mode);
                let rect = placed.rect(size);
                assert!(
                    rect.x0 >= 0.0 && rect.y0 >= 0.0 && rect.x1 <= 100.0 && rect.y1 <= 100.0,
                    "{mode} at {pos} produced {rect:?}"
                );
            }
            pos += 2.5;
        }
    }

    #[test]
    fn axes_are_independent() {
        let reference = Rect::new(90.0, 0.0, 95.0, 5.0);
        let placed = align_box(
            view(),
            Size::new(20.0, 20.0),
            reference,
            Align::EndOutside,
            Align::EndOutside,
        );
        assert_eq!(placed.horizontal, Placement::StartOutside);
        assert_eq!(placed.vertical, Placement::EndOutside);
        assert_eq!(placed.origin, Point::new(70.0, 5.0));
    }
}
