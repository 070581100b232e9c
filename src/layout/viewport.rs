use kurbo::{Point, Rect, Size, Vec2};

use crate::foundation::core::Canvas;

/// Place a box of `size` centred on the canvas, shifted down by `y_offset`.
///
/// The origin never goes negative: on a canvas smaller than the box the box
/// is pinned to the top-left instead of being pushed off-screen.
pub fn centered(canvas: Canvas, size: Size, y_offset: f64) -> Rect {
    let c = canvas.center();
    let x0 = (c.x - size.width / 2.0).max(0.0);
    let y0 = (c.y - size.height / 2.0 + y_offset).max(0.0);
    Rect::from_origin_size(Point::new(x0, y0), size)
}

/// Lay out `count` boxes of `size` in one horizontally centred row.
pub fn centered_row(
    canvas: Canvas,
    count: usize,
    size: Size,
    gap: f64,
    y_offset: f64,
) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let gap = gap.max(0.0);
    let total_w = size.width * count as f64 + gap * (count as f64 - 1.0);
    let row = centered(canvas, Size::new(total_w, size.height), y_offset);
    (0..count)
        .map(|i| {
            let dx = (size.width + gap) * i as f64;
            Rect::from_origin_size(row.origin() + Vec2::new(dx, 0.0), size)
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Screen placement for the portfolio's foreground content.
pub struct SlideLayout {
    /// Canvas the layout was computed for.
    pub canvas: Canvas,
    /// Anchor for the section title.
    pub title_anchor: Point,
    /// Slideshow frame.
    pub slide: Rect,
    /// Video slots for the visible video group.
    pub video_slots: Vec<Rect>,
}

impl SlideLayout {
    /// Slide frame size.
    pub const SLIDE_SIZE: Size = Size::new(920.0, 640.0);
    /// Vertical offset of the slide below centre.
    pub const SLIDE_Y_OFFSET: f64 = 20.0;
    /// Single video size.
    pub const VIDEO_SIZE: Size = Size::new(640.0, 360.0);
    /// Horizontal gap between videos.
    pub const VIDEO_GAP: f64 = 20.0;
    /// Title baseline distance from the top edge.
    pub const TITLE_Y: f64 = 80.0;

    /// Compute placement for a canvas holding `video_count` videos. Call again
    /// on every resize.
    pub fn for_canvas(canvas: Canvas, video_count: usize) -> Self {
        Self {
            canvas,
            title_anchor: Point::new(canvas.center().x, Self::TITLE_Y),
            slide: centered(canvas, Self::SLIDE_SIZE, Self::SLIDE_Y_OFFSET),
            video_slots: centered_row(
                canvas,
                video_count,
                Self::VIDEO_SIZE,
                Self::VIDEO_GAP,
                Self::SLIDE_Y_OFFSET,
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/viewport.rs"]
mod tests;
