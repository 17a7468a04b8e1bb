//! Court diagram drawing
//!
//! Draws the fixed half-court geometry onto an explicit image surface.
//! All shapes come from the named constants table; the canvas owns the
//! world-to-pixel transform for the inverted-y view window.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::constants::*;

const ARC_STEP_DEG: f32 = 3.0;

/// Drawing surface with the chart's fixed world-to-pixel transform.
/// Passed explicitly so rendering works headless and in tests.
pub struct CourtCanvas {
    img: RgbImage,
}

impl CourtCanvas {
    /// Blank canvas sized for the view window plus title and legend bands.
    pub fn new() -> Self {
        let width = ((VIEW_X_MAX - VIEW_X_MIN) * RENDER_SCALE) as u32 + LEGEND_BAND_PX;
        let height = ((VIEW_Y_BOTTOM - VIEW_Y_TOP) * RENDER_SCALE) as u32 + TITLE_BAND_PX;
        let mut img = RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = BACKGROUND_COLOR;
        }
        Self { img }
    }

    /// Map court coordinates to pixels. The view y axis is inverted: the
    /// hoop (y=0) lands near the top band, center court at the bottom.
    pub fn to_px(&self, x: f32, y: f32) -> (f32, f32) {
        let px = (x - VIEW_X_MIN) * RENDER_SCALE;
        let py = TITLE_BAND_PX as f32 + (y - VIEW_Y_TOP) * RENDER_SCALE;
        (px, py)
    }

    /// Pixel width of the court area (legend band starts here).
    pub fn court_width_px(&self) -> u32 {
        ((VIEW_X_MAX - VIEW_X_MIN) * RENDER_SCALE) as u32
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.img
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    /// Draw the full court diagram.
    pub fn draw_court(&mut self) {
        let line = COURT_LINE_COLOR;

        // Hoop and backboard
        self.circle(0.0, 0.0, HOOP_RADIUS, line);
        self.line(
            BACKBOARD_X,
            BACKBOARD_Y,
            BACKBOARD_X + BACKBOARD_WIDTH,
            BACKBOARD_Y,
            line,
        );

        // Key boxes
        self.rect(OUTER_KEY_X, OUTER_KEY_Y, OUTER_KEY_WIDTH, OUTER_KEY_HEIGHT, line);
        self.rect(INNER_KEY_X, INNER_KEY_Y, INNER_KEY_WIDTH, INNER_KEY_HEIGHT, line);

        // Free throw circle: solid top half, dashed bottom half
        self.arc(0.0, FREE_THROW_CENTER_Y, FREE_THROW_RADIUS, 0.0, 180.0, false, line);
        self.arc(0.0, FREE_THROW_CENTER_Y, FREE_THROW_RADIUS, 180.0, 360.0, true, line);

        // Restricted area
        self.arc(0.0, 0.0, RESTRICTED_RADIUS, 0.0, 180.0, false, line);

        // Three point line: corner verticals plus the arc
        self.line(
            -CORNER_THREE_X,
            CORNER_THREE_Y_MIN,
            -CORNER_THREE_X,
            CORNER_THREE_Y_MAX,
            line,
        );
        self.line(
            CORNER_THREE_X,
            CORNER_THREE_Y_MIN,
            CORNER_THREE_X,
            CORNER_THREE_Y_MAX,
            line,
        );
        self.arc(
            0.0,
            0.0,
            THREE_POINT_RADIUS,
            THREE_POINT_START_DEG,
            THREE_POINT_END_DEG,
            false,
            line,
        );

        // Center court arcs, half circles facing the hoop
        self.arc(0.0, CENTER_COURT_Y, CENTER_OUTER_RADIUS, 180.0, 360.0, false, line);
        self.arc(0.0, CENTER_COURT_Y, CENTER_INNER_RADIUS, 180.0, 360.0, false, line);
    }

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>) {
        let start = self.to_px(x0, y0);
        let end = self.to_px(x1, y1);
        draw_line_segment_mut(&mut self.img, start, end, color);
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
        let (px, py) = self.to_px(cx, cy);
        let r = (radius * RENDER_SCALE).round() as i32;
        draw_hollow_circle_mut(&mut self.img, (px as i32, py as i32), r, color);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb<u8>) {
        let (px, py) = self.to_px(x, y);
        let w = (width * RENDER_SCALE) as u32;
        let h = (height * RENDER_SCALE) as u32;
        draw_hollow_rect_mut(
            &mut self.img,
            Rect::at(px as i32, py as i32).of_size(w.max(1), h.max(1)),
            color,
        );
    }

    /// Draw an arc as short line segments. Angles are degrees
    /// counterclockwise from the +x axis in court coordinates; dashed arcs
    /// drop every other segment pair.
    fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_deg: f32,
        end_deg: f32,
        dashed: bool,
        color: Rgb<u8>,
    ) {
        let steps = ((end_deg - start_deg).abs() / ARC_STEP_DEG).ceil().max(1.0) as u32;
        let step = (end_deg - start_deg) / steps as f32;

        for i in 0..steps {
            if dashed && (i / 2) % 2 == 1 {
                continue;
            }
            let a0 = (start_deg + step * i as f32).to_radians();
            let a1 = (start_deg + step * (i + 1) as f32).to_radians();
            self.line(
                cx + radius * a0.cos(),
                cy + radius * a0.sin(),
                cx + radius * a1.cos(),
                cy + radius * a1.sin(),
                color,
            );
        }
    }
}

impl Default for CourtCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_covers_view_plus_bands() {
        let canvas = CourtCanvas::new();
        assert_eq!(canvas.image().width(), 1000 + LEGEND_BAND_PX);
        assert_eq!(canvas.image().height(), 850 + TITLE_BAND_PX);
    }

    #[test]
    fn y_axis_is_inverted() {
        let canvas = CourtCanvas::new();
        let (_, hoop_py) = canvas.to_px(0.0, 0.0);
        let (_, center_py) = canvas.to_px(0.0, CENTER_COURT_Y);
        assert!(
            hoop_py < center_py,
            "hoop must render above center court in the image"
        );
    }

    #[test]
    fn court_corners_stay_on_canvas() {
        let canvas = CourtCanvas::new();
        for (x, y) in [
            (VIEW_X_MIN, VIEW_Y_TOP),
            (VIEW_X_MAX - 1.0, VIEW_Y_BOTTOM - 1.0),
            (-CORNER_THREE_X, CORNER_THREE_Y_MIN),
            (CORNER_THREE_X, CORNER_THREE_Y_MAX),
        ] {
            let (px, py) = canvas.to_px(x, y);
            assert!(px >= 0.0 && px < canvas.image().width() as f32);
            assert!(py >= 0.0 && py < canvas.image().height() as f32);
        }
    }

    #[test]
    fn draw_court_marks_line_pixels() {
        let mut canvas = CourtCanvas::new();
        canvas.draw_court();
        let drawn = canvas
            .image()
            .pixels()
            .filter(|p| **p == COURT_LINE_COLOR)
            .count();
        assert!(drawn > 1000, "expected court lines, got {} pixels", drawn);
    }
}
