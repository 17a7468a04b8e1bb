//! Heat-map rendering
//!
//! Overlays binned shooting percentages on the court diagram: one filled
//! circle per occupied bin, sized by attempt volume and colored by make
//! percentage, plus a color-bar legend and a title line.

use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut};
use log::{debug, warn};

use crate::constants::*;
use crate::court::CourtCanvas;
use crate::error::ChartError;
use crate::hexbin::BinStat;

const TITLE_SCALE: f32 = 26.0;
const LABEL_SCALE: f32 = 18.0;

const LEGEND_BAR_WIDTH: u32 = 24;
const LEGEND_BAR_HEIGHT: u32 = 400;
const LEGEND_MARGIN_PX: u32 = 28;

/// Font locations probed when the config doesn't name one.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Map a percentage in [0, 1] onto the fixed 5-stop color ramp.
pub fn ramp_color(t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);

    let mut lower = RAMP_STOPS[0];
    let mut upper = RAMP_STOPS[RAMP_STOPS.len() - 1];
    for window in RAMP_STOPS.windows(2) {
        if t >= window[0].0 && t <= window[1].0 {
            lower = window[0];
            upper = window[1];
            break;
        }
    }

    let span = upper.0 - lower.0;
    let f = if span <= f32::EPSILON {
        0.0
    } else {
        (t - lower.0) / span
    };
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
    Rgb([
        lerp(lower.1[0], upper.1[0]),
        lerp(lower.1[1], upper.1[1]),
        lerp(lower.1[2], upper.1[2]),
    ])
}

/// Marker radius in court units: proportional to attempts, scaled by
/// 1/grid_size and clamped at 240/grid_size so high-volume bins don't
/// swallow their neighbors.
pub fn marker_radius(attempts: u32, grid_size: u32) -> f32 {
    let grid = grid_size.max(1) as f32;
    (attempts as f32 * MARKER_UNIT).min(MARKER_CAP) / grid
}

/// Load the label font: explicit config path first, then the probe list.
/// Returns None when nothing is available; labels are then skipped.
pub fn load_font(font_path: Option<&str>) -> Option<FontVec> {
    let configured = font_path.into_iter();
    for candidate in configured.chain(FONT_CANDIDATES.iter().copied()) {
        match fs::read(candidate) {
            Ok(bytes) => match FontVec::try_from_vec(bytes) {
                Ok(font) => {
                    debug!("using label font {}", candidate);
                    return Some(font);
                }
                Err(_) => warn!("{} is not a usable font, skipping", candidate),
            },
            Err(_) => continue,
        }
    }
    warn!("no label font found, chart text will be omitted");
    None
}

/// Render the full chart: court, heat markers, legend, title.
pub fn render_chart(
    bins: &[BinStat],
    player_label: &str,
    game_count: u32,
    grid_size: u32,
    font: Option<&FontVec>,
) -> RgbImage {
    let mut canvas = CourtCanvas::new();
    canvas.draw_court();
    draw_markers(&mut canvas, bins, grid_size);
    draw_legend(&mut canvas, font);

    let mut img = canvas.into_image();
    if let Some(font) = font {
        let title = format!("{}: last {} games", player_label, game_count);
        draw_text_mut(
            &mut img,
            TEXT_COLOR,
            20,
            16,
            PxScale::from(TITLE_SCALE),
            font,
            &title,
        );
    }
    img
}

/// Write the chart PNG, creating the parent directory if needed.
pub fn save_chart(img: &RgbImage, path: &Path) -> Result<(), ChartError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ChartError::OutputDir {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    img.save(path).map_err(|source| ChartError::Save {
        path: path.display().to_string(),
        source,
    })
}

fn draw_markers(canvas: &mut CourtCanvas, bins: &[BinStat], grid_size: u32) {
    for bin in bins {
        if bin.attempts == 0 {
            continue;
        }
        let (px, py) = canvas.to_px(bin.x, bin.y);
        let radius_px = (marker_radius(bin.attempts, grid_size) * RENDER_SCALE)
            .round()
            .max(1.0) as i32;
        let color = ramp_color(bin.percentage);
        draw_filled_circle_mut(
            canvas.image_mut(),
            (px as i32, py as i32),
            radius_px,
            color,
        );
    }
}

fn draw_legend(canvas: &mut CourtCanvas, font: Option<&FontVec>) {
    let bar_x = canvas.court_width_px() + LEGEND_MARGIN_PX;
    let bar_y = TITLE_BAND_PX + 120;
    let img = canvas.image_mut();

    for row in 0..LEGEND_BAR_HEIGHT {
        // Top of the bar is 100%
        let t = 1.0 - row as f32 / (LEGEND_BAR_HEIGHT - 1) as f32;
        let color = ramp_color(t);
        for col in 0..LEGEND_BAR_WIDTH {
            let x = bar_x + col;
            let y = bar_y + row;
            if x < img.width() && y < img.height() {
                img.put_pixel(x, y, color);
            }
        }
    }

    if let Some(font) = font {
        for step in 0..=4u32 {
            let pct = step * 25;
            let row = LEGEND_BAR_HEIGHT - (LEGEND_BAR_HEIGHT * step / 4).min(LEGEND_BAR_HEIGHT - 1);
            let y = bar_y + row - LABEL_SCALE as u32 / 2;
            draw_text_mut(
                img,
                TEXT_COLOR,
                (bar_x + LEGEND_BAR_WIDTH + 6) as i32,
                y as i32,
                PxScale::from(LABEL_SCALE),
                font,
                &format!("{}%", pct),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_hits_its_endpoints() {
        assert_eq!(ramp_color(0.0), RAMP_STOPS[0].1);
        assert_eq!(ramp_color(1.0), RAMP_STOPS[4].1);
        assert_eq!(ramp_color(0.5), RAMP_STOPS[2].1);
    }

    #[test]
    fn ramp_clamps_out_of_range_input() {
        assert_eq!(ramp_color(-0.3), RAMP_STOPS[0].1);
        assert_eq!(ramp_color(1.7), RAMP_STOPS[4].1);
    }

    #[test]
    fn ramp_interpolates_between_stops() {
        let mid = ramp_color(0.125);
        let lo = RAMP_STOPS[0].1;
        let hi = RAMP_STOPS[1].1;
        for c in 0..3 {
            let (a, b) = (lo[c].min(hi[c]), lo[c].max(hi[c]));
            assert!(mid[c] >= a && mid[c] <= b);
        }
    }

    #[test]
    fn marker_radius_scales_then_clamps() {
        let one = marker_radius(1, 30);
        let five = marker_radius(5, 30);
        assert!((five - one * 5.0).abs() < 1e-6);

        let cap = MARKER_CAP / 30.0;
        assert!((marker_radius(10, 30) - cap).abs() < 1e-6);
        assert!((marker_radius(500, 30) - cap).abs() < 1e-6, "clamp, never skip");
    }

    #[test]
    fn empty_bins_render_bare_court() {
        let img = render_chart(&[], "Nobody", 82, 30, None);
        assert!(img.pixels().any(|p| *p == COURT_LINE_COLOR));

        // No markers on the court itself; the legend band still shows the
        // full ramp.
        let court_px = ((VIEW_X_MAX - VIEW_X_MIN) * RENDER_SCALE) as u32;
        let marker_pixels = img
            .enumerate_pixels()
            .filter(|(x, _, p)| *x < court_px && **p == RAMP_STOPS[4].1)
            .count();
        assert_eq!(marker_pixels, 0);
    }

    #[test]
    fn occupied_bin_paints_a_marker() {
        let bins = vec![crate::hexbin::BinStat {
            x: 0.0,
            y: 100.0,
            attempts: 12,
            makes: 12,
            percentage: 1.0,
        }];
        let img = render_chart(&bins, "Somebody", 10, 30, None);
        let hot = img.pixels().filter(|p| **p == RAMP_STOPS[4].1).count();
        // 100% marker plus the matching top of the legend bar
        assert!(hot > 50, "expected marker pixels, got {}", hot);
    }

    #[test]
    fn save_chart_writes_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("chart.png");
        let img = render_chart(&[], "Nobody", 82, 30, None);
        save_chart(&img, &path).expect("save chart");
        assert!(path.exists());
    }
}
