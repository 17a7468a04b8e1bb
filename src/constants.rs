//! Fixed constants for shot aggregation and court rendering
//!
//! All court geometry and chart values are defined here so the renderer
//! stays free of inline magic numbers.

use image::Rgb;

// =============================================================================
// BINNING EXTENT
// =============================================================================

pub const COURT_X_MIN: f32 = -250.0;
pub const COURT_X_MAX: f32 = 250.0;
pub const COURT_Y_MIN: f32 = -50.0;
pub const COURT_Y_MAX: f32 = 425.0;

/// Shots with |x| or |y| at or beyond this are sensor noise and are dropped.
pub const OUT_OF_BOUNDS: f32 = 425.1;

/// Default hex grid resolution along the x extent.
pub const DEFAULT_GRID_SIZE: u32 = 30;

// =============================================================================
// COURT GEOMETRY (hoop at origin, units are tenths of feet)
// =============================================================================

pub const HOOP_RADIUS: f32 = 7.5;

pub const BACKBOARD_WIDTH: f32 = 60.0;
pub const BACKBOARD_X: f32 = -30.0;
pub const BACKBOARD_Y: f32 = -7.5;

pub const OUTER_KEY_X: f32 = -80.0; // 160 x 190 box around the lane
pub const OUTER_KEY_Y: f32 = -47.5;
pub const OUTER_KEY_WIDTH: f32 = 160.0;
pub const OUTER_KEY_HEIGHT: f32 = 190.0;

pub const INNER_KEY_X: f32 = -60.0; // 120 x 190 box inside the lane
pub const INNER_KEY_Y: f32 = -47.5;
pub const INNER_KEY_WIDTH: f32 = 120.0;
pub const INNER_KEY_HEIGHT: f32 = 190.0;

pub const FREE_THROW_CENTER_Y: f32 = 142.5;
pub const FREE_THROW_RADIUS: f32 = 60.0; // solid top arc, dashed bottom arc

pub const RESTRICTED_RADIUS: f32 = 40.0;

pub const CORNER_THREE_X: f32 = 220.0; // vertical marks at +/- 220
pub const CORNER_THREE_Y_MIN: f32 = -47.5;
pub const CORNER_THREE_Y_MAX: f32 = 92.5;

pub const THREE_POINT_RADIUS: f32 = 237.5;
pub const THREE_POINT_START_DEG: f32 = 22.0;
pub const THREE_POINT_END_DEG: f32 = 158.0;

pub const CENTER_COURT_Y: f32 = 422.5;
pub const CENTER_OUTER_RADIUS: f32 = 60.0;
pub const CENTER_INNER_RADIUS: f32 = 20.0;

// =============================================================================
// VIEW WINDOW AND PIXEL MAPPING
// =============================================================================

// The view is x in [-250, 250], y in [400, -25] with the y axis inverted:
// the hoop sits near the top of the image, center court at the bottom.
pub const VIEW_X_MIN: f32 = -250.0;
pub const VIEW_X_MAX: f32 = 250.0;
pub const VIEW_Y_TOP: f32 = -25.0;
pub const VIEW_Y_BOTTOM: f32 = 400.0;

/// Pixels per court unit.
pub const RENDER_SCALE: f32 = 2.0;

pub const TITLE_BAND_PX: u32 = 60; // blank band above the court for the title
pub const LEGEND_BAND_PX: u32 = 110; // blank band right of the court for the color bar

// =============================================================================
// HEAT MARKERS
// =============================================================================

/// Marker radius gained per attempt, before the 1/grid_size scaling.
pub const MARKER_UNIT: f32 = 24.0;
/// Radius ceiling, also scaled by 1/grid_size. Clamp, never skip.
pub const MARKER_CAP: f32 = 240.0;

// =============================================================================
// COLOR RAMP (low percentage = warm light, high = dark desaturated)
// =============================================================================

pub const RAMP_STOPS: [(f32, Rgb<u8>); 5] = [
    (0.00, Rgb([255, 237, 219])),
    (0.25, Rgb([248, 186, 145])),
    (0.50, Rgb([222, 120, 84])),
    (0.75, Rgb([163, 58, 47])),
    (1.00, Rgb([84, 22, 19])),
];

pub const COURT_LINE_COLOR: Rgb<u8> = Rgb([40, 40, 40]);
pub const BACKGROUND_COLOR: Rgb<u8> = Rgb([250, 248, 243]);
pub const TEXT_COLOR: Rgb<u8> = Rgb([30, 30, 30]);
