//! Shotchart - NBA shot-location heat maps
//!
//! Fetches a player's shot attempts from the public stats API, bins them
//! into a hexagonal grid, and renders per-bin shooting percentage over a
//! half-court diagram as a PNG.

pub mod api;
pub mod config;
pub mod constants;
pub mod court;
pub mod error;
pub mod hexbin;
pub mod render;
pub mod shots;

// Re-export commonly used types for convenience
pub use api::{
    FULL_SEASON_GAMES, Player, StatsClient, current_season, normalize_game_window, season_for,
};
pub use config::{CONFIG_FILE, ChartConfig};
pub use constants::*;
pub use court::CourtCanvas;
pub use error::ChartError;
pub use hexbin::{BinStat, aggregate};
pub use render::{load_font, marker_radius, ramp_color, render_chart, save_chart};
pub use shots::ShotRecord;
