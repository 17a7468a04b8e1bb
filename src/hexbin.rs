//! Hexagonal shot aggregation
//!
//! Bins shot attempts into a fixed hexagonal tiling of the court and
//! computes per-bin shooting percentage. The tiling is the two-lattice
//! scheme used by pyplot's hexbin: a base rectangular lattice plus a
//! half-cell offset lattice, each point assigned to the nearer center.

use std::collections::HashMap;

use crate::constants::{COURT_X_MAX, COURT_X_MIN, COURT_Y_MAX, COURT_Y_MIN, OUT_OF_BOUNDS};
use crate::shots::ShotRecord;

/// Per-bin shooting statistic. Only bins with at least one attempt are
/// emitted; `percentage` is defined as 0 when attempts would be 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BinStat {
    /// Bin centroid in court coordinates
    pub x: f32,
    pub y: f32,
    pub attempts: u32,
    pub makes: u32,
    pub percentage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BinKey {
    offset: bool,
    ix: i32,
    iy: i32,
}

#[derive(Default, Clone, Copy)]
struct Tally {
    attempts: u32,
    makes: u32,
}

/// Number of hex rows for a given grid resolution. The y spacing is chosen
/// so the stretched hexagons stay near-regular over the court extent.
fn row_count(grid_size: u32) -> u32 {
    let aspect = (COURT_Y_MAX - COURT_Y_MIN) / (COURT_X_MAX - COURT_X_MIN);
    (grid_size as f32 * aspect / 3f32.sqrt()).round().max(1.0) as u32
}

fn in_bounds(shot: &ShotRecord) -> bool {
    // Take the absolute value after widening to float: i32::MIN has no
    // i32 negation, and records admit any i32.
    (shot.x as f32).abs() < OUT_OF_BOUNDS && (shot.y as f32).abs() < OUT_OF_BOUNDS
}

/// Aggregate shots into hex bins at the given resolution.
///
/// Out-of-bounds shots are filtered first (strict `<` against the 425.1
/// cutoff). Every surviving shot lands in exactly one bin, so the emitted
/// attempt counts sum to the filtered shot count.
pub fn aggregate(shots: &[ShotRecord], grid_size: u32) -> Vec<BinStat> {
    let nx = grid_size.max(1);
    let ny = row_count(nx);
    let sx = (COURT_X_MAX - COURT_X_MIN) / nx as f32;
    let sy = (COURT_Y_MAX - COURT_Y_MIN) / ny as f32;

    let mut tallies: HashMap<BinKey, Tally> = HashMap::new();

    for shot in shots.iter().filter(|s| in_bounds(s)) {
        let zx = (shot.x as f32 - COURT_X_MIN) / sx;
        let zy = (shot.y as f32 - COURT_Y_MIN) / sy;

        // Candidate centers on the base lattice and the offset lattice;
        // the y distance is weighted by 3 to keep the cells hexagonal.
        let ix1 = zx.round();
        let iy1 = zy.round();
        let ix2 = zx.floor();
        let iy2 = zy.floor();
        let d1 = (zx - ix1).powi(2) + 3.0 * (zy - iy1).powi(2);
        let d2 = (zx - ix2 - 0.5).powi(2) + 3.0 * (zy - iy2 - 0.5).powi(2);

        let key = if d1 <= d2 {
            BinKey {
                offset: false,
                ix: ix1 as i32,
                iy: iy1 as i32,
            }
        } else {
            BinKey {
                offset: true,
                ix: ix2 as i32,
                iy: iy2 as i32,
            }
        };

        let tally = tallies.entry(key).or_default();
        tally.attempts += 1;
        if shot.made {
            tally.makes += 1;
        }
    }

    let mut bins: Vec<BinStat> = tallies
        .into_iter()
        .map(|(key, tally)| {
            let shift = if key.offset { 0.5 } else { 0.0 };
            let percentage = if tally.attempts > 0 {
                tally.makes as f32 / tally.attempts as f32
            } else {
                0.0
            };
            BinStat {
                x: COURT_X_MIN + (key.ix as f32 + shift) * sx,
                y: COURT_Y_MIN + (key.iy as f32 + shift) * sy,
                attempts: tally.attempts,
                makes: tally.makes,
                percentage,
            }
        })
        .collect();

    // HashMap iteration order is arbitrary; sort so repeated runs over the
    // same input produce identical output.
    bins.sort_by(|a, b| {
        (a.y, a.x)
            .partial_cmp(&(b.y, b.x))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(x: i32, y: i32, made: bool) -> ShotRecord {
        ShotRecord { x, y, made }
    }

    #[test]
    fn shots_at_origin_share_one_bin() {
        let shots = vec![shot(0, 0, true), shot(0, 0, true), shot(0, 0, false)];
        let bins = aggregate(&shots, 30);

        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].attempts, 3);
        assert_eq!(bins[0].makes, 2);
        assert!((bins[0].percentage - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn percentages_stay_in_unit_range() {
        let shots: Vec<ShotRecord> = (0..200)
            .map(|i| shot((i * 7) % 240 - 120, (i * 13) % 400, i % 3 == 0))
            .collect();
        for bin in aggregate(&shots, 30) {
            assert!(bin.percentage >= 0.0 && bin.percentage <= 1.0);
            assert!(bin.makes <= bin.attempts);
            assert!(bin.attempts > 0, "empty bins must not be emitted");
        }
    }

    #[test]
    fn attempts_sum_to_filtered_shot_count() {
        let mut shots: Vec<ShotRecord> = (0..150)
            .map(|i| shot((i * 11) % 480 - 240, (i * 17) % 420, i % 2 == 0))
            .collect();
        shots.push(shot(500, 0, true)); // out of bounds, dropped
        shots.push(shot(0, -430, true)); // out of bounds, dropped

        let bins = aggregate(&shots, 30);
        let total: u32 = bins.iter().map(|b| b.attempts).sum();
        assert_eq!(total, 150);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let shots: Vec<ShotRecord> = (0..80)
            .map(|i| shot((i * 19) % 460 - 230, (i * 23) % 410 - 40, i % 4 == 0))
            .collect();
        assert_eq!(aggregate(&shots, 30), aggregate(&shots, 30));
    }

    #[test]
    fn boundary_shot_is_excluded() {
        // Coordinates are integers, so 426 is the first value past the
        // 425.1 cutoff and 425 the last one inside it.
        let bins = aggregate(&[shot(0, 426, true)], 30);
        assert!(bins.is_empty());

        let bins = aggregate(&[shot(0, 425, true)], 30);
        let total: u32 = bins.iter().map(|b| b.attempts).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn extreme_coordinates_are_filtered_without_panicking() {
        let shots = vec![
            shot(i32::MIN, 0, true),
            shot(0, i32::MIN, true),
            shot(i32::MAX, i32::MAX, false),
            shot(0, 0, true),
        ];
        let bins = aggregate(&shots, 30);
        let total: u32 = bins.iter().map(|b| b.attempts).sum();
        assert_eq!(total, 1, "only the in-bounds shot may be binned");
    }

    #[test]
    fn empty_input_emits_no_bins() {
        assert!(aggregate(&[], 30).is_empty());
    }

    #[test]
    fn neighboring_shots_split_into_distinct_bins() {
        let shots = vec![shot(-200, 0, true), shot(200, 0, false), shot(0, 300, true)];
        let bins = aggregate(&shots, 30);
        assert_eq!(bins.len(), 3);
    }
}
