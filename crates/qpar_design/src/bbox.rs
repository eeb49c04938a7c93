//! Incremental per-wire bounding box, maintained across placement moves.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box over element grid cells, `(x, y)` in fabric-cell units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge (minimum x).
    pub xl: i64,
    /// Right edge (maximum x).
    pub xr: i64,
    /// Top edge (minimum y).
    pub yt: i64,
    /// Bottom edge (maximum y).
    pub yb: i64,
}

impl BBox {
    /// Half-perimeter wirelength of this box.
    pub fn hpwl(&self) -> i64 {
        (self.xr - self.xl) + (self.yb - self.yt)
    }

    /// Builds the box (and matching edge counts) from scratch over a set of points.
    pub fn recompute(points: &[(i64, i64)]) -> (Self, EdgeCount) {
        assert!(!points.is_empty(), "bbox requires at least one element");
        let xl = points.iter().map(|p| p.0).min().unwrap();
        let xr = points.iter().map(|p| p.0).max().unwrap();
        let yt = points.iter().map(|p| p.1).min().unwrap();
        let yb = points.iter().map(|p| p.1).max().unwrap();
        let edge_count = EdgeCount {
            xl_cnt: points.iter().filter(|p| p.0 == xl).count() as u32,
            xr_cnt: points.iter().filter(|p| p.0 == xr).count() as u32,
            yt_cnt: points.iter().filter(|p| p.1 == yt).count() as u32,
            yb_cnt: points.iter().filter(|p| p.1 == yb).count() as u32,
        };
        (Self { xl, xr, yt, yb }, edge_count)
    }
}

/// How many elements currently sit on each extreme edge of a [`BBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCount {
    /// Elements at `box.xl`.
    pub xl_cnt: u32,
    /// Elements at `box.xr`.
    pub xr_cnt: u32,
    /// Elements at `box.yt`.
    pub yt_cnt: u32,
    /// Elements at `box.yb`.
    pub yb_cnt: u32,
}

/// Outcome of an incremental single-axis bbox update: either the box was
/// adjusted in place, or it must be fully recomputed from the wire's points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The incremental update was sufficient.
    Updated,
    /// The moved element left the extreme edge with no other occupant;
    /// the caller must recompute the box from scratch.
    RecomputeRequired,
}

/// Applies the three axis-symmetric cases from the bounding-box update rule
/// to one axis (`min`/`max`/their edge counts) for one endpoint moving from
/// `from` to `to`. Call once per axis (x, then y) per moved element.
pub fn update_axis(
    min: &mut i64,
    max: &mut i64,
    min_cnt: &mut u32,
    max_cnt: &mut u32,
    from: i64,
    to: i64,
) -> UpdateOutcome {
    let mut outcome = UpdateOutcome::Updated;

    if to < *min {
        *min = to;
        *min_cnt = 1;
    } else if to == *min {
        *min_cnt += 1;
    }

    if to > *max {
        *max = to;
        *max_cnt = 1;
    } else if to == *max && !(to < *min) {
        // to == min handled above already incremented; avoid double count
        // when min == max (single-point box) by only bumping max_cnt here
        // if this branch is reached independently of the min branch.
        if *min != *max {
            *max_cnt += 1;
        }
    }

    if from == *min {
        if *min_cnt > 1 {
            *min_cnt -= 1;
        } else {
            outcome = UpdateOutcome::RecomputeRequired;
        }
    }
    if from == *max && from != *min {
        if *max_cnt > 1 {
            *max_cnt -= 1;
        } else {
            outcome = UpdateOutcome::RecomputeRequired;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hpwl_of_unit_box() {
        let b = BBox {
            xl: 0,
            xr: 3,
            yt: 0,
            yb: 2,
        };
        assert_eq!(b.hpwl(), 5);
    }

    #[test]
    fn recompute_from_points() {
        let points = [(0, 0), (2, 1), (2, 3)];
        let (bbox, edges) = BBox::recompute(&points);
        assert_eq!(bbox.xl, 0);
        assert_eq!(bbox.xr, 2);
        assert_eq!(bbox.yt, 0);
        assert_eq!(bbox.yb, 3);
        assert_eq!(edges.xl_cnt, 1);
        assert_eq!(edges.xr_cnt, 2);
    }

    #[test]
    fn extend_below_min() {
        let mut min = 5i64;
        let mut max = 10i64;
        let mut min_cnt = 1u32;
        let mut max_cnt = 1u32;
        let outcome = update_axis(&mut min, &mut max, &mut min_cnt, &mut max_cnt, 5, 2);
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(min, 2);
        assert_eq!(min_cnt, 1);
    }

    #[test]
    fn leaving_sole_extreme_requires_recompute() {
        let mut min = 5i64;
        let mut max = 10i64;
        let mut min_cnt = 1u32;
        let mut max_cnt = 1u32;
        let outcome = update_axis(&mut min, &mut max, &mut min_cnt, &mut max_cnt, 5, 7);
        assert_eq!(outcome, UpdateOutcome::RecomputeRequired);
    }

    #[test]
    fn leaving_shared_extreme_just_decrements() {
        let mut min = 5i64;
        let mut max = 10i64;
        let mut min_cnt = 2u32;
        let mut max_cnt = 1u32;
        let outcome = update_axis(&mut min, &mut max, &mut min_cnt, &mut max_cnt, 5, 7);
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(min_cnt, 1);
    }

    #[test]
    fn single_axis_move_at_min_does_not_inflate_edge_count() {
        // An element sitting at the extreme on this axis moves on the
        // *other* axis only, so this axis sees `from == to == min`. The
        // edge count must come back out unchanged, not grow every call.
        let mut min = 5i64;
        let mut max = 10i64;
        let mut min_cnt = 1u32;
        let mut max_cnt = 1u32;
        let outcome = update_axis(&mut min, &mut max, &mut min_cnt, &mut max_cnt, 5, 5);
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(min_cnt, 1);
        assert_eq!(max_cnt, 1);
    }
}
