/*
This code is part of the terra_hydro terrain-hydrology library.
License: MIT

D-infinity proportional routing (Tarboton, 1997): flow direction is resolved
as a continuous angle across one of 8 triangular facets formed by pairs of
adjacent neighbors, and the donor's area is split between the two neighbors
bounding the winning facet in proportion to how close that angle sits to
each of them.
*/
use std::f64::consts::{FRAC_PI_4, SQRT_2};

use crate::error::Error;
use crate::grid::Grid;
use crate::traversal::descending_order;

/// Walks the neighbor ring (see [`crate::grid::DX`]/[`crate::grid::DY`]) in
/// the order the 8 facets need it: each facet's second neighbor becomes the
/// next facet's first, so stepping through this once visits SW, S, SE, E,
/// NE, N, NW, W and back to SW, enumerating the 8 adjacent facet pairs
/// around a cell.
const CYCLE: [usize; 9] = [4, 3, 2, 1, 0, 7, 6, 5, 4];

struct Facet {
    slope: f64,
    partition1: f64,
    partition2: f64,
}

/// Slope and area-partition weights for the triangular facet spanning
/// `(x, y)`'s neighbors `n1` and `n2`. `n1` and `n2` must be adjacent
/// positions on the 8-neighbor ring (consecutive `CYCLE` entries).
fn facet_slope(elevations: &Grid<f64>, x: u32, y: u32, n1: (u32, u32), n2: (u32, u32), dx: f64) -> Facet {
    let z0 = elevations.get(x, y);
    let z1 = elevations.get(n1.0, n1.1);
    let z2 = elevations.get(n2.0, n2.1);

    let n1_is_diagonal = n1.0 != x && n1.1 != y;

    let (s1, s2) = if !n1_is_diagonal {
        ((z0 - z1) / dx, (z1 - z2) / dx)
    } else {
        ((z0 - z2) / dx, (z2 - z1) / dx)
    };

    let r = s2.atan2(s1);
    let (r, slope) = if r < 0.0 {
        (0.0, s1)
    } else if r > FRAC_PI_4 {
        let diagonal_run = SQRT_2 * dx;
        let slope = if n1_is_diagonal {
            (z0 - z1) / diagonal_run
        } else {
            (z0 - z2) / diagonal_run
        };
        (FRAC_PI_4, slope)
    } else {
        (r, (s1 * s1 + s2 * s2).sqrt())
    };

    let (partition1, partition2) = if !n1_is_diagonal {
        (1.0 - r.tan(), r.tan())
    } else {
        (r.tan(), 1.0 - r.tan())
    };

    Facet { slope, partition1, partition2 }
}

/// Accumulates D-infinity contributing area and the per-cell steepest
/// facet slope. `area` must already be seeded (typically with each cell's
/// own footprint, `dx * dx`); `slope` is overwritten for every interior
/// cell whose winning facet has a positive slope.
pub fn accumulate(
    elevations: &Grid<f64>,
    dx: f64,
    area: &mut Grid<f64>,
    slope: &mut Grid<f64>,
) -> Result<(), Error> {
    let order = descending_order(elevations)?;
    let height = elevations.height();

    for i in order {
        let (x, y) = elevations.i_to_xy(i);
        if y == 0 || y == height - 1 {
            continue;
        }

        let mut max_slope = -1.0_f64;
        let mut winner: Option<((u32, u32), (u32, u32), f64, f64)> = None;

        for k in 0..8 {
            let n1 = match elevations.neighbor(x, y, CYCLE[k]) {
                Some(v) => v,
                None => continue,
            };
            let n2 = match elevations.neighbor(x, y, CYCLE[k + 1]) {
                Some(v) => v,
                None => continue,
            };
            let facet = facet_slope(elevations, x, y, n1, n2, dx);
            if facet.slope > max_slope {
                max_slope = facet.slope;
                winner = Some((n1, n2, facet.partition1, facet.partition2));
            }
        }

        if max_slope > 0.0 {
            if let Some((n1, n2, p1, p2)) = winner {
                let donated = area.get(x, y);
                area.set(n1.0, n1.1, area.get(n1.0, n1.1) + donated * p1);
                area.set(n2.0, n2.1, area.get(n2.0, n2.1) + donated * p2);
                slope.set(x, y, max_slope);
            }
        }
    }

    Ok(())
}
