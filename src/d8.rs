/*
This code is part of the terra_hydro terrain-hydrology library.
License: MIT

D8 single-flow routing: each cell drains entirely to its single steepest of
8 neighbors. Contributing area is accumulated in a single descending-
elevation pass because, on a filled surface, every donor cell is guaranteed
to be processed (and have written its own area forward) strictly before the
cell it drains into is processed in turn.
*/
use crate::error::Error;
use crate::grid::Grid;
use crate::traversal::descending_order;

const DIAGONAL_DISTANCE_FACTOR: f64 = 1.41;

/// Steepest-descent slope from (x, y) toward one candidate neighbor, using
/// the fixed 1.41 planar approximation of sqrt(2) for diagonal distances.
fn neighbor_slope(elevations: &Grid<f64>, x: u32, y: u32, nx: u32, ny: u32, dx: f64) -> f64 {
    let cardinal = (nx == x) ^ (ny == y);
    let distance = if cardinal { dx } else { DIAGONAL_DISTANCE_FACTOR * dx };
    (elevations.get(x, y) - elevations.get(nx, ny)) / distance
}

/// Accumulates D8 contributing area and emits the per-cell steepest slope.
/// `area` must already be seeded (typically with each cell's own footprint,
/// `dx * dx`); `slope` is overwritten for every interior cell that drains.
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

        let mut max_slope = 0.0_f64;
        let mut target: Option<(u32, u32)> = None;
        for n in 0..8 {
            let (nx, ny) = match elevations.neighbor(x, y, n) {
                Some(v) => v,
                None => continue,
            };
            let s = neighbor_slope(elevations, x, y, nx, ny, dx);
            if s > max_slope {
                max_slope = s;
                target = Some((nx, ny));
            }
        }

        if let Some((mx, my)) = target {
            let donated = area.get(x, y);
            area.set(mx, my, area.get(mx, my) + donated);
            slope.set(x, y, max_slope);
        }
    }

    Ok(())
}
