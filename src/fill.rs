/*
This code is part of the terra_hydro terrain-hydrology library.
License: MIT

Priority-Flood+Epsilon (Barnes, Lehman, Mulla, 2014): floods depressions
from the grid boundary inward using a priority queue, raising flooded cells
by the smallest representable increment so that every interior cell ends up
with a strictly descending drainage path to the boundary.
*/
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::elevation::CellValue;
use crate::error::Error;
use crate::grid::Grid;

/// A snapshot of a grid cell's position and elevation at the time it was
/// enqueued. The PitQueue holds these directly in a FIFO `VecDeque`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell<T> {
    x: u32,
    y: u32,
    z: T,
}

/// The same triple, additionally carrying the insertion sequence number that
/// gives the open priority queue its FIFO tie-break on equal elevations.
/// `BinaryHeap` is not a stable heap, so without this counter two cells
/// pushed at the same z could pop in either order and the flood front on a
/// plateau would not match a stable implementation's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueCell<T> {
    x: u32,
    y: u32,
    z: T,
    seq: u64,
}

impl<T: CellValue> Eq for QueueCell<T> {}

impl<T: CellValue> PartialOrd for QueueCell<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: CellValue> Ord for QueueCell<T> {
    // `BinaryHeap` is a max-heap; invert the elevation comparison so that
    // the smallest z pops first, and break ties by insertion order (lowest
    // `seq` first) rather than leaving it to the heap's internal layout.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.z.partial_cmp(&other.z) {
            Some(Ordering::Less) => Ordering::Greater,
            Some(Ordering::Greater) => Ordering::Less,
            Some(Ordering::Equal) | None => other.seq.cmp(&self.seq),
        }
    }
}

/// Diagnostic counters returned alongside a successful fill. Not part of the
/// buffer-based boundary entry points, but available to callers of the
/// Rust-native API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Number of neighbor raises that happened while the running `PitTop`
    /// was already above the neighbor's original elevation, i.e. cells
    /// that looked like they belonged to a shallower pit than the one
    /// actually being filled. Purely diagnostic; does not affect output.
    pub false_pit_cells: u64,
}

/// Runs Priority-Flood+Epsilon over `grid` in place.
///
/// Returns `Error::UnsupportedType` immediately for any `T` that isn't an
/// IEEE-754 float (the construction below relies on `next_up` actually
/// producing a value strictly greater than its input, which integer types
/// can't do without wrapping).
pub fn fill_depressions<T: CellValue>(grid: &mut Grid<T>) -> Result<FillReport, Error> {
    if !T::is_floating_point() {
        return Err(Error::UnsupportedType);
    }

    let width = grid.width();
    let height = grid.height();
    if width == 0 || height == 0 {
        return Ok(FillReport::default());
    }

    let no_data = grid.no_data();
    let mut closed: Grid<bool> = Grid::new(width, height, false);
    let mut open: BinaryHeap<QueueCell<T>> =
        BinaryHeap::with_capacity(2 * width as usize + 2 * height as usize);
    let mut pit: VecDeque<Cell<T>> = VecDeque::new();
    let mut seq: u64 = 0;
    let mut false_pit_cells: u64 = 0;

    // Seed every cell of the top and bottom rows; the left/right columns are
    // deliberately left unseeded because the x-axis is periodic (a
    // cylindrical domain has no left/right edge to drain across).
    for x in 0..width {
        for &y in &[0u32, height - 1] {
            if !closed.get(x, y) {
                let z = grid.get(x, y);
                open.push(QueueCell { x, y, z, seq });
                seq += 1;
                closed.set(x, y, true);
            }
        }
    }

    let mut pit_top = no_data;

    while !open.is_empty() || !pit.is_empty() {
        let c: Cell<T> = match (open.peek(), pit.front()) {
            (Some(o), Some(p)) if o.z == p.z => {
                let o = open.pop().unwrap();
                pit_top = no_data;
                Cell { x: o.x, y: o.y, z: o.z }
            }
            (_, Some(_)) => {
                let c = pit.pop_front().unwrap();
                if pit_top == no_data {
                    pit_top = grid.get(c.x, c.y);
                }
                c
            }
            _ => {
                let o = open.pop().unwrap();
                pit_top = no_data;
                Cell { x: o.x, y: o.y, z: o.z }
            }
        };

        for n in 0..8 {
            let (nx, ny) = match grid.neighbor(c.x, c.y, n) {
                Some(v) => v,
                None => continue,
            };
            if closed.get(nx, ny) {
                continue;
            }
            closed.set(nx, ny, true);

            let zn = grid.get(nx, ny);
            if zn == no_data {
                pit.push_back(Cell { x: nx, y: ny, z: no_data });
            } else {
                let bump = c.z.next_up();
                if zn <= bump {
                    if pit_top != no_data && pit_top < zn && bump >= zn {
                        false_pit_cells += 1;
                    }
                    grid.set(nx, ny, bump);
                    pit.push_back(Cell { x: nx, y: ny, z: bump });
                } else {
                    open.push(QueueCell { x: nx, y: ny, z: zn, seq });
                    seq += 1;
                }
            }
        }
    }

    Ok(FillReport { false_pit_cells })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descends_to_boundary(grid: &Grid<f64>, mut x: u32, mut y: u32) -> bool {
        let no_data = grid.no_data();
        let height = grid.height();
        for _ in 0..(grid.width() as u64 * grid.height() as u64 + 1) {
            if y == 0 || y == height - 1 {
                return true;
            }
            let z = grid.get(x, y);
            let mut stepped = false;
            for n in 0..8 {
                if let Some((nx, ny)) = grid.neighbor(x, y, n) {
                    let zn = grid.get(nx, ny);
                    if zn != no_data && zn < z {
                        x = nx;
                        y = ny;
                        stepped = true;
                        break;
                    }
                }
            }
            if !stepped {
                return false;
            }
        }
        false
    }

    #[test]
    fn rejects_integer_grids() {
        let mut grid: Grid<i32> = Grid::new(3, 3, 0);
        assert_eq!(fill_depressions(&mut grid), Err(Error::UnsupportedType));
    }

    #[test]
    fn cone_center_is_raised_by_one_ulp() {
        let data = vec![9.0, 9.0, 9.0, 9.0, 1.0, 9.0, 9.0, 9.0, 9.0];
        let mut grid = Grid::from_row_major(data, 3, 3, -9999.0);
        fill_depressions(&mut grid).unwrap();
        let expected = CellValue::next_up(9.0_f64);
        assert_eq!(grid.get(1, 1), expected);
    }

    #[test]
    fn single_pit_in_flat_plain_is_raised_and_drains() {
        let mut data = vec![10.0_f64; 25];
        data[2 * 5 + 2] = 0.0;
        let mut grid = Grid::from_row_major(data, 5, 5, -9999.0);
        fill_depressions(&mut grid).unwrap();
        assert!(grid.get(2, 2) > 0.0);
        assert!(descends_to_boundary(&grid, 2, 2));
    }

    #[test]
    fn planar_surface_with_no_depressions_is_untouched() {
        let height = 4u32;
        let width = 4u32;
        let mut data = vec![0.0_f64; (width * height) as usize];
        for y in 0..height {
            for x in 0..width {
                data[(y * width + x) as usize] = (height - y) as f64;
            }
        }
        let original = data.clone();
        let mut grid = Grid::from_row_major(data, width, height, -9999.0);
        fill_depressions(&mut grid).unwrap();
        assert_eq!(grid.as_slice(), original.as_slice());
    }

    #[test]
    fn idempotent_on_an_already_filled_grid() {
        let mut data = vec![10.0_f64; 25];
        data[12] = 0.0;
        let mut grid = Grid::from_row_major(data, 5, 5, -9999.0);
        fill_depressions(&mut grid).unwrap();
        let filled = grid.as_slice().to_vec();
        fill_depressions(&mut grid).unwrap();
        assert_eq!(grid.as_slice(), filled.as_slice());
    }

    #[test]
    fn no_data_patch_is_preserved_and_not_raised() {
        let mut data = vec![10.0_f64; 25];
        let no_data = -9999.0_f64;
        for y in 1..3 {
            for x in 1..3 {
                data[y * 5 + x] = no_data;
            }
        }
        let mut grid = Grid::from_row_major(data, 5, 5, no_data);
        fill_depressions(&mut grid).unwrap();
        for y in 1..3 {
            for x in 1..3 {
                assert_eq!(grid.get(x as u32, y as u32), no_data);
            }
        }
    }

    #[test]
    fn periodic_x_wrap_is_exercised() {
        // Low value at x=0 of the middle row; x=W-1 is its periodic neighbor.
        let width = 4u32;
        let height = 3u32;
        let mut data = vec![10.0_f64; (width * height) as usize];
        data[(1 * width + 0) as usize] = 1.0;
        let mut grid = Grid::from_row_major(data, width, height, -9999.0);
        fill_depressions(&mut grid).unwrap();
        assert!(grid.get(0, 1) > 1.0);
        assert!(descends_to_boundary(&grid, 0, 1));
    }
}
