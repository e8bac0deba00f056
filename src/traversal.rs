/*
This code is part of the terra_hydro terrain-hydrology library.
License: MIT
*/
use crate::error::Error;
use crate::grid::Grid;

/// Builds the index sequence `[0, W*H)` sorted so that elevations are
/// visited in descending order. Exact-capacity allocation per the
/// allocation-discipline note: one `Vec` of `W*H` indices, no reallocation.
///
/// Ties are broken arbitrarily but deterministically (stable sort on the
/// original index order). NaN elevations are not expected on input, and this
/// does not re-scan the buffer up front to rule them out; instead the sort's
/// own comparisons catch an incomparable pair as they occur, in which case
/// the whole traversal fails with `Error::NumericError` rather than handing
/// back a silently unspecified order.
pub fn descending_order(elevations: &Grid<f64>) -> Result<Vec<usize>, Error> {
    let mut indices: Vec<usize> = (0..elevations.size()).collect();
    let mut saw_non_finite = false;
    indices.sort_by(|&a, &b| {
        elevations
            .get_i(b)
            .partial_cmp(&elevations.get_i(a))
            .unwrap_or_else(|| {
                saw_non_finite = true;
                std::cmp::Ordering::Equal
            })
    });
    if saw_non_finite {
        return Err(Error::NumericError(
            "elevation grid contains a NaN or other value that can't be ordered".to_string(),
        ));
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_highest_elevation_first() {
        let data = vec![1.0, 5.0, 3.0, 2.0];
        let grid = Grid::from_row_major(data, 2, 2, -9999.0);
        let order = descending_order(&grid).unwrap();
        assert_eq!(order[0], 1); // value 5.0
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn is_a_total_permutation_of_all_indices() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        let grid = Grid::from_row_major(data, 3, 2, -9999.0);
        let mut order = descending_order(&grid).unwrap();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn a_nan_elevation_fails_the_traversal() {
        let data = vec![1.0, f64::NAN, 3.0, 2.0];
        let grid = Grid::from_row_major(data, 2, 2, -9999.0);
        assert_eq!(
            descending_order(&grid),
            Err(Error::NumericError(
                "elevation grid contains a NaN or other value that can't be ordered".to_string()
            ))
        );
    }
}
