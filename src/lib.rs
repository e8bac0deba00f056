/*
This code is part of the terra_hydro terrain-hydrology library.
License: MIT
*/
pub mod d8;
pub mod dinf;
pub mod elevation;
pub mod error;
pub mod fill;
pub mod grid;
pub mod length;
pub mod traversal;

pub use error::Error;
pub use fill::FillReport;
pub use grid::Grid;

use grid::{copy_to_buffer, grid_from_buffer};

const DEFAULT_NO_DATA: f64 = 0.0;

fn validate_dims(m: i32, n: i32) -> Result<(u32, u32), Error> {
    if m < 0 || n < 0 {
        return Err(Error::DimensionError(format!(
            "dimensions must be non-negative, got m={}, n={}",
            m, n
        )));
    }
    Ok((n as u32, m as u32))
}

/// Fills depressions in `dem` (M rows by N columns, row-major) and
/// accumulates D8 contributing area and slope, using a default no-data
/// sentinel of 0.0.
pub fn fill_and_d8(
    dem: &[f64],
    dx: f64,
    m: i32,
    n: i32,
    area: &mut [f64],
    slope: &mut [f64],
) -> Result<FillReport, Error> {
    fill_and_d8_with_no_data(dem, dx, m, n, DEFAULT_NO_DATA, area, slope)
}

/// Same as [`fill_and_d8`], but with an explicit no-data sentinel, for
/// callers whose elevation data legitimately contains 0.0.
pub fn fill_and_d8_with_no_data(
    dem: &[f64],
    dx: f64,
    m: i32,
    n: i32,
    no_data: f64,
    area: &mut [f64],
    slope: &mut [f64],
) -> Result<FillReport, Error> {
    let (width, height) = validate_dims(m, n)?;
    let mut elevations = grid_from_buffer(dem, width, height)?;
    elevations.set_no_data(no_data);

    let report = fill::fill_depressions(&mut elevations)?;

    let mut area_grid = Grid::new(width, height, dx * dx);
    let mut slope_grid = Grid::new(width, height, 0.0);
    d8::accumulate(&elevations, dx, &mut area_grid, &mut slope_grid)?;

    copy_to_buffer(&area_grid, area)?;
    copy_to_buffer(&slope_grid, slope)?;
    Ok(report)
}

/// Fills depressions in `dem` and accumulates D-infinity contributing area
/// and slope, using a default no-data sentinel of 0.0.
pub fn fill_and_dinf(
    dem: &[f64],
    dx: f64,
    m: i32,
    n: i32,
    area: &mut [f64],
    slope: &mut [f64],
) -> Result<FillReport, Error> {
    fill_and_dinf_with_no_data(dem, dx, m, n, DEFAULT_NO_DATA, area, slope)
}

/// Same as [`fill_and_dinf`], but with an explicit no-data sentinel.
pub fn fill_and_dinf_with_no_data(
    dem: &[f64],
    dx: f64,
    m: i32,
    n: i32,
    no_data: f64,
    area: &mut [f64],
    slope: &mut [f64],
) -> Result<FillReport, Error> {
    let (width, height) = validate_dims(m, n)?;
    let mut elevations = grid_from_buffer(dem, width, height)?;
    elevations.set_no_data(no_data);

    let report = fill::fill_depressions(&mut elevations)?;

    let mut area_grid = Grid::new(width, height, dx * dx);
    let mut slope_grid = Grid::new(width, height, 0.0);
    dinf::accumulate(&elevations, dx, &mut area_grid, &mut slope_grid)?;

    copy_to_buffer(&area_grid, area)?;
    copy_to_buffer(&slope_grid, slope)?;
    Ok(report)
}

/// Fills depressions in `dem` and accumulates the maximum D8 upstream
/// flow-path length, using a default no-data sentinel of 0.0.
pub fn fill_and_length(
    dem: &[f64],
    dx: f64,
    m: i32,
    n: i32,
    length: &mut [f64],
) -> Result<FillReport, Error> {
    fill_and_length_with_no_data(dem, dx, m, n, DEFAULT_NO_DATA, length)
}

/// Same as [`fill_and_length`], but with an explicit no-data sentinel.
pub fn fill_and_length_with_no_data(
    dem: &[f64],
    dx: f64,
    m: i32,
    n: i32,
    no_data: f64,
    length: &mut [f64],
) -> Result<FillReport, Error> {
    let (width, height) = validate_dims(m, n)?;
    let mut elevations = grid_from_buffer(dem, width, height)?;
    elevations.set_no_data(no_data);

    let report = fill::fill_depressions(&mut elevations)?;

    let mut length_grid = Grid::new(width, height, 0.0);
    length::accumulate(&elevations, dx, &mut length_grid)?;

    copy_to_buffer(&length_grid, length)?;
    Ok(report)
}

/// Fills depressions in `dem` in place, using a default no-data sentinel of
/// 0.0, and returns nothing else.
pub fn fill_only(dem: &mut [f64], m: i32, n: i32) -> Result<FillReport, Error> {
    fill_only_with_no_data(dem, m, n, DEFAULT_NO_DATA)
}

/// Same as [`fill_only`], but with an explicit no-data sentinel.
pub fn fill_only_with_no_data(
    dem: &mut [f64],
    m: i32,
    n: i32,
    no_data: f64,
) -> Result<FillReport, Error> {
    let (width, height) = validate_dims(m, n)?;
    let mut elevations = grid_from_buffer(dem, width, height)?;
    elevations.set_no_data(no_data);

    let report = fill::fill_depressions(&mut elevations)?;

    copy_to_buffer(&elevations, dem)?;
    Ok(report)
}
