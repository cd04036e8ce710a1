use geo::Point;
use nalgebra::DVector;

/// Great-circle distance in km between two points given as (lon, lat) degrees.
pub fn haversine_km(a: Point<f64>, b: Point<f64>, radius_km: f64) -> f64 {
    let (lat1, lat2) = (a.y().to_radians(), b.y().to_radians());
    let dlat = lat2 - lat1;
    let dlon = b.x().to_radians() - a.x().to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * radius_km * h.sqrt().asin()
}

/// Distances in km from `origin` to every point of the `latitudes`/`longitudes`
/// columns, in column order. Coordinates are in degrees.
///
/// `h` is not clamped to `[0, 1]`; rounding near antipodal pairs can push it
/// above 1 and yield NaN.
pub fn distances_km(
    origin: Point<f64>,
    latitudes: &DVector<f64>,
    longitudes: &DVector<f64>,
    radius_km: f64,
) -> DVector<f64> {
    let lat1 = origin.y().to_radians();
    let lon1 = origin.x().to_radians();
    let cos_lat1 = lat1.cos();

    let lat2s = latitudes.map(f64::to_radians);
    let dlat = lat2s.map(|lat2| ((lat2 - lat1) / 2.0).sin().powi(2));
    let dlon = longitudes.map(|lon2| ((lon2.to_radians() - lon1) / 2.0).sin().powi(2));

    // (cos(lat1) * cos(lat2)) * sin²(Δlon/2), grouped as in `haversine_km`.
    let cos_prod = lat2s.map(|lat2| cos_lat1 * lat2.cos());
    let h = dlat.zip_map(&cos_prod.component_mul(&dlon), |d, c| d + c);
    h.map(|h| 2.0 * radius_km * h.sqrt().asin())
}
