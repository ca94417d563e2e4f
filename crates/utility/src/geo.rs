pub const EARTH_RADIUS_MILES: f64 = 3959.0;
pub const FEET_PER_MILE: f64 = 5280.0;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in miles between two points given in degrees.
pub fn haversine_distance_miles(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);

    let dlat = to_radians(latitude_2 - latitude_1);
    let dlon = to_radians(longitude_2 - longitude_1);

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` slightly outside [0, 1] near antipodes
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_MILES * c
}

pub fn miles_to_feet(miles: f64) -> f64 {
    miles * FEET_PER_MILE
}

pub fn feet_to_miles(feet: f64) -> f64 {
    feet / FEET_PER_MILE
}

/// Name of the 8-wind compass point closest to a heading in degrees.
pub fn compass_point(heading_degrees: f64) -> &'static str {
    let normalized = heading_degrees.rem_euclid(360.0);
    let sector = ((normalized + 22.5) / 45.0).floor() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

#[cfg(test)]
mod tests {
    use super::*;

    const PITTSBURGH: (f64, f64) = (40.4406, -79.9959);
    const PHILADELPHIA: (f64, f64) = (39.9526, -75.1652);

    #[test]
    fn test_coincident_points_are_zero_apart() {
        let d = haversine_distance_miles(PITTSBURGH.0, PITTSBURGH.1, PITTSBURGH.0, PITTSBURGH.1);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = haversine_distance_miles(
            PITTSBURGH.0,
            PITTSBURGH.1,
            PHILADELPHIA.0,
            PHILADELPHIA.1,
        );
        let back = haversine_distance_miles(
            PHILADELPHIA.0,
            PHILADELPHIA.1,
            PITTSBURGH.0,
            PITTSBURGH.1,
        );
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_pittsburgh_to_philadelphia() {
        let d = haversine_distance_miles(
            PITTSBURGH.0,
            PITTSBURGH.1,
            PHILADELPHIA.0,
            PHILADELPHIA.1,
        );
        assert!((d - 257.0).abs() < 3.0, "got {d}");
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        let d = haversine_distance_miles(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_MILES;
        assert!((d - half_circumference).abs() < 1e-6);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(miles_to_feet(1.0), 5280.0);
        assert_eq!(feet_to_miles(2640.0), 0.5);
        for x in [0.0, 1.0, 200.0, 12345.678] {
            assert!((miles_to_feet(feet_to_miles(x)) - x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_compass_point() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(22.4), "N");
        assert_eq!(compass_point(22.5), "NE");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(200.0), "S");
        assert_eq!(compass_point(337.6), "N");
        assert_eq!(compass_point(-45.0), "NW");
        assert_eq!(compass_point(405.0), "NE");
    }
}
