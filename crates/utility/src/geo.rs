/// Approximate length of one degree of latitude (and of longitude at the
/// equator) in meters. Square queries use this flat-earth approximation, which
/// only holds for small radii and degrades towards the poles.
pub const METERS_PER_DEGREE: f64 = 111_319.9;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// An axis-aligned rectangle in longitude/latitude degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Planar containment test, edges included.
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.min_lon..=self.max_lon).contains(&longitude)
            && (self.min_lat..=self.max_lat).contains(&latitude)
    }
}

pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Square around a center point whose half edge length is `meters`,
/// converted to degrees with [`METERS_PER_DEGREE`] on both axes.
pub fn calculate_square_bounding_box(
    center_lon: f64,
    center_lat: f64,
    meters: f64,
) -> BoundingBox {
    let degrees = meters_to_degrees(meters);

    BoundingBox {
        min_lon: center_lon - degrees,
        min_lat: center_lat - degrees,
        max_lon: center_lon + degrees,
        max_lat: center_lat + degrees,
    }
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance_m(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn one_degree_square_around_origin() {
        let bbox = calculate_square_bounding_box(0.0, 0.0, 111_319.9);
        assert!((bbox.min_lon + 1.0).abs() < EPSILON);
        assert!((bbox.min_lat + 1.0).abs() < EPSILON);
        assert!((bbox.max_lon - 1.0).abs() < EPSILON);
        assert!((bbox.max_lat - 1.0).abs() < EPSILON);
    }

    #[test]
    fn square_is_centered_on_both_axes() {
        let bbox = calculate_square_bounding_box(10.13, 54.32, 500.0);
        let degrees = 500.0 / METERS_PER_DEGREE;
        assert!((bbox.max_lon - 10.13 - degrees).abs() < EPSILON);
        assert!((10.13 - bbox.min_lon - degrees).abs() < EPSILON);
        assert!((bbox.max_lat - 54.32 - degrees).abs() < EPSILON);
        assert!((54.32 - bbox.min_lat - degrees).abs() < EPSILON);
    }

    #[test]
    fn zero_radius_collapses_to_center() {
        let bbox = calculate_square_bounding_box(-3.7, 40.4, 0.0);
        assert_eq!(bbox.min_lon, bbox.max_lon);
        assert_eq!(bbox.min_lat, bbox.max_lat);
        assert!(bbox.contains(-3.7, 40.4));
    }

    #[test]
    fn contains_includes_edges() {
        let bbox = calculate_square_bounding_box(0.0, 0.0, 111_319.9);
        assert!(bbox.contains(1.0, -1.0));
        assert!(bbox.contains(0.5, 0.5));
        assert!(!bbox.contains(1.01, 0.0));
        assert!(!bbox.contains(0.0, -1.01));
    }

    #[test]
    fn haversine_between_known_cities() {
        // Kiel to Hamburg is roughly 86 km.
        let distance = haversine_distance_m(54.3233, 10.1228, 53.5511, 9.9937);
        assert!((distance - 86_300.0).abs() < 1_500.0, "got {distance}");
    }

    #[test]
    fn haversine_of_identical_points_is_zero() {
        assert_eq!(haversine_distance_m(12.5, -70.0, 12.5, -70.0), 0.0);
    }
}
