use std::{fmt, str::FromStr};

use utility::geo::{self, BoundingBox};

pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const RADIUS: &str = "radius";
pub const SHAPE_MODE: &str = "isCircle";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidParameter {
    #[error("missing query parameter `{0}`")]
    Missing(&'static str),

    #[error("query parameter `{name}` is not a finite number: {value:?}")]
    NotANumber { name: &'static str, value: String },

    #[error("query parameter `{name}` is out of range: {value} (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("query parameter `isCircle` must be `circle` or `square`, got {0:?}")]
    ShapeMode(String),
}

impl InvalidParameter {
    /// Name of the offending query parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::Missing(name)
            | Self::NotANumber { name, .. }
            | Self::OutOfRange { name, .. } => *name,
            Self::ShapeMode(_) => SHAPE_MODE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMode {
    /// Geodesic radius around the center.
    Circle,
    /// Planar bounding box around the center, see
    /// [`geo::calculate_square_bounding_box`].
    Square,
}

impl FromStr for ShapeMode {
    type Err = InvalidParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            _ => Err(InvalidParameter::ShapeMode(s.to_owned())),
        }
    }
}

impl fmt::Display for ShapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Square => write!(f, "square"),
        }
    }
}

/// A validated spots-in-area request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters.
    pub radius: f64,
    pub shape: ShapeMode,
}

impl AreaQuery {
    /// Validates raw query parameters in the order latitude, longitude,
    /// radius, shape mode and reports the first offending one.
    pub fn parse(
        latitude: Option<&str>,
        longitude: Option<&str>,
        radius: Option<&str>,
        shape: Option<&str>,
    ) -> Result<Self, InvalidParameter> {
        let latitude = parse_number(LATITUDE, latitude)?;
        check_range(LATITUDE, latitude, "-90 to 90", |x| (-90.0..=90.0).contains(&x))?;

        let longitude = parse_number(LONGITUDE, longitude)?;
        check_range(LONGITUDE, longitude, "-180 to 180", |x| {
            (-180.0..=180.0).contains(&x)
        })?;

        let radius = parse_number(RADIUS, radius)?;
        check_range(RADIUS, radius, "a positive number of meters", |x| x > 0.0)?;

        let shape: ShapeMode = shape
            .ok_or(InvalidParameter::Missing(SHAPE_MODE))?
            .parse()?;

        Ok(Self {
            latitude,
            longitude,
            radius,
            shape,
        })
    }

    pub fn bounding_box(&self) -> BoundingBox {
        geo::calculate_square_bounding_box(self.longitude, self.latitude, self.radius)
    }
}

impl fmt::Display for AreaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} m around (lat {}, lon {})",
            self.shape, self.radius, self.latitude, self.longitude
        )
    }
}

fn parse_number(name: &'static str, raw: Option<&str>) -> Result<f64, InvalidParameter> {
    let raw = raw.ok_or(InvalidParameter::Missing(name))?;
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InvalidParameter::NotANumber {
            name,
            value: raw.to_owned(),
        })
}

fn check_range(
    name: &'static str,
    value: f64,
    expected: &'static str,
    valid: impl Fn(f64) -> bool,
) -> Result<(), InvalidParameter> {
    if valid(value) {
        Ok(())
    } else {
        Err(InvalidParameter::OutOfRange {
            name,
            value,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(
        latitude: &str,
        longitude: &str,
        radius: &str,
        shape: &str,
    ) -> Result<AreaQuery, InvalidParameter> {
        AreaQuery::parse(Some(latitude), Some(longitude), Some(radius), Some(shape))
    }

    #[test]
    fn parses_valid_circle_query() {
        let query = parse("54.3233", "10.1228", "750", "circle").unwrap();
        assert_eq!(
            query,
            AreaQuery {
                latitude: 54.3233,
                longitude: 10.1228,
                radius: 750.0,
                shape: ShapeMode::Circle,
            }
        );
    }

    #[test]
    fn shape_mode_is_case_insensitive() {
        assert_eq!(parse("0", "0", "1", "SQUARE").unwrap().shape, ShapeMode::Square);
        assert_eq!(parse("0", "0", "1", "Circle").unwrap().shape, ShapeMode::Circle);
    }

    #[test]
    fn rejects_unknown_shape_mode() {
        let error = parse("0", "0", "1", "triangle").unwrap_err();
        assert_eq!(error, InvalidParameter::ShapeMode("triangle".to_owned()));
        assert_eq!(error.parameter(), "isCircle");
    }

    #[test]
    fn rejects_empty_shape_mode() {
        let error = parse("0", "0", "1", "").unwrap_err();
        assert_eq!(error.parameter(), "isCircle");
    }

    #[test]
    fn rejects_non_numeric_latitude() {
        let error = parse("abc", "0", "1", "circle").unwrap_err();
        assert_eq!(error.parameter(), "latitude");
        assert!(error.to_string().contains("latitude"));
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert_eq!(parse("0", "NaN", "1", "circle").unwrap_err().parameter(), "longitude");
        assert_eq!(parse("0", "0", "inf", "circle").unwrap_err().parameter(), "radius");
    }

    #[test]
    fn reports_first_invalid_parameter() {
        let error = parse("x", "y", "z", "triangle").unwrap_err();
        assert_eq!(error.parameter(), "latitude");
    }

    #[test]
    fn reports_missing_parameter() {
        let error = AreaQuery::parse(Some("1"), None, Some("1"), Some("circle")).unwrap_err();
        assert_eq!(error, InvalidParameter::Missing("longitude"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(parse("90.5", "0", "1", "circle").unwrap_err().parameter(), "latitude");
        assert_eq!(parse("0", "-181", "1", "circle").unwrap_err().parameter(), "longitude");
        assert_eq!(parse("0", "0", "0", "circle").unwrap_err().parameter(), "radius");
        assert_eq!(parse("0", "0", "-5", "square").unwrap_err().parameter(), "radius");
    }

    #[test]
    fn accepts_boundary_coordinates() {
        assert!(parse("-90", "180", "0.5", "square").is_ok());
    }

    #[test]
    fn bounding_box_uses_center_and_radius() {
        let query = parse("0", "0", "111319.9", "square").unwrap();
        let bbox = query.bounding_box();
        assert!((bbox.min_lon + 1.0).abs() < 1e-9);
        assert!((bbox.max_lat - 1.0).abs() < 1e-9);
    }
}
