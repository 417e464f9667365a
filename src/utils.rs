/// Utility functions
use crate::domain::{Axis, ValidationError};
use chrono::NaiveDateTime;

/// Round to 6 decimal places (about 0.1 m of arc)
pub fn round6(v: f64) -> f64 {
    (v * 1_000_000.0).round() / 1_000_000.0
}

/// Validate a coordinate against its axis range and round it.
///
/// `Ok(None)` means the value was absent; an out-of-range or non-finite value is an error.
pub fn check_coordinate(value: Option<f64>, axis: Axis) -> Result<Option<f64>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_finite() && v.abs() <= axis.limit() => Ok(Some(round6(v))),
        Some(v) => Err(ValidationError::CoordinateOutOfRange { axis, value: v }),
    }
}

/// ISO-8601 without offset; fractional seconds only when present
pub fn iso8601(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_round6() {
        assert_eq!(round6(45.123456789), 45.123457);
        assert_eq!(round6(-0.0000004), 0.0);
        assert_eq!(round6(10.0), 10.0);
    }

    #[test]
    fn test_check_coordinate_in_range() {
        assert_eq!(
            check_coordinate(Some(45.123456789), Axis::Latitude),
            Ok(Some(45.123457))
        );
        assert_eq!(check_coordinate(Some(-90.0), Axis::Latitude), Ok(Some(-90.0)));
        assert_eq!(check_coordinate(Some(180.0), Axis::Longitude), Ok(Some(180.0)));
    }

    #[test]
    fn test_check_coordinate_out_of_range() {
        assert_eq!(
            check_coordinate(Some(95.0), Axis::Latitude),
            Err(ValidationError::CoordinateOutOfRange {
                axis: Axis::Latitude,
                value: 95.0
            })
        );
        assert!(check_coordinate(Some(95.0), Axis::Longitude).is_ok());
        assert!(check_coordinate(Some(-180.5), Axis::Longitude).is_err());
        assert!(check_coordinate(Some(f64::NAN), Axis::Latitude).is_err());
    }

    #[test]
    fn test_check_coordinate_absent() {
        assert_eq!(check_coordinate(None, Axis::Longitude), Ok(None));
    }

    #[test]
    fn test_iso8601_whole_seconds() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(iso8601(&ts), "2024-05-01T08:30:00");
    }

    #[test]
    fn test_iso8601_fractional_seconds() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(8, 30, 0, 250_000)
            .unwrap();
        assert!(iso8601(&ts).starts_with("2024-05-01T08:30:00.25"));
    }
}
