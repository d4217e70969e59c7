use chrono::{DateTime, Utc};

/// Two-decimal rounding; exact ties go to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn hours_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    (*end - *start).num_milliseconds() as f64 / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(0.5), 0.5);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }

    #[test]
    fn round2_sends_ties_to_even() {
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(0.625), 0.62);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(0.5625), 0.56);
    }

    #[test]
    fn hours_between_is_fractional() {
        let start = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 2, 10, 30, 0).unwrap();
        assert_eq!(hours_between(&start, &end), 1.5);
        assert_eq!(hours_between(&end, &start), -1.5);
    }
}
