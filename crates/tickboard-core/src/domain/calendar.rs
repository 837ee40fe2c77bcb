use time::{Date, Month, OffsetDateTime};

use crate::ValidationError;

/// Inclusive calendar range used by the aggregates endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    /// Range ending on `to` and starting the same calendar day `years` earlier.
    ///
    /// February 29 maps to February 28 when the start year is not a leap year.
    pub fn trailing_years(to: Date, years: i32) -> Result<Self, ValidationError> {
        let out_of_range = || ValidationError::DateOutOfRange {
            date: format_iso_date(to),
            years,
        };

        let year = to.year().checked_sub(years).ok_or_else(out_of_range)?;
        let from = match to.replace_year(year) {
            Ok(date) => date,
            Err(_) if to.month() == Month::February && to.day() == 29 => {
                Date::from_calendar_date(year, Month::February, 28).map_err(|_| out_of_range())?
            }
            Err(_) => return Err(out_of_range()),
        };

        Ok(Self { from, to })
    }
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// UTC calendar date of a millisecond Unix timestamp.
pub fn date_from_millis(millis: i64) -> Result<Date, ValidationError> {
    let nanos = i128::from(millis) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map(OffsetDateTime::date)
        .map_err(|_| ValidationError::TimestampOutOfRange { millis })
}

/// `YYYY-MM-DD`, the format the aggregates endpoint expects in its path.
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn five_year_range_keeps_calendar_day() {
        let range = DateRange::trailing_years(date!(2026 - 10 - 14), 5).expect("range");
        assert_eq!(range.from, date!(2021 - 10 - 14));
        assert_eq!(range.to, date!(2026 - 10 - 14));
    }

    #[test]
    fn leap_day_clamps_to_february_28() {
        let range = DateRange::trailing_years(date!(2024 - 02 - 29), 5).expect("range");
        assert_eq!(range.from, date!(2019 - 02 - 28));
    }

    #[test]
    fn millis_convert_to_utc_date() {
        // 2024-01-02T05:00:00Z, the start of a US trading day in winter.
        let date = date_from_millis(1_704_171_600_000).expect("date");
        assert_eq!(date, date!(2024 - 01 - 02));
    }

    #[test]
    fn formats_iso_dates_with_padding() {
        assert_eq!(format_iso_date(date!(2021 - 03 - 05)), "2021-03-05");
    }

    #[test]
    fn rejects_unrepresentable_timestamps() {
        let err = date_from_millis(i64::MAX).expect_err("must fail");
        assert!(matches!(err, ValidationError::TimestampOutOfRange { .. }));
    }
}
