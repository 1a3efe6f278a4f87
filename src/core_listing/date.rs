use crate::core_error::{FtpError, FtpResult};
use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, NaiveTime};

/// Resolves the three date columns of an `ls -l` line.
///
/// The third column is either `HH:MM` (recent entries, year omitted) or a
/// four-digit year. A year-less date that would land after `now` belongs to
/// the previous year. Anything unrecognised is a parse error.
pub fn resolve_date(
    month: &str,
    day: &str,
    third: &str,
    now: NaiveDateTime,
) -> FtpResult<NaiveDateTime> {
    let invalid = || FtpError::parse("listing date", format!("{} {} {}", month, day, third));

    let month = month
        .parse::<Month>()
        .map_err(|_| invalid())?
        .number_from_month();
    let day: u32 = day.parse().map_err(|_| invalid())?;

    if third.contains(':') {
        let time = NaiveTime::parse_from_str(third, "%H:%M").map_err(|_| invalid())?;
        let at_year = |year: i32| NaiveDate::from_ymd_opt(year, month, day).map(|d| d.and_time(time));

        let resolved = match at_year(now.year()) {
            Some(candidate) if candidate <= now => Some(candidate),
            // Either in the future or (Feb 29) not a date this year
            _ => at_year(now.year() - 1),
        };
        resolved.ok_or_else(invalid)
    } else {
        if third.len() != 4 || !third.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = third.parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid)
    }
}
