use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

/// Midnight of the current calendar day in the server's time zone, as a UTC
/// instant. The daily spin quota resets at this boundary.
pub fn start_of_local_day() -> DateTime<Utc> {
    let midnight = Local::now().date_naive().and_time(NaiveTime::MIN);
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // Midnight falling into a DST gap; treat the naive time as UTC.
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
