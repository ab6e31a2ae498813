use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};

/// Half-open `[start, end)` window covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The day of `date` in the system's local time zone.
    pub fn local(date: DateTime<Utc>) -> Self {
        Self::in_zone(date, &Local)
    }

    pub fn in_zone<Tz: TimeZone>(date: DateTime<Utc>, tz: &Tz) -> Self {
        let day = date.with_timezone(tz).date_naive();
        let next_day = day.succ_opt().unwrap_or(NaiveDate::MAX);

        let day_start = |day: NaiveDate| {
            let naive = day.and_time(NaiveTime::MIN);
            midnight(naive, tz).unwrap_or_else(|| at_offset_of(date, naive, tz))
        };

        Self {
            start: day_start(day),
            end: day_start(next_day),
        }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date < self.end
    }
}

/// First instant of the local day starting at `naive`. Where a DST jump skips midnight the day
/// starts at the first local time that exists.
fn midnight<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    (0..=24)
        .map(|quarters| naive + TimeDelta::minutes(quarters * 15))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|start| start.with_timezone(&Utc))
}

/// Reads `naive` with the UTC offset `tz` has at `reference`. Used when the
/// zone maps no local time near midnight at all.
fn at_offset_of<Tz: TimeZone>(
    reference: DateTime<Utc>,
    naive: NaiveDateTime,
    tz: &Tz,
) -> DateTime<Utc> {
    let offset = tz.offset_from_utc_datetime(&reference.naive_utc()).fix();
    let utc = naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&utc)
}
