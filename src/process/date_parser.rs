use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{Result, SuaError};
use crate::process::trimming::trim_value;

/// Wall-clock layout of the `Start Time` / `End Time` cells.
pub const CELL_DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Locale-style rendering used for the `*Local` fields, e.g. `1/15/2024, 3:30:00 AM`.
const LOCAL_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Parse a date cell. The digits in the cell are already UTC wall-clock
/// time, so no zone shift is applied.
pub fn parse_cell_date(raw: &str) -> Result<DateTime<Utc>> {
    let value = trim_value(raw);
    let naive = NaiveDateTime::parse_from_str(value, CELL_DATE_FORMAT).map_err(|source| {
        SuaError::DateFormat {
            value: value.to_string(),
            source,
        }
    })?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Zone the `*Local` fields are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// Whatever zone the host is configured with.
    #[default]
    System,
    Fixed(FixedOffset),
}

impl LocalZone {
    pub fn render(&self, instant: DateTime<Utc>) -> String {
        match self {
            LocalZone::System => instant.with_timezone(&Local).format(LOCAL_FORMAT).to_string(),
            LocalZone::Fixed(offset) => {
                instant.with_timezone(offset).format(LOCAL_FORMAT).to_string()
            }
        }
    }
}

/// The Zulu and Local renderings of one instant. They are always produced
/// together, which keeps the two output fields either both set or both null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTimes {
    pub zulu: String,
    pub local: String,
}

impl CellTimes {
    pub fn from_utc(instant: DateTime<Utc>, zone: LocalZone) -> Self {
        Self {
            zulu: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            local: zone.render(instant),
        }
    }

    /// Split into `(zulu, local)` output fields.
    pub fn into_fields(times: Option<Self>) -> (Option<String>, Option<String>) {
        match times {
            Some(t) => (Some(t.zulu), Some(t.local)),
            None => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn zone(hours: i32) -> LocalZone {
        LocalZone::Fixed(FixedOffset::east_opt(hours * 3600).unwrap())
    }

    #[test]
    fn literal_digits_become_utc() {
        let dt = parse_cell_date("01/15/2024 08:30").unwrap();
        assert_eq!(
            (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute()),
            (2024, 1, 15, 8, 30)
        );
        assert_eq!(dt.second(), 0);
    }

    #[test]
    fn wrapped_cells_are_trimmed_first() {
        let dt = parse_cell_date(r#"="12/31/2023 23:59""#).unwrap();
        assert_eq!(
            dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            "2023-12-31T23:59:00.000Z"
        );
    }

    #[test]
    fn bad_format_is_a_date_format_error() {
        for cell in ["2024-01-15 08:30", "01/15/2024", "13/45/2024 08:30", "soon"] {
            match parse_cell_date(cell) {
                Err(SuaError::DateFormat { value, .. }) => assert_eq!(value, cell),
                other => panic!("expected DateFormat for {cell:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn zulu_is_independent_of_local_zone() {
        let dt = parse_cell_date("01/15/2024 08:30").unwrap();
        for z in [zone(-8), zone(0), zone(10), LocalZone::System] {
            assert_eq!(CellTimes::from_utc(dt, z).zulu, "2024-01-15T08:30:00.000Z");
        }
    }

    #[test]
    fn local_rendering_follows_the_zone() {
        let dt = parse_cell_date("01/15/2024 08:30").unwrap();
        assert_eq!(zone(0).render(dt), "1/15/2024, 8:30:00 AM");
        assert_eq!(zone(-5).render(dt), "1/15/2024, 3:30:00 AM");
        assert_eq!(zone(10).render(dt), "1/15/2024, 6:30:00 PM");
    }

    #[test]
    fn missing_times_split_into_two_nulls() {
        assert_eq!(CellTimes::into_fields(None), (None, None));
    }
}
