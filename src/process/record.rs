use serde::Serialize;

use crate::error::{Result, SuaError};
use crate::process::{
    date_parser::{parse_cell_date, CellTimes, LocalZone},
    table::RawRow,
    trimming::trim_value,
};

pub const COL_TYPE: &str = "Type";
pub const COL_SAA_NOTAM_ID: &str = "SAA / NOTAM ID";
pub const COL_START_TIME: &str = "Start Time";
pub const COL_END_TIME: &str = "End Time";
pub const COL_CENTER_ID: &str = "Center ID";
pub const COL_STATE: &str = "State";
pub const COL_MIN_ALT: &str = "Min Alt(100s ft)";
pub const COL_MAX_ALT: &str = "Max Alt(100s ft)";
pub const COL_GROUP: &str = "Group";

/// One Special Use Airspace entry from the feed.
///
/// `start_time_zulu` and `start_time_local` are either both set or both
/// `None` (likewise for the end pair); `from_row` is the only place they are
/// filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuaRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub saa_notam_id: String,
    pub start_time_zulu: Option<String>,
    pub start_time_local: Option<String>,
    pub end_time_zulu: Option<String>,
    pub end_time_local: Option<String>,
    pub center_id: String,
    pub state: String,
    pub min_alt: String,
    pub max_alt: String,
    pub group: String,
}

impl SuaRecord {
    /// Map one table row. Every expected column must be present in the row.
    pub fn from_row(row: &RawRow, zone: LocalZone) -> Result<Self> {
        let text = |column| column_value(row, column).map(|raw| trim_value(raw).to_string());

        let (start_time_zulu, start_time_local) =
            CellTimes::into_fields(cell_times(column_value(row, COL_START_TIME)?, zone)?);
        let (end_time_zulu, end_time_local) =
            CellTimes::into_fields(cell_times(column_value(row, COL_END_TIME)?, zone)?);

        Ok(Self {
            record_type: text(COL_TYPE)?,
            saa_notam_id: text(COL_SAA_NOTAM_ID)?,
            start_time_zulu,
            start_time_local,
            end_time_zulu,
            end_time_local,
            center_id: text(COL_CENTER_ID)?,
            state: text(COL_STATE)?,
            min_alt: text(COL_MIN_ALT)?,
            max_alt: text(COL_MAX_ALT)?,
            group: text(COL_GROUP)?,
        })
    }
}

fn column_value<'r>(row: &'r RawRow, column: &'static str) -> Result<&'r str> {
    row.get(column).ok_or(SuaError::Schema { column })
}

/// An empty cell means no time; anything else has to parse.
fn cell_times(raw: &str, zone: LocalZone) -> Result<Option<CellTimes>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let instant = parse_cell_date(raw)?;
    Ok(Some(CellTimes::from_utc(instant, zone)))
}
