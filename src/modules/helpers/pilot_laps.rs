use serde::{Deserialize, Serialize};

use crate::modules::helpers::lap_time::{format_delta, parse_lap_time_lenient};
use crate::modules::models::lap_time::LapTimeRecord;

/// How a lap compares to the pilot's own best lap.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "kind", content = "ms", rename_all = "lowercase")]
pub enum LapDelta {
    Best,
    Behind(u64),
    Unranked,
}

impl LapDelta {
    /// `best`, `+X.XXXs` or `-` for times that could not be read
    pub fn label(&self) -> String {
        match self {
            LapDelta::Best => "best".to_string(),
            LapDelta::Behind(ms) => format_delta(*ms),
            LapDelta::Unranked => "-".to_string(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct PilotLapRow {
    pub track: String,
    pub time: String,
    pub millis: Option<u64>,
    pub delta: LapDelta,
    pub delta_label: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct PilotLapSheet {
    pub pilot_id: String,
    pub pilot_name: String,
    pub best_ms: Option<u64>,
    pub rows: Vec<PilotLapRow>,
}

/// # build the lap sheet of a pilot
/// list every lap time of the pilot with its gap to the pilot's best lap.
/// times are read with the lenient parser, rows that still do not parse are
/// kept but marked unranked. rows are sorted by track, then time.
///
/// ## Arguments
/// * `pilot_id` - the pilot the sheet is for, other pilots' laps are skipped
/// * `pilot_name` - the label of the pilot
/// * `records` - the lap times
///
/// ## Returns
/// * `PilotLapSheet` - the sheet, ready for charting
pub fn build_lap_sheet(pilot_id: &str, pilot_name: &str, records: &[LapTimeRecord]) -> PilotLapSheet {
    let parsed: Vec<(&LapTimeRecord, Option<u64>)> = records
        .iter()
        .filter(|record| record.pilot_id == pilot_id)
        .map(|record| (record, parse_lap_time_lenient(&record.time)))
        .collect();

    let best_ms = parsed.iter().filter_map(|(_, millis)| *millis).min();

    let mut rows: Vec<PilotLapRow> = parsed
        .into_iter()
        .map(|(record, millis)| {
            let delta = match (millis, best_ms) {
                (Some(ms), Some(best)) if ms == best => LapDelta::Best,
                (Some(ms), Some(best)) => LapDelta::Behind(ms - best),
                _ => LapDelta::Unranked,
            };

            PilotLapRow {
                track: record.track.trim().to_string(),
                time: record.time.trim().to_string(),
                millis,
                delta,
                delta_label: delta.label(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.track
            .cmp(&b.track)
            .then(a.millis.is_none().cmp(&b.millis.is_none()))
            .then(a.millis.cmp(&b.millis))
    });

    PilotLapSheet {
        pilot_id: pilot_id.to_string(),
        pilot_name: pilot_name.to_string(),
        best_ms,
        rows,
    }
}
