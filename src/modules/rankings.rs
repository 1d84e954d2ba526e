use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::Error;
use crate::macros::database_error_handler::fetch_or_empty;
use crate::modules::datastore::Datastore;
use crate::modules::helpers::leaderboard::{build_track_leaderboards, TrackLeaderboard};
use crate::modules::helpers::pilot_laps::{build_lap_sheet, PilotLapSheet};
use crate::modules::helpers::victory::{build_victory_boards, stats_for_pilot, PilotStats, VictoryBoards};
use crate::modules::models::pilot::{PilotDirectory, FALLBACK_PILOT_NAME};

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct TrackBoards {
    pub tracks: Vec<TrackLeaderboard>,
}

/// # track leaderboards
/// the fastest pilots per track. every read failure is logged and treated
/// as no data, so this always produces boards, possibly none.
pub fn track_leaderboards(store: &mut dyn Datastore, settings: &Settings) -> TrackBoards {
    let lap_times = fetch_or_empty!(
        store.lap_times(Some(settings.lap_time_read_limit)),
        "modules/rankings:track_leaderboards",
        "lap times"
    );
    if lap_times.is_empty() {
        return TrackBoards { tracks: Vec::new() };
    }

    let pilots = fetch_or_empty!(store.pilots(), "modules/rankings:track_leaderboards", "pilots");

    TrackBoards {
        tracks: build_track_leaderboards(
            &lap_times,
            &PilotDirectory::new(pilots),
            settings.track_board_size,
        ),
    }
}

/// # victory boards
/// pilots ranked by wins and by podiums, `top` entries each (the configured
/// size when not given).
pub fn victory_boards(store: &mut dyn Datastore, settings: &Settings, top: Option<usize>) -> VictoryBoards {
    let results = fetch_or_empty!(store.race_results(None), "modules/rankings:victory_boards", "race results");
    let pilots = if results.is_empty() {
        Vec::new()
    } else {
        fetch_or_empty!(store.pilots(), "modules/rankings:victory_boards", "pilots")
    };

    build_victory_boards(
        &results,
        &PilotDirectory::new(pilots),
        top.unwrap_or(settings.victory_board_size),
    )
}

/// # lap sheet of a pilot
pub fn pilot_lap_sheet(store: &mut dyn Datastore, pilot_id: &str) -> PilotLapSheet {
    let lap_times = fetch_or_empty!(
        store.lap_times_of_pilot(pilot_id),
        "modules/rankings:pilot_lap_sheet",
        "lap times"
    );

    build_lap_sheet(pilot_id, &pilot_label(store, pilot_id), &lap_times)
}

/// # stats of a pilot
/// the profile counts, computed the same way as the victory boards
pub fn pilot_stats(store: &mut dyn Datastore, pilot_id: &str) -> PilotStats {
    let results = fetch_or_empty!(
        store.race_results(Some(pilot_id)),
        "modules/rankings:pilot_stats",
        "race results"
    );

    stats_for_pilot(&results, pilot_id, &pilot_label(store, pilot_id))
}

fn pilot_label(store: &mut dyn Datastore, pilot_id: &str) -> String {
    match store.pilot(pilot_id) {
        Ok(pilot) => pilot.label().to_string(),
        Err(Error::NotFoundError { .. }) => {
            warn!(target:"modules/rankings:pilot_label", "unknown pilot {}", pilot_id);
            FALLBACK_PILOT_NAME.to_string()
        }
        Err(error) => {
            error!(target:"modules/rankings:pilot_label", "Error getting pilot {}. (error: {})", pilot_id, error);
            FALLBACK_PILOT_NAME.to_string()
        }
    }
}
