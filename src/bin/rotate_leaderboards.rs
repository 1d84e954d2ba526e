use std::time::Duration;

use log::info;

use racing_club_rankings::config::Settings;
use racing_club_rankings::modules::datastore::PgDatastore;
use racing_club_rankings::modules::helpers::logging::setup_logging;
use racing_club_rankings::modules::helpers::rotation::rotate_boards;
use racing_club_rankings::modules::rankings::track_leaderboards;

/// full rotations before exiting
const CYCLES: usize = 3;

#[tokio::main]
async fn main() {
    let settings = Settings::from_env().expect("Error loading settings");
    setup_logging(&settings).expect("Error setting up logging");

    let store = &mut PgDatastore::new(&settings.database_url);
    let boards = track_leaderboards(store, &settings).tracks;
    info!(target:"rotate_leaderboards", "rotating through {} track boards", boards.len());

    let period = Duration::from_millis(settings.rotation_interval_ms);
    rotate_boards(&boards, period, CYCLES, |index, board| {
        let entries: Vec<String> = board
            .entries
            .iter()
            .enumerate()
            .map(|(place, entry)| format!("{}. {} {}", place + 1, entry.pilot_name, entry.time))
            .collect();

        info!(target:"rotate_leaderboards", "[{}] {}: {}", index, board.track, entries.join(" | "));
    })
    .await;
}
