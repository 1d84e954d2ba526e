use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::modules::helpers::lap_time::{format_lap_time, parse_lap_time};
use crate::modules::models::lap_time::LapTimeRecord;
use crate::modules::models::pilot::PilotDirectory;

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct LeaderboardEntry {
    pub pilot_id: String,
    pub pilot_name: String,
    pub time: String,
    pub rank_ms: u64,
}

/// The fastest pilots on one track, fastest first.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct TrackLeaderboard {
    pub track: String,
    pub entries: Vec<LeaderboardEntry>,
}

/// # build the track leaderboards
/// group the lap times per track and keep the `top_n` fastest of each.
///
/// records without a track or time are skipped, times that do not parse are
/// left out entirely and tracks without a single valid time get no board.
/// tracks come out in the order they first appear in `records`, entries with
/// the same time keep their input order.
///
/// ## Arguments
/// * `records` - the lap times of all pilots
/// * `pilots` - used to put a name on every entry
/// * `top_n` - the amount of entries per board
///
/// ## Returns
/// * `Vec<TrackLeaderboard>` - one board per track with valid times
pub fn build_track_leaderboards(
    records: &[LapTimeRecord],
    pilots: &PilotDirectory,
    top_n: usize,
) -> Vec<TrackLeaderboard> {
    let mut boards: Vec<TrackLeaderboard> = Vec::new();
    let mut board_index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let track = record.track.trim();
        if track.is_empty() || record.time.trim().is_empty() {
            continue;
        }

        let index = *board_index.entry(track).or_insert_with(|| {
            boards.push(TrackLeaderboard {
                track: track.to_string(),
                entries: Vec::new(),
            });
            boards.len() - 1
        });

        let rank_ms = match parse_lap_time(&record.time) {
            Some(ms) => ms,
            None => continue,
        };

        boards[index].entries.push(LeaderboardEntry {
            pilot_id: record.pilot_id.clone(),
            pilot_name: pilots.label(&record.pilot_id),
            time: format_lap_time(rank_ms),
            rank_ms,
        });
    }

    boards.retain(|board| !board.entries.is_empty());
    for board in boards.iter_mut() {
        board.entries.sort_by_key(|entry| entry.rank_ms);
        board.entries.truncate(top_n);
    }

    boards
}
