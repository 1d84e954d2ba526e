use racing_club_rankings::config::Settings;
use racing_club_rankings::errors::{CustomResult, Error};
use racing_club_rankings::modules::datastore::{Datastore, MemoryDatastore};
use racing_club_rankings::modules::helpers::pilot_laps::LapDelta;
use racing_club_rankings::modules::models::lap_time::{LapTimeRecord, NewLapTime};
use racing_club_rankings::modules::models::pilot::PilotIdentity;
use racing_club_rankings::modules::models::race_result::{NewRaceResult, RaceResult};
use racing_club_rankings::modules::rankings::{
    pilot_lap_sheet, pilot_stats, track_leaderboards, victory_boards,
};

fn settings() -> Settings {
    Settings::with_database("postgres://unused")
}

fn lap(store: &mut MemoryDatastore, pilot_id: &str, track: &str, time: &str) {
    store
        .upsert_lap_time(NewLapTime {
            pilot_id: pilot_id.to_string(),
            track: track.to_string(),
            time: time.to_string(),
        })
        .unwrap();
}

fn finish(store: &mut MemoryDatastore, pilot_id: &str, position: &str) {
    store
        .insert_race_result(NewRaceResult {
            pilot_id: pilot_id.to_string(),
            title: "Club round".to_string(),
            track: Some("Spa".to_string()),
            category: Some("GT4".to_string()),
            position: Some(position.to_string()),
            date: None,
        })
        .unwrap();
}

fn club() -> MemoryDatastore {
    let mut store = MemoryDatastore::new();
    store.add_pilot("ana", Some("Ana Costa"), Some("anac"));
    store.add_pilot("bea", None, Some("bea_racing"));
    store.add_pilot("cid", None, None);
    store
}

/// every read fails, like a database that is down
struct BrokenDatastore;

fn broken<T>() -> CustomResult<T> {
    Err(Error::NotFoundError {
        record: "anything, the datastore is down".to_string(),
    })
}

impl Datastore for BrokenDatastore {
    fn lap_times(&mut self, _: Option<i64>) -> CustomResult<Vec<LapTimeRecord>> {
        broken()
    }

    fn lap_times_of_pilot(&mut self, _: &str) -> CustomResult<Vec<LapTimeRecord>> {
        broken()
    }

    fn race_results(&mut self, _: Option<&str>) -> CustomResult<Vec<RaceResult>> {
        broken()
    }

    fn pilots(&mut self) -> CustomResult<Vec<PilotIdentity>> {
        broken()
    }

    fn pilot(&mut self, _: &str) -> CustomResult<PilotIdentity> {
        broken()
    }

    fn upsert_lap_time(&mut self, _: NewLapTime) -> CustomResult<LapTimeRecord> {
        broken()
    }

    fn insert_race_result(&mut self, _: NewRaceResult) -> CustomResult<RaceResult> {
        broken()
    }

    fn delete_race_result(&mut self, _: i32) -> CustomResult<bool> {
        broken()
    }
}

#[test]
fn track_boards_from_the_store() {
    let mut store = club();
    lap(&mut store, "ana", "Spa", "1:32.550");
    lap(&mut store, "bea", "Spa", "1:31.999");
    lap(&mut store, "cid", "Spa", "1:35.000");
    lap(&mut store, "ana", "Monza", "");
    lap(&mut store, "bea", "Monza", "whenever");

    let boards = track_leaderboards(&mut store, &settings()).tracks;
    assert_eq!(boards.len(), 1);

    let spa: Vec<(&str, &str)> = boards[0]
        .entries
        .iter()
        .map(|entry| (entry.pilot_name.as_str(), entry.time.as_str()))
        .collect();
    assert_eq!(
        spa,
        vec![("bea_racing", "1:31.999"), ("Ana Costa", "1:32.550"), ("Racer", "1:35.000")]
    );
}

#[test]
fn a_new_time_replaces_the_old_one() {
    let mut store = club();
    lap(&mut store, "ana", "Spa", "1:40.000");
    lap(&mut store, "bea", "Spa", "1:35.000");
    lap(&mut store, "ana", "Spa", "1:30.000");

    let boards = track_leaderboards(&mut store, &settings()).tracks;
    let pilots: Vec<&str> = boards[0].entries.iter().map(|e| e.pilot_id.as_str()).collect();
    assert_eq!(pilots, vec!["ana", "bea"]);
}

#[test]
fn the_read_limit_bounds_the_boards() {
    let mut store = club();
    for i in 0..10 {
        lap(&mut store, &format!("pilot-{i}"), &format!("Track {i}"), "1:30.000");
    }

    let mut limited = settings();
    limited.lap_time_read_limit = 4;
    assert_eq!(track_leaderboards(&mut store, &limited).tracks.len(), 4);
}

#[test]
fn victory_boards_from_the_store() {
    let mut store = club();
    finish(&mut store, "ana", "1º");
    finish(&mut store, "ana", "P2");
    finish(&mut store, "ana", "3");
    finish(&mut store, "ana", "");
    finish(&mut store, "bea", "1");
    finish(&mut store, "bea", "1st");
    finish(&mut store, "cid", "DNF");

    let boards = victory_boards(&mut store, &settings(), None);

    let by_wins: Vec<(&str, u32, u32, u32)> = boards
        .by_wins
        .iter()
        .map(|s| (s.pilot_id.as_str(), s.wins, s.podiums, s.total_races))
        .collect();
    assert_eq!(
        by_wins,
        vec![("bea", 2, 2, 2), ("ana", 1, 3, 4), ("cid", 0, 0, 1)]
    );

    let by_podiums: Vec<&str> = boards.by_podiums.iter().map(|s| s.pilot_id.as_str()).collect();
    assert_eq!(by_podiums, vec!["ana", "bea", "cid"]);

    assert_eq!(victory_boards(&mut store, &settings(), Some(1)).by_wins.len(), 1);
}

#[test]
fn profile_stats_agree_with_the_boards() {
    let mut store = club();
    finish(&mut store, "ana", "1º");
    finish(&mut store, "ana", "P2");
    finish(&mut store, "bea", "1");

    let stats = pilot_stats(&mut store, "ana");
    let boards = victory_boards(&mut store, &settings(), None);
    let on_board = boards.by_wins.iter().find(|s| s.pilot_id == "ana").unwrap();

    assert_eq!(&stats, on_board);
    assert_eq!(stats.pilot_name, "Ana Costa");
}

#[test]
fn lap_sheet_from_the_store() {
    let mut store = club();
    lap(&mut store, "ana", "Spa", "1:32.550");
    lap(&mut store, "ana", "Monza", "82.000");
    lap(&mut store, "bea", "Spa", "1:20.000");

    let sheet = pilot_lap_sheet(&mut store, "ana");
    assert_eq!(sheet.pilot_name, "Ana Costa");
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(sheet.rows[0].delta, LapDelta::Best);
    assert_eq!(sheet.rows[1].delta_label, "+10.550s");
}

#[test]
fn unknown_pilots_still_get_a_sheet() {
    let sheet = pilot_lap_sheet(&mut club(), "ghost");
    assert_eq!(sheet.pilot_name, "Racer");
    assert!(sheet.rows.is_empty());
}

#[test]
fn empty_store_gives_empty_states() {
    let mut store = MemoryDatastore::new();

    assert!(track_leaderboards(&mut store, &settings()).tracks.is_empty());
    let boards = victory_boards(&mut store, &settings(), None);
    assert!(boards.by_wins.is_empty() && boards.by_podiums.is_empty());
}

#[test]
fn failing_reads_degrade_to_no_data() {
    let mut store = BrokenDatastore;

    assert!(track_leaderboards(&mut store, &settings()).tracks.is_empty());

    let boards = victory_boards(&mut store, &settings(), None);
    assert!(boards.by_wins.is_empty() && boards.by_podiums.is_empty());

    let sheet = pilot_lap_sheet(&mut store, "ana");
    assert!(sheet.rows.is_empty());
    assert_eq!(sheet.pilot_name, "Racer");

    let stats = pilot_stats(&mut store, "ana");
    assert_eq!((stats.wins, stats.podiums, stats.total_races), (0, 0, 0));
}
