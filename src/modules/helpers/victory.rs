use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::modules::models::pilot::PilotDirectory;
use crate::modules::models::race_result::RaceResult;

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct PilotStats {
    pub pilot_id: String,
    pub pilot_name: String,
    pub wins: u32,
    pub podiums: u32,
    pub total_races: u32,
}

impl PilotStats {
    fn empty(pilot_id: &str, pilot_name: String) -> PilotStats {
        PilotStats {
            pilot_id: pilot_id.to_string(),
            pilot_name,
            wins: 0,
            podiums: 0,
            total_races: 0,
        }
    }

    fn record(&mut self, position: Option<&str>) {
        self.total_races += 1;
        if is_win(position) {
            self.wins += 1;
        }
        if is_podium(position) {
            self.podiums += 1;
        }
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct VictoryBoards {
    pub by_wins: Vec<PilotStats>,
    pub by_podiums: Vec<PilotStats>,
}

fn digits() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// # extract the finishing position
/// take the first run of digits out of a free text position, so `1º`, `P1`
/// and `1st` are all a win. every view counts wins and podiums through this.
///
/// ## Arguments
/// * `position` - the position as entered
///
/// ## Returns
/// * `Option<u32>` - the position, `None` when there are no digits
pub fn extract_rank(position: Option<&str>) -> Option<u32> {
    let position = position?;
    digits().find(position)?.as_str().parse().ok()
}

pub fn is_win(position: Option<&str>) -> bool {
    extract_rank(position) == Some(1)
}

pub fn is_podium(position: Option<&str>) -> bool {
    matches!(extract_rank(position), Some(1..=3))
}

/// # count wins and podiums per pilot
/// every result counts as a race, results without a readable position only
/// count as a race.
///
/// ## Arguments
/// * `results` - the race results of one or all pilots
/// * `pilots` - used to put a name on every pilot
///
/// ## Returns
/// * `Vec<PilotStats>` - one entry per pilot, in order of first appearance
pub fn aggregate_pilot_stats(results: &[RaceResult], pilots: &PilotDirectory) -> Vec<PilotStats> {
    let mut stats: Vec<PilotStats> = Vec::new();
    let mut stats_index: HashMap<&str, usize> = HashMap::new();

    for result in results {
        let index = *stats_index.entry(result.pilot_id.as_str()).or_insert_with(|| {
            stats.push(PilotStats::empty(&result.pilot_id, pilots.label(&result.pilot_id)));
            stats.len() - 1
        });

        stats[index].record(result.position.as_deref());
    }

    stats
}

/// # stats of a single pilot
/// results of other pilots are ignored
pub fn stats_for_pilot(results: &[RaceResult], pilot_id: &str, pilot_name: &str) -> PilotStats {
    let mut stats = PilotStats::empty(pilot_id, pilot_name.to_string());
    results
        .iter()
        .filter(|result| result.pilot_id == pilot_id)
        .for_each(|result| stats.record(result.position.as_deref()));

    stats
}

fn by_wins(a: &PilotStats, b: &PilotStats) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then(b.podiums.cmp(&a.podiums))
        .then(b.total_races.cmp(&a.total_races))
}

fn by_podiums(a: &PilotStats, b: &PilotStats) -> Ordering {
    b.podiums
        .cmp(&a.podiums)
        .then(b.wins.cmp(&a.wins))
        .then(b.total_races.cmp(&a.total_races))
}

/// most wins first, then podiums, then races. full ties keep their input order
pub fn rank_by_wins(stats: &[PilotStats], top_n: usize) -> Vec<PilotStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(by_wins);
    ranked.truncate(top_n);
    ranked
}

/// most podiums first, then wins, then races. full ties keep their input order
pub fn rank_by_podiums(stats: &[PilotStats], top_n: usize) -> Vec<PilotStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(by_podiums);
    ranked.truncate(top_n);
    ranked
}

pub fn build_victory_boards(
    results: &[RaceResult],
    pilots: &PilotDirectory,
    top_n: usize,
) -> VictoryBoards {
    let stats = aggregate_pilot_stats(results, pilots);

    VictoryBoards {
        by_wins: rank_by_wins(&stats, top_n),
        by_podiums: rank_by_podiums(&stats, top_n),
    }
}
