use chrono::Utc;
use diesel::pg::PgConnection;
use snafu::{OptionExt, ResultExt};

use crate::errors::{CustomResult, DatabaseSnafu, NotFoundSnafu};
use crate::modules::models::general::establish_connection;
use crate::modules::models::lap_time::{LapTimeRecord, NewLapTime};
use crate::modules::models::pilot::PilotIdentity;
use crate::modules::models::race_result::{NewRaceResult, RaceResult};

/// The reads and writes the rankings need from the club's datastore.
pub trait Datastore {
    /// lap times of every pilot, at most `limit` when given
    fn lap_times(&mut self, limit: Option<i64>) -> CustomResult<Vec<LapTimeRecord>>;

    fn lap_times_of_pilot(&mut self, pilot_id: &str) -> CustomResult<Vec<LapTimeRecord>>;

    /// race results of one pilot, or of everyone with `None`
    fn race_results(&mut self, pilot_id: Option<&str>) -> CustomResult<Vec<RaceResult>>;

    fn pilots(&mut self) -> CustomResult<Vec<PilotIdentity>>;

    fn pilot(&mut self, pilot_id: &str) -> CustomResult<PilotIdentity>;

    /// store a lap time, replacing the pilot's previous time on that track
    fn upsert_lap_time(&mut self, new_lap_time: NewLapTime) -> CustomResult<LapTimeRecord>;

    fn insert_race_result(&mut self, new_result: NewRaceResult) -> CustomResult<RaceResult>;

    fn delete_race_result(&mut self, result_id: i32) -> CustomResult<bool>;
}

/// PostgreSQL backed store. the connection is only made on first use, so an
/// unreachable database shows up as a failing read instead of a failing setup.
pub struct PgDatastore {
    database_url: String,
    conn: Option<PgConnection>,
}

impl PgDatastore {
    pub fn new(database_url: &str) -> PgDatastore {
        PgDatastore {
            database_url: database_url.to_string(),
            conn: None,
        }
    }

    fn conn(&mut self) -> CustomResult<&mut PgConnection> {
        if self.conn.is_none() {
            self.conn = Some(establish_connection(&self.database_url)?);
        }

        self.conn.as_mut().context(NotFoundSnafu {
            record: "database connection",
        })
    }
}

impl Datastore for PgDatastore {
    fn lap_times(&mut self, limit: Option<i64>) -> CustomResult<Vec<LapTimeRecord>> {
        LapTimeRecord::get_all(self.conn()?, limit).context(DatabaseSnafu)
    }

    fn lap_times_of_pilot(&mut self, pilot_id: &str) -> CustomResult<Vec<LapTimeRecord>> {
        LapTimeRecord::from_pilot(self.conn()?, pilot_id).context(DatabaseSnafu)
    }

    fn race_results(&mut self, pilot_id: Option<&str>) -> CustomResult<Vec<RaceResult>> {
        let conn = self.conn()?;
        let results = match pilot_id {
            Some(pilot_id) => RaceResult::from_pilot(conn, pilot_id),
            None => RaceResult::get_all(conn),
        };

        results.context(DatabaseSnafu)
    }

    fn pilots(&mut self) -> CustomResult<Vec<PilotIdentity>> {
        PilotIdentity::get_all(self.conn()?).context(DatabaseSnafu)
    }

    fn pilot(&mut self, pilot_id: &str) -> CustomResult<PilotIdentity> {
        PilotIdentity::get_by_id(self.conn()?, pilot_id)
            .context(DatabaseSnafu)?
            .context(NotFoundSnafu {
                record: format!("pilot {}", pilot_id),
            })
    }

    fn upsert_lap_time(&mut self, new_lap_time: NewLapTime) -> CustomResult<LapTimeRecord> {
        LapTimeRecord::upsert(self.conn()?, &new_lap_time).context(DatabaseSnafu)
    }

    fn insert_race_result(&mut self, new_result: NewRaceResult) -> CustomResult<RaceResult> {
        RaceResult::new(self.conn()?, &new_result).context(DatabaseSnafu)
    }

    fn delete_race_result(&mut self, result_id: i32) -> CustomResult<bool> {
        RaceResult::delete(self.conn()?, result_id).context(DatabaseSnafu)
    }
}

/// In process store with the same upsert rules as the database.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatastore {
    pilots: Vec<PilotIdentity>,
    lap_times: Vec<LapTimeRecord>,
    race_results: Vec<RaceResult>,
    next_id: i32,
}

impl MemoryDatastore {
    pub fn new() -> MemoryDatastore {
        MemoryDatastore::default()
    }

    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_pilot(&mut self, id: &str, display_name: Option<&str>, username: Option<&str>) {
        self.pilots.retain(|pilot| pilot.id != id);
        self.pilots.push(PilotIdentity {
            id: id.to_string(),
            display_name: display_name.map(str::to_string),
            username: username.map(str::to_string),
        });
    }
}

impl Datastore for MemoryDatastore {
    fn lap_times(&mut self, limit: Option<i64>) -> CustomResult<Vec<LapTimeRecord>> {
        let limit = limit
            .map(|limit| usize::try_from(limit).unwrap_or(0))
            .unwrap_or(usize::MAX);
        Ok(self.lap_times.iter().take(limit).cloned().collect())
    }

    fn lap_times_of_pilot(&mut self, pilot_id: &str) -> CustomResult<Vec<LapTimeRecord>> {
        Ok(self
            .lap_times
            .iter()
            .filter(|lap_time| lap_time.pilot_id == pilot_id)
            .cloned()
            .collect())
    }

    fn race_results(&mut self, pilot_id: Option<&str>) -> CustomResult<Vec<RaceResult>> {
        Ok(self
            .race_results
            .iter()
            .filter(|result| pilot_id.map_or(true, |id| result.pilot_id == id))
            .cloned()
            .collect())
    }

    fn pilots(&mut self) -> CustomResult<Vec<PilotIdentity>> {
        Ok(self.pilots.clone())
    }

    fn pilot(&mut self, pilot_id: &str) -> CustomResult<PilotIdentity> {
        self.pilots
            .iter()
            .find(|pilot| pilot.id == pilot_id)
            .cloned()
            .context(NotFoundSnafu {
                record: format!("pilot {}", pilot_id),
            })
    }

    fn upsert_lap_time(&mut self, new_lap_time: NewLapTime) -> CustomResult<LapTimeRecord> {
        let existing = self.lap_times.iter_mut().find(|lap_time| {
            lap_time.pilot_id == new_lap_time.pilot_id && lap_time.track == new_lap_time.track
        });

        if let Some(lap_time) = existing {
            lap_time.time = new_lap_time.time;
            return Ok(lap_time.clone());
        }

        let lap_time = LapTimeRecord {
            id: self.next_id(),
            pilot_id: new_lap_time.pilot_id,
            track: new_lap_time.track,
            time: new_lap_time.time,
        };
        self.lap_times.push(lap_time.clone());

        Ok(lap_time)
    }

    fn insert_race_result(&mut self, new_result: NewRaceResult) -> CustomResult<RaceResult> {
        let result = RaceResult {
            id: self.next_id(),
            pilot_id: new_result.pilot_id,
            title: new_result.title,
            track: new_result.track,
            category: new_result.category,
            position: new_result.position,
            date: new_result.date,
            created_at: Utc::now().naive_utc(),
        };
        self.race_results.push(result.clone());

        Ok(result)
    }

    fn delete_race_result(&mut self, result_id: i32) -> CustomResult<bool> {
        let before = self.race_results.len();
        self.race_results.retain(|result| result.id != result_id);
        Ok(self.race_results.len() != before)
    }
}
