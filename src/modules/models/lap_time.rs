use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};

use crate::schema::lap_times;

#[derive(Insertable, Serialize, Debug, Clone, Deserialize, PartialEq)]
#[diesel(table_name = lap_times)]
pub struct NewLapTime {
    #[diesel(column_name = user_id)]
    pub pilot_id: String,
    pub track: String,
    pub time: String,
}

/// A pilot's best lap on a track. there is at most one per `(pilot_id, track)`.
#[derive(Queryable, Identifiable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = lap_times)]
pub struct LapTimeRecord {
    pub id: i32,
    #[diesel(column_name = user_id)]
    pub pilot_id: String,
    pub track: String,
    pub time: String,
}

impl LapTimeRecord {
    /************ INSERTERS ************/
    /// # insert or replace a lap time
    /// store the lap time of a pilot on a track. when the pilot already has a
    /// time for that track it is overwritten.
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    /// * `new_lap_time` - The lap time to store
    ///
    /// ## Returns
    /// * `LapTimeRecord` - The stored lap time
    pub fn upsert(conn: &mut PgConnection, new_lap_time: &NewLapTime) -> QueryResult<LapTimeRecord> {
        use crate::schema::lap_times::dsl::*;

        match diesel::insert_into(lap_times)
            .values(new_lap_time)
            .on_conflict((user_id, track))
            .do_update()
            .set(time.eq(&new_lap_time.time))
            .get_result::<LapTimeRecord>(conn)
        {
            Ok(lap_time) => Ok(lap_time),
            Err(error) => {
                error!(target:"models/lap_time:upsert", "Error storing lap time: (error: {})", error);
                Err(error)
            }
        }
    }

    /************ GETTERS ************/
    /// # get all lap times
    /// get the lap times of every pilot, optionally capped to bound the read
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    /// * `limit` - The maximum amount of rows to read
    ///
    /// ## Returns
    /// * `Vec<LapTimeRecord>` - The lap times
    pub fn get_all(conn: &mut PgConnection, limit: Option<i64>) -> QueryResult<Vec<LapTimeRecord>> {
        use crate::schema::lap_times::dsl::*;

        let mut query = lap_times.order(id.asc()).into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query.load::<LapTimeRecord>(conn)
    }

    /// # get the lap times of a pilot
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    /// * `pilot_in` - The id of the pilot
    ///
    /// ## Returns
    /// * `Vec<LapTimeRecord>` - The lap times of the pilot
    pub fn from_pilot(conn: &mut PgConnection, pilot_in: &str) -> QueryResult<Vec<LapTimeRecord>> {
        use crate::schema::lap_times::dsl::*;
        lap_times
            .filter(user_id.eq(pilot_in))
            .order(id.asc())
            .load::<LapTimeRecord>(conn)
    }
}
