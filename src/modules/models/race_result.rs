use chrono::{NaiveDate, NaiveDateTime};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};

use crate::schema::victories;

#[derive(Insertable, Serialize, Debug, Clone, Deserialize, PartialEq)]
#[diesel(table_name = victories)]
pub struct NewRaceResult {
    #[diesel(column_name = user_id)]
    pub pilot_id: String,
    pub title: String,
    pub track: Option<String>,
    pub category: Option<String>,
    /// free text as entered, e.g. `1º`, `P1` or `2`
    pub position: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Queryable, Identifiable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = victories)]
pub struct RaceResult {
    pub id: i32,
    #[diesel(column_name = user_id)]
    pub pilot_id: String,
    pub title: String,
    pub track: Option<String>,
    pub category: Option<String>,
    pub position: Option<String>,
    pub date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

impl RaceResult {
    /************ INSERTERS ************/
    /// # insert a race result
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    /// * `new_result` - The result to insert
    ///
    /// ## Returns
    /// * `RaceResult` - The inserted result
    pub fn new(conn: &mut PgConnection, new_result: &NewRaceResult) -> QueryResult<RaceResult> {
        use crate::schema::victories::dsl::*;

        match diesel::insert_into(victories)
            .values(new_result)
            .get_result::<RaceResult>(conn)
        {
            Ok(result) => Ok(result),
            Err(error) => {
                error!(target:"models/race_result:new", "Error inserting race result: (error: {})", error);
                Err(error)
            }
        }
    }

    /// # delete a race result
    ///
    /// ## Returns
    /// * `bool` - true if a result was deleted
    pub fn delete(conn: &mut PgConnection, id_in: i32) -> QueryResult<bool> {
        use crate::schema::victories::dsl::*;
        diesel::delete(victories.filter(id.eq(id_in)))
            .execute(conn)
            .map(|deleted| deleted > 0)
    }

    /************ GETTERS ************/
    /// # get all race results
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    ///
    /// ## Returns
    /// * `Vec<RaceResult>` - every result, oldest first
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<RaceResult>> {
        use crate::schema::victories::dsl::*;
        victories
            .order((created_at.asc(), id.asc()))
            .load::<RaceResult>(conn)
    }

    /// # get the race results of a pilot
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    /// * `pilot_in` - The id of the pilot
    ///
    /// ## Returns
    /// * `Vec<RaceResult>` - the results of the pilot, oldest first
    pub fn from_pilot(conn: &mut PgConnection, pilot_in: &str) -> QueryResult<Vec<RaceResult>> {
        use crate::schema::victories::dsl::*;
        victories
            .filter(user_id.eq(pilot_in))
            .order((created_at.asc(), id.asc()))
            .load::<RaceResult>(conn)
    }
}
