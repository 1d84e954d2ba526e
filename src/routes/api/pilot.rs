use chrono::NaiveDate;
use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, State};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::macros::database_error_handler::db_handle_error_http;
use crate::macros::json_response::json_response;
use crate::modules::datastore::{Datastore, PgDatastore};
use crate::modules::helpers::pilot_laps::PilotLapSheet;
use crate::modules::helpers::victory::PilotStats;
use crate::modules::models::lap_time::{LapTimeRecord, NewLapTime};
use crate::modules::models::pilot::sanitize_id;
use crate::modules::models::race_result::{NewRaceResult, RaceResult};
use crate::modules::rankings::{pilot_lap_sheet, pilot_stats};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/***** GETTERS *****/

#[get("/pilots/<pilot_id>/laps")]
pub fn laps(pilot_id: &str, settings: &State<Settings>) -> Result<PilotLapSheet, Status> {
    if sanitize_id(pilot_id) != pilot_id {
        return Err(Status::BadRequest);
    }

    let store = &mut PgDatastore::new(&settings.database_url);
    Ok(pilot_lap_sheet(store, pilot_id))
}

#[get("/pilots/<pilot_id>/stats")]
pub fn stats(pilot_id: &str, settings: &State<Settings>) -> Result<PilotStats, Status> {
    if sanitize_id(pilot_id) != pilot_id {
        return Err(Status::BadRequest);
    }

    let store = &mut PgDatastore::new(&settings.database_url);
    Ok(pilot_stats(store, pilot_id))
}

/***** MODIFY *****/

/// # store the best lap of a pilot on a track
/// a malformed time is stored as is, it just never shows up on the boards
#[post("/pilots/<pilot_id>/laps", format = "json", data = "<lap>")]
pub fn save_lap(
    pilot_id: &str,
    lap: Json<LapTimeForm>,
    settings: &State<Settings>,
) -> Result<LapTimeRecord, Status> {
    let lap = lap.into_inner();
    if sanitize_id(pilot_id) != pilot_id || lap.track.trim().is_empty() || lap.time.trim().is_empty() {
        return Err(Status::BadRequest);
    }

    let store = &mut PgDatastore::new(&settings.database_url);
    let saved = db_handle_error_http!(
        store.upsert_lap_time(NewLapTime {
            pilot_id: pilot_id.to_string(),
            track: lap.track.trim().to_string(),
            time: lap.time.trim().to_string(),
        }),
        "routes/api/pilot:save_lap",
        "lap time"
    );

    Ok(saved)
}

#[post("/pilots/<pilot_id>/victories", format = "json", data = "<result>")]
pub fn save_victory(
    pilot_id: &str,
    result: Json<RaceResultForm>,
    settings: &State<Settings>,
) -> Result<RaceResult, Status> {
    let result = result.into_inner();
    if sanitize_id(pilot_id) != pilot_id || result.title.trim().is_empty() {
        return Err(Status::BadRequest);
    }

    let store = &mut PgDatastore::new(&settings.database_url);
    let saved = db_handle_error_http!(
        store.insert_race_result(result.into_new(pilot_id)),
        "routes/api/pilot:save_victory",
        "race result"
    );

    Ok(saved)
}

#[delete("/victories/<result_id>")]
pub fn delete_victory(result_id: i32, settings: &State<Settings>) -> Status {
    let store = &mut PgDatastore::new(&settings.database_url);
    match store.delete_race_result(result_id) {
        Ok(true) => Status::NoContent,
        Ok(false) => Status::NotFound,
        Err(error) => {
            error!(target:"routes/api/pilot:delete_victory", "Error deleting race result {}. (error: {})", result_id, error);
            Status::InternalServerError
        }
    }
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LapTimeForm {
    pub track: String,
    pub time: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RaceResultForm {
    pub title: String,
    pub track: Option<String>,
    pub category: Option<String>,
    pub position: Option<String>,
    pub date: Option<NaiveDate>,
}

impl RaceResultForm {
    fn into_new(self, pilot_id: &str) -> NewRaceResult {
        NewRaceResult {
            pilot_id: pilot_id.to_string(),
            title: self.title.trim().to_string(),
            track: non_blank(self.track),
            category: non_blank(self.category),
            position: non_blank(self.position),
            date: self.date,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

json_response!(PilotLapSheet, PilotStats, LapTimeRecord, RaceResult);
