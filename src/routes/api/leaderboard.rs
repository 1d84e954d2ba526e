use rocket::{get, State};

use crate::config::Settings;
use crate::macros::json_response::json_response;
use crate::modules::datastore::PgDatastore;
use crate::modules::helpers::victory::VictoryBoards;
use crate::modules::rankings::{track_leaderboards, victory_boards, TrackBoards};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// the largest victory board that can be requested
const MAX_VICTORY_BOARD: usize = 50;

#[get("/leaderboards/tracks")]
pub fn tracks(settings: &State<Settings>) -> TrackBoards {
    let store = &mut PgDatastore::new(&settings.database_url);
    track_leaderboards(store, settings.inner())
}

#[get("/leaderboards/victories?<top>")]
pub fn victories(top: Option<usize>, settings: &State<Settings>) -> VictoryBoards {
    let top = top.map(|top| top.clamp(1, MAX_VICTORY_BOARD));

    let store = &mut PgDatastore::new(&settings.database_url);
    victory_boards(store, settings.inner(), top)
}

json_response!(TrackBoards, VictoryBoards);
