use rocket::{routes, Build, Rocket};

use crate::config::Settings;

pub mod config;
pub mod errors;
pub mod schema;
pub mod modules;

pub(crate) mod macros {
    pub mod database_error_handler;
    pub mod json_response;
}

pub mod routes {
    pub mod api {
        pub mod chat;
        pub mod leaderboard;
        pub mod pilot;
    }
}

use crate::routes::api;

/// build the webserver, the settings are shared with every route
pub fn build_rocket(settings: Settings) -> Rocket<Build> {
    rocket::build()
        .manage(settings)
        .mount(
            "/api",
            routes![
                // leaderboards
                api::leaderboard::tracks,
                api::leaderboard::victories,
                // pilots
                api::pilot::laps,
                api::pilot::stats,
                api::pilot::save_lap,
                api::pilot::save_victory,
                api::pilot::delete_victory,
                // chat
                api::chat::recent,
                api::chat::send,
                api::chat::edit,
                api::chat::remove,
            ],
        )
}
