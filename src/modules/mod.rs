pub mod datastore;
pub mod rankings;
pub mod realtime;
pub mod redis;

pub mod models {
    pub mod chat_message;
    pub mod lap_time;
    pub mod pilot;
    pub mod race_result;

    pub mod general;
}

pub mod helpers {
    pub mod lap_time;
    pub mod leaderboard;
    pub mod pilot_laps;
    pub mod rotation;
    pub mod victory;

    pub mod logging;
}
