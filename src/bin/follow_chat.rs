use log::{error, info};

use racing_club_rankings::config::Settings;
use racing_club_rankings::modules::helpers::logging::setup_logging;
use racing_club_rankings::modules::models::chat_message::ChatMessage;
use racing_club_rankings::modules::models::general::establish_connection;
use racing_club_rankings::modules::realtime::{follow_changes, LiveCollection};

const HISTORY: i64 = 50;

fn main() {
    let settings = Settings::from_env().expect("Error loading settings");
    setup_logging(&settings).expect("Error setting up logging");

    let conn = &mut establish_connection(&settings.database_url).expect("Error connecting to the database");
    let history = match ChatMessage::recent(conn, HISTORY) {
        Ok(history) => history,
        Err(error) => {
            error!(target:"follow_chat", "Error loading chat history: {}", error);
            Vec::new()
        }
    };

    let mut chat = LiveCollection::new(history);
    info!(target:"follow_chat", "following {} with {} messages", settings.chat_channel, chat.len());

    let result = follow_changes(&settings.redis_url, &settings.chat_channel, &mut chat, |chat| {
        if let Some(last) = chat.records().last() {
            info!(target:"follow_chat", "{} messages, latest from {}: {}", chat.len(), last.pilot_id, last.content);
        }
        true
    });

    if let Err(error) = result {
        error!(target:"follow_chat", "Stopped following chat: {}", error);
    }
}
