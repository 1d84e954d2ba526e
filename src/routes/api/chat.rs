use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, State};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::config::Settings;
use crate::errors::DatabaseSnafu;
use crate::macros::database_error_handler::db_handle_error_http;
use crate::macros::json_response::json_response;
use crate::modules::models::chat_message::{ChatMessage, NewChatMessage};
use crate::modules::models::general::establish_connection;
use crate::modules::models::pilot::sanitize_id;

const DEFAULT_CHAT_HISTORY: i64 = 50;
const MAX_CHAT_HISTORY: i64 = 200;

#[get("/chat?<limit>")]
pub fn recent(limit: Option<i64>, settings: &State<Settings>) -> Result<ChatLog, Status> {
    let limit = limit.unwrap_or(DEFAULT_CHAT_HISTORY).clamp(1, MAX_CHAT_HISTORY);

    let conn = &mut db_handle_error_http!(
        establish_connection(&settings.database_url),
        "routes/api/chat:recent",
        "database connection"
    );
    let messages = db_handle_error_http!(
        ChatMessage::recent(conn, limit).context(DatabaseSnafu),
        "routes/api/chat:recent",
        "chat messages"
    );

    Ok(ChatLog { messages })
}

#[post("/chat", format = "json", data = "<message>")]
pub fn send(message: Json<NewChatMessage>, settings: &State<Settings>) -> Result<ChatMessage, Status> {
    let message = message.into_inner();
    if message.pilot_id.is_empty()
        || sanitize_id(&message.pilot_id) != message.pilot_id
        || message.content.trim().is_empty()
    {
        return Err(Status::BadRequest);
    }

    let conn = &mut db_handle_error_http!(
        establish_connection(&settings.database_url),
        "routes/api/chat:send",
        "database connection"
    );
    let saved = db_handle_error_http!(
        ChatMessage::new(conn, settings.inner(), &message).context(DatabaseSnafu),
        "routes/api/chat:send",
        "chat message"
    );

    Ok(saved)
}

#[patch("/chat/<message_id>", format = "json", data = "<form>")]
pub fn edit(
    message_id: i32,
    form: Json<ChatEditForm>,
    settings: &State<Settings>,
) -> Result<ChatMessage, Status> {
    let content = form.into_inner().content;
    if content.trim().is_empty() {
        return Err(Status::BadRequest);
    }

    let conn = &mut db_handle_error_http!(
        establish_connection(&settings.database_url),
        "routes/api/chat:edit",
        "database connection"
    );
    let edited = db_handle_error_http!(
        ChatMessage::edit(conn, settings.inner(), message_id, &content).context(DatabaseSnafu),
        "routes/api/chat:edit",
        "chat message"
    );

    edited.ok_or(Status::NotFound)
}

#[delete("/chat/<message_id>")]
pub fn remove(message_id: i32, settings: &State<Settings>) -> Status {
    let conn = &mut match establish_connection(&settings.database_url) {
        Ok(conn) => conn,
        Err(error) => {
            error!(target:"routes/api/chat:remove", "Error connecting to the database. (error: {})", error);
            return Status::InternalServerError;
        }
    };

    match ChatMessage::delete(conn, settings.inner(), message_id) {
        Ok(true) => Status::NoContent,
        Ok(false) => Status::NotFound,
        Err(error) => {
            error!(target:"routes/api/chat:remove", "Error deleting chat message {}. (error: {})", message_id, error);
            Status::InternalServerError
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatEditForm {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatLog {
    pub messages: Vec<ChatMessage>,
}

json_response!(ChatLog, ChatMessage);
