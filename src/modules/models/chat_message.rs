use chrono::NaiveDateTime;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::error;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::modules::realtime::{publish_change, ChangeEvent, Keyed};
use crate::schema::chat_messages;

#[derive(Insertable, Serialize, Debug, Clone, Deserialize, PartialEq)]
#[diesel(table_name = chat_messages)]
pub struct NewChatMessage {
    #[diesel(column_name = user_id)]
    pub pilot_id: String,
    pub content: String,
}

#[derive(Queryable, Identifiable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = chat_messages)]
pub struct ChatMessage {
    pub id: i32,
    #[diesel(column_name = user_id)]
    pub pilot_id: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl Keyed for ChatMessage {
    fn key(&self) -> i32 {
        self.id
    }
}

impl ChatMessage {
    /************ INSERTERS ************/
    /// # post a chat message
    /// insert the message and announce it on the chat channel
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    /// * `settings` - where to announce the change
    /// * `new_message` - The message to post
    ///
    /// ## Returns
    /// * `ChatMessage` - The stored message
    pub fn new(
        conn: &mut PgConnection,
        settings: &Settings,
        new_message: &NewChatMessage,
    ) -> QueryResult<ChatMessage> {
        use crate::schema::chat_messages::dsl::*;

        let message = match diesel::insert_into(chat_messages)
            .values(new_message)
            .get_result::<ChatMessage>(conn)
        {
            Ok(message) => message,
            Err(error) => {
                error!(target:"models/chat_message:new", "Error inserting chat message: (error: {})", error);
                return Err(error);
            }
        };

        publish_change(&settings.redis_url, &settings.chat_channel, &ChangeEvent::Insert(message.clone()));
        Ok(message)
    }

    /// # edit a chat message
    ///
    /// ## Returns
    /// * `Option<ChatMessage>` - The edited message, `None` when there is no message with that id
    pub fn edit(
        conn: &mut PgConnection,
        settings: &Settings,
        id_in: i32,
        content_in: &str,
    ) -> QueryResult<Option<ChatMessage>> {
        use crate::schema::chat_messages::dsl::*;

        let message = diesel::update(chat_messages.filter(id.eq(id_in)))
            .set(content.eq(content_in))
            .get_result::<ChatMessage>(conn)
            .optional()?;

        if let Some(message) = &message {
            publish_change(&settings.redis_url, &settings.chat_channel, &ChangeEvent::Update(message.clone()));
        }
        Ok(message)
    }

    /// # delete a chat message
    ///
    /// ## Returns
    /// * `bool` - true if there was a message to delete
    pub fn delete(conn: &mut PgConnection, settings: &Settings, id_in: i32) -> QueryResult<bool> {
        use crate::schema::chat_messages::dsl::*;

        let deleted = diesel::delete(chat_messages.filter(id.eq(id_in))).execute(conn)? > 0;
        if deleted {
            publish_change::<ChatMessage>(
                &settings.redis_url,
                &settings.chat_channel,
                &ChangeEvent::Delete { id: id_in },
            );
        }

        Ok(deleted)
    }

    /************ GETTERS ************/
    /// # get the most recent messages
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    /// * `limit` - The amount of messages to get
    ///
    /// ## Returns
    /// * `Vec<ChatMessage>` - the latest messages, oldest first
    pub fn recent(conn: &mut PgConnection, limit: i64) -> QueryResult<Vec<ChatMessage>> {
        use crate::schema::chat_messages::dsl::*;

        let mut messages = chat_messages
            .order((created_at.desc(), id.desc()))
            .limit(limit)
            .load::<ChatMessage>(conn)?;
        messages.reverse();

        Ok(messages)
    }
}
