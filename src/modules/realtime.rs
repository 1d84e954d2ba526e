use std::thread;

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::errors::{CustomResult, MalformedEventSnafu, RedisSnafu};
use crate::modules::redis::Redis;

/// Records that can be kept in a [`LiveCollection`].
pub trait Keyed {
    fn key(&self) -> i32;
}

/// A change to a table, as broadcast to every subscriber.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "record", rename_all = "lowercase")]
pub enum ChangeEvent<T> {
    Insert(T),
    Update(T),
    Delete { id: i32 },
}

impl<T: Keyed> ChangeEvent<T> {
    pub fn key(&self) -> i32 {
        match self {
            ChangeEvent::Insert(record) | ChangeEvent::Update(record) => record.key(),
            ChangeEvent::Delete { id } => *id,
        }
    }
}

/// Client side copy of a table, kept in arrival order and deduplicated by id.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveCollection<T> {
    records: Vec<T>,
}

impl<T> Default for LiveCollection<T> {
    fn default() -> Self {
        LiveCollection { records: Vec::new() }
    }
}

impl<T: Keyed> LiveCollection<T> {
    pub fn new(records: Vec<T>) -> LiveCollection<T> {
        let mut collection = LiveCollection::default();
        for record in records {
            collection.apply(ChangeEvent::Insert(record));
        }
        collection
    }

    /// # apply a change
    /// inserts are upserts so a replayed event leaves the collection as is.
    /// updates for unknown records and deletes of missing records are ignored.
    ///
    /// ## Returns
    /// * `bool` - true if the collection changed shape or content
    pub fn apply(&mut self, event: ChangeEvent<T>) -> bool {
        let position = self.position(event.key());

        match (event, position) {
            (ChangeEvent::Insert(record), Some(index)) | (ChangeEvent::Update(record), Some(index)) => {
                self.records[index] = record;
                true
            }
            (ChangeEvent::Insert(record), None) => {
                self.records.push(record);
                true
            }
            (ChangeEvent::Update(record), None) => {
                debug!(target:"modules/realtime:apply", "ignoring update of unknown record {}", record.key());
                false
            }
            (ChangeEvent::Delete { .. }, Some(index)) => {
                self.records.remove(index);
                true
            }
            (ChangeEvent::Delete { .. }, None) => false,
        }
    }

    fn position(&self, key: i32) -> Option<usize> {
        self.records.iter().position(|record| record.key() == key)
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn encode_change<T: Serialize>(event: &ChangeEvent<T>) -> CustomResult<String> {
    serde_json::to_string(event).context(MalformedEventSnafu)
}

pub fn decode_change<T: DeserializeOwned>(payload: &str) -> CustomResult<ChangeEvent<T>> {
    serde_json::from_str(payload).context(MalformedEventSnafu)
}

/// # publish a change
/// broadcast the change on the channel from a background thread. a failure
/// is logged, it never reaches the writer that caused the change.
pub fn publish_change<T: Serialize>(redis_url: &str, channel: &str, event: &ChangeEvent<T>) {
    let payload = match encode_change(event) {
        Ok(payload) => payload,
        Err(error) => {
            error!(target:"modules/realtime:publish_change", "Error encoding change: (error: {})", error);
            return;
        }
    };

    let redis_url = redis_url.to_string();
    let channel = channel.to_string();
    thread::spawn(move || {
        let r_conn = &mut match Redis::connect(&redis_url) {
            Ok(rc) => rc,
            Err(error) => {
                error!(target:"modules/realtime:publish_change", "Error connecting to redis: (error: {})", error);
                return;
            }
        };

        if let Err(error) = Redis::publish(r_conn, &channel, &payload) {
            error!(target:"modules/realtime:publish_change", "Error publishing on {}: (error: {})", channel, error);
        }
    });
}

/// # follow the changes on a channel
/// subscribe to the channel and apply every event to the collection, calling
/// `on_change` after each applied event. runs until `on_change` returns false
/// or the connection fails. malformed payloads are skipped.
pub fn follow_changes<T, F>(
    redis_url: &str,
    channel: &str,
    collection: &mut LiveCollection<T>,
    mut on_change: F,
) -> CustomResult<()>
where
    T: Keyed + DeserializeOwned,
    F: FnMut(&LiveCollection<T>) -> bool,
{
    let mut conn = Redis::connect(redis_url).context(RedisSnafu)?;
    let mut pubsub = conn.as_pubsub();
    pubsub.subscribe(channel).context(RedisSnafu)?;

    loop {
        let message = pubsub.get_message().context(RedisSnafu)?;
        let payload: String = message.get_payload().context(RedisSnafu)?;

        match decode_change::<T>(&payload) {
            Ok(event) => {
                collection.apply(event);
                if !on_change(collection) {
                    return Ok(());
                }
            }
            Err(error) => {
                warn!(target:"modules/realtime:follow_changes", "skipping payload on {}: {}", channel, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    struct Message {
        id: i32,
        content: String,
    }

    impl Keyed for Message {
        fn key(&self) -> i32 {
            self.id
        }
    }

    fn message(id: i32, content: &str) -> Message {
        Message {
            id,
            content: content.to_string(),
        }
    }

    #[test]
    fn inserts_are_deduplicated_by_id() {
        let mut chat = LiveCollection::default();
        assert!(chat.apply(ChangeEvent::Insert(message(1, "green flag"))));
        assert!(chat.apply(ChangeEvent::Insert(message(2, "box box"))));
        chat.apply(ChangeEvent::Insert(message(1, "green flag")));

        assert_eq!(chat.records(), &[message(1, "green flag"), message(2, "box box")]);
    }

    #[test]
    fn updates_patch_in_place() {
        let mut chat = LiveCollection::new(vec![message(1, "a"), message(2, "b"), message(3, "c")]);
        chat.apply(ChangeEvent::Update(message(2, "edited")));

        assert_eq!(chat.records()[1], message(2, "edited"));
        assert_eq!(chat.len(), 3);
    }

    #[test]
    fn update_of_unknown_record_is_ignored() {
        let mut chat = LiveCollection::new(vec![message(1, "a")]);
        assert!(!chat.apply(ChangeEvent::Update(message(9, "ghost"))));
        assert_eq!(chat.records(), &[message(1, "a")]);
    }

    #[test]
    fn deletes_remove_and_are_idempotent() {
        let mut chat = LiveCollection::new(vec![message(1, "a"), message(2, "b")]);
        assert!(chat.apply(ChangeEvent::Delete { id: 1 }));
        assert!(!chat.apply(ChangeEvent::Delete { id: 1 }));
        assert_eq!(chat.records(), &[message(2, "b")]);
    }

    #[test]
    fn events_travel_as_tagged_json() {
        let payload = encode_change(&ChangeEvent::Insert(message(4, "hi"))).unwrap();
        assert_eq!(payload, r#"{"event":"insert","record":{"id":4,"content":"hi"}}"#);

        let delete: ChangeEvent<Message> = decode_change(r#"{"event":"delete","record":{"id":4}}"#).unwrap();
        assert_eq!(delete, ChangeEvent::Delete { id: 4 });

        assert!(decode_change::<Message>(r#"{"event":"truncate"}"#).is_err());
    }
}
