use redis::{Client, Commands, Connection, RedisResult};

pub struct Redis {}

impl Redis {
    pub fn connect(redis_url: &str) -> RedisResult<Connection> {
        Client::open(redis_url)?.get_connection()
    }

    /// publish a payload on a channel, returns the amount of subscribers that received it
    pub fn publish(conn: &mut Connection, channel: &str, payload: &str) -> RedisResult<i64> {
        conn.publish(channel, payload)
    }
}
