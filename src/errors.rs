use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("missing environment variable {name}"))]
    MissingConfigError {
        name: String,
        source: std::env::VarError,
    },

    #[snafu(display("invalid value `{value}` for {name}"))]
    InvalidConfigError { name: String, value: String },

    #[snafu(display("could not connect to the database: {source}"))]
    DatabaseConnectionError { source: diesel::ConnectionError },

    #[snafu(display("database query failed: {source}"))]
    DatabaseError { source: diesel::result::Error },

    #[snafu(display("redis failure: {source}"))]
    RedisError { source: redis::RedisError },

    #[snafu(display("malformed change event: {source}"))]
    MalformedEventError { source: serde_json::Error },

    #[snafu(display("{record} not found"))]
    NotFoundError { record: String },
}

pub type CustomResult<T> = Result<T, Error>;
