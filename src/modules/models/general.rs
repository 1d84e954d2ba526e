use diesel::pg::PgConnection;
use diesel::Connection;
use snafu::ResultExt;

use crate::errors::{CustomResult, DatabaseConnectionSnafu};

pub fn establish_connection(database_url: &str) -> CustomResult<PgConnection> {
    PgConnection::establish(database_url).context(DatabaseConnectionSnafu)
}
