use std::collections::HashMap;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::profiles;

/// label used when a pilot has neither a display name nor a username
pub const FALLBACK_PILOT_NAME: &str = "Racer";

#[derive(Queryable, Identifiable, Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[diesel(table_name = profiles)]
pub struct PilotIdentity {
    pub id: String,
    pub display_name: Option<String>,
    pub username: Option<String>,
}

impl PilotIdentity {
    /************ GETTERS ************/
    /// # get all pilots
    /// get every profile from the database
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    ///
    /// ## Returns
    /// * `Vec<PilotIdentity>` - All pilots
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<PilotIdentity>> {
        use crate::schema::profiles::dsl::*;
        profiles.order(id.asc()).load::<PilotIdentity>(conn)
    }

    /// # get a pilot by id
    ///
    /// ## Arguments
    /// * `conn` - The database connection to use
    /// * `id_in` - The id of the pilot
    ///
    /// ## Returns
    /// * `Option<PilotIdentity>` - The pilot, if there is one with that id
    pub fn get_by_id(conn: &mut PgConnection, id_in: &str) -> QueryResult<Option<PilotIdentity>> {
        use crate::schema::profiles::dsl::*;
        profiles
            .filter(id.eq(id_in))
            .first::<PilotIdentity>(conn)
            .optional()
    }

    /************ UTILS ************/

    /// the name shown on the boards: display name, then username, then a placeholder
    pub fn label(&self) -> &str {
        [&self.display_name, &self.username]
            .into_iter()
            .flatten()
            .map(|name| name.trim())
            .find(|name| !name.is_empty())
            .unwrap_or(FALLBACK_PILOT_NAME)
    }
}

/// # sanitize a pilot id
/// strip everything that can not be part of a pilot id.
/// ids are uuids or slugs, so only ascii letters, digits, `-` and `_` remain.
pub fn sanitize_id(pilot_id: &str) -> String {
    pilot_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// in memory lookup of pilots by id, used to label aggregated output
#[derive(Debug, Clone, Default)]
pub struct PilotDirectory {
    pilots: HashMap<String, PilotIdentity>,
}

impl PilotDirectory {
    pub fn new(pilots: Vec<PilotIdentity>) -> PilotDirectory {
        PilotDirectory {
            pilots: pilots
                .into_iter()
                .map(|pilot| (pilot.id.clone(), pilot))
                .collect(),
        }
    }

    pub fn get(&self, pilot_id: &str) -> Option<&PilotIdentity> {
        self.pilots.get(pilot_id)
    }

    pub fn label(&self, pilot_id: &str) -> String {
        self.get(pilot_id)
            .map(|pilot| pilot.label())
            .unwrap_or(FALLBACK_PILOT_NAME)
            .to_string()
    }
}
