use rocket::{launch, Build, Rocket};

use racing_club_rankings::build_rocket;
use racing_club_rankings::config::Settings;
use racing_club_rankings::modules::helpers::logging::setup_logging;

#[launch]
fn rocket() -> Rocket<Build> {
    let settings = Settings::from_env().expect("Failed to load settings");
    setup_logging(&settings).expect("Failed to setup logging");

    build_rocket(settings)
}
