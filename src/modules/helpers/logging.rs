use fern::Dispatch;

use crate::config::Settings;

pub fn level_from_str(verbosity: &str) -> log::LevelFilter {
    match verbosity.trim().to_uppercase().as_str() {
        "OFF" => log::LevelFilter::Off,
        "ERROR" => log::LevelFilter::Error,
        "WARN" => log::LevelFilter::Warn,
        "DEBUG" => log::LevelFilter::Debug,
        "TRACE" => log::LevelFilter::Trace,
        // default to info
        _ => log::LevelFilter::Info,
    }
}

pub fn setup_logging(settings: &Settings) -> Result<(), fern::InitError> {
    let base_config = Dispatch::new()
        .level(level_from_str(&settings.logging_level))
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        });

    let file_logger_config = Dispatch::new().chain(fern::log_file(&settings.log_file)?);

    base_config
        .chain(std::io::stdout())
        .chain(file_logger_config)
        .apply()?;

    Ok(())
}
