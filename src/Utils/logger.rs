use crate::Utils::settings::EngineSettings;
use simplelog::*;
use std::fs::File;

/// Installs the global logger described by `settings`: a terminal logger and/or a file logger.
///
/// The global logger can be set once per process, so a second call returns `Err`.
/// With neither console nor file output nothing is installed.
pub fn init_logger(settings: &EngineSettings) -> Result<(), String> {
    let level = settings.log_level();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if settings.log_to_console() {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    if let Some(filename) = settings.log_file() {
        let file = File::create(filename)
            .map_err(|e| format!("cannot create log file {}: {}", filename.display(), e))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    if loggers.is_empty() {
        return Ok(());
    }
    CombinedLogger::init(loggers).map_err(|e| format!("logger already initialised: {}", e))
}
