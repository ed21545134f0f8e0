use log::LevelFilter;
use log4rs::Handle;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use thiserror::Error;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} - {m}{n}";

/// Sets up the logger with a file appender and optionally a console appender
///
/// # Arguments
///
/// * 'log_path' - path to the log file
/// * 'log_level' - lowest log level to record
/// * 'log_to_stdout' - whether log records shall be printed to stdout as well
pub fn setup_logger(log_path: &str, log_level: LevelFilter, log_to_stdout: bool) -> Result<Handle, LoggerError> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_path)
        .map_err(|e| LoggerError::AppenderError(format!("{}: {}", log_path, e.to_string())))?;

    let mut config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)));
    let mut root = Root::builder().appender("logfile");

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();

        config = config.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = config.build(root.build(log_level))
        .map_err(|e| LoggerError::ConfigError(e.to_string()))?;

    let handle = log4rs::init_config(config)
        .map_err(|e| LoggerError::InitError(e.to_string()))?;

    Ok(handle)
}

/// Error depicting errors that occur while setting up the logger
///
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("AppenderError: {0}")]
    AppenderError(String),
    #[error("ConfigError: {0}")]
    ConfigError(String),
    #[error("InitError: {0}")]
    InitError(String),
}
