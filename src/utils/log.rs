use colored::Colorize;

//Log utils
#[derive(PartialEq, PartialOrd, Debug)]
/// This enum is used to represent the different log levels
pub enum LogLevel {
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

impl LogLevel {
    fn from_env() -> Self {
        match std::env::var("XYCONF_LOG_LEVEL").as_deref() {
            Ok("Debug") => LogLevel::Debug,
            Ok("Info") => LogLevel::Info,
            Ok("Log") => LogLevel::Log,
            Ok("Warn") => LogLevel::Warn,
            Ok("Error") => LogLevel::Error,
            _ => LogLevel::Log,
        }
    }
}

/// This function is used to log messages to the console
/// # Arguments
/// * `level` - The log level of the message
/// * `message` - The message to log
/// # Example
/// ```
/// use xyconf::utils::{log, LogLevel};
/// log(LogLevel::Info, "Generating makefile");
/// log(LogLevel::Error, &format!("Something went wrong! {}", "io"));
/// ```
///
/// # Level setting
/// The log level can be set by setting the environment variable `XYCONF_LOG_LEVEL`
/// to one of the following values:
/// * `Debug`
/// * `Info`
/// * `Log`
/// * `Warn`
/// * `Error`
/// If the environment variable is not set, the default log level is `Log`
pub fn log(level: LogLevel, message: &str) {
    let level_str = match level {
        LogLevel::Debug => "[DEBUG]".purple(),
        LogLevel::Info => "[INFO]".blue(),
        LogLevel::Log => "[LOG]".green(),
        LogLevel::Warn => "[WARN]".yellow(),
        LogLevel::Error => "[ERROR]".red(),
    };
    let log_level = LogLevel::from_env();
    if log_level == LogLevel::Debug {
        if level == LogLevel::Debug || level == LogLevel::Warn || level == LogLevel::Error {
            println!("{} {}", level_str, message);
        }
    } else if level >= log_level {
        println!("{} {}", level_str, message);
    }
}
