//! Module provides initialization of global application logger

use std::error::Error;

use chrono::{Local, SecondsFormat};
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

use crate::config::Config;

/// Initializes the global logger for an application.
///
/// Messages are written both to stdout and to a new timestamped file
/// inside of [`Config::log_dir`].
///
/// # Errors
/// An error is returned if log file cannot be created
/// or if logger has already been initialized.
///
pub fn init(config: &Config) -> Result<Handle, Box<dyn Error + Send + Sync + 'static>> {
    let pattern = "{d:<35} {l:<5} {t} >> {m}{n}";
    let encoder = Box::new(PatternEncoder::new(pattern));

    let stdout = ConsoleAppender::builder().encoder(encoder.clone()).build();
    let file_name = config.log_dir().join(format!(
        "{}_{}.log",
        config.name(),
        Local::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace(':', "-"),
    ));
    let file = FileAppender::builder().encoder(encoder).build(file_name)?;

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(
            Root::builder()
                .appenders(["stdout", "file"])
                .build(config.log_level()),
        )?;
    Ok(log4rs::init_config(log_config)?)
}
