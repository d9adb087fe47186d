//! log4rs setup. The terminal belongs to the UI, so everything goes to a file.

use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config as LogConfig, Deserializers, Root},
    encode::pattern::PatternEncoder,
};

use crate::config::Config;

///
const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";

///
pub fn init(config: &Config) -> anyhow::Result<()> {
    if let Some(ref log_config) = config.log_config {
        log4rs::init_file(log_config, Deserializers::default())?;
        log::info!("Logging configured from {}", log_config.display());

        return Ok(());
    }

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(&config.log_file)?;

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("file").build(config.log_level))?;

    log4rs::init_config(log_config)?;
    log::info!("Logging to {} at {}", config.log_file.display(), config.log_level);

    Ok(())
}
