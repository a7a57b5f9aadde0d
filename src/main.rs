// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use preloader::{
    AppError, CommandLineInput, ContentStore, DirectoryStore, EditFormPreloadTextHook,
    PreloadTextResolver, PreloaderConfig, StoreLocation, WikiApiStore,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr so stdout carries only the preload text.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("preloader.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Opens the content store the configuration points at.
fn open_store(location: &StoreLocation) -> Result<Arc<dyn ContentStore>, AppError> {
    match location {
        StoreLocation::Directory(dir) => {
            log::info!("Reading source pages from {}", dir.display());
            Ok(Arc::new(DirectoryStore::open(dir)?))
        }
        StoreLocation::WikiApi(url) => {
            log::info!("Reading source pages from {}", url);
            Ok(Arc::new(WikiApiStore::new(url.clone())?))
        }
    }
}

/// Runs the edit-form hook once and prints the resulting text.
async fn execute(config: PreloaderConfig) -> Result<(), AppError> {
    let store = open_store(&config.store)?;
    log::debug!("{} preload source(s) configured", config.sources.len());

    let resolver = PreloadTextResolver::new(config.sources, store);
    let mut text = config.proposed_text;
    resolver
        .on_edit_form_preload_text(&mut text, config.namespace)
        .await;

    println!("{}", text);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PreloaderConfig::resolve(cli)?;

    execute(config).await?;

    Ok(())
}
