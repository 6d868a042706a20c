pub mod app;
pub mod codec;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod popup;
pub mod state;
pub mod ui;
pub use error::{AppError, AppResult};

/// Entrypoint used by the CLI binary. `args` excludes the program name.
pub fn run<I, S>(args: I) -> AppResult<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = config::load_app_config();
    logging::init(config.debug_logging);
    tracing::info!("starting popwin");

    let command = app::Command::parse(args)?;
    let app = app::App::new(config);
    let output = app.execute(&command)?;
    println!("{output}");

    tracing::info!(?command, "command complete");
    Ok(())
}
