use engine_core::{App, Options};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // An optional first argument names a TOML options file.
    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(options.log_level.as_str()),
    )
    .init();

    log::info!("Starting engine: {}", options.title);
    App::new(options)?.run()?;
    Ok(())
}
