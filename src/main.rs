//! Pixelsprite - pixel-art sprite generation CLI.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use pixelsprite::canvas::{self, EXPORT_FILE_NAME};
use pixelsprite::cli::Cli;
use pixelsprite::client::SpriteClient;
use pixelsprite::config::{self, Config};
use pixelsprite::context::ServiceContext;
use pixelsprite::error::SpriteError;
use pixelsprite::logger;
use pixelsprite::model::resolve_model;
use pixelsprite::prompt::build_prompt;
use pixelsprite::session::SpriteSession;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), SpriteError> {
    let options = cli.generation_options()?;

    if cli.dry_run {
        print!("{}", build_prompt(&options));
        return Ok(());
    }

    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(SpriteError::Config)?;

    let model_name = cli.model.as_deref().unwrap_or(&config.defaults.model);
    let model_id = resolve_model(model_name).map_err(SpriteError::InvalidArgument)?;
    log::info!("Model: {model_id} (resolved from '{model_name}')");

    let (ctx, recording) = ServiceContext::from_env(&config)?;
    let mut session = SpriteSession::new(SpriteClient::new(ctx.model, model_id));

    let requested = cli
        .output
        .map(PathBuf::from)
        .or_else(|| config.defaults.output.clone())
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    let target = canvas::export_path(&requested);
    log::debug!("Export target: {}", target.display());

    let outcome = match session.generate(&options).await {
        Ok(()) => session.canvas().export_to(&target),
        Err(e) => Err(e),
    };

    // The recorder is shared with the session's model until the session is gone.
    drop(session);
    if let Some(recording) = recording {
        match recording.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    match outcome? {
        Some(path) => eprintln!("Saved: {}", path.display()),
        None => log::warn!("Nothing to export"),
    }

    for rule in options.style_rules() {
        eprintln!("  - {rule}");
    }
    Ok(())
}
