use std::process;

use anyhow::Context;
use log::{error, info};

use rul_predictor::{server, ModelStore, ServerConfig};

#[actix_rt::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{e:#}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("reading configuration")?;

    let store = ModelStore::load(config.model_dir()).with_context(|| {
        format!(
            "loading model artifacts from '{}'",
            config.model_dir().display()
        )
    })?;

    server::serve(&config, store)
        .await
        .context("running HTTP server")?;

    info!("wrapping up, bye");
    Ok(())
}
