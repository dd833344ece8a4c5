use cronjob_trigger::{Config, init_tracing, start_server};
use envconfig::Envconfig;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let config = Config::init_from_env()?;
    tracing::info!(?config, "starting cronjob trigger");
    start_server(config).await
}
