#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = taskdeck_server::config::Config::from_env()?;
    taskdeck_server::web::start_web_server(config).await
}
