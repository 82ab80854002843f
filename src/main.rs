use confetti_cuisine::configuration::get_config;
use confetti_cuisine::startup::Application;
use confetti_cuisine::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        "confetti_cuisine".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let config = get_config().expect("failed to read configuration");
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
