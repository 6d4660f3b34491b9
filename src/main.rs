use tokio::net::TcpListener;

use waitlist::configuration::get_configuration;
use waitlist::startup::{get_app_state, run};
use waitlist::telemetry::{get_subscriber, initialize_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("waitlist".into(), "info".into(), std::io::stdout);
    initialize_subscriber(subscriber);

    let configuration = get_configuration()?;
    let address = configuration.application.address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "Listening for signups");

    let app_state = get_app_state(&configuration).await;
    run(listener, app_state).await?;

    Ok(())
}
