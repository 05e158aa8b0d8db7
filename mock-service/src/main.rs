use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mock_service=debug")),
        )
        .init();

    let addr: SocketAddr = "0.0.0.0:3000".parse()?;
    mock_service::run(addr).await
}
