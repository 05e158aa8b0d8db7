use std::net::SocketAddr;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Install a tracing subscriber once per test binary and start a mock service.
#[allow(unused)]
pub async fn init() -> anyhow::Result<SocketAddr> {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("burstload=debug,mock_service=debug")),
            )
            .with_test_writer()
            .try_init();
    });

    mock_service::spawn().await
}

/// A privileged port nothing listens on; connecting to it is refused.
#[allow(unused)]
pub fn closed_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 1))
}
