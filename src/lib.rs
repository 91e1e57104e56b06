pub mod apt;
pub mod batch;
pub mod catalog;
pub mod locale;
pub mod settings;
pub mod state;
pub mod status;
pub mod types;

/// Installs the stderr subscriber shared by both binaries. `RUST_LOG`
/// overrides the default filter.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hapmgr=info,update_app_list=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
