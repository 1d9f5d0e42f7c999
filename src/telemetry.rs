use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Directive used when `RUST_LOG` is unset: harness events at info, dependencies at warn.
pub const DEFAULT_DIRECTIVE: &str = "warn,assets_vault_harness=info";

/// `RUST_LOG` wins; otherwise `default_directive`, falling back to plain `info` if it does not parse.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| directive_filter(default_directive))
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()))
}

fn directive_filter(directive: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_new(directive)
}

pub fn init_tracing(default_directive: &str) {
    let fmt_layer = fmt::layer().with_target(false).with_level(true);
    let subscriber = Registry::default().with(env_filter(default_directive)).with(fmt_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}
