//! Tracing subscriber setup
//!
//! `RUST_LOG` overrides the per-environment defaults below.

use crate::config::Environment;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Default directives when `RUST_LOG` is unset.
///
/// Dev shows every statement the store runs (`sqlx::query` logs at debug);
/// elsewhere sqlx only reports slow or failed statements.
fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "randgate_backend=debug,tower_http=debug,sqlx::query=debug,info",
        Environment::Staging => "randgate_backend=debug,tower_http=info,sqlx=warn,info",
        Environment::Prod => "randgate_backend=info,tower_http=info,sqlx=warn,warn",
    }
}

pub fn init_logging(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    // Request spans report their duration when they close.
    let span_events = if env.is_prod() {
        FmtSpan::NONE
    } else {
        FmtSpan::CLOSE
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(span_events)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    if env.is_prod() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .init();
    }

    tracing::info!(
        env = ?env,
        directives = default_directives(env),
        "Logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        for env in [Environment::Dev, Environment::Staging, Environment::Prod] {
            assert!(default_directives(&env).parse::<EnvFilter>().is_ok());
        }
    }

    #[test]
    fn statement_logging_only_in_dev() {
        assert!(default_directives(&Environment::Dev).contains("sqlx::query=debug"));
        assert!(default_directives(&Environment::Prod).contains("sqlx=warn"));
    }
}
