//! Backend entry-point: reads settings, prepares the database, and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use find_my_bike::domain::ports::RowStore;
use find_my_bike::inbound::http::health::HealthState;
use find_my_bike::inbound::http::state::Credentials;
use find_my_bike::outbound::persistence::{DbPool, DieselRowStore, PoolConfig, run_migrations};
use find_my_bike::settings::{AppSettings, settings_from_env};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = settings_from_env(&DefaultEnv::new()).map_err(|e| {
        error!(error = %e, "invalid configuration");
        std::io::Error::other(e.to_string())
    })?;

    let store = connect_store(&settings).await?;
    let health_state = web::Data::new(HealthState::new().with_store_probe(Arc::clone(&store)));

    let credentials = Credentials {
        api_key: settings.api_key,
        admin_key: settings.admin_key,
        cookie_domain: settings.cookie_domain,
    };
    let config = ServerConfig::new(
        settings.bind_addr,
        credentials,
        settings.row_limit,
        store,
    )
    .with_allowed_origins(settings.cors_origins);

    info!(
        bind_addr = %settings.bind_addr,
        row_limit = settings.row_limit.get(),
        "starting server"
    );
    create_server(health_state, config)?.await
}

/// Apply migrations when enabled and open the pooled row store.
async fn connect_store(settings: &AppSettings) -> std::io::Result<Arc<dyn RowStore>> {
    let database_url = settings.database_url.expose();

    if settings.run_migrations {
        run_migrations(database_url)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
    }

    let pool_config = PoolConfig::new(database_url)
        .with_min_idle(settings.pool_min_size)
        .with_max_size(settings.pool_max_size);
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    Ok(Arc::new(DieselRowStore::new(pool)))
}
