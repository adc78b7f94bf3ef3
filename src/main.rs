use std::{process, sync::Arc, time::Duration};

use folio::{
    application::error::AppError,
    cache::{
        CacheConfig, CacheLayers, CacheStore, MemoryStore, RedisStore, purge_family, purge_key,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminToken, HttpState, RouterOptions},
        telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::PurgeCache(args) => run_purge_cache(settings, args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let admin_token = settings
        .admin
        .token
        .clone()
        .ok_or_else(|| InfraError::configuration("admin token is not configured"))?;

    let repositories = init_repositories(&settings).await?;
    let store = connect_cache_store(&settings).await?;
    let cache = CacheLayers::new(store, CacheConfig::from(&settings.cache));

    let state = HttpState::from_repositories(repositories);
    let cors = http::cors_layer(&settings.cors.allowed_origins).map_err(|err| {
        InfraError::configuration(format!("cors.allowed_origins: {err}"))
    })?;
    let options = RouterOptions {
        admin_token: AdminToken::new(admin_token),
        cors,
    };
    let router = http::build_router(state, &cache, options);

    serve_http(&settings, router).await
}

async fn run_purge_cache(
    settings: config::Settings,
    args: config::PurgeCacheArgs,
) -> Result<(), AppError> {
    if !settings.redis.enabled {
        return Err(AppError::from(InfraError::configuration(
            "purge-cache needs a shared cache store but redis is disabled",
        )));
    }

    let store = RedisStore::connect(&settings.redis.url)
        .await
        .map_err(InfraError::from)?;
    let cache = CacheConfig::from(&settings.cache);

    let removed = match (args.key.as_deref(), args.family.as_deref()) {
        (Some(key), _) => {
            let removed = purge_key(&store, key, cache.operation_timeout)
                .await
                .map_err(InfraError::from)?;
            usize::from(removed)
        }
        (None, Some(family)) => purge_family(
            &store,
            family,
            cache.scan_batch,
            cache.operation_timeout,
        )
        .await
        .map_err(InfraError::from)?,
        (None, None) => {
            return Err(AppError::unexpected(
                "purge-cache requires a family or --key",
            ));
        }
    };

    info!(
        target = "folio::purge_cache",
        removed,
        family = args.family.as_deref().unwrap_or(""),
        key = args.key.as_deref().unwrap_or(""),
        "cache purge complete"
    );
    println!("removed {removed} cache entries");

    Ok(())
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(InfraError::from)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

/// Connect the cache store once; every decorator shares this handle.
async fn connect_cache_store(
    settings: &config::Settings,
) -> Result<Arc<dyn CacheStore>, AppError> {
    if !settings.redis.enabled {
        info!(
            target = "folio::cache",
            capacity = settings.cache.memory_capacity.get(),
            "redis disabled, using in-process cache store"
        );
        return Ok(Arc::new(MemoryStore::with_capacity(
            settings.cache.memory_capacity,
        )));
    }

    let store = RedisStore::connect(&settings.redis.url)
        .await
        .map_err(InfraError::from)?;
    Ok(Arc::new(store))
}

async fn serve_http(settings: &config::Settings, router: axum::Router) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "folio::http",
        addr = %settings.server.addr,
        "listening"
    );

    let stop = Arc::new(Notify::new());
    let stop_signal = stop.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { stop_signal.notified().await });
    let mut handle = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut handle => return server_outcome(joined),
        () = shutdown_signal() => {}
    }

    info!(
        target = "folio::http",
        grace_seconds = settings.server.graceful_shutdown.as_secs(),
        "shutdown requested, draining connections"
    );
    stop.notify_one();

    drain(handle, settings.server.graceful_shutdown).await
}

async fn drain(
    mut handle: tokio::task::JoinHandle<std::io::Result<()>>,
    grace: Duration,
) -> Result<(), AppError> {
    match tokio::time::timeout(grace, &mut handle).await {
        Ok(joined) => server_outcome(joined),
        Err(_) => {
            warn!(
                target = "folio::http",
                "graceful shutdown timed out, aborting open connections"
            );
            handle.abort();
            Ok(())
        }
    }
}

fn server_outcome(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(AppError::unexpected(format!("server error: {err}"))),
        Err(err) => Err(AppError::unexpected(format!("server task failed: {err}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(target = "folio::http", error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(target = "folio::http", error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
