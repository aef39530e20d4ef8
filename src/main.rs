use library_catalog::{
    adapters::{
        memory::InMemoryStore,
        postgres::{
            PostgresBookRepository, PostgresBorrowingRecordRepository, PostgresPatronRepository,
        },
    },
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::{AppConfig, StorageKind},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("library_catalog={},tower_http=debug", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize adapters
    let service_deps = match config.storage {
        StorageKind::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations completed");

            ServiceDependencies {
                books: Arc::new(PostgresBookRepository::new(pool.clone())),
                patrons: Arc::new(PostgresPatronRepository::new(pool.clone())),
                borrowing_records: Arc::new(PostgresBorrowingRecordRepository::new(pool)),
            }
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on exit");
            let store = InMemoryStore::new();
            ServiceDependencies {
                books: Arc::new(store.book_repository()),
                patrons: Arc::new(store.patron_repository()),
                borrowing_records: Arc::new(store.borrowing_record_repository()),
            }
        }
    };

    let app = create_router(Arc::new(AppState { service_deps }));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
