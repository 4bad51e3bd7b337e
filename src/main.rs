use rusty_book_catalog::{
    adapters::itbook::ItBookStoreSearch,
    api::{AppState, create_router},
    ports::BookSearch,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_book_catalog=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Similar-books collaborator (public itbook.store API unless overridden)
    let book_search: Arc<dyn BookSearch> = match std::env::var("SIMILAR_BOOKS_API_URL") {
        Ok(url) => {
            tracing::info!("Similar-books API: {}", url);
            Arc::new(
                ItBookStoreSearch::with_base_url(url)
                    .expect("Failed to build similar-books HTTP client"),
            )
        }
        Err(_) => Arc::new(
            ItBookStoreSearch::new().expect("Failed to build similar-books HTTP client"),
        ),
    };

    // Create application state
    let app_state = Arc::new(AppState::new(book_search));

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
