mod db;
mod extract;
mod llm;
mod memory;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    let memory = memory::ChatMemory::from_env();
    let state = state::AppState::new(pool, memory.clone());

    // Spawn background eviction of idle chat histories.
    let _sweeper = memory::spawn_sweeper_task(memory);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "ai-summarizer listening");
    axum::serve(listener, app).await.expect("server failed");
}
