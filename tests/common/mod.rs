use inventory::{app::build_app, dashboard::ProductClient, state::AppState};

/// Serves the router over the in-memory store on an ephemeral port and
/// returns a client pointed at its `/products` collection.
pub async fn spawn_server() -> ProductClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app = build_app(AppState::fake());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });
    ProductClient::new(format!("http://{addr}/products"))
}
