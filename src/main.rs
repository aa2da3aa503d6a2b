use inventory::{app, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("inventory=debug,axum=info,tower_http=info");

    let state = AppState::init().await?;
    let addr = state.config.listen_addr();

    app::serve(app::build_app(state), &addr).await
}
