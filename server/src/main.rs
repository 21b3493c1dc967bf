use nexora_server::config::ServerConfig;
use nexora_server::http::{build_router, AppState};
use nexora_server::submissions::{run_submission_writer, SubmissionCommand, SubmissionLog};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid server configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Validate configuration before starting
    if let Err(e) = config.validate() {
        eprintln!("Invalid server configuration: {}", e);
        std::process::exit(1);
    }

    if !config.index_path().is_file() {
        tracing::warn!(
            "{} not found; build the site client into {} before serving pages",
            config.index_path().display(),
            config.dist_dir.display()
        );
    }

    let (submission_tx, submission_rx) =
        mpsc::channel::<SubmissionCommand>(config.submission_queue);

    // Spawn submission writer
    let submissions_path = config.submissions_path.clone();
    tokio::spawn(async move {
        run_submission_writer(submission_rx, submissions_path).await;
    });

    let app_state = AppState {
        submissions: SubmissionLog::new(submission_tx),
    };
    let app = build_router(app_state, &config.dist_dir);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Server is running on http://{} (submissions -> {})",
        config.listen_addr,
        config.submissions_path.display()
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
