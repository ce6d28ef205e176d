//! Shopbridge gateway binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use shopbridge_gateway::chat::ChatService;
use shopbridge_gateway::config::GatewayConfig;
use shopbridge_gateway::services::llm::LlmClient;
use shopbridge_gateway::services::whatsapp::WhatsAppClient;
use shopbridge_gateway::{AppState, routes};
use shopbridge_store::Store;

#[tokio::main]
async fn main() {
    let config = GatewayConfig::from_env().expect("Failed to load configuration");

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopbridge_gateway=info,shopbridge_store=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = Store::new(&config.store).expect("Failed to construct store driver");
    tracing::info!(backend = %store.backend(), "store driver ready");

    let llm = config.gemini.as_ref().map(|gemini| {
        LlmClient::new(gemini).expect("Failed to construct Gemini client")
    });
    if llm.is_none() {
        tracing::info!("GEMINI_API_KEY not set; free-text chat uses the canned reply");
    }

    let whatsapp = config.twilio.as_ref().map(|twilio| {
        WhatsAppClient::new(twilio).expect("Failed to construct Twilio client")
    });
    if whatsapp.is_none() {
        tracing::info!("Twilio not configured; WhatsApp notifications disabled");
    }

    let chat = ChatService::new(store.clone(), llm, whatsapp);
    let state = AppState::new(store, chat);
    let app = routes::router(state);

    let addr = config.socket_addr();
    tracing::info!("gateway listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
