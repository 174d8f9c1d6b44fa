//! Serves the rendered dashboard page over HTTP.
//!
//! The page is rendered once before the server starts; the only route hands
//! out that same document.

use std::fmt;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use log::info;
use tokio::net::TcpListener;

/// Errors raised while starting or running the server.
#[derive(Debug)]
pub enum ServeError {
    /// The listening socket could not be bound.
    Bind { addr: SocketAddr, source: io::Error },
    /// The server stopped with an I/O error.
    Io(io::Error),
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { addr, .. } => write!(f, "Failed to bind dashboard address {addr}"),
            Self::Io(_) => write!(f, "Dashboard server stopped unexpectedly"),
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Io(err) => Some(err),
        }
    }
}

#[derive(Clone)]
struct PageState {
    html: Arc<str>,
}

async fn index(State(state): State<PageState>) -> Html<String> {
    Html(state.html.to_string())
}

/// Router exposing the page at `/`.
pub fn router(html: impl Into<Arc<str>>) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(PageState { html: html.into() })
}

/// Serves `html` on an already bound listener until `shutdown` completes.
pub async fn serve_listener<F>(listener: TcpListener, html: String, shutdown: F) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("whisky catalog listening on http://{addr}/");
    }
    axum::serve(listener, router(html))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServeError::Io)
}

/// Binds `addr` and serves `html` until Ctrl-C is received.
pub async fn serve(addr: SocketAddr, html: String) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    serve_listener(listener, html, shutdown_signal()).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down whisky catalog");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn index_returns_the_page() {
        let state = PageState {
            html: Arc::from("<h2>Whisky Catalog</h2>"),
        };
        let Html(body) = index(State(state)).await;
        assert_eq!(body, "<h2>Whisky Catalog</h2>");
    }
}
