//! Listener lifecycle: bind, serve, drain on Ctrl-C.

use std::future::{Future, IntoFuture};
use std::time::Duration;

use axum::Router;
use tally_core::error::{Result, TallyError};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| TallyError::Internal(format!("bind {addr} failed: {e}")))
}

/// Bind the first address that works; the error of the last one otherwise.
pub async fn bind_first(addrs: &[String]) -> Result<TcpListener> {
    let mut last = TallyError::Internal("no listen address configured".into());
    for addr in addrs {
        match bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(err) => {
                tracing::debug!(%addr, error = %err, "listen address unavailable");
                last = err;
            }
        }
    }
    Err(last)
}

/// Serve until the server fails or Ctrl-C arrives. After Ctrl-C, in-flight
/// requests get `grace` to finish before the server is abandoned.
pub async fn serve(listener: TcpListener, app: Router, grace: Duration) -> Result<()> {
    serve_until(listener, app, grace, tokio::signal::ctrl_c()).await
}

/// Like `serve`, with the stop signal supplied by the caller. A signal that
/// resolves to `Err` leaves the server running until it fails on its own.
pub async fn serve_until<F>(listener: TcpListener, app: Router, grace: Duration, signal: F) -> Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        res = &mut server => flatten(res),
        signal = signal => {
            if let Err(err) = signal {
                // No signal handler means no way to be asked to stop; keep serving.
                tracing::warn!(error = %err, "shutdown signal unavailable, graceful shutdown disabled");
                return flatten((&mut server).await);
            }
            tracing::info!(grace_ms = grace.as_millis() as u64, "shutdown signal received, draining");
            let _ = stop_tx.send(());
            drain(&mut server, grace).await
        }
    }
}

async fn drain(server: &mut JoinHandle<std::io::Result<()>>, grace: Duration) -> Result<()> {
    match tokio::time::timeout(grace, &mut *server).await {
        Ok(res) => flatten(res),
        Err(_) => {
            tracing::warn!("grace period elapsed with requests in flight");
            server.abort();
            Ok(())
        }
    }
}

fn flatten(res: std::result::Result<std::io::Result<()>, tokio::task::JoinError>) -> Result<()> {
    match res {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(TallyError::Internal(format!("server failed: {e}"))),
        Err(e) => Err(TallyError::Internal(format!("server task failed: {e}"))),
    }
}
