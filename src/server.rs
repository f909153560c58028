//! TCP server for the JSON echo endpoint.
//!
//! Accepts one connection at a time, serves a single HTTP request on it
//! with hyper, and closes the connection before accepting the next.

use crate::protocols::http::handle_request;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::{TokioIo, TokioTimer};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

/// Pending connections queued by the kernel while a request is handled
const ACCEPT_BACKLOG: i32 = 5;

/// Pause after a failed accept, e.g. when out of file descriptors
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Server instance
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Bind the listening socket. Must be called from within a tokio runtime.
    pub fn bind(addr: SocketAddr) -> io::Result<Self> {
        let listener = create_listener(addr)?;
        Ok(Server {
            listener: TcpListener::from_std(listener)?,
        })
    }

    /// Address actually bound, including the port chosen for port 0
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve requests until `shutdown` resolves.
    ///
    /// An exchange in progress when `shutdown` fires is dropped.
    pub async fn run<F>(&self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.serve() => result,
            _ = shutdown => {
                info!("Server stopped");
                Ok(())
            }
        }
    }

    async fn serve(&self) -> io::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    trace!(peer = %addr, "New connection");

                    if let Err(e) = serve_stream(stream).await {
                        debug!(peer = %addr, error = %e, "Connection error");
                    }
                }
                Err(e) => accept_backoff(&e).await,
            }
        }
    }
}

/// Serve one request/response exchange on `stream`, then close it
pub async fn serve_stream<S>(stream: S) -> Result<(), hyper::Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    http1::Builder::new()
        .timer(TokioTimer::new())
        .keep_alive(false)
        .title_case_headers(true)
        .serve_connection(
            TokioIo::new(stream),
            service_fn(|req: Request<Incoming>| handle_request(req)),
        )
        .await
}

async fn accept_backoff(e: &io::Error) {
    error!(error = %e, "Failed to accept connection");
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}

/// Wait for Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => debug!("Received Ctrl+C"),
        _ = terminate => debug!("Received SIGTERM"),
    }
}

/// Create the listening socket with SO_REUSEADDR so restarts can rebind
/// while old connections sit in TIME_WAIT.
fn create_listener(addr: SocketAddr) -> io::Result<std::net::TcpListener> {
    let socket = socket2::Socket::new(
        match addr {
            SocketAddr::V4(_) => socket2::Domain::IPV4,
            SocketAddr::V6(_) => socket2::Domain::IPV6,
        },
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(ACCEPT_BACKLOG)?;

    Ok(socket.into())
}
