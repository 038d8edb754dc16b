// Server module entry point
// Explicit server lifecycle: construct, bind, serve

pub mod connection;
pub mod listener;
pub mod signal;

use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::logger;
use connection::accept_connection;

/// An unstarted server holding its immutable state.
///
/// Construction performs no I/O; binding the listener is a separate,
/// explicitly invoked step.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Bind the configured address and return a server ready to accept.
    pub fn bind(&self) -> Result<BoundServer, Box<dyn std::error::Error>> {
        let addr = self.state.config.get_socket_addr()?;
        let listener = listener::create_listener(addr)?;
        Ok(BoundServer {
            listener,
            state: Arc::clone(&self.state),
            active_connections: Arc::new(AtomicUsize::new(0)),
        })
    }
}

/// A server with a bound listener, ready to accept connections.
pub struct BoundServer {
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
}

impl BoundServer {
    /// The address actually bound, useful when the configured port is 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until a shutdown signal arrives.
    ///
    /// Each accepted connection is served on its own task; the accept loop
    /// itself never blocks on request handling.
    pub async fn serve(self) -> std::io::Result<()> {
        let shutdown = signal::shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            accept_connection(
                                stream,
                                peer_addr,
                                &self.state,
                                &self.active_connections,
                            );
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = &mut shutdown => {
                    logger::log_shutdown();
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, PerformanceConfig, RoutesConfig, ServerConfig};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            routes: RoutesConfig::default(),
        }
    }

    async fn raw_request(addr: SocketAddr, request: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    #[tokio::test]
    async fn test_bind_reports_local_addr() {
        let server = Server::new(test_config());
        let bound = server.bind().unwrap();
        let addr = bound.local_addr().unwrap();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_serve_round_trip() {
        let server = Server::new(test_config());
        let bound = server.bind().unwrap();
        let addr = bound.local_addr().unwrap();
        let handle = tokio::spawn(bound.serve());

        let response = raw_request(
            addr,
            "GET /books HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains(r#"{"message":"List of books"}"#));

        let response = raw_request(
            addr,
            "DELETE /nope HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 404"));
        assert!(response.contains(r#"{"error":"Not Found"}"#));

        handle.abort();
    }
}
