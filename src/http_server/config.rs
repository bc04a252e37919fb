//! HTTP Server Configuration
//!
//! Bind host and port. CORS is fixed and lives in the server module.

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Host name or address to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 8080)
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl HttpServerConfig {
    /// Get the `host:port` string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
