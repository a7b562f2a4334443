//! Server URL detection
//!
//! Rebuilds `scheme://host[:port]` for the current request from a snapshot of
//! CGI-style server variables (`HTTP_HOST`, `SERVER_PORT`, forwarded headers,
//! and so on). Forwarded headers are only trusted when proxy support is
//! switched on.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub const HTTP_HOST: &str = "HTTP_HOST";
pub const HTTP_SCHEME: &str = "HTTP_SCHEME";
pub const HTTPS: &str = "HTTPS";
pub const SERVER_NAME: &str = "SERVER_NAME";
pub const SERVER_PORT: &str = "SERVER_PORT";
pub const REQUEST_URI: &str = "REQUEST_URI";
pub const SSL_HTTPS: &str = "SSL_HTTPS";
pub const HTTP_X_FORWARDED_HOST: &str = "HTTP_X_FORWARDED_HOST";
pub const HTTP_X_FORWARDED_PORT: &str = "HTTP_X_FORWARDED_PORT";
pub const HTTP_X_FORWARDED_PROTO: &str = "HTTP_X_FORWARDED_PROTO";

static HOST_WITH_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<host>.*?):(?P<port>\d+)$").expect("valid host:port pattern"));

/// Snapshot of server/request variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEnv {
    vars: HashMap<String, String>,
}

impl ServerEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment (CGI gateways export the
    /// request as environment variables)
    pub fn from_process_env() -> Self {
        std::env::vars().collect()
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Builder-style [`ServerEnv::set`]
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Whether the variable is present at all, even if empty
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Value of a variable; empty values count as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ServerEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Path appended after the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestPath {
    /// Scheme and host only
    #[default]
    None,
    /// The current request URI (`REQUEST_URI`)
    Current,
    /// An explicit path
    Explicit(String),
}

impl From<&str> for RequestPath {
    fn from(path: &str) -> Self {
        Self::Explicit(path.to_string())
    }
}

impl From<bool> for RequestPath {
    fn from(current: bool) -> Self {
        if current { Self::Current } else { Self::None }
    }
}

/// Helper producing the absolute URL of the running server
#[derive(Debug, Clone, Default)]
pub struct ServerUrl {
    env: ServerEnv,
    use_proxy: bool,
    scheme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
}

impl ServerUrl {
    pub fn new(env: ServerEnv) -> Self {
        Self {
            env,
            ..Self::default()
        }
    }

    /// Trust `X-Forwarded-*` headers when detecting scheme, host and port
    pub fn set_use_proxy(&mut self, use_proxy: bool) -> &mut Self {
        self.use_proxy = use_proxy;
        self
    }

    pub fn use_proxy(&self) -> bool {
        self.use_proxy
    }

    pub fn set_scheme<S: Into<String>>(&mut self, scheme: S) -> &mut Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Set the host verbatim; the detected port is appended when it is not
    /// the scheme's default
    pub fn set_host<S: Into<String>>(&mut self, host: S) -> &mut Self {
        self.host = Some(host.into());
        self
    }

    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Build the server URL followed by `path`
    pub fn url<P: Into<RequestPath>>(&self, path: P) -> String {
        let path = match path.into() {
            RequestPath::None => String::new(),
            RequestPath::Current => self.env.get(REQUEST_URI).unwrap_or_default().to_string(),
            RequestPath::Explicit(path) => path,
        };
        format!(
            "{}://{}{}",
            self.scheme(),
            self.host().unwrap_or_default(),
            path
        )
    }

    /// Build the server URL without a path
    pub fn base_url(&self) -> String {
        self.url(RequestPath::None)
    }

    pub fn scheme(&self) -> String {
        if let Some(scheme) = &self.scheme {
            return scheme.clone();
        }
        if let Some(scheme) = self.scheme_from_proxy() {
            return scheme;
        }

        let https_on = self
            .env
            .get(HTTPS)
            .map(|value| matches!(value.to_lowercase().as_str(), "on" | "true" | "1"))
            .unwrap_or(false);
        let scheme_header = self.env.get(HTTP_SCHEME) == Some("https");

        if https_on || scheme_header || self.port() == Some(443) || self.is_reversed_proxy() {
            "https".to_string()
        } else {
            "http".to_string()
        }
    }

    pub fn port(&self) -> Option<u16> {
        if self.port.is_some() {
            return self.port;
        }
        if let Some(port) = self.port_from_proxy() {
            return Some(port);
        }
        let server_port = self.env.get(SERVER_PORT).filter(|port| *port != "0")?;
        if self.is_reversed_proxy() {
            return Some(443);
        }
        server_port.trim().parse().ok()
    }

    pub fn host(&self) -> Option<String> {
        if let Some(host) = &self.host {
            return Some(self.with_port(host));
        }
        if let Some(host) = self.host_from_proxy() {
            return Some(self.with_port(&host));
        }

        if let Some(http_host) = self.env.get(HTTP_HOST) {
            if self.env.contains(SERVER_PORT) {
                if let Some(captures) = HOST_WITH_PORT.captures(http_host) {
                    let server_port = self
                        .env
                        .get(SERVER_PORT)
                        .and_then(|port| port.trim().parse::<u32>().ok());
                    let host_port = captures["port"].parse::<u32>().ok();
                    if host_port.is_some() && host_port == server_port {
                        return Some(self.with_port(&captures["host"]));
                    }
                    // Port forwarding: the Host header is what the client used.
                    return Some(http_host.to_string());
                }
            }
            return Some(self.with_port(http_host));
        }

        if self.env.contains(SERVER_PORT) {
            if let Some(name) = self.env.get(SERVER_NAME) {
                return Some(self.with_port(name));
            }
        }
        None
    }

    fn with_port(&self, host: &str) -> String {
        let port = self.port();
        let default_port = match self.scheme().as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };
        match port {
            None => host.to_string(),
            Some(port) if Some(port) == default_port => host.to_string(),
            Some(port) => format!("{host}:{port}"),
        }
    }

    fn is_reversed_proxy(&self) -> bool {
        self.env.get(HTTP_X_FORWARDED_PROTO) == Some("https")
    }

    fn scheme_from_proxy(&self) -> Option<String> {
        if !self.use_proxy {
            return None;
        }
        if let Some(ssl) = self.env.get(SSL_HTTPS) {
            if matches!(ssl.to_lowercase().as_str(), "on" | "1") {
                return Some("https".to_string());
            }
        }
        self.env
            .get(HTTP_X_FORWARDED_PROTO)
            .map(|proto| proto.trim().to_lowercase())
            .filter(|proto| !proto.is_empty())
    }

    fn host_from_proxy(&self) -> Option<String> {
        if !self.use_proxy {
            return None;
        }
        let forwarded = self.env.get(HTTP_X_FORWARDED_HOST)?;
        // The last entry is the host closest to this server.
        let host = forwarded.rsplit(',').next().unwrap_or(forwarded).trim();
        (!host.is_empty()).then(|| host.to_string())
    }

    fn port_from_proxy(&self) -> Option<u16> {
        if !self.use_proxy {
            return None;
        }
        self.env
            .get(HTTP_X_FORWARDED_PORT)
            .and_then(|port| port.trim().parse().ok())
    }
}
