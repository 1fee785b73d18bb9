use crate::core::{Result, StoreError};
use std::time::Duration;

/// Environment variable naming the backend host.
pub const ENV_HOST: &str = "ETCD_HOST";

/// Environment variable naming the backend port.
pub const ENV_PORT: &str = "ETCD_PORT";

/// Reserved host value selecting the embedded in-memory backend.
pub const MEMORY_ENDPOINT: &str = "mem:";

pub const DEFAULT_RETRIES: usize = 5;

/// Where the backend lives, resolved from a validated [`StoreConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Memory,
    Url(String),
    /// Backend handed in by the caller; never resolved from configuration.
    Provided,
}

impl Endpoint {
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

/// Backend connection configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend host, or `mem:` for the in-memory backend
    pub host: Option<String>,

    /// Backend port
    pub port: Option<String>,

    /// Connection attempts before giving up
    pub retries: usize,

    /// Delay before the second attempt; doubles per attempt. Zero retries immediately.
    pub retry_base_delay: Duration,

    /// Upper bound on the delay between attempts
    pub retry_max_delay: Duration,

    /// Connect and request timeout handed to the backend client
    pub connect_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration for `host:port`
    pub fn new(host: &str, port: &str) -> Self {
        Self {
            host: Some(host.to_string()),
            port: Some(port.to_string()),
            ..Self::unset()
        }
    }

    /// Configuration selecting the in-memory backend
    pub fn in_memory() -> Self {
        Self::new(MEMORY_ENDPOINT, "0")
    }

    fn unset() -> Self {
        Self {
            host: None,
            port: None,
            retries: DEFAULT_RETRIES,
            retry_base_delay: Duration::ZERO,
            retry_max_delay: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Read `ETCD_HOST` and `ETCD_PORT` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Missing variables stay
    /// `None` and are reported by [`StoreConfig::validate`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup(ENV_HOST),
            port: lookup(ENV_PORT),
            ..Self::unset()
        }
    }

    /// Parse from an endpoint URL
    ///
    /// Format: `http://host:port`, or `mem:` for the in-memory backend.
    pub fn from_url(url: &str) -> Result<Self> {
        if url == MEMORY_ENDPOINT || url == "mem" {
            return Ok(Self::in_memory());
        }

        let rest = url
            .strip_prefix("http://")
            .ok_or_else(|| StoreError::Config(format!("URL must start with 'http://': {}", url)))?;
        let rest = rest.trim_end_matches('/');

        let (host, port) = rest
            .rsplit_once(':')
            .ok_or_else(|| StoreError::Config(format!("URL has no port: {}", url)))?;

        let config = Self::new(host, port);
        config.validate()?;
        Ok(config)
    }

    /// Set the host
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Set the port
    pub fn port(mut self, port: &str) -> Self {
        self.port = Some(port.to_string());
        self
    }

    /// Set the number of connection attempts
    pub fn retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Set the backoff between connection attempts
    pub fn retry_delay(mut self, base: Duration, max: Duration) -> Self {
        self.retry_base_delay = base;
        self.retry_max_delay = max;
        self
    }

    /// Set connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.endpoint().map(|_| ())
    }

    /// Resolve the configured endpoint
    pub fn endpoint(&self) -> Result<Endpoint> {
        let host = match self.host.as_deref().map(str::trim) {
            Some(host) if !host.is_empty() => host,
            _ => return Err(StoreError::Config("No ETCD HOST specified, can't open ETCD.".into())),
        };
        let port = match self.port.as_deref().map(str::trim) {
            Some(port) if !port.is_empty() => port,
            _ => return Err(StoreError::Config("No ETCD PORT specified, can't open ETCD.".into())),
        };

        if self.retries == 0 {
            return Err(StoreError::Config("retries must be > 0".into()));
        }

        if host == MEMORY_ENDPOINT || host == "mem" {
            return Ok(Endpoint::Memory);
        }

        let port: u16 = port
            .parse()
            .map_err(|_| StoreError::Config(format!("Invalid ETCD PORT '{}'", port)))?;
        Ok(Endpoint::Url(format!("http://{}:{}", host, port)))
    }

    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn backoff(&self, attempt: usize) -> Duration {
        let cap = self.retry_max_delay.max(self.retry_base_delay);
        let mut delay = self.retry_base_delay;
        for _ in 1..attempt {
            delay = delay.saturating_mul(2).min(cap);
        }
        delay
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}
