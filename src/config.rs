/// Port the service listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 3009;

/// Records the server starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedData {
    Empty,
    Sample,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub seed: SeedData,
    pub port: u16,
    pub host: String,
}

impl ServerConfig {
    pub fn new(seed: SeedData) -> Self {
        Self {
            seed,
            port: DEFAULT_PORT,
            host: "127.0.0.1".to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::new(SeedData::Empty)
    }

    pub fn sample() -> Self {
        Self::new(SeedData::Sample)
    }

    /// Port `0` lets the OS pick a free port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub(crate) fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_fixed_port_with_sample_users() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3009);
        assert_eq!(config.seed, SeedData::Sample);
        assert_eq!(config.bind_addr(), "127.0.0.1:3009");
    }

    #[test]
    fn builders_override_address() {
        let config = ServerConfig::empty().with_port(0).with_host("0.0.0.0");
        assert_eq!(config.seed, SeedData::Empty);
        assert_eq!(config.bind_addr(), "0.0.0.0:0");
    }
}
