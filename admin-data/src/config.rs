//! Builder-style configuration for constructing service bundles.

use std::path::PathBuf;
use std::time::Duration;

use pagination::PageRequest;
use url::Url;

/// Which adapter family a service bundle is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    /// Local store (in-memory, or JSON files when a data directory is set).
    Mock,
    /// REST client against a remote admin API.
    Remote,
}

/// Configuration consumed by the app service bundles and controllers.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    mode: ServiceMode,
    base_url: Option<Url>,
    data_dir: Option<PathBuf>,
    debounce_delay: Duration,
    page_size: u32,
    rng_seed: Option<u64>,
    request_timeout: Duration,
}

impl ServiceConfig {
    /// Default quiet period before a search keystroke becomes a query.
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

    /// Mock mode over an in-memory store.
    #[must_use]
    pub const fn mock() -> Self {
        Self {
            mode: ServiceMode::Mock,
            base_url: None,
            data_dir: None,
            debounce_delay: Self::DEFAULT_DEBOUNCE,
            page_size: PageRequest::DEFAULT_PAGE_SIZE,
            rng_seed: None,
            request_timeout: Duration::from_secs(15),
        }
    }

    /// Remote mode against `base_url`.
    #[must_use]
    pub fn remote(base_url: Url) -> Self {
        Self {
            mode: ServiceMode::Remote,
            base_url: Some(base_url),
            ..Self::mock()
        }
    }

    /// Persist mock collections as JSON files under `data_dir`.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = Some(data_dir);
        self
    }

    /// Override the search debounce quiet period.
    #[must_use]
    pub const fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Override the page size used by paginated list views.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Pin identifier generation for deterministic tests.
    #[must_use]
    pub const fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// Override the remote request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// The configured adapter family.
    #[must_use]
    pub const fn mode(&self) -> ServiceMode {
        self.mode
    }

    /// Remote API base URL, when remote mode is configured.
    #[must_use]
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Data directory for persistent mock collections, when set.
    #[must_use]
    pub fn data_dir(&self) -> Option<&PathBuf> {
        self.data_dir.as_ref()
    }

    /// Search debounce quiet period.
    #[must_use]
    pub const fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    /// Page size for paginated list views.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Pinned identifier RNG seed, when set.
    #[must_use]
    pub const fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Remote request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::mock()
    }
}
