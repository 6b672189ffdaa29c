//! Memoizing cache for negotiated configurations and clients
//!
//! A [`ClientCache`] sits between a caller that names API versions and
//! the expensive machinery behind them. Per distinct version string it
//! pays at most once for version negotiation, and exactly once per
//! process for the base configuration load and the optional server
//! version check. Resolved configurations are stored under both the
//! requested string and the canonical negotiated string, so a later
//! request using the canonical form directly is a hit as well.
//!
//! Entries are never evicted; the maps grow with the number of distinct
//! version strings requested, which in practice is the small fixed set
//! a server exposes.
//!
//! # Example
//!
//! ```no_run
//! use capstan_api::ApiRegistry;
//! use capstan_client::{ClientCache, FixedConfigLoader, RestConfig};
//! # use capstan_client::{ClientFactory, Result, RestConfig as Cfg};
//! # use capstan_api::GroupVersion;
//! # struct MyFactory;
//! # #[async_trait::async_trait]
//! # impl ClientFactory for MyFactory {
//! #     type Client = ();
//! #     async fn matches_server_version(&self, _: Option<&()>, _: &Cfg) -> Result<()> { Ok(()) }
//! #     async fn negotiate_version(
//! #         &self,
//! #         _: Option<&()>,
//! #         _: &Cfg,
//! #         _: Option<&GroupVersion>,
//! #         _: &[GroupVersion],
//! #     ) -> Result<GroupVersion> { Ok(GroupVersion::core("v1")) }
//! #     async fn build(&self, _: &Cfg) -> Result<()> { Ok(()) }
//! # }
//!
//! # async fn example() -> capstan_client::Result<()> {
//! let loader = FixedConfigLoader::new(RestConfig::new("https://api.example.com"));
//! let registry = ApiRegistry::from_versions(["v1", "apps/v1"]);
//! let cache = ClientCache::new(loader, MyFactory, registry);
//!
//! // Negotiates once; the empty string means "server preferred".
//! let config = cache.client_config_for_version("").await?;
//! let client = cache.client_for_version("").await?;
//! # let _ = (config, client);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, trace};

use capstan_api::{ApiRegistry, GroupVersion};

use crate::config::RestConfig;
use crate::error::Result;
use crate::traits::{ClientFactory, ConfigLoader};

/// Base state established by the one-time bootstrap
struct DefaultState<C> {
    /// Version-independent configuration from the loader
    config: RestConfig,
    /// Bootstrap client handle; nothing materializes one today, so the
    /// version-check and negotiation collaborators must accept `None`
    client: Option<Arc<C>>,
}

/// A configuration whose version has been negotiated with the server
#[derive(Clone)]
struct ResolvedConfig {
    config: RestConfig,
    /// Canonical negotiated version; also present in
    /// `config.group_version`, kept unwrapped here so client storage
    /// never has to re-derive it
    canonical: GroupVersion,
}

/// Memoizing cache of negotiated configurations and constructed clients
///
/// Bound at construction to one [`ConfigLoader`], one [`ClientFactory`],
/// one [`ApiRegistry`], and one match-enforcement flag; discarded with
/// its owning process or session. Safe to share across tasks behind an
/// `Arc`.
pub struct ClientCache<L, F: ClientFactory> {
    loader: L,
    factory: F,
    registry: ApiRegistry,
    match_server_version: bool,

    /// One-time bootstrap slot; a failed bootstrap leaves it empty so
    /// the next caller retries
    default_state: OnceCell<DefaultState<F::Client>>,

    /// Resolved configurations, keyed by the requested string and again
    /// by its canonical negotiated form. The per-key cell single-flights
    /// negotiation; an uninitialized cell is equivalent to no entry.
    configs: DashMap<String, Arc<OnceCell<ResolvedConfig>>>,

    /// Completed clients, keyed by canonical version string only. An
    /// alias that negotiates to an already-built canonical version still
    /// misses here and constructs a fresh client; clients are keyed by
    /// the string actually passed in, except at the point of storage.
    clients: DashMap<String, Arc<F::Client>>,

    /// Single-flight guards for client construction, keyed by the
    /// requested string; entries are removed once the flight completes
    /// so they never serve as a second client cache
    in_flight: DashMap<String, Arc<OnceCell<Arc<F::Client>>>>,
}

impl<L, F> ClientCache<L, F>
where
    L: ConfigLoader,
    F: ClientFactory,
{
    /// Create a cache bound to `loader`, `factory`, and `registry`
    pub fn new(loader: L, factory: F, registry: ApiRegistry) -> Self {
        Self {
            loader,
            factory,
            registry,
            match_server_version: false,
            default_state: OnceCell::new(),
            configs: DashMap::new(),
            clients: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    /// Require a client/server version compatibility check during
    /// bootstrap
    pub fn with_match_server_version(mut self, enabled: bool) -> Self {
        self.match_server_version = enabled;
        self
    }

    /// The registry of group-versions this cache negotiates against
    pub fn registry(&self) -> &ApiRegistry {
        &self.registry
    }

    /// Version strings that currently map to a fully resolved
    /// configuration, in sorted order
    ///
    /// After a successful resolution this contains both the requested
    /// string and its canonical negotiated form.
    pub fn cached_versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = self
            .configs
            .iter()
            .filter(|entry| entry.value().initialized())
            .map(|entry| entry.key().clone())
            .collect();
        versions.sort();
        versions
    }

    /// Return the negotiated configuration for `version`
    ///
    /// An empty `version` means "use the server's preferred version".
    /// The first call for a distinct version string negotiates against
    /// the server; subsequent calls return the memoized result. The
    /// returned value is an independent copy; mutating it does not
    /// affect the cache.
    pub async fn client_config_for_version(&self, version: &str) -> Result<RestConfig> {
        Ok(self.resolve_config(version).await?.config)
    }

    /// Return a client for `version`, constructing one if needed
    ///
    /// Clients are stored under the canonical negotiated version string.
    /// Concurrent calls for the same string share one construction.
    pub async fn client_for_version(&self, version: &str) -> Result<Arc<F::Client>> {
        if let Some(client) = self.clients.get(version) {
            trace!(requested = version, "client cache hit");
            return Ok(Arc::clone(client.value()));
        }

        let cell = self.in_flight.entry(version.to_string()).or_default().clone();
        let result = cell
            .get_or_try_init(|| async {
                let resolved = self.resolve_config(version).await?;
                let client = Arc::new(self.factory.build(&resolved.config).await?);

                let canonical = resolved.canonical.to_string();
                debug!(requested = version, version = %canonical, "constructed api client");
                self.clients.insert(canonical, Arc::clone(&client));
                Ok(client)
            })
            .await
            .cloned();

        // The guard's job ends with the flight; dropping it keeps client
        // lookups keyed by canonical strings only, and a failed flight
        // leaves nothing behind to suppress a retry.
        self.in_flight.remove(version);
        result
    }

    /// Load the base configuration exactly once
    ///
    /// Runs the loader and, when enabled, the server version check. On
    /// failure the slot stays empty and the next caller retries; once
    /// populated it never changes.
    async fn ensure_default(&self) -> Result<&DefaultState<F::Client>> {
        self.default_state
            .get_or_try_init(|| async {
                let config = self.loader.client_config().await?;
                let client: Option<Arc<F::Client>> = None;

                if self.match_server_version {
                    self.factory
                        .matches_server_version(client.as_deref(), &config)
                        .await?;
                }

                debug!(host = %config.host, "bootstrapped base client configuration");
                Ok(DefaultState { config, client })
            })
            .await
    }

    /// Resolve `version` to a negotiated configuration, memoizing under
    /// both the requested and the canonical key
    async fn resolve_config(&self, version: &str) -> Result<ResolvedConfig> {
        let state = self.ensure_default().await?;

        if let Some(cell) = self.configs.get(version) {
            if let Some(resolved) = cell.get() {
                trace!(requested = version, "config cache hit");
                return Ok(resolved.clone());
            }
        }

        // Parse before creating any map entry: a malformed version must
        // leave the cache untouched.
        let preferred = if version.is_empty() {
            None
        } else {
            Some(GroupVersion::parse(version)?)
        };
        let registered = self.registry.group_versions()?;

        let cell = self.configs.entry(version.to_string()).or_default().clone();
        let resolved = cell
            .get_or_try_init(|| async {
                let mut config = state.config.clone();
                let negotiated = self
                    .factory
                    .negotiate_version(
                        state.client.as_deref(),
                        &config,
                        preferred.as_ref(),
                        &registered,
                    )
                    .await?;

                config.group_version = Some(negotiated.clone());
                config.apply_defaults();

                debug!(requested = version, version = %negotiated, "negotiated api version");
                Ok::<_, crate::error::Error>(ResolvedConfig {
                    config,
                    canonical: negotiated,
                })
            })
            .await?
            .clone();

        // Dual-key the result: the canonical string must hit this entry
        // without renegotiating, even though it may never have been
        // requested directly. The stored value is an independent copy.
        let canonical_key = resolved.canonical.to_string();
        if canonical_key != version {
            let canonical_cell = self.configs.entry(canonical_key).or_default().clone();
            let _ = canonical_cell.set(resolved.clone());
        }

        Ok(resolved)
    }
}
