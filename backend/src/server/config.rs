//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use backend::outbound::persistence::DbPool;
use backend::settings::IdentitySettings;
use url::Url;

/// Everything [`super::create_server`] needs beyond the health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) public_origin: Url,
    pub(crate) code_ttl: chrono::Duration,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity: Option<IdentitySettings>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        public_origin: Url,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            public_origin,
            code_ttl: backend::domain::verification::DEFAULT_CODE_TTL,
            db_pool: None,
            identity: None,
        }
    }

    /// Use Diesel repositories instead of in-memory fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Sign users in against a real identity provider.
    #[must_use]
    pub fn with_identity(mut self, identity: IdentitySettings) -> Self {
        self.identity = Some(identity);
        self
    }

    #[must_use]
    pub fn with_code_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.code_ttl = ttl;
        self
    }
}
