//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup, is read-only during request
//! handling and clones in O(1).

use crate::auth::SessionVerifier;
use crate::config::AppConfig;
use crate::repositories::{EnergyDataSource, PgEnergyDataSource};
use smart_vitals_shared::MetTable;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session token verifier with cached keys
    pub sessions: SessionVerifier,
    /// MET classifier used for estimates and backfill
    pub met_table: Arc<MetTable>,
    /// Reads behind the energy balance engine
    pub data: Arc<dyn EnergyDataSource>,
}

impl AppState {
    /// Create a new application state backed by PostgreSQL
    ///
    /// Derives the token keys from the config secret; call once at startup.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let data = Arc::new(PgEnergyDataSource::new(db.clone()));
        Self::with_data_source(db, config, data)
    }

    /// Create a state whose energy reads go through `data`
    pub fn with_data_source(
        db: PgPool,
        config: AppConfig,
        data: Arc<dyn EnergyDataSource>,
    ) -> Self {
        let sessions =
            SessionVerifier::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);
        let met_table = Arc::new(config.energy.met_table.clone());

        Self {
            db,
            config: Arc::new(config),
            sessions,
            met_table,
            data,
        }
    }

    /// State with a lazy pool that never connects and an empty in-memory data source
    #[cfg(test)]
    pub(crate) fn for_tests(config: AppConfig) -> Self {
        use crate::repositories::InMemoryEnergyDataSource;

        let pool = PgPool::connect_lazy(&config.database.url)
            .unwrap_or_else(|e| panic!("invalid test database url: {e}"));
        Self::with_data_source(pool, config, Arc::new(InMemoryEnergyDataSource::new()))
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the session verifier
    #[inline]
    pub fn sessions(&self) -> &SessionVerifier {
        &self.sessions
    }

    #[inline]
    pub fn met_table(&self) -> &MetTable {
        &self.met_table
    }

    #[inline]
    pub fn data(&self) -> &dyn EnergyDataSource {
        self.data.as_ref()
    }
}
