use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::auth::CredentialCheck;
use crate::config::Config;
use crate::screening::ScreeningEngine;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub engine: ScreeningEngine,
    /// Pluggable credential check. Default: `StaticSecret` from config.
    pub credentials: Arc<dyn CredentialCheck>,
    pub config: Config,
    /// The single-occupant session. The mutex serializes events so the
    /// state machine stays the sole writer.
    pub session: Arc<Mutex<Session>>,
}
