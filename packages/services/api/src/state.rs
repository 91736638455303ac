//! App state
//!
//! Shared by every handler. Everything in here is immutable after startup
//! (the codec wraps the signing secret; the store wraps the pool), so it is
//! cheap to clone per request and safe to share across them. Per-request
//! state lives in request extensions, never here.

use std::sync::Arc;

use pinboard_core::auth::TokenCodec;

use crate::config::Config;
use crate::db::Store;

#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub store: Store,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            codec: Arc::new(TokenCodec::new(config.secret_key.as_bytes())),
            store: Store::connect(&config.db_url).await?,
        })
    }
}
