//! Shared application state for Axum routers.

use std::sync::Arc;

use edi_core::RequestProcessor;

use crate::config::ApiConfig;
use crate::reply::ReplyPolicy;

/// Application-wide state shared across the EDI routes.
#[derive(Clone)]
pub struct AppState {
    /// The processing engine. Stateless per request; shared by every handler.
    pub processor: Arc<RequestProcessor>,
    pub reply_policy: ReplyPolicy,
}

impl AppState {
    pub fn new(processor: Arc<RequestProcessor>, config: &ApiConfig) -> Self {
        Self {
            processor,
            reply_policy: ReplyPolicy::from_config(config),
        }
    }
}

crate::impl_from_ref!(Arc<RequestProcessor>, processor);
crate::impl_from_ref!(ReplyPolicy, reply_policy);
