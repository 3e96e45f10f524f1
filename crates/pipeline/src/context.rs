//! Per-request context handed to every pipeline stage.

use sources::UserContext;
use std::collections::BTreeSet;

/// The active user plus the keywords parsed from their prompt
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub user: UserContext,
    /// Normalized prompt keywords; empty means "no prompt"
    pub keywords: BTreeSet<String>,
}

impl RequestContext {
    pub fn new(user: UserContext, keywords: BTreeSet<String>) -> Self {
        Self { user, keywords }
    }
}
