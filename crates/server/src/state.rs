//! Shared application state.

use firmo_rules::RuleEngine;

use crate::store::Database;

pub struct AppState {
    pub db: Database,
    pub engine: RuleEngine,
}
