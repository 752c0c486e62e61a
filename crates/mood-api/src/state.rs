use std::sync::Arc;

use crate::store::EntryStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: EntryStore,
}
