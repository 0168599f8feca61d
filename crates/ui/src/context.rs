use std::sync::Arc;

use services::ReaderService;

pub trait UiApp: Send + Sync {
    fn reader(&self) -> Arc<ReaderService>;
}

#[derive(Clone)]
pub struct AppContext {
    reader: Arc<ReaderService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            reader: app.reader(),
        }
    }

    #[must_use]
    pub fn reader(&self) -> Arc<ReaderService> {
        Arc::clone(&self.reader)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
