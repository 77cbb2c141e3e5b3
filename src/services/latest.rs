use std::sync::Arc;
use tokio::sync::RwLock;

/// The single shared "latest rendered output" slot.
///
/// Written only by the snapshot worker, read by every request handler. A
/// publish replaces the whole document behind one reference swap, so readers
/// always see either the previous complete document or the new one.
#[derive(Debug, Default)]
pub struct LatestView {
    html: RwLock<Option<Arc<String>>>,
}

pub type SharedLatestView = Arc<LatestView>;

impl LatestView {
    pub fn new() -> SharedLatestView {
        Arc::new(Self::default())
    }

    /// Replace the published document.
    pub async fn publish(&self, html: String) {
        let mut slot = self.html.write().await;
        *slot = Some(Arc::new(html));
    }

    /// The currently published document, or `None` before the first
    /// successful refresh.
    pub async fn current(&self) -> Option<Arc<String>> {
        self.html.read().await.clone()
    }
}
