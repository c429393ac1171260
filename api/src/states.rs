use crate::db::PostRepository;

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// Cloned into every handler. The repository wraps a pooled handle, so
/// clones share connections rather than opening new ones.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostRepository,
}
