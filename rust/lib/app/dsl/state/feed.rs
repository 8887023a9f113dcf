//! Feed state: stored at `feed/posts`.

use agora_client::{Post, PostId};
use agora_sync::CollectionView;
use serde::{Deserialize, Serialize};

/// The global post feed as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedState {
    pub items: Vec<Post>,
    pub has_more: bool,
    pub loading: bool,
    pub reloading: bool,
    /// Posts with a reaction, edit or delete in flight.
    pub updating: Vec<PostId>,
    /// Post whose inline editor is open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<PostId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedState {
    pub const PATH: &'static str = "feed/posts";

    pub fn from_view(view: CollectionView<Post>, editing: Option<PostId>, error: Option<String>) -> Self {
        Self {
            items: view.items,
            has_more: view.flags.has_more,
            loading: view.flags.loading,
            reloading: view.flags.reloading,
            updating: view.updating,
            editing,
            error,
        }
    }

    pub fn is_updating(&self, id: PostId) -> bool {
        self.updating.contains(&id)
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::from_view(CollectionView::default(), None, None)
    }
}
