//! Backend context shared by all handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use agora_client::{AgoraClient, Comment, Post, PostId, SharedSession};
use agora_sync::{CommentSource, PagedCollection, PostSource, ScrollTrigger, TriggerStrategy, DEFAULT_PAGE_SIZE};

/// One open comment thread.
pub struct Thread {
    pub comments: PagedCollection<Comment>,
    pub source: CommentSource,
    pub(crate) trigger: tokio::sync::Mutex<ScrollTrigger>,
}

/// Everything a handler needs beyond the state store: the API client, the
/// session it signs with, and the live collections.
pub struct AppContext {
    pub api: AgoraClient,
    pub session: SharedSession,
    pub feed: PagedCollection<Post>,
    pub(crate) feed_trigger: tokio::sync::Mutex<ScrollTrigger>,
    threads: Mutex<HashMap<PostId, Arc<Thread>>>,
    strategy: TriggerStrategy,
    page_size: u32,
}

impl AppContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, TriggerStrategy::default(), DEFAULT_PAGE_SIZE)
    }

    /// `strategy` decides which scroll events the lists react to.
    pub fn with_options(base_url: impl Into<String>, strategy: TriggerStrategy, page_size: u32) -> Self {
        let session = SharedSession::new();
        let api = AgoraClient::new(base_url, Arc::new(session.clone()));
        Self {
            api,
            session,
            feed: PagedCollection::with_page_size(page_size),
            feed_trigger: tokio::sync::Mutex::new(ScrollTrigger::new(strategy)),
            threads: Mutex::new(HashMap::new()),
            strategy,
            page_size,
        }
    }

    pub fn post_source(&self) -> PostSource {
        PostSource { posts: self.api.posts.clone(), reactions: self.api.reactions.clone() }
    }

    fn threads(&self) -> std::sync::MutexGuard<'_, HashMap<PostId, Arc<Thread>>> {
        self.threads.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The open thread of `post_id`, if any.
    pub fn thread(&self, post_id: PostId) -> Option<Arc<Thread>> {
        self.threads().get(&post_id).cloned()
    }

    /// The thread of `post_id`, opening an empty one if needed.
    pub fn thread_or_open(&self, post_id: PostId) -> Arc<Thread> {
        self.threads()
            .entry(post_id)
            .or_insert_with(|| Arc::new(self.new_thread(post_id)))
            .clone()
    }

    /// Replace the thread of `post_id` with an empty one. The old one is
    /// detached so its in-flight results are dropped.
    pub fn reopen_thread(&self, post_id: PostId) -> Arc<Thread> {
        let fresh = Arc::new(self.new_thread(post_id));
        if let Some(old) = self.threads().insert(post_id, fresh.clone()) {
            old.comments.detach();
        }
        fresh
    }

    pub fn close_thread(&self, post_id: PostId) -> bool {
        match self.threads().remove(&post_id) {
            Some(thread) => {
                thread.comments.detach();
                true
            }
            None => false,
        }
    }

    /// Whether `thread` is still the mounted thread of `post_id`. A thread
    /// captured before an await may have been closed or replaced since.
    pub fn is_current(&self, post_id: PostId, thread: &Thread) -> bool {
        self.threads()
            .get(&post_id)
            .is_some_and(|open| std::ptr::eq(Arc::as_ptr(open), thread))
    }

    /// Post ids of all open threads.
    pub fn open_threads(&self) -> Vec<PostId> {
        self.threads().keys().copied().collect()
    }

    /// Drop every collection, e.g. on logout.
    pub fn detach_all(&self) {
        self.feed.detach();
        for (_, thread) in self.threads().drain() {
            thread.comments.detach();
        }
    }

    fn new_thread(&self, post_id: PostId) -> Thread {
        Thread {
            comments: PagedCollection::with_page_size(self.page_size),
            source: CommentSource {
                post_id,
                comments: self.api.comments.clone(),
                reactions: self.api.reactions.clone(),
            },
            trigger: tokio::sync::Mutex::new(ScrollTrigger::new(self.strategy)),
        }
    }
}
