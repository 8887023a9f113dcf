//! Paginated collection synchronization.
//!
//! Keeps a local, ordered, deduplicated copy of a server-side list that is
//! only reachable one page at a time:
//!
//! - [`PagedCollection`]: paging flags, merge, reset and detach.
//! - [`ScrollTrigger`]: decides when the renderer has reached the end.
//! - Reconciliation: after a single-item mutation, re-fetch only that
//!   item and splice it back in place.
//!
//! The collection is generic over the item type. Network access goes
//! through the [`PageSource`], [`ItemSource`] and [`ReactionSource`]
//! seams; [`PostSource`] and [`CommentSource`] bind them to the HTTP
//! client.
//!
//! ```ignore
//! let feed = PagedCollection::<Post>::new();
//! let source = PostSource { posts: api.posts.clone(), reactions: api.reactions.clone() };
//! feed.load_page(false, &source).await;
//! let mut trigger = ScrollTrigger::default();
//! trigger.drive(ScrollEvent::Scroll(viewport), &feed, &source).await;
//! ```

pub mod collection;
pub mod reconcile;
pub mod source;
pub mod trigger;

pub use collection::{merge, CollectionView, LoadOutcome, PagedCollection, PagingFlags, DEFAULT_PAGE_SIZE};
pub use reconcile::{plan_toggle, MutationOutcome, ReactionCall};
pub use source::{CommentSource, Identified, ItemSource, PageSource, PostSource, Reactable, ReactionSource};
pub use trigger::{ScrollEvent, ScrollTrigger, TriggerStrategy, Viewport, DEFAULT_THRESHOLD};
