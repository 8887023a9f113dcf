//! Targeted single-item reconciliation.
//!
//! After a mutation on one item the collection re-fetches just that item
//! and splices it back at the same position, or removes it. Nothing is
//! changed locally before the server confirms. Each item admits one
//! mutation at a time; other items stay free.

use agora_client::{ApiError, ReactionKind};

use crate::collection::PagedCollection;
use crate::source::{Identified, ItemSource, Reactable, ReactionSource};

/// Result of a single-item mutation.
#[derive(Debug)]
pub enum MutationOutcome {
    /// The item was re-fetched and replaced in place.
    Replaced,
    /// The item was removed from the collection.
    Removed,
    /// A mutation on this item is already in flight.
    Busy,
    /// No item with this identifier is loaded.
    Missing,
    /// The collection was detached while the call was in flight.
    Discarded,
    Failed(ApiError),
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Replaced | MutationOutcome::Removed)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            MutationOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Which call a reaction toggle resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ReactionCall {
    Add(ReactionKind),
    Remove(agora_client::ReactionId),
}

/// Same kind as the actor's current reaction removes it; anything else
/// adds the requested kind and leaves replacing the old one to the server.
pub fn plan_toggle<T: Reactable>(item: &T, kind: ReactionKind) -> ReactionCall {
    match item.user_reaction() {
        Some(current) if current.kind() == Some(kind) => ReactionCall::Remove(current.id),
        _ => ReactionCall::Add(kind),
    }
}

impl<T: Identified + Clone> PagedCollection<T> {
    /// Claim the per-item guard. Returns the current item and the
    /// generation the mutation belongs to.
    fn begin(&self, id: &T::Id) -> Result<(T, u64), MutationOutcome> {
        let mut st = self.state();
        let Some(pos) = st.position(id) else {
            return Err(MutationOutcome::Missing);
        };
        if !st.updating.insert(id.clone()) {
            return Err(MutationOutcome::Busy);
        }
        Ok((st.items[pos].clone(), st.generation))
    }

    fn finish(&self, id: &T::Id, generation: u64) {
        let mut st = self.state();
        if st.generation == generation {
            st.updating.remove(id);
        }
    }

    /// Replace in place; cursor and has-more are untouched.
    fn splice(&self, id: &T::Id, generation: u64, fresh: T) -> MutationOutcome {
        let mut st = self.state();
        if st.generation != generation {
            return MutationOutcome::Discarded;
        }
        match st.position(id) {
            Some(pos) => {
                st.items[pos] = fresh;
                MutationOutcome::Replaced
            }
            None => MutationOutcome::Missing,
        }
    }

    fn evict(&self, id: &T::Id, generation: u64) -> MutationOutcome {
        let mut st = self.state();
        if st.generation != generation {
            return MutationOutcome::Discarded;
        }
        match st.position(id) {
            Some(pos) => {
                st.items.remove(pos);
                MutationOutcome::Removed
            }
            None => MutationOutcome::Missing,
        }
    }

    async fn refetch<I>(&self, id: &T::Id, generation: u64, items: &I) -> MutationOutcome
    where
        I: ItemSource<T> + ?Sized,
    {
        match items.fetch_item(id).await {
            Ok(fresh) => self.splice(id, generation, fresh),
            // Deleted elsewhere in the meantime.
            Err(e) if e.is_not_found() => self.evict(id, generation),
            Err(e) => {
                tracing::warn!(?id, error = %e, "item refresh failed");
                MutationOutcome::Failed(e)
            }
        }
    }

    /// Re-fetch one item and replace it in place.
    pub async fn refresh_item<I>(&self, id: &T::Id, items: &I) -> MutationOutcome
    where
        I: ItemSource<T> + ?Sized,
    {
        let generation = match self.begin(id) {
            Ok((_, generation)) => generation,
            Err(outcome) => return outcome,
        };
        let outcome = self.refetch(id, generation, items).await;
        self.finish(id, generation);
        outcome
    }

    /// Toggle the actor's reaction, then re-fetch the item.
    pub async fn toggle_reaction<R, I>(&self, id: &T::Id, kind: ReactionKind, reactions: &R, items: &I) -> MutationOutcome
    where
        T: Reactable,
        R: ReactionSource<T> + ?Sized,
        I: ItemSource<T> + ?Sized,
    {
        let (current, generation) = match self.begin(id) {
            Ok(claimed) => claimed,
            Err(outcome) => return outcome,
        };

        let call = plan_toggle(&current, kind);
        tracing::debug!(?id, ?call, "toggling reaction");
        let result = match call {
            ReactionCall::Remove(reaction) => reactions.remove_reaction(reaction).await,
            ReactionCall::Add(kind) => reactions.add_reaction(id, kind).await,
        };

        let outcome = match result {
            Ok(()) => self.refetch(id, generation, items).await,
            Err(e) => {
                tracing::warn!(?id, error = %e, "reaction toggle failed");
                MutationOutcome::Failed(e)
            }
        };
        self.finish(id, generation);
        outcome
    }

    /// Update an item, then re-fetch it.
    pub async fn edit_item<I>(&self, id: &T::Id, patch: &I::Patch, items: &I) -> MutationOutcome
    where
        I: ItemSource<T> + ?Sized,
    {
        let generation = match self.begin(id) {
            Ok((_, generation)) => generation,
            Err(outcome) => return outcome,
        };

        let outcome = match items.update_item(id, patch).await {
            Ok(()) => self.refetch(id, generation, items).await,
            Err(e) => {
                tracing::warn!(?id, error = %e, "item update failed");
                MutationOutcome::Failed(e)
            }
        };
        self.finish(id, generation);
        outcome
    }

    /// Delete an item and drop it from the collection. No re-fetch.
    pub async fn delete_item<I>(&self, id: &T::Id, items: &I) -> MutationOutcome
    where
        I: ItemSource<T> + ?Sized,
    {
        let generation = match self.begin(id) {
            Ok((_, generation)) => generation,
            Err(outcome) => return outcome,
        };

        let outcome = match items.delete_item(id).await {
            Ok(()) => self.evict(id, generation),
            Err(e) => {
                tracing::warn!(?id, error = %e, "item delete failed");
                MutationOutcome::Failed(e)
            }
        };
        self.finish(id, generation);
        outcome
    }
}
