//! Wire records for the social API.
//!
//! These are local shadows of server-owned entities. Fields the client does
//! not rely on are tolerated with `#[serde(default)]`; wire names are
//! camelCase, with aliases for the capitalized variants some endpoints emit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    };
}

id_type!(
    /// Post identifier.
    PostId
);
id_type!(
    /// Comment identifier.
    CommentId
);
id_type!(
    /// Identifier of a reaction record (used to remove it).
    ReactionId
);
id_type!(UserId);
id_type!(FriendRequestId);

// ── Reactions ───────────────────────────────────────────────────────

/// Named reaction a user can attach to a post.
///
/// Comments only support a single untyped reaction, modelled as `Like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Like,
    Love,
    Happy,
    Celebrate,
    Insightful,
    Funny,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 6] = [
        ReactionKind::Like,
        ReactionKind::Love,
        ReactionKind::Happy,
        ReactionKind::Celebrate,
        ReactionKind::Insightful,
        ReactionKind::Funny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Love => "love",
            ReactionKind::Happy => "happy",
            ReactionKind::Celebrate => "celebrate",
            ReactionKind::Insightful => "insightful",
            ReactionKind::Funny => "funny",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown reaction '{}'", s))
    }
}

/// The current actor's reaction on an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReaction {
    pub id: ReactionId,
    /// Kind as sent by the server. Absent for comment reactions.
    #[serde(default, alias = "ReactionName", skip_serializing_if = "Option::is_none")]
    pub reaction_name: Option<String>,
}

impl UserReaction {
    /// Kind of this reaction; untyped reactions read as `Like`.
    pub fn kind(&self) -> Option<ReactionKind> {
        match &self.reaction_name {
            Some(name) => name.parse().ok(),
            None => Some(ReactionKind::Like),
        }
    }
}

/// Aggregate count for one reaction kind on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCount {
    pub reaction_name: String,
    #[serde(default)]
    pub count: u32,
}

// ── Users ───────────────────────────────────────────────────────────

/// Author / directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
}

/// The signed-in actor's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
}

/// Incoming friend request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: FriendRequestId,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Answer to a friend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Accepted,
    Declined,
}

impl fmt::Display for FriendRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriendRequestStatus::Accepted => f.write_str("accepted"),
            FriendRequestStatus::Declined => f.write_str("declined"),
        }
    }
}

// ── Posts & comments ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(default, alias = "UserReaction", skip_serializing_if = "Option::is_none")]
    pub user_reaction: Option<UserReaction>,
    #[serde(default)]
    pub count: Vec<ReactionCount>,
}

impl Post {
    pub fn reaction_count(&self, kind: ReactionKind) -> u32 {
        self.count
            .iter()
            .filter(|c| c.reaction_name.eq_ignore_ascii_case(kind.as_str()))
            .map(|c| c.count)
            .sum()
    }

    pub fn total_reactions(&self) -> u32 {
        self.count.iter().map(|c| c.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(
        default,
        rename = "userReactionOnComment",
        alias = "UserReactionOnComment",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_reaction: Option<UserReaction>,
    #[serde(default)]
    pub count: u32,
}

// ── Request bodies ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_no: String,
}

/// Title/description pair used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub message: String,
    pub post_id: PostId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPatch {
    pub message: String,
}
