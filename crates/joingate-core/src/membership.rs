use std::sync::Arc;

use crate::{
    domain::{ChannelId, User, UserId},
    notices::{AdminChannel, AdminNotice},
    ports::MembershipDirectory,
    Result,
};

/// A user's standing in the gating channel, derived fresh for every event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MembershipStatus {
    Member,
    Administrator,
    Creator,
    /// Any other directory status (`left`, `kicked`, `restricted`, ...).
    NotMember,
    /// The directory lookup failed; gated like `NotMember`.
    Unknown,
}

impl MembershipStatus {
    /// Map a raw directory status. Exact match only.
    pub fn from_directory(raw: &str) -> Self {
        match raw {
            "member" => MembershipStatus::Member,
            "administrator" => MembershipStatus::Administrator,
            "creator" => MembershipStatus::Creator,
            _ => MembershipStatus::NotMember,
        }
    }

    pub fn is_authorized(self) -> bool {
        matches!(
            self,
            MembershipStatus::Member | MembershipStatus::Administrator | MembershipStatus::Creator
        )
    }
}

/// Channel-membership check in front of every gated event.
///
/// Holds no per-user state: each call performs exactly one directory lookup.
pub struct MembershipGate {
    directory: Arc<dyn MembershipDirectory>,
    channel: ChannelId,
}

impl MembershipGate {
    pub fn new(directory: Arc<dyn MembershipDirectory>, channel: ChannelId) -> Self {
        Self { directory, channel }
    }

    /// Look the user up and classify; lookup errors are returned to the caller.
    pub async fn check(&self, user: UserId) -> Result<MembershipStatus> {
        let raw = self.directory.member_status(&self.channel, user).await?;
        Ok(MembershipStatus::from_directory(&raw))
    }

    /// Classify for gating. A failed lookup yields `Unknown` and an admin notice.
    pub async fn evaluate(&self, user: &User, admin: &AdminChannel) -> MembershipStatus {
        match self.check(user.id).await {
            Ok(status) => {
                tracing::debug!(user = %user, ?status, channel = %self.channel, "membership checked");
                status
            }
            Err(e) => {
                tracing::error!(user = %user, channel = %self.channel, error = %e, "membership lookup failed");
                admin.notify(AdminNotice::error(&e, user)).await;
                MembershipStatus::Unknown
            }
        }
    }
}
