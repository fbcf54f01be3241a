use ulid::Ulid;

use super::Permission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// The subject a channel override applies to.
pub enum OverrideSubject {
	/// Applies to everyone holding the role.
	Role(Ulid),
	/// Applies to a single user. Member overrides outrank all role
	/// overrides on the same channel.
	Member(Ulid),
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
/// A channel-scoped allow/deny adjustment to a subject's base permissions.
///
/// `allow` and `deny` must not share a set bit. Stored data violating that
/// is tolerated: deny wins over allow within the same record.
pub struct ChannelOverride {
	/// The channel this override applies to.
	pub channel_id: Ulid,
	/// The role or member the override applies to.
	pub subject: OverrideSubject,
	/// Permissions granted by this override.
	pub allow: Permission,
	/// Permissions revoked by this override.
	pub deny: Permission,
}

impl ChannelOverride {
	/// Applies this override to a base permission set. Merging the allow
	/// mask before removing the deny mask keeps deny authoritative for
	/// bits present in both.
	pub fn apply(&self, base: Permission) -> Permission {
		base.merge(&self.allow).remove(&self.deny)
	}
}
