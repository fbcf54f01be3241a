use bitmask_enum::bitmask;
use chrono::{DateTime, Utc};
use ulid::Ulid;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
/// A role that can be granted to members of a space.
/// Roles carry a single combined permission mask; precedence between roles
/// only matters when channel overrides are applied.
pub struct Role {
	/// The unique identifier for the role.
	pub id: Ulid,
	/// The space this role belongs to.
	pub space_id: Ulid,
	/// The name of the role.
	pub name: String,
	/// Display color, 0xRRGGBB.
	pub color: Option<i32>,
	/// Position in the space's role list. Higher position wins when
	/// channel overrides conflict.
	pub position: i32,
	/// The permissions granted by this role.
	pub permissions: Permission,
	/// Whether this is the space's implicit "everyone" role. Exactly one
	/// role per space is the default; it is held by every member and by
	/// guests, and can be edited but never deleted.
	pub is_default: bool,
	/// System roles cannot be deleted.
	pub is_system: bool,
	/// The time the role was created.
	pub created_at: DateTime<Utc>,
}

#[bitmask(i128)]
pub enum Permission {
	/// Can do anything. Every other bit is implied.
	Administrator,
	/// Can see the space's channels.
	ViewChannels,
	/// Can see channels marked as admin channels.
	ViewAdminChannel,
	/// Can edit the space itself (name, icon, publicness).
	ManageSpace,
	/// Can create/edit/delete channels, and remove portals onto them.
	ManageChannels,
	/// Can create/edit/delete roles.
	ManageRoles,
	/// Can kick/ban members and edit their role assignments.
	ManageMembers,
	/// Can create invite codes.
	CreateInvites,
	/// Can revoke other users' invite codes.
	ManageInvites,
	/// Can send messages.
	SendMessages,
	/// Can delete or edit other users' messages.
	ManageMessages,
	/// Can embed link previews.
	EmbedLinks,
	/// Can attach files to messages.
	AttachFiles,
	/// Can add reactions to messages.
	AddReactions,
	/// Can mention @everyone.
	MentionEveryone,
	/// Can pin messages.
	PinMessages,
	/// Can create threads.
	CreateThreads,
	/// Can archive/delete/lock threads.
	ManageThreads,
	/// Can create a portal into this space from another space's channel.
	CreatePortal,
	/// Can submit a portal invite to another space.
	SubmitPortalInvite,
	/// Can accept or reject portal invites submitted to this space.
	AcceptPortalInvite,
}

impl Default for Permission {
	fn default() -> Self {
		Self::none()
	}
}

impl Permission {
	/// Checks if the current permission set has the given permission.
	/// Administrator permissions always return true. Otherwise, the
	/// permission is checked against the current permission set.
	pub fn has_permission(&self, other: Self) -> bool {
		(*self & Self::Administrator == Self::Administrator) || (*self & other == other)
	}

	/// Merge the given permissions.
	///
	/// # Example
	///
	/// self: `10011`
	/// other: `11000`
	/// result: `11011`
	pub fn merge(&self, other: &Self) -> Self {
		*self | *other
	}

	/// Remove the given permissions from the current.
	///
	/// # Example
	///
	/// self: `10011`
	/// other: `10001`
	/// result: `00010`
	pub fn remove(&self, other: &Self) -> Self {
		*self & !*other
	}
}

// Permission values cross process boundaries as the decimal string form of
// the bit pattern, to avoid precision loss in consumers with narrower
// native integers.

impl std::fmt::Display for Permission {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.bits())
	}
}

impl std::str::FromStr for Permission {
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s.parse::<i128>()?))
	}
}

impl serde::Serialize for Permission {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> serde::Deserialize<'de> for Permission {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = std::borrow::Cow::<str>::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}
