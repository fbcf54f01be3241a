use chrono::{DateTime, Utc};
use ulid::Ulid;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
/// A cross-space grant: members of `target_space_id` may access
/// `channel_id`, which lives in `source_space_id`, without joining it.
pub struct Portal {
	/// The unique identifier for the portal.
	pub id: Ulid,
	/// The channel the portal opens onto.
	pub channel_id: Ulid,
	/// The space the channel lives in.
	pub source_space_id: Ulid,
	/// The space whose members gain access.
	pub target_space_id: Ulid,
	/// The user that created the portal.
	pub created_by: Ulid,
	/// The time the portal was created.
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalInviteState {
	#[default]
	Pending,
	Accepted,
	Rejected,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
/// A request to open a portal, resolved by the target space.
pub struct PortalInvite {
	/// The unique identifier for the invite.
	pub id: Ulid,
	/// The channel the requested portal would open onto.
	pub channel_id: Ulid,
	/// The space the channel lives in.
	pub source_space_id: Ulid,
	/// The space being asked to hold the portal.
	pub target_space_id: Ulid,
	/// The user that submitted the invite.
	pub submitted_by: Ulid,
	/// Current state. Transitions are pending -> accepted | rejected.
	pub state: PortalInviteState,
	/// The user that accepted or rejected the invite.
	pub resolved_by: Option<Ulid>,
	/// The time the invite was submitted.
	pub created_at: DateTime<Utc>,
}
