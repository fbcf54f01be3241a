use chrono::{DateTime, Utc};
use ulid::Ulid;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
/// A (space, user) membership record.
///
/// The space's default role is never listed in `role_ids`; it always
/// applies. Removal of the record cascades to the role assignments.
pub struct Member {
	/// The space this membership belongs to.
	pub space_id: Ulid,
	/// The member's user id.
	pub user_id: Ulid,
	/// Roles explicitly assigned to this member, beyond the default role.
	pub role_ids: Vec<Ulid>,
	/// The time the user joined the space.
	pub joined_at: DateTime<Utc>,
}
