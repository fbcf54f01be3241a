use chrono::{DateTime, Utc};
use ulid::Ulid;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
/// A tenant community. Contains channels, roles and members.
pub struct Space {
	/// The unique identifier for the space.
	pub id: Ulid,
	/// The name of the space.
	pub name: String,
	/// The user that owns the space. The owner bypasses all permission
	/// checks unconditionally.
	pub owner_id: Ulid,
	/// Public spaces allow guest browsing of their public channels.
	pub is_public: bool,
	/// The time the space was created.
	pub created_at: DateTime<Utc>,
}
