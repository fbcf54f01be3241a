use chrono::{DateTime, Utc};
use ulid::Ulid;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
/// A space-scoped message channel.
pub struct Channel {
	/// The unique identifier for the channel.
	pub id: Ulid,
	/// The space this channel belongs to.
	pub space_id: Ulid,
	/// Optional category the channel is grouped under.
	pub category_id: Option<Ulid>,
	/// The name of the channel.
	pub name: String,
	/// Admin channels are access-gated: an actor without the admin-channel
	/// view permission sees the channel as if it does not exist.
	pub is_admin: bool,
	/// Public channels are additionally visible to guest browsing when the
	/// space itself is public.
	pub is_public: bool,
	/// The time the channel was created.
	pub created_at: DateTime<Utc>,
}
