//! Collaborator contracts the engine resolves against.
//!
//! Storage and transport live in the host application. Implementations are
//! expected to log their own failures; the engine maps any error to a fetch
//! failure without inspecting it.

use async_trait::async_trait;
use ulid::Ulid;

use crate::database::{Channel, ChannelOverride, Member, Portal, PortalInvite, PortalInviteState, Role, Space};

#[async_trait]
pub trait SpaceStore {
	type Error: std::fmt::Debug + Send + Sync + 'static;

	/// Fetches a space by id.
	async fn space_by_id(&self, space_id: Ulid) -> Result<Option<Space>, Self::Error>;
}

#[async_trait]
pub trait RoleStore {
	type Error: std::fmt::Debug + Send + Sync + 'static;

	/// All roles of a space, ordered by ascending position.
	async fn roles_for_space(&self, space_id: Ulid) -> Result<Vec<Role>, Self::Error>;

	/// The space's default ("everyone") role.
	async fn default_role(&self, space_id: Ulid) -> Result<Option<Role>, Self::Error>;
}

#[async_trait]
pub trait MembershipStore {
	type Error: std::fmt::Debug + Send + Sync + 'static;

	/// The membership record for a user in a space. `None` means the user
	/// is not a member, which is a normal state and not an error.
	async fn member(&self, space_id: Ulid, user_id: Ulid) -> Result<Option<Member>, Self::Error>;

	/// The spaces a user is a member of.
	async fn spaces_for_member(&self, user_id: Ulid) -> Result<Vec<Ulid>, Self::Error>;
}

#[async_trait]
pub trait ChannelStore {
	type Error: std::fmt::Debug + Send + Sync + 'static;

	/// Fetches a channel by id.
	async fn channel_by_id(&self, channel_id: Ulid) -> Result<Option<Channel>, Self::Error>;

	/// All overrides recorded for a channel.
	async fn overrides_for_channel(&self, channel_id: Ulid) -> Result<Vec<ChannelOverride>, Self::Error>;
}

#[async_trait]
pub trait PortalStore {
	type Error: std::fmt::Debug + Send + Sync + 'static;

	/// Fetches a portal by id.
	async fn portal_by_id(&self, portal_id: Ulid) -> Result<Option<Portal>, Self::Error>;

	/// The portal onto a channel held by a specific target space, if any.
	async fn portal_by_channel_and_target(
		&self,
		channel_id: Ulid,
		target_space_id: Ulid,
	) -> Result<Option<Portal>, Self::Error>;

	/// All portals a space holds onto other spaces' channels.
	async fn portals_targeting(&self, space_id: Ulid) -> Result<Vec<Portal>, Self::Error>;

	/// Records a new portal.
	async fn insert_portal(&self, portal: Portal) -> Result<(), Self::Error>;

	/// Deletes a portal. Deleting an already-deleted portal is a no-op.
	async fn remove_portal(&self, portal_id: Ulid) -> Result<(), Self::Error>;

	/// Fetches a portal invite by id.
	async fn invite_by_id(&self, invite_id: Ulid) -> Result<Option<PortalInvite>, Self::Error>;

	/// The pending invite for a (channel, target space) pair, if any.
	async fn pending_invite(&self, channel_id: Ulid, target_space_id: Ulid)
		-> Result<Option<PortalInvite>, Self::Error>;

	/// Records a new invite.
	async fn insert_invite(&self, invite: PortalInvite) -> Result<(), Self::Error>;

	/// Moves an invite out of the pending state.
	async fn set_invite_state(
		&self,
		invite_id: Ulid,
		state: PortalInviteState,
		resolved_by: Ulid,
	) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone)]
pub enum AdminNotice {
	PortalInviteSubmitted(PortalInvite),
	PortalInviteAccepted(PortalInvite),
	PortalInviteRejected(PortalInvite),
}

#[async_trait]
pub trait SystemNotifier {
	type Error: std::fmt::Debug + Send + Sync + 'static;

	/// Posts a system notice to the space's admin channel. Delivery is
	/// best-effort; the engine logs failures and moves on.
	async fn post_admin_notice(&self, space_id: Ulid, notice: AdminNotice) -> Result<(), Self::Error>;
}

/// Everything the engine needs from the host, in one bound.
pub trait AccessGlobal:
	SpaceStore + RoleStore + MembershipStore + ChannelStore + PortalStore + SystemNotifier + Send + Sync + 'static
{
}

impl<T> AccessGlobal for T where
	T: SpaceStore + RoleStore + MembershipStore + ChannelStore + PortalStore + SystemNotifier + Send + Sync + 'static
{
}
