//! Portal administration.
//!
//! These are ordinary mutations, not part of the resolution hot path. Each
//! validates the actor's permissions through the resolver, applies the
//! structural rules (no self-portals, no admin channels, no duplicates) and
//! posts invite transitions to the target space's admin channel.

use std::sync::Arc;

use chrono::Utc;
use ulid::Ulid;

use crate::access::resolver::resolve_permissions;
use crate::database::{Channel, Permission, Portal, PortalInvite, PortalInviteState};
use crate::error::{AccessError, Result};
use crate::global::{AccessGlobal, AdminNotice};

/// Opens a portal from `target_space_id` onto a channel in another space.
/// The actor needs `CreatePortal` in the target space.
pub async fn create_portal<G: AccessGlobal>(
	global: &Arc<G>,
	channel_id: Ulid,
	target_space_id: Ulid,
	actor_id: Ulid,
) -> Result<Portal> {
	let channel = require_portalable_channel(global, channel_id, target_space_id).await?;

	require_permission(global, target_space_id, actor_id, Permission::CreatePortal).await?;

	if global
		.portal_by_channel_and_target(channel.id, target_space_id)
		.await
		.map_err(|_| AccessError::Fetch("portal"))?
		.is_some()
	{
		return Err(AccessError::Conflict("portal already exists"));
	}

	let portal = Portal {
		id: Ulid::new(),
		channel_id: channel.id,
		source_space_id: channel.space_id,
		target_space_id,
		created_by: actor_id,
		created_at: Utc::now(),
	};

	global
		.insert_portal(portal.clone())
		.await
		.map_err(|_| AccessError::Write("portal"))?;

	tracing::debug!(portal_id = %portal.id, channel_id = %channel.id, "portal created");

	Ok(portal)
}

/// Asks `target_space_id` to open a portal onto a channel. The actor needs
/// `SubmitPortalInvite` in the target space; the target space resolves the
/// invite with [`accept_portal_invite`] or [`reject_portal_invite`].
pub async fn submit_portal_invite<G: AccessGlobal>(
	global: &Arc<G>,
	channel_id: Ulid,
	target_space_id: Ulid,
	actor_id: Ulid,
) -> Result<PortalInvite> {
	let channel = require_portalable_channel(global, channel_id, target_space_id).await?;

	require_permission(global, target_space_id, actor_id, Permission::SubmitPortalInvite).await?;

	if global
		.portal_by_channel_and_target(channel.id, target_space_id)
		.await
		.map_err(|_| AccessError::Fetch("portal"))?
		.is_some()
	{
		return Err(AccessError::Conflict("portal already exists"));
	}

	if global
		.pending_invite(channel.id, target_space_id)
		.await
		.map_err(|_| AccessError::Fetch("portal invite"))?
		.is_some()
	{
		return Err(AccessError::Conflict("portal invite already pending"));
	}

	let invite = PortalInvite {
		id: Ulid::new(),
		channel_id: channel.id,
		source_space_id: channel.space_id,
		target_space_id,
		submitted_by: actor_id,
		state: PortalInviteState::Pending,
		resolved_by: None,
		created_at: Utc::now(),
	};

	global
		.insert_invite(invite.clone())
		.await
		.map_err(|_| AccessError::Write("portal invite"))?;

	notify(global, target_space_id, AdminNotice::PortalInviteSubmitted(invite.clone())).await;

	Ok(invite)
}

/// Accepts a pending invite and opens the portal. The actor needs
/// `AcceptPortalInvite` in the target space.
pub async fn accept_portal_invite<G: AccessGlobal>(global: &Arc<G>, invite_id: Ulid, actor_id: Ulid) -> Result<Portal> {
	let invite = global
		.invite_by_id(invite_id)
		.await
		.map_err(|_| AccessError::Fetch("portal invite"))?
		.ok_or(AccessError::NotFound("portal invite"))?;

	require_permission(global, invite.target_space_id, actor_id, Permission::AcceptPortalInvite).await?;

	if invite.state != PortalInviteState::Pending {
		return Err(AccessError::Conflict("portal invite already resolved"));
	}

	// The channel may have been deleted or flagged admin since the invite
	// was submitted; the structural rules still hold at acceptance time.
	let channel = require_portalable_channel(global, invite.channel_id, invite.target_space_id).await?;

	if global
		.portal_by_channel_and_target(channel.id, invite.target_space_id)
		.await
		.map_err(|_| AccessError::Fetch("portal"))?
		.is_some()
	{
		return Err(AccessError::Conflict("portal already exists"));
	}

	let portal = Portal {
		id: Ulid::new(),
		channel_id: channel.id,
		source_space_id: channel.space_id,
		target_space_id: invite.target_space_id,
		created_by: actor_id,
		created_at: Utc::now(),
	};

	global
		.insert_portal(portal.clone())
		.await
		.map_err(|_| AccessError::Write("portal"))?;

	global
		.set_invite_state(invite.id, PortalInviteState::Accepted, actor_id)
		.await
		.map_err(|_| AccessError::Write("portal invite"))?;

	let resolved = PortalInvite {
		state: PortalInviteState::Accepted,
		resolved_by: Some(actor_id),
		..invite
	};

	notify(global, resolved.target_space_id, AdminNotice::PortalInviteAccepted(resolved)).await;

	tracing::debug!(portal_id = %portal.id, invite_id = %invite_id, "portal invite accepted");

	Ok(portal)
}

/// Rejects a pending invite. The actor needs `AcceptPortalInvite` in the
/// target space.
pub async fn reject_portal_invite<G: AccessGlobal>(global: &Arc<G>, invite_id: Ulid, actor_id: Ulid) -> Result<()> {
	let invite = global
		.invite_by_id(invite_id)
		.await
		.map_err(|_| AccessError::Fetch("portal invite"))?
		.ok_or(AccessError::NotFound("portal invite"))?;

	require_permission(global, invite.target_space_id, actor_id, Permission::AcceptPortalInvite).await?;

	if invite.state != PortalInviteState::Pending {
		return Err(AccessError::Conflict("portal invite already resolved"));
	}

	global
		.set_invite_state(invite.id, PortalInviteState::Rejected, actor_id)
		.await
		.map_err(|_| AccessError::Write("portal invite"))?;

	let resolved = PortalInvite {
		state: PortalInviteState::Rejected,
		resolved_by: Some(actor_id),
		..invite
	};

	notify(global, resolved.target_space_id, AdminNotice::PortalInviteRejected(resolved)).await;

	Ok(())
}

/// Deletes a portal, immediately and unconditionally. The actor needs
/// `ManageChannels` in the source space; guests lose access on their next
/// resolution.
pub async fn remove_portal<G: AccessGlobal>(global: &Arc<G>, portal_id: Ulid, actor_id: Ulid) -> Result<()> {
	let portal = global
		.portal_by_id(portal_id)
		.await
		.map_err(|_| AccessError::Fetch("portal"))?
		.ok_or(AccessError::NotFound("portal"))?;

	require_permission(global, portal.source_space_id, actor_id, Permission::ManageChannels).await?;

	global
		.remove_portal(portal.id)
		.await
		.map_err(|_| AccessError::Write("portal"))?;

	tracing::debug!(portal_id = %portal.id, channel_id = %portal.channel_id, "portal removed");

	Ok(())
}

/// Fetches the channel and applies the structural portal rules: the portal
/// must bridge two different spaces, and admin channels are never
/// portalable.
async fn require_portalable_channel<G: AccessGlobal>(
	global: &Arc<G>,
	channel_id: Ulid,
	target_space_id: Ulid,
) -> Result<Channel> {
	let channel = global
		.channel_by_id(channel_id)
		.await
		.map_err(|_| AccessError::Fetch("channel"))?
		.ok_or(AccessError::NotFound("channel"))?;

	if channel.space_id == target_space_id {
		return Err(AccessError::BadRequest("a portal cannot target the channel's own space"));
	}

	if channel.is_admin {
		return Err(AccessError::BadRequest("admin channels cannot be portaled"));
	}

	if global
		.space_by_id(target_space_id)
		.await
		.map_err(|_| AccessError::Fetch("space"))?
		.is_none()
	{
		return Err(AccessError::NotFound("space"));
	}

	Ok(channel)
}

async fn require_permission<G: AccessGlobal>(
	global: &Arc<G>,
	space_id: Ulid,
	user_id: Ulid,
	permission: Permission,
) -> Result<()> {
	let auth = resolve_permissions(global, space_id, Some(user_id)).await?;

	if !auth.permissions.has_permission(permission) {
		return Err(AccessError::Forbidden { missing: permission });
	}

	Ok(())
}

async fn notify<G: AccessGlobal>(global: &Arc<G>, space_id: Ulid, notice: AdminNotice) {
	if let Err(err) = global.post_admin_notice(space_id, notice).await {
		tracing::error!(err = ?err, space_id = %space_id, "failed to post admin notice");
	}
}
