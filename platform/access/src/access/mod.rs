//! Channel access resolution.
//!
//! Every privileged operation funnels through [`resolve_channel_access`]:
//! it classifies how the actor participates in the channel (member, portal
//! guest, public guest) and hands the member and portal paths to the
//! channel gate. Results are pure functions of current store data; nothing
//! is cached between calls.

use std::sync::Arc;

use ulid::Ulid;

use crate::database::{Channel, Permission};
use crate::error::{AccessError, Result};
use crate::global::AccessGlobal;

pub mod gate;
pub mod resolver;

pub use gate::AccessDecision;
pub use resolver::MemberPermissions;

/// The most a public guest can ever do, regardless of how generous the
/// space's default role is. Applied after resolution, never stored as a
/// role.
pub const PUBLIC_GUEST_CEILING: Permission = Permission::ViewChannels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participation {
	/// The actor owns or has a membership record in the channel's space.
	Member,
	/// The actor reaches the channel through a portal held by one of their
	/// own spaces.
	PortalGuest,
	/// The actor is browsing a public channel of a public space.
	PublicGuest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelAccess {
	Granted {
		participation: Participation,
		permissions: Permission,
	},
	/// The only zero-access state. Callers must respond as if the channel
	/// does not exist, so non-participants cannot probe for it.
	Rejected,
}

impl ChannelAccess {
	pub fn allowed(&self) -> bool {
		matches!(self, Self::Granted { .. })
	}

	pub fn participation(&self) -> Option<Participation> {
		match self {
			Self::Granted { participation, .. } => Some(*participation),
			Self::Rejected => None,
		}
	}

	pub fn permissions(&self) -> Permission {
		match self {
			Self::Granted { permissions, .. } => *permissions,
			Self::Rejected => Permission::none(),
		}
	}
}

/// The single entry point request middleware calls before doing anything
/// else with a channel.
pub async fn resolve_channel_access<G: AccessGlobal>(
	global: &Arc<G>,
	channel_id: Ulid,
	user_id: Option<Ulid>,
) -> Result<ChannelAccess> {
	let channel = global
		.channel_by_id(channel_id)
		.await
		.map_err(|_| AccessError::Fetch("channel"))?
		.ok_or(AccessError::NotFound("channel"))?;

	let space = global
		.space_by_id(channel.space_id)
		.await
		.map_err(|_| AccessError::Fetch("space"))?
		.ok_or(AccessError::NotFound("space"))?;

	// Member path: a membership record, or owning the space outright.
	let is_member = match user_id {
		Some(user_id) => {
			user_id == space.owner_id
				|| global
					.member(space.id, user_id)
					.await
					.map_err(|_| AccessError::Fetch("membership"))?
					.is_some()
		}
		None => false,
	};

	if is_member {
		return gated(global, &channel, user_id, Participation::Member).await;
	}

	// Portal path: some space the actor belongs to holds a portal onto
	// this channel. The base still resolves against the channel's own
	// space, so guests get its default-role floor plus channel overrides.
	if let Some(user_id) = user_id {
		let spaces = global
			.spaces_for_member(user_id)
			.await
			.map_err(|_| AccessError::Fetch("memberships"))?;

		for target_space_id in spaces {
			let portals = global
				.portals_targeting(target_space_id)
				.await
				.map_err(|_| AccessError::Fetch("portals"))?;

			if portals.iter().any(|portal| portal.channel_id == channel.id) {
				return gated(global, &channel, Some(user_id), Participation::PortalGuest).await;
			}
		}
	}

	// Public browsing, anonymous actors included.
	if space.is_public && channel.is_public && !channel.is_admin {
		let base = resolver::resolve_permissions(global, space.id, user_id).await?;

		return Ok(ChannelAccess::Granted {
			participation: Participation::PublicGuest,
			permissions: base.permissions & PUBLIC_GUEST_CEILING,
		});
	}

	Ok(ChannelAccess::Rejected)
}

async fn gated<G: AccessGlobal>(
	global: &Arc<G>,
	channel: &Channel,
	user_id: Option<Ulid>,
	participation: Participation,
) -> Result<ChannelAccess> {
	let (permissions, decision) = gate::resolve_channel_permissions(global, channel, user_id).await?;

	match decision {
		AccessDecision::Allowed => Ok(ChannelAccess::Granted {
			participation,
			permissions,
		}),
		AccessDecision::Denied => Ok(ChannelAccess::Rejected),
	}
}

/// Space-level permissions, for space-wide UI affordances.
pub async fn compute_permissions<G: AccessGlobal>(global: &Arc<G>, space_id: Ulid, user_id: Ulid) -> Result<Permission> {
	Ok(resolver::resolve_permissions(global, space_id, Some(user_id))
		.await?
		.permissions)
}

/// Channel-level permissions, for gating a specific action. A rejected
/// actor gets the empty set.
pub async fn compute_channel_permissions<G: AccessGlobal>(
	global: &Arc<G>,
	space_id: Ulid,
	channel_id: Ulid,
	user_id: Ulid,
) -> Result<Permission> {
	let channel = global
		.channel_by_id(channel_id)
		.await
		.map_err(|_| AccessError::Fetch("channel"))?
		.ok_or(AccessError::NotFound("channel"))?;

	if channel.space_id != space_id {
		return Err(AccessError::NotFound("channel"));
	}

	Ok(resolve_channel_access(global, channel_id, Some(user_id))
		.await?
		.permissions())
}
