use std::collections::HashMap;
use std::sync::Arc;

use ulid::Ulid;

use super::resolver::{resolve_permissions, MemberPermissions};
use crate::database::{Channel, ChannelOverride, OverrideSubject, Permission};
use crate::error::{AccessError, Result};
use crate::global::AccessGlobal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
	Allowed,
	/// The actor may not see the channel at all. Callers must behave as if
	/// the channel does not exist.
	Denied,
}

/// Computes the channel-level permissions for an actor and gates admin
/// channels.
///
/// The space-level base is adjusted by the channel's overrides, lowest
/// subject-role position first, so the highest-position role an actor holds
/// wins on conflict; member-subject overrides land after every role
/// override. Owner and administrator bypass short-circuits before any
/// override is read.
pub async fn resolve_channel_permissions<G: AccessGlobal>(
	global: &Arc<G>,
	channel: &Channel,
	user_id: Option<Ulid>,
) -> Result<(Permission, AccessDecision)> {
	// The base resolution and the override list are independent reads.
	let (base, overrides) = futures::try_join!(resolve_permissions(global, channel.space_id, user_id), async {
		global
			.overrides_for_channel(channel.id)
			.await
			.map_err(|_| AccessError::Fetch("channel overrides"))
	})?;

	if base.is_bypass() {
		return Ok((Permission::all(), AccessDecision::Allowed));
	}

	let permissions = apply_overrides(&base, overrides);

	// Admin channels are access-gated, not feature-gated: lacking this one
	// permission hides the channel entirely.
	if channel.is_admin && !permissions.has_permission(Permission::ViewAdminChannel) {
		return Ok((Permission::none(), AccessDecision::Denied));
	}

	Ok((permissions, AccessDecision::Allowed))
}

fn apply_overrides(base: &MemberPermissions, overrides: Vec<ChannelOverride>) -> Permission {
	let positions: HashMap<Ulid, i32> = base.roles.iter().map(|role| (role.id, role.position)).collect();

	let mut role_overrides = Vec::new();
	let mut member_overrides = Vec::new();

	// Overrides whose subject the actor does not hold are skipped.
	for record in overrides {
		match record.subject {
			OverrideSubject::Role(role_id) => {
				if let Some(&position) = positions.get(&role_id) {
					role_overrides.push((position, record));
				}
			}
			OverrideSubject::Member(member_id) => {
				if base.user_id == Some(member_id) {
					member_overrides.push(record);
				}
			}
		}
	}

	// Stable sort: records tied on position keep store order.
	role_overrides.sort_by_key(|(position, _)| *position);

	let permissions = role_overrides
		.iter()
		.fold(base.permissions, |acc, (_, record)| record.apply(acc));

	member_overrides.iter().fold(permissions, |acc, record| record.apply(acc))
}
