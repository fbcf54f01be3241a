use std::sync::Arc;

use ulid::Ulid;

use crate::database::{Permission, Role};
use crate::error::{AccessError, Result};
use crate::global::AccessGlobal;

#[derive(Debug, Clone, Default)]
/// The outcome of space-level resolution: the effective permissions plus
/// the roles they were computed from, so channel gating can match overrides
/// without refetching the role list.
pub struct MemberPermissions {
	/// The actor, if authenticated.
	pub user_id: Option<Ulid>,
	/// Effective space-level permissions.
	pub permissions: Permission,
	/// The roles the actor holds, default role included, ascending by
	/// position. Empty when the owner bypass applied.
	pub roles: Vec<Role>,
}

impl MemberPermissions {
	pub fn is_bypass(&self) -> bool {
		self.permissions == Permission::all()
	}
}

/// Computes the space-level permissions for an actor.
///
/// The recorded owner resolves to all permissions without consulting roles.
/// Everyone else holds the space's default role plus whatever their
/// membership record assigns; a missing membership record (or an anonymous
/// actor) resolves against the default role alone. An unknown space
/// resolves to no permissions at all — the caller decides whether that
/// blocks access.
pub async fn resolve_permissions<G: AccessGlobal>(
	global: &Arc<G>,
	space_id: Ulid,
	user_id: Option<Ulid>,
) -> Result<MemberPermissions> {
	let space = global.space_by_id(space_id).await.map_err(|_| AccessError::Fetch("space"))?;

	let Some(space) = space else {
		return Ok(MemberPermissions {
			user_id,
			..Default::default()
		});
	};

	if user_id == Some(space.owner_id) {
		return Ok(MemberPermissions {
			user_id,
			permissions: Permission::all(),
			roles: Vec::new(),
		});
	}

	// The default role, the role list and the membership record are
	// independent reads.
	let (default_role, roles, member) = futures::try_join!(
		async { global.default_role(space_id).await.map_err(|_| AccessError::Fetch("default role")) },
		async { global.roles_for_space(space_id).await.map_err(|_| AccessError::Fetch("roles")) },
		async {
			match user_id {
				Some(user_id) => global.member(space_id, user_id).await.map_err(|_| AccessError::Fetch("membership")),
				None => Ok(None),
			}
		},
	)?;

	let assigned = member.map(|m| m.role_ids).unwrap_or_default();

	let mut held: Vec<Role> = default_role.into_iter().collect();
	held.extend(
		roles
			.into_iter()
			.filter(|role| !role.is_default && assigned.contains(&role.id)),
	);
	held.sort_by_key(|role| role.position);

	let permissions = held.iter().fold(Permission::none(), |acc, role| acc.merge(&role.permissions));

	// One role carrying Administrator grants everything.
	let permissions = if permissions.has_permission(Permission::Administrator) {
		Permission::all()
	} else {
		permissions
	};

	Ok(MemberPermissions {
		user_id,
		permissions,
		roles: held,
	})
}
