use ulid::Ulid;

use crate::access::{resolve_channel_access, ChannelAccess, Participation};
use crate::database::{OverrideSubject, Permission};
use crate::error::AccessError;
use crate::portals::remove_portal;
use crate::tests::global::mock_global_state;

#[tokio::test]
async fn test_member_participation() {
	let global = mock_global_state();
	let user = Ulid::new();

	let space_id = global.create_space(Ulid::new(), false, Permission::ViewChannels | Permission::SendMessages);
	global.add_member(space_id, user, &[]);

	let channel_id = global.create_channel(space_id, false, false);

	let access = resolve_channel_access(&global, channel_id, Some(user)).await.unwrap();

	assert!(access.allowed());
	assert_eq!(access.participation(), Some(Participation::Member));
	assert!(access.permissions().has_permission(Permission::SendMessages));
}

#[tokio::test]
async fn test_owner_without_membership_record_is_a_member() {
	let global = mock_global_state();
	let owner = Ulid::new();

	let space_id = global.create_bare_space(owner, false);
	let channel_id = global.create_channel(space_id, false, false);

	let access = resolve_channel_access(&global, channel_id, Some(owner)).await.unwrap();

	assert_eq!(access.participation(), Some(Participation::Member));
	assert_eq!(access.permissions(), Permission::all());
}

#[tokio::test]
async fn test_portal_guest_gets_the_source_space_default_floor() {
	let global = mock_global_state();
	let guest = Ulid::new();

	let source = global.create_space(Ulid::new(), false, Permission::ViewChannels | Permission::SendMessages);
	let channel_id = global.create_channel(source, false, false);

	// The guest's own space grants them far more than the source does.
	let target = global.create_space(Ulid::new(), false, Permission::ViewChannels);
	let fancy = global.create_role(target, 1, Permission::Administrator);
	global.add_member(target, guest, &[fancy]);

	global.add_portal(channel_id, source, target);

	let access = resolve_channel_access(&global, channel_id, Some(guest)).await.unwrap();

	assert_eq!(access.participation(), Some(Participation::PortalGuest));
	assert_eq!(access.permissions(), Permission::ViewChannels | Permission::SendMessages);
}

#[tokio::test]
async fn test_portal_guest_is_still_subject_to_channel_overrides() {
	let global = mock_global_state();
	let guest = Ulid::new();

	let source = global.create_space(Ulid::new(), false, Permission::ViewChannels | Permission::SendMessages);
	let channel_id = global.create_channel(source, false, false);
	let everyone = global.default_role_id(source);
	global.add_override(channel_id, OverrideSubject::Role(everyone), Permission::AddReactions, Permission::SendMessages);

	let target = global.create_space(Ulid::new(), false, Permission::ViewChannels);
	global.add_member(target, guest, &[]);
	global.add_portal(channel_id, source, target);

	let access = resolve_channel_access(&global, channel_id, Some(guest)).await.unwrap();

	assert_eq!(access.participation(), Some(Participation::PortalGuest));
	assert!(access.permissions().has_permission(Permission::AddReactions));
	assert!(!access.permissions().has_permission(Permission::SendMessages));
}

#[tokio::test]
async fn test_portal_removal_revokes_access_immediately() {
	let global = mock_global_state();
	let guest = Ulid::new();
	let source_owner = Ulid::new();

	let source = global.create_space(source_owner, false, Permission::ViewChannels | Permission::SendMessages);
	let channel_id = global.create_channel(source, false, false);

	let target = global.create_space(Ulid::new(), false, Permission::ViewChannels);
	global.add_member(target, guest, &[]);
	let portal_id = global.add_portal(channel_id, source, target);

	let access = resolve_channel_access(&global, channel_id, Some(guest)).await.unwrap();
	assert!(access.allowed());
	assert!(access.permissions().has_permission(Permission::SendMessages));

	remove_portal(&global, portal_id, source_owner).await.unwrap();

	let access = resolve_channel_access(&global, channel_id, Some(guest)).await.unwrap();
	assert_eq!(access, ChannelAccess::Rejected);
}

#[tokio::test]
async fn test_public_guest_ceiling() {
	let global = mock_global_state();

	// A recklessly generous default role; the ceiling still holds.
	let space_id = global.create_space(
		Ulid::new(),
		true,
		Permission::ViewChannels
			| Permission::SendMessages
			| Permission::ManageMessages
			| Permission::AttachFiles
			| Permission::ManageChannels,
	);
	let channel_id = global.create_channel(space_id, false, true);

	let access = resolve_channel_access(&global, channel_id, Some(Ulid::new())).await.unwrap();

	assert_eq!(access.participation(), Some(Participation::PublicGuest));
	assert_eq!(access.permissions(), Permission::ViewChannels);
	assert!(!access.permissions().has_permission(Permission::SendMessages));
	assert!(!access.permissions().has_permission(Permission::ManageMessages));
	assert!(!access.permissions().has_permission(Permission::AttachFiles));
	assert!(!access.permissions().has_permission(Permission::ManageChannels));
}

#[tokio::test]
async fn test_anonymous_can_browse_public_channels() {
	let global = mock_global_state();

	let space_id = global.create_space(Ulid::new(), true, Permission::ViewChannels | Permission::SendMessages);
	let channel_id = global.create_channel(space_id, false, true);

	let access = resolve_channel_access(&global, channel_id, None).await.unwrap();

	assert_eq!(access.participation(), Some(Participation::PublicGuest));
	assert_eq!(access.permissions(), Permission::ViewChannels);
}

#[tokio::test]
async fn test_anonymous_is_rejected_outside_public_spaces() {
	let global = mock_global_state();

	let space_id = global.create_space(Ulid::new(), false, Permission::ViewChannels);
	let channel_id = global.create_channel(space_id, false, true);

	let access = resolve_channel_access(&global, channel_id, None).await.unwrap();

	assert_eq!(access, ChannelAccess::Rejected);
}

#[tokio::test]
async fn test_private_channel_in_a_public_space_is_not_browsable() {
	let global = mock_global_state();

	let space_id = global.create_space(Ulid::new(), true, Permission::ViewChannels);
	let channel_id = global.create_channel(space_id, false, false);

	let access = resolve_channel_access(&global, channel_id, None).await.unwrap();

	assert_eq!(access, ChannelAccess::Rejected);
}

#[tokio::test]
async fn test_admin_channel_is_invisible_to_guests() {
	let global = mock_global_state();

	let space_id = global.create_space(Ulid::new(), true, Permission::all().remove(&Permission::Administrator));
	let channel_id = global.create_channel(space_id, true, true);

	let access = resolve_channel_access(&global, channel_id, None).await.unwrap();

	assert_eq!(access, ChannelAccess::Rejected);
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
	let global = mock_global_state();
	let user = Ulid::new();

	let space_id = global.create_space(Ulid::new(), false, Permission::ViewChannels | Permission::SendMessages);
	let role = global.create_role(space_id, 1, Permission::AddReactions);
	global.add_member(space_id, user, &[role]);

	let channel_id = global.create_channel(space_id, false, false);
	global.add_override(channel_id, OverrideSubject::Role(role), Permission::AttachFiles, Permission::none());

	let first = resolve_channel_access(&global, channel_id, Some(user)).await.unwrap();
	let second = resolve_channel_access(&global, channel_id, Some(user)).await.unwrap();

	assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_channel_is_not_found() {
	let global = mock_global_state();

	let err = resolve_channel_access(&global, Ulid::new(), Some(Ulid::new()))
		.await
		.unwrap_err();

	assert_eq!(err, AccessError::NotFound("channel"));
	assert_eq!(err.kind(), "NotFound");
}
