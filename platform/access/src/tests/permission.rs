use crate::database::Permission;

#[test]
fn test_has_permission() {
	let permissions = Permission::ViewChannels | Permission::SendMessages;

	assert!(permissions.has_permission(Permission::ViewChannels));
	assert!(permissions.has_permission(Permission::ViewChannels | Permission::SendMessages));
	assert!(!permissions.has_permission(Permission::ManageMessages));
	assert!(!permissions.has_permission(Permission::SendMessages | Permission::ManageMessages));
}

#[test]
fn test_administrator_implies_everything() {
	let permissions = Permission::Administrator;

	for flag in [
		Permission::ViewChannels,
		Permission::ViewAdminChannel,
		Permission::ManageSpace,
		Permission::ManageChannels,
		Permission::ManageRoles,
		Permission::SendMessages,
		Permission::ManageMessages,
		Permission::AttachFiles,
		Permission::AddReactions,
		Permission::CreatePortal,
		Permission::SubmitPortalInvite,
		Permission::AcceptPortalInvite,
		Permission::all(),
	] {
		assert!(permissions.has_permission(flag));
	}
}

#[test]
fn test_merge_is_commutative_and_associative() {
	let a = Permission::ViewChannels;
	let b = Permission::SendMessages;
	let c = Permission::AddReactions | Permission::AttachFiles;

	assert_eq!(a.merge(&b), b.merge(&a));
	assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
}

#[test]
fn test_remove() {
	let permissions = Permission::ViewChannels | Permission::SendMessages;

	let removed = permissions.remove(&Permission::SendMessages);

	assert!(removed.has_permission(Permission::ViewChannels));
	assert!(!removed.has_permission(Permission::SendMessages));
}

#[test]
fn test_unknown_high_bits_are_preserved_but_ignored() {
	// A bit far above the defined catalog, as a future version might set.
	let future = Permission::from(1i128 << 100);
	let permissions = Permission::ViewChannels.merge(&future);

	assert!(permissions.has_permission(Permission::ViewChannels));
	assert!(!permissions.has_permission(Permission::SendMessages));
	assert_eq!(permissions.bits() & (1i128 << 100), 1i128 << 100);
}

#[test]
fn test_decimal_wire_form() {
	let permissions = Permission::ViewChannels | Permission::SendMessages;

	let wire = permissions.to_string();
	assert_eq!(wire, permissions.bits().to_string());

	let parsed: Permission = wire.parse().unwrap();
	assert_eq!(parsed, permissions);

	// serde uses the same decimal string form.
	let json = serde_json::to_string(&permissions).unwrap();
	assert_eq!(json, format!("\"{wire}\""));
	assert_eq!(serde_json::from_str::<Permission>(&json).unwrap(), permissions);
}

#[test]
fn test_all_has_every_defined_bit() {
	let all = Permission::all();

	assert!(all.has_permission(Permission::Administrator));
	assert!(all.has_permission(Permission::ViewAdminChannel));
	assert!(all.has_permission(Permission::AcceptPortalInvite));
}
