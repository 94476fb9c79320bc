use super::*;

#[test]
fn from_wire_maps_known_roles() {
    assert_eq!(Role::from_wire(Some("ADMIN")), Role::Admin);
    assert_eq!(Role::from_wire(Some("analyst")), Role::Analyst);
    assert_eq!(Role::from_wire(Some("USER")), Role::Guest);
    assert_eq!(Role::from_wire(None), Role::Guest);
}

#[test]
fn wire_round_trip_for_every_role() {
    for role in [Role::Guest, Role::Admin, Role::Analyst] {
        assert_eq!(Role::from_wire(Some(role.as_wire())), role);
    }
}

#[test]
fn each_role_owns_exactly_one_capability() {
    let caps = [Capability::BookRooms, Capability::ManageRooms, Capability::ViewReports];
    for role in [Role::Guest, Role::Admin, Role::Analyst] {
        let granted = caps.iter().filter(|c| role.can(**c)).count();
        assert_eq!(granted, 1, "{role:?}");
    }
    assert!(Role::Admin.can(Capability::ManageRooms));
    assert!(!Role::Guest.can(Capability::ManageRooms));
    assert!(!Role::Admin.can(Capability::ViewReports));
}

#[test]
fn access_for_distinguishes_login_from_denied() {
    assert_eq!(access_for(None, Capability::BookRooms), Access::LoginRequired);
    assert_eq!(access_for(Some(Role::Analyst), Capability::ViewReports), Access::Granted);
    assert_eq!(access_for(Some(Role::Guest), Capability::ViewReports), Access::Denied);
}
