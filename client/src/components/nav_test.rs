use super::*;

fn hrefs(role: Option<Role>) -> Vec<&'static str> {
    nav_entries(role).into_iter().map(|e| e.href).collect()
}

#[test]
fn signed_out_sees_login() {
    assert_eq!(hrefs(None), ["/", "/login"]);
}

#[test]
fn each_role_sees_only_its_area() {
    assert_eq!(hrefs(Some(Role::Guest)), ["/", "/reservations"]);
    assert_eq!(hrefs(Some(Role::Admin)), ["/", "/admin/rooms", "/admin/rooms/new"]);
    assert_eq!(hrefs(Some(Role::Analyst)), ["/", "/analyst", "/analyst/charts"]);
}
