use super::*;

#[test]
fn urls_join_without_double_slashes() {
    let api = ReqwestApi::new("http://localhost:8080/");
    assert_eq!(api.url(endpoints::ROOMS), "http://localhost:8080/cuartos/listar");
    assert_eq!(api.url(&endpoints::room(4)), "http://localhost:8080/cuartos/get/4");
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    let api = ReqwestApi::new("http://127.0.0.1:9");
    let err = runtime.block_on(api.list_rooms()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}

#[test]
fn decode_reports_shape_errors() {
    let err = decode::<Vec<Room>>("{\"oops\":true}").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
