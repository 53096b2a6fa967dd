use super::*;

#[test]
fn only_get_is_safe() {
    assert!(Method::Get.is_safe());
    for method in [Method::Post, Method::Put, Method::Patch, Method::Delete] {
        assert!(!method.is_safe(), "{method:?} must carry a token");
    }
}

#[test]
fn method_parse_is_case_insensitive() {
    assert_eq!(Method::parse("post"), Some(Method::Post));
    assert_eq!(Method::parse(" Get "), Some(Method::Get));
    assert_eq!(Method::parse("DELETE"), Some(Method::Delete));
    assert_eq!(Method::parse("dialog"), None);
    assert_eq!(Method::parse(""), None);
}

#[test]
fn encode_form_escapes_values() {
    let fields = vec![
        ("email".to_owned(), "user+1@example.com".to_owned()),
        ("full_name".to_owned(), "Иван Петров".to_owned()),
    ];
    assert_eq!(
        encode_form(&fields),
        "email=user%2B1%40example.com&full_name=%D0%98%D0%B2%D0%B0%D0%BD+%D0%9F%D0%B5%D1%82%D1%80%D0%BE%D0%B2"
    );
}

#[test]
fn encode_form_of_nothing_is_empty() {
    assert_eq!(encode_form(&[]), "");
}

#[test]
fn header_lookup_ignores_case() {
    let mut request: HttpRequest<()> = HttpRequest::post("/auth/login");
    request.set_header("X-CSRF-Token", "abc");
    assert_eq!(request.header("x-csrf-token"), Some("abc"));
    assert_eq!(request.header("content-type"), None);
}

#[test]
fn set_header_replaces_existing_value() {
    let mut request: HttpRequest<()> = HttpRequest::post("/auth/login");
    request.set_header("x-csrf-token", "old");
    request.set_header("X-CSRF-TOKEN", "new");
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.header("x-csrf-token"), Some("new"));
}

#[test]
fn new_requests_start_with_empty_body() {
    let request: HttpRequest<()> = HttpRequest::get("/auth/me");
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.body, Body::Empty);
    assert!(request.headers.is_empty());
}

#[test]
fn success_covers_2xx_only() {
    let response = |status| HttpResponse { status, redirected: false, url: String::new(), body: String::new() };
    assert!(response(200).is_success());
    assert!(response(204).is_success());
    assert!(!response(302).is_success());
    assert!(!response(403).is_success());
    assert!(!response(500).is_success());
}
