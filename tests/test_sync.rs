use oriby::application::services::sync_service::{SyncService, SyncServiceImpl};
use oriby::domain::bookmark::BookmarkSource;
use oriby::domain::error::ErrorKind;
use oriby::domain::repositories::store::Namespace;
use oriby::infrastructure::http::HttpBookmarkSource;
use oriby::util::testing::{init_test_env, setup_test_store};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Answer `responses.len()` requests in order, then stop listening.
fn serve(responses: Vec<(&'static str, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for (status_line, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buf = [0u8; 2048];
            let _ = stream.read(&mut buf);
            let response = format!(
                "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}/bookmarks.json", addr)
}

fn sync_service() -> (oriby::domain::repositories::store::StateStore, SyncServiceImpl) {
    let _ = init_test_env();
    let store = setup_test_store();
    let remote = Arc::new(HttpBookmarkSource::new(Some(Duration::from_secs(5))));
    (store.clone(), SyncServiceImpl::new(store, remote))
}

#[test]
fn given_good_then_html_response_when_refreshing_then_cache_survives_failure() {
    let (store, service) = sync_service();
    let url = serve(vec![
        (
            "HTTP/1.1 200 OK",
            r#"[{"id": "r1", "title": "Remote", "url": "remote.example", "favicon": "", "createdAt": 9}]"#,
        ),
        ("HTTP/1.1 200 OK", "<html>not json</html>"),
    ]);

    let first = service.refresh(&url).unwrap();
    let cached = store.raw(Namespace::ServerBookmarks).unwrap();
    let err = service.refresh(&url).unwrap_err();

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].url, "https://remote.example/");
    assert_eq!(first[0].source, BookmarkSource::Server);
    assert!(err.is_kind(ErrorKind::FetchFailed));
    assert_eq!(store.raw(Namespace::ServerBookmarks).unwrap(), cached);
    assert_eq!(store.server_bookmarks().unwrap(), first);
}

#[test]
fn given_server_error_status_when_refresh_then_fetch_failed() {
    let (store, service) = sync_service();
    let url = serve(vec![("HTTP/1.1 503 Service Unavailable", "busy")]);
    let before = store.raw(Namespace::ServerBookmarks).unwrap();

    let err = service.refresh(&url).unwrap_err();

    assert!(err.is_kind(ErrorKind::FetchFailed));
    assert_eq!(store.raw(Namespace::ServerBookmarks).unwrap(), before);
}

#[test]
fn given_object_payload_without_array_when_refresh_then_fetch_failed() {
    let (_, service) = sync_service();
    let url = serve(vec![("HTTP/1.1 200 OK", r#"{"items": 3}"#)]);

    let err = service.refresh(&url).unwrap_err();

    assert!(err.is_kind(ErrorKind::FetchFailed));
}

#[test]
fn given_identical_documents_when_refreshed_twice_then_cache_identical() {
    let (store, service) = sync_service();
    let body = r#"[{"id": "r1", "title": "Same", "url": "https://same.example/", "favicon": "x", "createdAt": 3}]"#;
    let url = serve(vec![("HTTP/1.1 200 OK", body), ("HTTP/1.1 200 OK", body)]);

    service.refresh(&url).unwrap();
    let first = store.raw(Namespace::ServerBookmarks).unwrap();
    service.refresh(&url).unwrap();

    assert_eq!(store.raw(Namespace::ServerBookmarks).unwrap(), first);
}
