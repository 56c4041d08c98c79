//! Tests for AtomClient over a scripted transport

use blogsync_atom::{AtomClient, AtomEntry, Error, Method, TransportError};
use blogsync_test_utils::{EntryXml, ScriptedTransport, feed_xml};

const EDIT: &str = "https://blog.hatena.ne.jp/motemen/example.hatenablog.com/atom/entry/123456";
const COLLECTION: &str = "https://blog.hatena.ne.jp/motemen/example.hatenablog.com/atom/entry";
const ALTERNATE: &str = "https://example.hatenablog.com/entry/2012/12/19/weekend-trip";

#[test]
fn test_get_feed() {
    let transport = ScriptedTransport::new();
    transport.ok(Method::Get, COLLECTION, feed_xml(&[EntryXml::new(ALTERNATE, EDIT)], None));
    let client = AtomClient::new(&transport);

    let feed = client.get_feed(COLLECTION).unwrap();

    assert_eq!(feed.entries.len(), 1);
    assert_eq!(transport.count(Method::Get, COLLECTION), 1);
}

#[test]
fn test_failure_status_becomes_transport_error() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Get, EDIT, 500, "boom");
    let client = AtomClient::new(&transport);

    let err = client.get_entry(EDIT).unwrap_err();

    match err {
        Error::Transport(TransportError::Status { code, body, .. }) => {
            assert_eq!(code, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_put_sends_serialized_entry() {
    let transport = ScriptedTransport::new();
    transport.ok(Method::Put, EDIT, EntryXml::new(ALTERNATE, EDIT).title("Updated").document());
    let client = AtomClient::new(&transport);

    let entry = AtomEntry {
        title: "Updated".to_string(),
        ..Default::default()
    };
    let returned = client.put_entry(EDIT, &entry).unwrap();

    assert_eq!(returned.title, "Updated");
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let body = requests[0].body.as_deref().unwrap();
    assert!(body.starts_with("<?xml"));
    assert!(body.contains("<title>Updated</title>"));
}

#[test]
fn test_post_and_delete() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Post, COLLECTION, 201, EntryXml::new(ALTERNATE, EDIT).document());
    transport.ok(Method::Delete, EDIT, "");
    let client = AtomClient::new(&transport);

    let created = client.post_entry(COLLECTION, &AtomEntry::default()).unwrap();
    assert_eq!(created.links.find("edit").unwrap().href, EDIT);

    client.delete_entry(EDIT).unwrap();
    assert_eq!(transport.count(Method::Delete, EDIT), 1);
}

#[test]
fn test_unscripted_route_is_not_found() {
    let transport = ScriptedTransport::new();
    let client = AtomClient::new(&transport);

    let err = client.delete_entry(EDIT).unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Status { code: 404, .. })
    ));
}
