//! Tests for the Broker over a scripted transport

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use blogsync_atom::{Logger, Method};
use blogsync_core::{BlogConfig, Broker, Entry, EntryHeader, Error, FreshnessOracle};
use blogsync_fs::io;
use blogsync_test_utils::{EntryXml, ScriptedTransport, feed_xml};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const BLOG: &str = "example.hatenablog.com";
const ENTRIES: &str = "https://blog.hatena.ne.jp/motemen/example.hatenablog.com/atom/entry";
const PAGES: &str = "https://blog.hatena.ne.jp/motemen/example.hatenablog.com/atom/page";
const EDIT: &str = "https://blog.hatena.ne.jp/motemen/example.hatenablog.com/atom/entry/123456";
const PUBLISHED: &str = "https://example.hatenablog.com/entry/2012/12/19/weekend-trip";

fn config(root: &Path) -> BlogConfig {
    BlogConfig {
        local_root: Some(root.to_path_buf()),
        username: Some("motemen".to_string()),
        password: Some("secret".to_string()),
        ..BlogConfig::new(BLOG)
    }
}

fn broker<'a>(root: &Path, transport: &'a ScriptedTransport) -> Broker<&'a ScriptedTransport> {
    Broker::new(
        config(root),
        transport,
        FreshnessOracle::default(),
        Arc::new(Logger::new()),
    )
}

fn blog_dir(root: &TempDir) -> PathBuf {
    root.path().join(BLOG)
}

fn write_local(path: &Path, document: &str, hour: u32) {
    io::write_text_with_mtime(
        path,
        document,
        Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap(),
    )
    .unwrap();
}

fn staged_draft_document() -> String {
    format!("---\nTitle: Draft\nEditURL: {EDIT}\nDraft: true\n---\n\ndraft body\n")
}

#[test]
fn test_fetch_follows_next_links_until_exhausted() {
    let root = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    let page2 = format!("{ENTRIES}?page=2");
    let page3 = format!("{ENTRIES}?page=3");
    transport
        .ok(
            Method::Get,
            ENTRIES,
            feed_xml(&[EntryXml::new(PUBLISHED, EDIT)], Some(&page2)),
        )
        .ok(
            Method::Get,
            &page2,
            feed_xml(
                &[EntryXml::new(
                    "https://example.hatenablog.com/entry/2012/12/18/000000",
                    &format!("{ENTRIES}/2"),
                )],
                Some(&page3),
            ),
        )
        .ok(
            Method::Get,
            &page3,
            feed_xml(
                &[EntryXml::new(
                    "https://example.hatenablog.com/entry/2012/12/17/000000",
                    &format!("{ENTRIES}/3"),
                )],
                None,
            ),
        );

    let entries = broker(root.path(), &transport)
        .fetch_remote_entries(true, true)
        .unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(transport.count(Method::Get, ENTRIES), 1);
    assert_eq!(transport.count(Method::Get, &page2), 1);
    assert_eq!(transport.count(Method::Get, &page3), 1);
    let gets = transport
        .requests()
        .iter()
        .filter(|r| r.method == Method::Get && r.url.starts_with(ENTRIES))
        .count();
    assert_eq!(gets, 3);
}

#[test]
fn test_fetch_filters_drafts_and_includes_static_pages() {
    let root = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    transport
        .ok(
            Method::Get,
            ENTRIES,
            feed_xml(
                &[
                    EntryXml::new(PUBLISHED, EDIT),
                    EntryXml::new(
                        "https://example.hatenablog.com/entry/abcxyz",
                        &format!("{ENTRIES}/2"),
                    )
                    .draft(),
                ],
                None,
            ),
        )
        .ok(
            Method::Get,
            PAGES,
            feed_xml(
                &[EntryXml::new(
                    "https://example.hatenablog.com/about",
                    &format!("{PAGES}/9"),
                )],
                None,
            ),
        );
    let broker = broker(root.path(), &transport);

    let published = broker.fetch_remote_entries(true, false).unwrap();
    let urls: Vec<_> = published
        .iter()
        .map(|e| e.url().unwrap().path().to_string())
        .collect();
    assert_eq!(urls, vec!["/entry/2012/12/19/weekend-trip", "/about"]);

    let drafts = broker.fetch_remote_entries(false, true).unwrap();
    assert_eq!(drafts.len(), 1);
    assert!(drafts[0].is_draft());
}

#[test]
fn test_missing_static_page_collection_is_tolerated() {
    let root = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    transport.ok(
        Method::Get,
        ENTRIES,
        feed_xml(&[EntryXml::new(PUBLISHED, EDIT)], None),
    );

    let entries = broker(root.path(), &transport)
        .fetch_remote_entries(true, true)
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(transport.count(Method::Get, PAGES), 1);
}

#[test]
fn test_static_page_without_edit_link_is_an_error() {
    let root = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    transport
        .ok(
            Method::Get,
            ENTRIES,
            feed_xml(&[EntryXml::new(PUBLISHED, EDIT)], None),
        )
        .ok(
            Method::Get,
            PAGES,
            feed_xml(
                &[EntryXml::new("https://example.hatenablog.com/about", &format!("{PAGES}/9"))
                    .without_edit()],
                None,
            ),
        );

    let result = broker(root.path(), &transport).fetch_remote_entries(true, true);

    assert!(matches!(
        result,
        Err(Error::Atom(blogsync_atom::Error::MissingLink { ref rel })) if rel == "edit"
    ));
}

#[test]
fn test_entry_collection_failure_aborts() {
    let root = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    transport.respond(Method::Get, ENTRIES, 500, "down");

    let result = broker(root.path(), &transport).fetch_remote_entries(true, true);

    assert!(result.is_err());
    assert_eq!(transport.count(Method::Get, PAGES), 0);
}

#[test]
fn test_store_fresh_writes_once_and_stamps_mtime() {
    let root = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    transport.ok(
        Method::Get,
        ENTRIES,
        feed_xml(
            &[EntryXml::new(PUBLISHED, EDIT)
                .title("Weekend trip")
                .content("river\n")],
            None,
        ),
    );
    let broker = broker(root.path(), &transport);
    let entry = broker
        .fetch_remote_entries(true, true)
        .unwrap()
        .remove(0);

    let path = broker.local_path(&entry).unwrap();
    assert_eq!(
        path,
        blog_dir(&root).join("entry/2012/12/19/weekend-trip.md")
    );
    assert!(broker.store_fresh(&entry, &path).unwrap());
    assert!(!broker.store_fresh(&entry, &path).unwrap());

    let document = fs::read_to_string(&path).unwrap();
    assert!(document.starts_with("---\nTitle: Weekend trip\n"));
    assert!(document.ends_with("---\n\nriver\n"));
    assert_eq!(
        io::modified_time(&path).unwrap(),
        Some(Utc.with_ymd_and_hms(2012, 12, 19, 2, 0, 0).unwrap())
    );
}

#[test]
fn test_upload_skips_when_remote_is_not_older() {
    let root = TempDir::new().unwrap();
    let path = blog_dir(&root).join("entry/2012/12/19/weekend-trip.md");
    let transport = ScriptedTransport::new();
    transport.ok(
        Method::Get,
        EDIT,
        EntryXml::new(PUBLISHED, EDIT)
            .edited("2020-01-01T10:00:00+00:00")
            .document(),
    );
    write_local(
        &path,
        &format!("---\nTitle: Weekend trip\nURL: {PUBLISHED}\nEditURL: {EDIT}\n---\n\nlocal\n"),
        10,
    );

    let entry = Entry::load(&path).unwrap();
    let uploaded = broker(root.path(), &transport)
        .upload_fresh(&entry, &path)
        .unwrap();

    assert!(!uploaded);
    assert_eq!(transport.count(Method::Put, EDIT), 0);
}

#[test]
fn test_upload_puts_newer_local_entry() {
    let root = TempDir::new().unwrap();
    let path = blog_dir(&root).join("entry/2012/12/19/weekend-trip.md");
    let transport = ScriptedTransport::new();
    transport
        .ok(Method::Get, EDIT, EntryXml::new(PUBLISHED, EDIT).document())
        .ok(
            Method::Put,
            EDIT,
            EntryXml::new(PUBLISHED, EDIT)
                .title("Edited")
                .content("local\n")
                .edited("2020-01-01T10:00:01+00:00")
                .document(),
        );
    write_local(
        &path,
        &format!("---\nTitle: Edited\nURL: {PUBLISHED}\nEditURL: {EDIT}\n---\n\nlocal\n"),
        10,
    );

    let entry = Entry::load(&path).unwrap();
    let uploaded = broker(root.path(), &transport)
        .upload_fresh(&entry, &path)
        .unwrap();

    assert!(uploaded);
    let put = transport
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Put)
        .unwrap();
    assert!(put.body.unwrap().contains("<title>Edited</title>"));
    assert!(fs::read_to_string(&path).unwrap().contains("Title: Edited\n"));
}

#[test]
fn test_staged_draft_stays_staged_while_still_a_draft() {
    let root = TempDir::new().unwrap();
    let staged = blog_dir(&root).join("entry/_draft/123456.md");
    let given = "https://example.hatenablog.com/entry/2012/12/19/123456";
    let transport = ScriptedTransport::new();
    transport
        .ok(Method::Get, EDIT, EntryXml::new(given, EDIT).draft().document())
        .ok(
            Method::Put,
            EDIT,
            EntryXml::new(given, EDIT)
                .draft()
                .edited("2020-01-01T10:00:01+00:00")
                .document(),
        );
    write_local(&staged, &staged_draft_document(), 10);

    let entry = Entry::load(&staged).unwrap();
    assert!(
        broker(root.path(), &transport)
            .upload_fresh(&entry, &staged)
            .unwrap()
    );

    assert!(staged.exists());
    assert!(!blog_dir(&root).join("entry/2012/12/19/123456.md").exists());
    let stored = Entry::load(&staged).unwrap();
    assert!(stored.is_draft());
    assert_eq!(stored.url(), None);
}

#[test]
fn test_publishing_moves_entry_out_of_staging() {
    let root = TempDir::new().unwrap();
    let staged = blog_dir(&root).join("entry/_draft/123456.md");
    let transport = ScriptedTransport::new();
    transport
        .ok(
            Method::Get,
            EDIT,
            EntryXml::new("https://example.hatenablog.com/entry/abcxyz", EDIT)
                .draft()
                .document(),
        )
        .ok(Method::Put, EDIT, EntryXml::new(PUBLISHED, EDIT).document());
    write_local(&staged, &staged_draft_document(), 10);

    let mut entry = Entry::load(&staged).unwrap();
    entry.publish(Utc::now());
    assert!(
        broker(root.path(), &transport)
            .upload_fresh(&entry, &staged)
            .unwrap()
    );

    let put = &transport.requests()[1];
    assert!(!put.body.as_deref().unwrap().contains("<app:draft>yes"));
    assert!(!staged.exists());
    let published = blog_dir(&root).join("entry/2012/12/19/weekend-trip.md");
    assert!(!Entry::load(&published).unwrap().is_draft());
}

#[test]
fn test_post_static_page_with_custom_path() {
    let root = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    transport.respond(
        Method::Post,
        PAGES,
        201,
        EntryXml::new("https://example.hatenablog.com/about", &format!("{PAGES}/9")).document(),
    );
    let mut header = EntryHeader {
        title: "About".to_string(),
        ..Default::default()
    };
    header.custom_path = Some("about".to_string());
    let entry = Entry::new(header, "Who we are\n");

    let path = broker(root.path(), &transport)
        .post_entry(&entry, true, None)
        .unwrap();

    assert_eq!(path, blog_dir(&root).join("about.md"));
    let body = transport.requests()[0].body.clone().unwrap();
    assert!(body.contains("<hatenablog:custom-url>about</hatenablog:custom-url>"));
    let stored = Entry::load(&path).unwrap();
    assert_eq!(stored.custom_path(), Some("about"));
    assert_eq!(stored.edit_url(), format!("{PAGES}/9"));
}

#[test]
fn test_post_moves_new_local_file_to_resolved_path() {
    let root = TempDir::new().unwrap();
    let draft = blog_dir(&root).join("entry/ideas.md");
    write_local(&draft, "---\nTitle: Ideas\nEditURL: ''\n---\n\nidea\n", 10);
    let transport = ScriptedTransport::new();
    transport.respond(
        Method::Post,
        ENTRIES,
        201,
        EntryXml::new(PUBLISHED, EDIT).document(),
    );

    let entry = Entry::load(&draft).unwrap();
    let path = broker(root.path(), &transport)
        .post_entry(&entry, false, Some(&draft))
        .unwrap();

    assert_eq!(path, blog_dir(&root).join("entry/2012/12/19/weekend-trip.md"));
    assert!(path.exists());
    assert!(!draft.exists());
}

#[test]
fn test_posted_draft_is_staged_without_url() {
    let root = TempDir::new().unwrap();
    let transport = ScriptedTransport::new();
    transport.respond(
        Method::Post,
        ENTRIES,
        201,
        EntryXml::new(
            "https://example.hatenablog.com/entry/abcxyz",
            &format!("{ENTRIES}/42"),
        )
        .draft()
        .document(),
    );
    let header = EntryHeader {
        title: "Draft".to_string(),
        is_draft: true,
        ..Default::default()
    };

    let path = broker(root.path(), &transport)
        .post_entry(&Entry::new(header, "draft\n"), false, None)
        .unwrap();

    assert_eq!(path, blog_dir(&root).join("entry/_draft/42.md"));
    let document = fs::read_to_string(&path).unwrap();
    assert!(
        !document.lines().any(|line| line.starts_with("URL:")),
        "got:\n{document}"
    );
    assert!(document.contains("\nEditURL: "));
    let stored = Entry::load(&path).unwrap();
    assert!(stored.is_draft());
    assert_eq!(stored.url(), None);
}

#[test]
fn test_remove_deletes_remote_and_local() {
    let root = TempDir::new().unwrap();
    let path = blog_dir(&root).join("entry/2012/12/19/weekend-trip.md");
    write_local(
        &path,
        &format!("---\nTitle: Gone\nURL: {PUBLISHED}\nEditURL: {EDIT}\n---\n\nbye\n"),
        10,
    );
    let transport = ScriptedTransport::new();
    transport.ok(Method::Delete, EDIT, "");

    let entry = Entry::load(&path).unwrap();
    broker(root.path(), &transport)
        .remove_entry(&entry, &path)
        .unwrap();

    assert_eq!(transport.count(Method::Delete, EDIT), 1);
    assert!(!path.exists());
}

#[test]
fn test_fetch_entry_refreshes_stale_file_and_keeps_custom_path() {
    let root = TempDir::new().unwrap();
    let path = blog_dir(&root).join("entry/trip.md");
    write_local(
        &path,
        &format!("---\nTitle: Old\nEditURL: {EDIT}\nCustomPath: trip\n---\n\nold\n"),
        10,
    );
    let transport = ScriptedTransport::new();
    transport.ok(
        Method::Get,
        EDIT,
        EntryXml::new(PUBLISHED, EDIT)
            .title("New")
            .edited("2021-01-01T00:00:00+00:00")
            .document(),
    );

    let local = Entry::load(&path).unwrap();
    assert!(
        broker(root.path(), &transport)
            .fetch_entry(&local, &path)
            .unwrap()
    );

    let stored = Entry::load(&path).unwrap();
    assert_eq!(stored.title(), "New");
    assert_eq!(stored.custom_path(), Some("trip"));
}
