//! Property tests for frontmatter documents

use blogsync_core::frontmatter::{parse, serialize_at};
use blogsync_core::{Entry, EntryHeader};
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use url::Url;

fn header_strategy() -> impl Strategy<Value = EntryHeader> {
    (
        "[A-Za-z][A-Za-z0-9 ,.!?'-]{0,29}",
        prop::collection::btree_set("[a-z]{1,8}", 0..4),
        prop::option::of(0i64..2_000_000_000),
        prop::option::of("[a-z0-9-]{1,12}"),
        any::<bool>(),
        prop::option::of("[a-z]{1,8}(/[a-z]{1,8})?"),
    )
        .prop_map(|(title, categories, date, slug, is_draft, custom_path)| EntryHeader {
            title,
            category: categories.into_iter().collect(),
            date: date.map(|secs| {
                DateTime::from_timestamp(secs, 0)
                    .unwrap()
                    .fixed_offset()
            }),
            url: slug.map(|slug| {
                Url::parse(&format!("https://example.hatenablog.com/entry/{slug}")).unwrap()
            }),
            edit_url: "https://blog.hatena.ne.jp/u/example.hatenablog.com/atom/entry/1"
                .to_string(),
            preview_url: None,
            is_draft,
            custom_path,
        })
}

proptest! {
    #[test]
    fn test_header_and_body_survive_serialization(
        header in header_strategy(),
        body in "([^\r\n]{0,40}\n){1,5}",
    ) {
        let now = Utc.with_ymd_and_hms(2040, 1, 1, 0, 0, 0).unwrap();
        let mut expected = header.clone();
        expected.suppress_draft_date(now);

        let document = serialize_at(&Entry::new(header, body.clone()), now).unwrap();
        let (parsed, parsed_body) = parse(&document).unwrap();

        prop_assert_eq!(parsed, expected);
        prop_assert_eq!(parsed_body, body);
    }

    #[test]
    fn test_serialized_documents_end_with_one_newline(body in "[a-z \n]{0,40}") {
        let document = serialize_at(&Entry::new(EntryHeader::default(), body.clone()), Utc::now()).unwrap();
        prop_assert!(document.ends_with('\n'));
        if body.ends_with('\n') {
            prop_assert!(document.ends_with(&body));
        } else {
            let expected = format!("{}\n", body);
            prop_assert!(document.ends_with(&expected));
        }
    }
}
