//! Paginated object listing
//!
//! Turns page-at-a-time `ObjectStore::list_objects` calls into a lazy stream.

use futures::Stream;
use futures::stream;

use crate::error::{Error, Result};
use crate::traits::{ListOptions, ObjectRef, ObjectStore};

/// Keys requested per page
pub const PAGE_SIZE: i32 = 1000;

enum Cursor {
    First,
    Next(String),
    Done,
}

/// Stream every page of objects under `prefix`, with restore status included
///
/// Pages are fetched one at a time as the stream is polled. The first error
/// is yielded and ends the stream.
pub fn list_pages<'a>(
    store: &'a dyn ObjectStore,
    bucket: &'a str,
    prefix: &'a str,
) -> impl Stream<Item = Result<Vec<ObjectRef>>> + 'a {
    let options = ListOptions {
        prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
        include_restore_status: true,
        continuation_token: None,
        max_keys: Some(PAGE_SIZE),
    };

    stream::try_unfold(Cursor::First, move |cursor| {
        let options = options.clone();
        async move {
            let continuation_token = match cursor {
                Cursor::Done => return Ok(None),
                Cursor::First => None,
                Cursor::Next(token) => Some(token),
            };

            let page = store
                .list_objects(
                    bucket,
                    ListOptions {
                        continuation_token,
                        ..options
                    },
                )
                .await?;

            tracing::debug!(
                bucket,
                objects = page.objects.len(),
                truncated = page.truncated,
                "fetched listing page"
            );

            let next = match page.next_continuation_token {
                Some(token) if page.truncated => Cursor::Next(token),
                _ => Cursor::Done,
            };

            Ok::<_, Error>(Some((page.objects, next)))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ListPage, MockObjectStore, StorageClass};
    use futures::TryStreamExt;
    use mockall::Sequence;

    fn page(keys: &[&str], next: Option<&str>) -> ListPage {
        ListPage {
            objects: keys
                .iter()
                .map(|k| ObjectRef::new(*k, StorageClass::DeepArchive))
                .collect(),
            truncated: next.is_some(),
            next_continuation_token: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_follows_continuation_tokens() {
        let mut store = MockObjectStore::new();
        let mut seq = Sequence::new();

        store
            .expect_list_objects()
            .withf(|bucket, opts| {
                bucket == "archive"
                    && opts.continuation_token.is_none()
                    && opts.prefix.as_deref() == Some("logs/")
                    && opts.include_restore_status
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(page(&["logs/a", "logs/b"], Some("t1"))));
        store
            .expect_list_objects()
            .withf(|_, opts| opts.continuation_token.as_deref() == Some("t1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(page(&["logs/c"], None)));

        let pages: Vec<Vec<ObjectRef>> = list_pages(&store, "archive", "logs/")
            .try_collect()
            .await
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 2);
        assert_eq!(pages[1][0].key, "logs/c");
    }

    #[tokio::test]
    async fn test_empty_prefix_lists_whole_bucket() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .withf(|_, opts| opts.prefix.is_none())
            .times(1)
            .returning(|_, _| Ok(ListPage::default()));

        let pages: Vec<Vec<ObjectRef>> =
            list_pages(&store, "archive", "").try_collect().await.unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[tokio::test]
    async fn test_truncated_without_token_stops() {
        let mut store = MockObjectStore::new();
        store.expect_list_objects().times(1).returning(|_, _| {
            Ok(ListPage {
                objects: vec![],
                truncated: true,
                next_continuation_token: None,
            })
        });

        let pages: Vec<Vec<ObjectRef>> =
            list_pages(&store, "archive", "").try_collect().await.unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn test_page_error_ends_stream() {
        let mut store = MockObjectStore::new();
        let mut seq = Sequence::new();
        store
            .expect_list_objects()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(page(&["a"], Some("t1"))));
        store
            .expect_list_objects()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::Network("connection reset".into())));

        let result: Result<Vec<Vec<ObjectRef>>> =
            list_pages(&store, "archive", "").try_collect().await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
