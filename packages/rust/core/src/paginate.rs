//! Sequential continuation-token pagination.
//!
//! [`paginate`] turns a page-fetching function into a lazy stream of pages.
//! Fetches happen one at a time, only when the consumer polls for the next
//! page, and each fetch receives the token returned by the previous one.

use std::future::Future;

use futures::stream::{self, Stream, TryStreamExt};
use stackconf_shared::Page;

/// Drive `fetch` until it stops returning a continuation token.
///
/// The first call receives `None`. An empty token ends the listing just like
/// an absent one. There is no iteration cap; termination is up to the store.
pub fn paginate<T, E, F, Fut>(fetch: F) -> impl Stream<Item = Result<Vec<T>, E>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    // `None` cursor = listing finished; `Some(token)` = fetch with `token`.
    stream::try_unfold((fetch, Some(None)), |(mut fetch, cursor)| async move {
        let Some(token) = cursor else {
            return Ok::<_, E>(None);
        };
        let page = fetch(token).await?;
        let next = page.next_token.filter(|t| !t.is_empty()).map(Some);
        Ok(Some((page.items, (fetch, next))))
    })
}

/// Run a listing to completion and flatten all pages into one vector.
pub async fn collect_all<T, E, F, Fut>(fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    paginate(fetch).try_concat().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn page(items: &[u32], next: Option<&str>) -> Page<u32> {
        Page {
            items: items.to_vec(),
            next_token: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn feeds_tokens_forward_in_order() {
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
        let recorder = Arc::clone(&seen);

        let items = collect_all(move |token: Option<String>| {
            let recorder = Arc::clone(&recorder);
            async move {
                recorder.lock().expect("lock").push(token.clone());
                let result = match token.as_deref() {
                    None => page(&[1], Some("a")),
                    Some("a") => page(&[2, 3], Some("b")),
                    Some("b") => page(&[4], None),
                    Some(other) => panic!("unexpected token {other}"),
                };
                Ok::<_, String>(result)
            }
        })
        .await
        .expect("listing");

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            *seen.lock().expect("lock"),
            vec![None, Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_token_ends_listing() {
        let mut calls = 0;
        let items = collect_all(|_token| {
            calls += 1;
            async { Ok::<_, String>(page(&[7], Some(""))) }
        })
        .await
        .expect("listing");

        assert_eq!(items, vec![7]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn error_stops_the_stream() {
        let mut calls = 0;
        let result = collect_all(|token: Option<String>| {
            calls += 1;
            async move {
                match token {
                    None => Ok(page(&[1], Some("next"))),
                    Some(_) => Err("throttled".to_string()),
                }
            }
        })
        .await;

        assert_eq!(result, Err("throttled".to_string()));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn pages_are_fetched_lazily() {
        use futures::StreamExt;

        let mut calls = 0;
        {
            let stream = paginate(|_token: Option<String>| {
                calls += 1;
                async { Ok::<_, String>(page(&[1], Some("more"))) }
            });
            futures::pin_mut!(stream);
            let first = stream.next().await.expect("one page").expect("ok");
            assert_eq!(first, vec![1]);
        }
        assert_eq!(calls, 1);
    }
}
