//! Page-token streaming over `ResourceListOf<T>` endpoints.

use crate::error::SdkError;
use crate::shared::ResourceListOf;
use futures_util::stream::{self, Stream};
use std::collections::VecDeque;
use std::future::Future;

struct PageState<T, F> {
    fetch: F,
    buffer: VecDeque<T>,
    /// `None` once the last page has been fetched.
    next: Option<Option<String>>,
}

/// Turn a page fetcher into a stream of items.
///
/// `fetch` is called with `None` (or `first_page`) for the first request and
/// with each response's `next_page` token afterwards. The stream ends after a
/// page without a `next_page`, or after yielding the first error.
pub fn paginate<T, F, Fut>(
    first_page: Option<String>,
    fetch: F,
) -> impl Stream<Item = Result<T, SdkError>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ResourceListOf<T>, SdkError>>,
{
    let state = PageState {
        fetch,
        buffer: VecDeque::new(),
        next: Some(first_page),
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if let Some(item) = st.buffer.pop_front() {
                return Some((Ok(item), st));
            }
            let token = st.next.take()?;
            match (st.fetch)(token.clone()).await {
                Ok(page) => {
                    st.buffer.extend(page.values);
                    // A server echoing the same token back would loop forever.
                    st.next = match page.next_page {
                        Some(next) if Some(&next) != token.as_ref() => Some(Some(next)),
                        _ => None,
                    };
                }
                Err(e) => return Some((Err(e), st)),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn page(values: Vec<u32>, next: Option<&str>) -> ResourceListOf<u32> {
        ResourceListOf {
            values,
            href: None,
            links: Vec::new(),
            next_page: next.map(str::to_string),
            previous_page: None,
        }
    }

    #[tokio::test]
    async fn test_follows_next_page_tokens() {
        let stream = paginate(None, |token| async move {
            Ok(match token.as_deref() {
                None => page(vec![1, 2], Some("p2")),
                Some("p2") => page(vec![3], Some("p3")),
                _ => page(vec![4], None),
            })
        });
        let items: Vec<u32> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(items, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_stops_after_error() {
        let stream = paginate(None, |token| async move {
            match token {
                None => Ok(page(vec![1], Some("p2"))),
                Some(_) => Err(SdkError::Other("boom".into())),
            }
        });
        let items: Vec<Result<u32, SdkError>> = stream.collect().await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[tokio::test]
    async fn test_repeated_token_terminates() {
        let stream = paginate(None, |_| async move { Ok(page(vec![7], Some("same"))) });
        let items: Vec<u32> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(items, vec![7, 7]);
    }
}
