//! Consuming paginators

use super::types::{PageSource, Pull, ResponsePage};
use crate::error::Result;
use futures::stream::{self, Stream};

/// Pull until exhausted and concatenate every page's items
pub async fn collect_all<T, P>(source: &mut P) -> Result<Vec<T>>
where
    T: Send,
    P: PageSource<T> + ?Sized,
{
    let mut items = Vec::new();
    while let Pull::Page(page) = source.pull().await? {
        items.extend(page.data);
    }
    Ok(items)
}

/// Adapt a paginator into a stream of pages.
///
/// The stream ends on exhaustion, or right after yielding the first error.
pub fn into_stream<T, P>(source: P) -> impl Stream<Item = Result<ResponsePage<T>>>
where
    T: Send,
    P: PageSource<T>,
{
    stream::unfold(Some(source), |source| async move {
        let mut source = source?;
        match source.pull().await {
            Ok(Pull::Page(page)) => Some((Ok(page), Some(source))),
            Ok(Pull::Exhausted) => None,
            Err(e) => Some((Err(e), None)),
        }
    })
}
