//! Generic CRUD domain over a cursor-paginated endpoint
//!
//! Every resource domain is a [`CrudDomain`] with a fixed base path. The
//! single-page fetch is the primitive; the lazy stream and the eager
//! collection are both built on the same cursor loop.

use super::types::{ListResponse, PageParams, SingleResponse};
use crate::error::{Error, Result};
use crate::http::{SendRequest, Transport};
use crate::types::JsonValue;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Where the next request of a pagination loop starts
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageCursor {
    /// First request, caller's params untouched
    Start,
    /// Follow-up request with this token
    After(String),
    /// Last page already seen
    Done,
}

/// Retrieval operations for one resource type at one base path.
///
/// Holds no per-call state; each `list`, `stream_all` and `get_all` call
/// owns its own cursor.
pub struct CrudDomain<T> {
    base_path: String,
    transport: Arc<dyn Transport>,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for CrudDomain<T> {
    fn clone(&self) -> Self {
        Self {
            base_path: self.base_path.clone(),
            transport: Arc::clone(&self.transport),
            _item: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for CrudDomain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudDomain")
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

impl<T> CrudDomain<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Bind a base path to a transport
    pub fn new(base_path: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_path = base_path.into().trim_end_matches('/').to_string();
        Self {
            base_path,
            transport,
            _item: PhantomData,
        }
    }

    /// The list endpoint path
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Path of a single object. The id is percent-encoded as one segment.
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.base_path, urlencoding::encode(id))
    }

    /// Fetch one object by id
    pub async fn get(&self, id: &str) -> Result<T> {
        self.get_with(id, &PageParams::default()).await
    }

    /// Fetch one object by id with extra query parameters (e.g. `properties`)
    pub async fn get_with(&self, id: &str, params: &PageParams) -> Result<T> {
        let path = self.item_path(id);
        let request = SendRequest::get(path.as_str()).with_query(params.to_query(None));

        let body = match self.transport.send(request).await {
            Ok(body) => body,
            Err(Error::HttpStatus { status: 404, .. }) => return Err(Error::not_found(path)),
            Err(e) => return Err(e),
        };

        let response: SingleResponse<T> = decode(&path, body)?;
        Ok(response.into_inner())
    }

    /// Fetch exactly one page, returned verbatim
    pub async fn list(&self, params: &PageParams) -> Result<ListResponse<T>> {
        fetch_page(self.transport.as_ref(), &self.base_path, params, None).await
    }

    /// Lazily fetch every page.
    ///
    /// A page is requested only when the consumer polls past the previous
    /// one. Dropping the stream stops pagination. A failed request yields
    /// its error and ends the stream.
    pub fn stream_pages(
        &self,
        params: &PageParams,
    ) -> BoxStream<'static, Result<ListResponse<T>>> {
        let transport = Arc::clone(&self.transport);
        let base_path = self.base_path.clone();
        let params = params.clone();

        stream::try_unfold((PageCursor::Start, 1usize), move |(cursor, page_no)| {
            next_page(
                Arc::clone(&transport),
                base_path.clone(),
                params.clone(),
                cursor,
                page_no,
            )
        })
        .boxed()
    }

    /// Lazily fetch every item across all pages, in page order.
    pub fn stream_all(&self, params: &PageParams) -> BoxStream<'static, Result<T>> {
        self.stream_pages(params)
            .map_ok(|page| stream::iter(page.results.into_iter().map(Ok::<T, Error>)))
            .try_flatten()
            .boxed()
    }

    /// Fetch every item across all pages. Fails without partial results if
    /// any page fails.
    pub async fn get_all(&self, params: &PageParams) -> Result<Vec<T>> {
        let items: Vec<T> = self.stream_all(params).try_collect().await?;
        debug!("Collected {} items from {}", items.len(), self.base_path);
        Ok(items)
    }
}

/// One step of the cursor loop: fetch the page `cursor` points at and work
/// out where the following step starts.
async fn next_page<T: DeserializeOwned + Send>(
    transport: Arc<dyn Transport>,
    base_path: String,
    params: PageParams,
    cursor: PageCursor,
    page_no: usize,
) -> Result<Option<(ListResponse<T>, (PageCursor, usize))>> {
    let after = match cursor {
        PageCursor::Done => return Ok(None),
        PageCursor::Start => None,
        PageCursor::After(token) => Some(token),
    };

    let page: ListResponse<T> =
        fetch_page(transport.as_ref(), &base_path, &params, after.as_deref()).await?;

    debug!(
        "Fetched page {} of {}: {} items, more: {}",
        page_no,
        base_path,
        page.results.len(),
        !page.is_last_page()
    );

    let next = match page.next_cursor() {
        Some(token) => PageCursor::After(token.to_owned()),
        None => PageCursor::Done,
    };
    Ok(Some((page, (next, page_no + 1))))
}

/// One request against the list endpoint
async fn fetch_page<T: DeserializeOwned + Send>(
    transport: &dyn Transport,
    base_path: &str,
    params: &PageParams,
    cursor: Option<&str>,
) -> Result<ListResponse<T>> {
    let request = SendRequest::get(base_path).with_query(params.to_query(cursor));
    let body = transport.send(request).await?;
    decode(base_path, body)
}

/// Decode a response body, reporting shape mismatches as malformed
fn decode<R: DeserializeOwned>(path: &str, body: JsonValue) -> Result<R> {
    serde_json::from_value(body).map_err(|e| Error::malformed(path, e.to_string()))
}
