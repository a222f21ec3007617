// ── Paginated object streams ──
//
// Lazy, forward-only sequences over one table query. Pages are fetched on
// demand, one at a time, and cancellation is observed between pages.

mod cursor;

use std::collections::VecDeque;
use std::sync::Arc;

use futures_util::Stream;
use futures_util::stream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use prtgly_api::TableTransport;

use crate::error::CoreError;
use crate::model::TableEntity;
use crate::parameters::ContentParameters;

pub use cursor::{PaginationCursor, fetch_page};

/// Client-side predicate applied to every fetched record.
pub type PostFilter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// How a stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every matching record was produced.
    Exhausted,
    /// The cancellation token fired before the next page was fetched.
    Cancelled,
    /// A page request failed; the error was the last item yielded.
    Failed,
}

/// A lazy sequence of `T` read page by page from one table.
///
/// At most one page is buffered. Records are yielded in server order.
/// Once [`next`](Self::next) returns `None` the stream is finished and
/// [`termination`](Self::termination) tells why.
pub struct ObjectStream<'a, C, T> {
    transport: &'a C,
    parameters: ContentParameters,
    cursor: PaginationCursor,
    buffer: VecDeque<T>,
    cancel: CancellationToken,
    post_filter: Option<PostFilter<T>>,
    termination: Option<Termination>,
}

impl<'a, C, T> ObjectStream<'a, C, T>
where
    C: TableTransport,
    T: TableEntity,
{
    /// A stream over `parameters`, starting from a fresh cursor.
    pub fn new(transport: &'a C, parameters: ContentParameters, cancel: CancellationToken) -> Self {
        let cursor = PaginationCursor::for_parameters(&parameters);
        Self {
            transport,
            parameters,
            cursor,
            buffer: VecDeque::new(),
            cancel,
            post_filter: None,
            termination: None,
        }
    }

    /// Keep only records matching `filter`. Paging still counts every row
    /// the server returned.
    pub fn with_post_filter(mut self, filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.post_filter = Some(Arc::new(filter));
        self
    }

    pub fn parameters(&self) -> &ContentParameters {
        &self.parameters
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    /// `None` while the stream can still produce records.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// The next record, fetching a page if the buffer is empty.
    pub async fn next(&mut self) -> Option<Result<T, CoreError>> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Some(Ok(record));
            }
            if self.termination.is_some() {
                return None;
            }
            if self.cursor.is_exhausted() {
                self.termination = Some(Termination::Exhausted);
                return None;
            }
            if self.cancel.is_cancelled() {
                self.finish_cancelled();
                return None;
            }

            let fetch = fetch_page::<C, T>(self.transport, &self.parameters, self.cursor);
            let Some(result) = self.cancel.run_until_cancelled(fetch).await else {
                self.finish_cancelled();
                return None;
            };

            match result {
                Ok((records, next)) => {
                    self.cursor = next;
                    let keep = self.post_filter.as_ref();
                    self.buffer.extend(
                        records
                            .into_iter()
                            .filter(|record| keep.is_none_or(|f| f(record))),
                    );
                }
                Err(e) => {
                    self.termination = Some(Termination::Failed);
                    return Some(Err(e));
                }
            }
        }
    }

    /// Drain the stream. The first error aborts collection.
    ///
    /// A cancelled stream returns whatever was produced before the token
    /// fired.
    pub async fn collect_all(mut self) -> Result<Vec<T>, CoreError> {
        let mut all = Vec::new();
        while let Some(item) = self.next().await {
            all.push(item?);
        }
        Ok(all)
    }

    /// Adapt to a `futures` [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<T, CoreError>> + Send + 'a {
        stream::unfold(self, |mut inner| async move {
            let item = inner.next().await?;
            Some((item, inner))
        })
    }

    fn finish_cancelled(&mut self) {
        debug!(
            content = %self.parameters.content(),
            offset = self.cursor.offset(),
            "stream cancelled"
        );
        self.termination = Some(Termination::Cancelled);
    }
}
