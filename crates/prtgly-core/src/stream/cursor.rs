// ── Pagination cursor ──
//
// Offset/count paging over one table. The cursor advances by the number of
// rows actually returned, records the first `treesize` it sees, and is
// exhausted on a short page or once the offset reaches that total.

use tracing::debug;

use prtgly_api::TableTransport;

use crate::error::CoreError;
use crate::model::TableEntity;
use crate::parameters::ContentParameters;

/// Position of one stream run within its result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    offset: u64,
    page_size: u32,
    total: Option<u64>,
    exhausted: bool,
}

impl PaginationCursor {
    pub fn new(start: u64, page_size: u32) -> Self {
        Self {
            offset: start,
            page_size: page_size.max(1),
            total: None,
            exhausted: false,
        }
    }

    /// Cursor positioned at the start of `parameters`.
    pub fn for_parameters(parameters: &ContentParameters) -> Self {
        Self::new(parameters.start(), parameters.page_size())
    }

    /// The cursor after a page of `received` rows.
    ///
    /// Only the first reported total is kept.
    pub fn advance(self, received: usize, reported_total: Option<u64>) -> Self {
        let received_u64 = u64::try_from(received).unwrap_or(u64::MAX);
        let offset = self.offset.saturating_add(received_u64);
        let total = self.total.or(reported_total);

        let short_page = received < usize::try_from(self.page_size).unwrap_or(usize::MAX);
        let reached_total = total.is_some_and(|t| offset >= t);

        Self {
            offset,
            page_size: self.page_size,
            total,
            exhausted: self.exhausted || short_page || reached_total,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Fetch the page at `cursor` and return its rows with the advanced cursor.
///
/// One request, no retries. Errors leave the caller's cursor untouched.
pub async fn fetch_page<C, T>(
    transport: &C,
    parameters: &ContentParameters,
    cursor: PaginationCursor,
) -> Result<(Vec<T>, PaginationCursor), CoreError>
where
    C: TableTransport,
    T: TableEntity,
{
    let request = parameters.to_request(cursor.offset());
    let page = transport.execute_table_query::<T>(&request).await?;

    let received = page.records.len();
    let next = cursor.advance(received, page.total);
    debug!(
        content = %parameters.content(),
        offset = cursor.offset(),
        received,
        total = ?next.total(),
        exhausted = next.is_exhausted(),
        "fetched page"
    );

    Ok((page.records, next))
}
