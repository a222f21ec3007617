// ── Content parameters ──
//
// Everything needed to build the table requests of one stream. Builders
// consume `self`; `with_id_filter` borrows and returns a specialized copy
// so one base parameter set can fan out into several lookups.

use prtgly_api::{Content, Property, SearchFilter, SortDirection, TableRequest};

use crate::model::{PrtgObject, TableEntity};

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Query description for one paginated stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentParameters {
    content: Content,
    columns: Vec<Property>,
    filters: Vec<SearchFilter>,
    page_size: u32,
    start: u64,
    sort: Option<(Property, SortDirection)>,
}

impl ContentParameters {
    pub fn new(content: Content, columns: impl IntoIterator<Item = Property>) -> Self {
        Self {
            content,
            columns: columns.into_iter().collect(),
            filters: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            start: 0,
            sort: None,
        }
    }

    /// Parameters reading every column of `T` from its table.
    pub fn for_entity<T: TableEntity>() -> Self {
        Self::new(T::CONTENT, T::columns().iter().copied())
    }

    /// Generic objects, ordered by id.
    pub fn objects() -> Self {
        Self::for_entity::<PrtgObject>().with_sort(Property::Id, SortDirection::Ascending)
    }

    // ── Builders ─────────────────────────────────────────────────────

    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: impl IntoIterator<Item = SearchFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Rows per page. Clamped to at least one.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Skip the first `start` matching rows.
    pub fn with_start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    pub fn with_sort(mut self, property: Property, direction: SortDirection) -> Self {
        self.sort = Some((property, direction));
        self
    }

    /// A copy restricted to `ids`: existing id filters are replaced by a
    /// single `objid ∈ ids` filter, all other filters are kept.
    pub fn with_id_filter(&self, ids: &[u32]) -> Self {
        let mut filters: Vec<SearchFilter> = self
            .filters
            .iter()
            .filter(|f| f.property() != Property::Id)
            .cloned()
            .collect();
        filters.push(SearchFilter::any_of(Property::Id, ids));

        Self {
            filters,
            ..self.clone()
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn content(&self) -> Content {
        self.content
    }

    pub fn columns(&self) -> &[Property] {
        &self.columns
    }

    pub fn filters(&self) -> &[SearchFilter] {
        &self.filters
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn sort(&self) -> Option<(Property, SortDirection)> {
        self.sort
    }

    /// The request for the page beginning at `offset`.
    pub fn to_request(&self, offset: u64) -> TableRequest {
        TableRequest {
            content: self.content,
            columns: self.columns.clone(),
            filters: self.filters.clone(),
            count: Some(self.page_size),
            start: offset,
            sort: self.sort,
        }
    }
}
