// Table query request/response shapes and the executor seam.
//
// `TableTransport` is what the core streams against. `PrtgClient` is the
// HTTP implementation; tests substitute in-memory servers.

use std::future::Future;

use serde::de::DeserializeOwned;
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::Error;
use crate::filter::{Property, SearchFilter};

/// The `content=` table a request reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Content {
    Objects,
    Sensors,
    Devices,
    Groups,
    #[strum(serialize = "probenodes")]
    Probes,
    Notifications,
    Schedules,
}

impl Content {
    /// Wire value of the `content` parameter; also the key of the record
    /// array in the JSON response.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One table request, fully described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRequest {
    pub content: Content,
    pub columns: Vec<Property>,
    pub filters: Vec<SearchFilter>,
    /// Page size; `None` asks for every matching row (`count=*`).
    pub count: Option<u32>,
    pub start: u64,
    pub sort: Option<(Property, SortDirection)>,
}

impl TableRequest {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            columns: Vec::new(),
            filters: Vec::new(),
            count: None,
            start: 0,
            sort: None,
        }
    }

    /// Render every request parameter except credentials.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("content".to_owned(), self.content.as_str().to_owned())];

        if !self.columns.is_empty() {
            let columns: Vec<&str> = self.columns.iter().map(|p| p.column()).collect();
            pairs.push(("columns".to_owned(), columns.join(",")));
        }

        pairs.push((
            "count".to_owned(),
            self.count.map_or_else(|| "*".to_owned(), |c| c.to_string()),
        ));
        pairs.push(("start".to_owned(), self.start.to_string()));

        if let Some((property, direction)) = self.sort {
            let column = property.column();
            let value = match direction {
                SortDirection::Ascending => column.to_owned(),
                SortDirection::Descending => format!("-{column}"),
            };
            pairs.push(("sortby".to_owned(), value));
        }

        for filter in &self.filters {
            pairs.extend(filter.query_pairs());
        }

        pairs
    }
}

/// One page of deserialized rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<T> {
    pub records: Vec<T>,
    /// Total rows matching the filters (`treesize`), when reported.
    pub total: Option<u64>,
}

/// Executes table requests against a server.
///
/// Every call is atomic from the caller's point of view: no retries, no
/// partial pages. Implementations must be shareable across concurrently
/// running streams.
pub trait TableTransport: Send + Sync {
    /// Issue one table request and deserialize its rows.
    fn execute_table_query<T>(
        &self,
        request: &TableRequest,
    ) -> impl Future<Output = Result<TablePage<T>, Error>> + Send
    where
        T: DeserializeOwned + Send;

    /// Fetch every row of `content` whose id is in `ids`, in one request.
    ///
    /// Meant for small identifier-keyed tables (notification actions,
    /// schedules) that never need pagination. An empty `ids` slice returns
    /// nothing without touching the server.
    fn execute_id_lookup<T>(
        &self,
        content: Content,
        columns: &[Property],
        ids: &[u32],
    ) -> impl Future<Output = Result<Vec<T>, Error>> + Send
    where
        T: DeserializeOwned + Send,
    {
        let request = (!ids.is_empty()).then(|| TableRequest {
            columns: columns.to_vec(),
            filters: vec![SearchFilter::any_of(Property::Id, ids)],
            ..TableRequest::new(content)
        });

        async move {
            match request {
                Some(request) => Ok(self.execute_table_query(&request).await?.records),
                None => Ok(Vec::new()),
            }
        }
    }
}
