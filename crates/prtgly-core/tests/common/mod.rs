#![allow(clippy::unwrap_used, dead_code)]
// In-memory table server shared by the integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use prtgly_api::{
    Content, Error, FilterOperator, Property, SortDirection, TablePage, TableRequest,
    TableTransport,
};
use prtgly_core::CancellationToken;

/// Serves rows from fixed tables, honouring equality filters, sorting and
/// paging the way the real server does.
#[derive(Default)]
pub struct FakeServer {
    tables: HashMap<Content, Vec<Value>>,
    failing: HashSet<Content>,
    /// Return filtered rows in reverse order.
    reversed: bool,
    /// Cap every page at this many rows, whatever `count` says.
    page_cap: Option<usize>,
    /// Report this `treesize` instead of the real one.
    fake_total: Option<u64>,
    /// Fire the token once this many pages of the table were served.
    cancel_after: Option<(Content, usize, CancellationToken)>,
    requests: Mutex<Vec<TableRequest>>,
    served: Mutex<Vec<(Content, usize)>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, content: Content, rows: impl IntoIterator<Item = Value>) -> Self {
        self.tables.entry(content).or_default().extend(rows);
        self
    }

    pub fn failing(mut self, content: Content) -> Self {
        self.failing.insert(content);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn page_cap(mut self, cap: usize) -> Self {
        self.page_cap = Some(cap);
        self
    }

    pub fn fake_total(mut self, total: u64) -> Self {
        self.fake_total = Some(total);
        self
    }

    pub fn cancel_after(mut self, content: Content, pages: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((content, pages, token));
        self
    }

    pub fn requests(&self) -> Vec<TableRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, content: Content) -> Vec<TableRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.content == content)
            .collect()
    }

    /// Rows returned per page for `content`, in request order.
    pub fn page_sizes_for(&self, content: Content) -> Vec<usize> {
        self.served
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == content)
            .map(|(_, n)| *n)
            .collect()
    }

    fn matching_rows(&self, request: &TableRequest) -> Vec<Value> {
        let mut rows: Vec<Value> = self
            .tables
            .get(&request.content)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|row| {
                request
                    .filters
                    .iter()
                    .filter(|f| f.operator() == FilterOperator::Equals)
                    .all(|f| {
                        let cell = cell(row, f.property());
                        f.values().iter().any(|v| v.eq_ignore_ascii_case(&cell))
                    })
            })
            .collect();

        if let Some((property, direction)) = request.sort {
            rows.sort_by(|a, b| {
                let (a, b) = (&a[key(property)], &b[key(property)]);
                match (a.as_u64(), b.as_u64()) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    _ => a.to_string().cmp(&b.to_string()),
                }
            });
            if direction == SortDirection::Descending {
                rows.reverse();
            }
        }
        if self.reversed {
            rows.reverse();
        }
        rows
    }
}

fn key(property: Property) -> &'static str {
    match property {
        Property::Type => "type_raw",
        other => other.column(),
    }
}

fn cell(row: &Value, property: Property) -> String {
    match &row[key(property)] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl TableTransport for FakeServer {
    async fn execute_table_query<T>(&self, request: &TableRequest) -> Result<TablePage<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        self.requests.lock().unwrap().push(request.clone());

        if self.failing.contains(&request.content) {
            return Err(Error::RequestFailed {
                status: 500,
                diagnostic: format!("{} table unavailable", request.content),
            });
        }

        let rows = self.matching_rows(request);
        let total = self
            .fake_total
            .unwrap_or_else(|| u64::try_from(rows.len()).unwrap());

        let count = request
            .count
            .map_or(usize::MAX, |c| usize::try_from(c).unwrap());
        let count = self.page_cap.map_or(count, |cap| count.min(cap));
        let start = usize::try_from(request.start).unwrap();

        let records: Vec<T> = rows
            .into_iter()
            .skip(start)
            .take(count)
            .map(|row| serde_json::from_value(row).unwrap())
            .collect();
        self.served
            .lock()
            .unwrap()
            .push((request.content, records.len()));

        if let Some((content, pages, token)) = &self.cancel_after {
            if *content == request.content && self.page_sizes_for(*content).len() == *pages {
                token.cancel();
            }
        }

        Ok(TablePage {
            records,
            total: Some(total),
        })
    }
}

// ── Row builders ────────────────────────────────────────────────────

pub fn object_row(id: u32, type_raw: &str, basetype: &str) -> Value {
    json!({
        "objid": id,
        "name": format!("{type_raw}-{id}"),
        "type": type_raw,
        "type_raw": type_raw,
        "basetype": basetype,
        "parentid": 1,
        "tags": "",
        "active": true
    })
}

pub fn device_row(id: u32) -> Value {
    json!({
        "objid": id,
        "name": format!("device-{id}"),
        "type_raw": "device",
        "basetype": "device",
        "parentid": 1,
        "active": true,
        "status_raw": 3,
        "host": format!("10.0.0.{id}"),
        "group": "Servers",
        "probe": "Local Probe",
        "totalsens": 4
    })
}

pub fn group_row(id: u32) -> Value {
    json!({
        "objid": id,
        "name": format!("group-{id}"),
        "type_raw": "group",
        "basetype": "group",
        "parentid": 1,
        "active": true,
        "status_raw": 3,
        "probe": "Local Probe"
    })
}

pub fn sensor_row(id: u32, raw_type: &str) -> Value {
    json!({
        "objid": id,
        "name": format!("{raw_type}-{id}"),
        "type_raw": raw_type,
        "basetype": "sensor",
        "parentid": 40,
        "active": true,
        "status_raw": 3,
        "device": "device-40",
        "interval_raw": 60
    })
}

pub fn supporting_row(id: u32, name: &str) -> Value {
    json!({ "objid": id, "name": name, "active": true, "tags": "" })
}

/// Every `filter_objid` value of `request`, parsed.
pub fn id_filter(request: &TableRequest) -> Vec<u32> {
    request
        .filters
        .iter()
        .filter(|f| f.property() == Property::Id)
        .flat_map(|f| f.values().iter().map(|v| v.parse().unwrap()))
        .collect()
}
