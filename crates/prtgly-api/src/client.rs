// Async HTTP client for the PRTG table API.
//
// Endpoint: GET /api/table.json
// Auth: username + passhash / password, or apitoken, as query parameters

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::table::{TablePage, TableRequest, TableTransport};
use crate::transport::TransportConfig;

const TABLE_PATH: &str = "api/table.json";
const BODY_PREVIEW: usize = 200;

// ── Error response shape ─────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for a PRTG core server.
///
/// Holds no session state: credentials ride on every request, so one
/// client can serve any number of concurrent table queries.
pub struct PrtgClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl PrtgClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a server URL, credentials and transport config.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, credentials)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Ensure the base URL ends with `/` so relative joins keep any path
    /// prefix (reverse-proxied cores live under one).
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Requests ─────────────────────────────────────────────────────

    async fn get_table(&self, request: &TableRequest) -> Result<Value, Error> {
        let url = self.base_url.join(TABLE_PATH)?;
        let params = request.query_pairs();
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(url)
            .query(&params)
            .query(&self.credentials.query_pairs())
            .send()
            .await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response(&self, resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| deserialization_error(&e, body))
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let diagnostic = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse { error: Some(message) }) => message,
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::RequestFailed {
            status: status.as_u16(),
            diagnostic,
        }
    }
}

impl TableTransport for PrtgClient {
    async fn execute_table_query<T>(&self, request: &TableRequest) -> Result<TablePage<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        let body = self.get_table(request).await?;
        decode_page(body, request.content.as_str())
    }
}

/// Split a table response into its rows and `treesize`.
///
/// The rows live under a key named after the requested content
/// (`"sensors": [...]`). A missing key is treated as an empty table.
fn decode_page<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<TablePage<T>, Error> {
    let total = body.get("treesize").and_then(Value::as_u64);

    let rows = match body.get_mut(key).map(Value::take) {
        Some(Value::Array(rows)) => rows,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(Error::Deserialization {
                message: format!("expected `{key}` to be an array"),
                body: other.to_string(),
            });
        }
    };

    let records = rows
        .into_iter()
        .map(|row| {
            T::deserialize(&row).map_err(|e| deserialization_error(&e, row.to_string()))
        })
        .collect::<Result<Vec<T>, Error>>()?;

    Ok(TablePage { records, total })
}

fn deserialization_error(err: &serde_json::Error, body: String) -> Error {
    let preview: String = body.chars().take(BODY_PREVIEW).collect();
    Error::Deserialization {
        message: format!("{err} (body preview: {preview:?})"),
        body,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        objid: u32,
    }

    #[test]
    fn decode_reads_rows_and_treesize() {
        let body = json!({
            "prtg-version": "24.1.92.1554",
            "treesize": 12,
            "devices": [{ "objid": 40 }, { "objid": 41 }]
        });
        let page: TablePage<Row> = decode_page(body, "devices").unwrap();
        assert_eq!(page.total, Some(12));
        assert_eq!(page.records, vec![Row { objid: 40 }, Row { objid: 41 }]);
    }

    #[test]
    fn decode_missing_key_is_empty() {
        let page: TablePage<Row> = decode_page(json!({ "treesize": 0 }), "groups").unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total, Some(0));
    }

    #[test]
    fn decode_bad_row_is_deserialization_error() {
        let body = json!({ "sensors": [{ "objid": "not-a-number" }] });
        let err = decode_page::<Row>(body, "sensors").unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = PrtgClient::normalize_base_url("https://prtg.example.com/monitor").unwrap();
        assert_eq!(url.as_str(), "https://prtg.example.com/monitor/");
        assert_eq!(
            url.join(TABLE_PATH).unwrap().as_str(),
            "https://prtg.example.com/monitor/api/table.json"
        );
    }
}
