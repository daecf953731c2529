use crate::engine::client::{ClusterKey, Connector, PageStart, SearchClient, SearchHit, SearchPage};
use crate::engine::errors::StorageError;
use crate::shared::config::CONFIG;
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector as HyperConnector;
use hyper_util::rt::TokioExecutor;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    pub request_timeout: Duration,
    pub pool_idle_timeout: Duration,
    /// Largest `from + size` the cluster serves; deeper pages go through
    /// `search_after`.
    pub max_result_window: u64,
}

impl ClientOptions {
    pub fn from_config() -> Self {
        Self {
            request_timeout: Duration::from_millis(CONFIG.client.request_timeout_ms),
            pool_idle_timeout: Duration::from_secs(CONFIG.client.pool_idle_timeout_secs),
            max_result_window: CONFIG.client.max_result_window,
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            pool_idle_timeout: Duration::from_secs(90),
            max_result_window: 10_000,
        }
    }
}

/// REST client for one cluster. Nodes are tried in configured order; a
/// transport failure on one node falls through to the next.
#[derive(Debug)]
pub struct HttpSearchClient {
    key: ClusterKey,
    http: Client<HyperConnector, Full<Bytes>>,
    options: ClientOptions,
    closed: AtomicBool,
}

impl HttpSearchClient {
    pub fn new(key: ClusterKey, options: ClientOptions) -> Self {
        let http = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(options.pool_idle_timeout)
            .build_http();
        Self {
            key,
            http,
            options,
            closed: AtomicBool::new(false),
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, StorageError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::unavailable(
                &self.key.cluster_name,
                "client already closed",
            ));
        }

        let timeout = self.options.request_timeout;
        match tokio::time::timeout(timeout, self.send_to_nodes(method, path, body)).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::unavailable(
                &self.key.cluster_name,
                format!("{path} timed out after {}ms", timeout.as_millis()),
            )),
        }
    }

    async fn send_to_nodes(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, StorageError> {
        let payload = match &body {
            Some(v) => Bytes::from(v.to_string()),
            None => Bytes::new(),
        };
        let mut failures = Vec::with_capacity(self.key.nodes.len());

        for node in &self.key.nodes {
            let uri = format!("http://{node}{path}")
                .parse::<hyper::Uri>()
                .map_err(|e| {
                    StorageError::unavailable(&self.key.cluster_name, format!("bad uri: {e}"))
                })?;

            let req = Request::builder()
                .method(method.clone())
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Full::new(payload.clone()))
                .map_err(|e| {
                    StorageError::unavailable(
                        &self.key.cluster_name,
                        format!("failed to build request: {e}"),
                    )
                })?;

            let res = match self.http.request(req).await {
                Ok(res) => res,
                Err(e) => {
                    warn!(
                        target: "es_storage::client",
                        cluster = %self.key.cluster_name,
                        node = %node,
                        "Node unreachable: {e}"
                    );
                    failures.push(format!("{node}: {e}"));
                    continue;
                }
            };

            let status = res.status();
            let bytes = res
                .collect()
                .await
                .map_err(|e| {
                    StorageError::unavailable(
                        &self.key.cluster_name,
                        format!("{node}: failed reading response: {e}"),
                    )
                })?
                .to_bytes();

            if !status.is_success() {
                return Err(StorageError::UpstreamQuery {
                    cluster: self.key.cluster_name.clone(),
                    status: status.as_u16(),
                    reason: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }

            if tracing::enabled!(tracing::Level::DEBUG) {
                debug!(
                    target: "es_storage::client",
                    cluster = %self.key.cluster_name,
                    node = %node,
                    path,
                    bytes = bytes.len(),
                    "Request completed"
                );
            }

            return serde_json::from_slice(&bytes).map_err(|e| StorageError::UpstreamQuery {
                cluster: self.key.cluster_name.clone(),
                status: status.as_u16(),
                reason: format!("malformed response: {e}"),
            });
        }

        Err(StorageError::unavailable(
            &self.key.cluster_name,
            format!("no reachable node ({})", failures.join("; ")),
        ))
    }

    /// Reads up to `count` documents after `cursor` with `search_after`,
    /// never asking for more than the result window in one request. With
    /// `keep_hits` off only the position advances; sources are not fetched.
    async fn walk(
        &self,
        path: &str,
        mut cursor: Option<Value>,
        count: u64,
        keep_hits: bool,
    ) -> Result<(SearchPage, u64), StorageError> {
        let window = self.options.max_result_window.max(1);
        let mut hits = Vec::new();
        let mut seen = 0u64;

        while seen < count {
            let size = (count - seen).min(window);
            let query = search_after_body(cursor.as_ref(), size, keep_hits);
            let body = self.send(Method::POST, path, Some(query)).await?;
            let page = parse_search_response(&self.key.cluster_name, &body)?;
            let received = page.hits.len() as u64;

            match page.cursor {
                Some(next) => cursor = Some(next),
                None if received > 0 => {
                    return Err(StorageError::UpstreamQuery {
                        cluster: self.key.cluster_name.clone(),
                        status: 200,
                        reason: "search_after page returned hits without sort values".to_string(),
                    });
                }
                None => {}
            }

            seen += received;
            if keep_hits {
                hits.extend(page.hits);
            }
            if received < size {
                break;
            }
        }

        Ok((SearchPage { hits, cursor }, seen))
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    fn cluster_name(&self) -> &str {
        &self.key.cluster_name
    }

    async fn count(&self, index: &str, doc_type: &str) -> Result<u64, StorageError> {
        let path = format!("/{index}/{doc_type}/_count");
        let body = self.send(Method::GET, &path, None).await?;
        parse_count_response(&self.key.cluster_name, &body)
    }

    async fn search(
        &self,
        index: &str,
        doc_type: &str,
        start: PageStart,
        length: u64,
    ) -> Result<SearchPage, StorageError> {
        let path = format!("/{index}/{doc_type}/_search");
        let cursor = match start {
            PageStart::Offset(offset)
                if offset.saturating_add(length) <= self.options.max_result_window =>
            {
                let body = self
                    .send(Method::POST, &path, Some(search_body(offset, length)))
                    .await?;
                return parse_search_response(&self.key.cluster_name, &body);
            }
            PageStart::Offset(0) => None,
            PageStart::Offset(offset) => {
                // Past the result window: skip ahead by cursor, ids only
                let (skipped, seen) = self.walk(&path, None, offset, false).await?;
                if tracing::enabled!(tracing::Level::DEBUG) {
                    debug!(
                        target: "es_storage::client",
                        cluster = %self.key.cluster_name,
                        offset,
                        skipped = seen,
                        "Positioned deep page"
                    );
                }
                if seen < offset {
                    return Ok(SearchPage::default());
                }
                skipped.cursor
            }
            PageStart::After(cursor) => Some(cursor),
        };

        let (page, _) = self.walk(&path, cursor, length, true).await?;
        Ok(page)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        debug!(target: "es_storage::client", cluster = %self.key.cluster_name, "Client closed");
    }
}

/// `_doc` order is the cheapest stable order the cluster offers, which is
/// what keeps offset windows from different fragments disjoint.
pub fn search_body(offset: u64, length: u64) -> Value {
    json!({
        "from": offset,
        "size": length,
        "sort": ["_doc"],
        "query": { "match_all": {} }
    })
}

/// Cursor-continued page in the same `_doc` order as [`search_body`].
pub fn search_after_body(after: Option<&Value>, size: u64, with_source: bool) -> Value {
    let mut body = json!({
        "size": size,
        "sort": ["_doc"],
        "query": { "match_all": {} }
    });
    if let Some(after) = after {
        body["search_after"] = after.clone();
    }
    if !with_source {
        body["_source"] = Value::Bool(false);
    }
    body
}

pub fn parse_count_response(cluster: &str, body: &Value) -> Result<u64, StorageError> {
    body.get("count")
        .and_then(Value::as_u64)
        .ok_or_else(|| StorageError::UpstreamQuery {
            cluster: cluster.to_string(),
            status: 200,
            reason: format!("count response has no non-negative 'count': {body}"),
        })
}

pub fn parse_search_response(cluster: &str, body: &Value) -> Result<SearchPage, StorageError> {
    let hits = body
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .ok_or_else(|| StorageError::UpstreamQuery {
            cluster: cluster.to_string(),
            status: 200,
            reason: "search response has no 'hits.hits' array".to_string(),
        })?;

    let cursor = hits.last().and_then(|hit| hit.get("sort")).cloned();
    let hits = hits
        .iter()
        .map(|hit| SearchHit {
            id: hit
                .get("_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            doc_type: hit
                .get("_type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            score: hit.get("_score").and_then(Value::as_f64),
            source: hit.get("_source").cloned().unwrap_or(Value::Null),
        })
        .collect();

    Ok(SearchPage { hits, cursor })
}

/// Production connector: one pooled HTTP client per cluster key.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    options: ClientOptions,
}

impl HttpConnector {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }
}

impl Connector for HttpConnector {
    fn connect(&self, key: &ClusterKey) -> Result<Arc<dyn SearchClient>, StorageError> {
        if key.nodes.is_empty() {
            return Err(StorageError::unavailable(
                &key.cluster_name,
                "no node addresses configured",
            ));
        }
        debug!(target: "es_storage::client", cluster = %key, "Opening cluster client");
        Ok(Arc::new(HttpSearchClient::new(key.clone(), self.options)))
    }
}
