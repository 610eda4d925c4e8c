//! HTTP backend delegating to an upstream AlumniConnect-compatible API.
//!
//! Speaks the standard response envelope. Upstream 404s map to the same
//! absent-record results the in-memory backend produces; upstream client
//! errors keep their status class so callers see validation failures as
//! validation failures. No retries, no fallback to the memory path.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::Backend;
use crate::errors::{codes, AppError, ErrorDetails};
use crate::store::query::{Direction, ListQuery, Page, PageMeta};

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Issue a request and unwrap the response envelope. A 404 yields
    /// `Ok(None)`; any other failure is mapped by [`upstream_error`].
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Option<Envelope>, AppError> {
        let mut req = self.client.request(method, self.url(path));
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: Envelope = resp.json().await?;
        if !status.is_success() || !envelope.success {
            return Err(upstream_error(status, envelope));
        }

        Ok(Some(envelope))
    }
}

/// Wire envelope as produced by this service and its upstream peers.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<ErrorDetails>,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    pagination: Option<PageMeta>,
}

/// Map a failed upstream response onto an `AppError`. Client errors are
/// re-served in their own status class; everything else is an upstream error.
fn upstream_error(status: StatusCode, envelope: Envelope) -> AppError {
    let code = envelope.error.as_ref().map(|e| e.code.clone());
    let message = envelope
        .message
        .or(envelope.error.map(|e| e.message))
        .unwrap_or_else(|| format!("Upstream returned {}", status));

    if status.is_client_error() {
        match code.as_deref() {
            Some(codes::VALIDATION_ERROR) => AppError::Validation(message),
            Some(codes::UNAUTHORIZED) => AppError::Unauthorized(message),
            _ => AppError::BadRequest(message),
        }
    } else {
        AppError::Upstream(message)
    }
}

fn list_params(query: &ListQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("page".to_string(), query.page.to_string()),
        ("limit".to_string(), query.limit.to_string()),
    ];

    if let Some((field, direction)) = &query.sort {
        params.push(("sort".to_string(), field.clone()));
        let order = match direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        params.push(("order".to_string(), order.to_string()));
    }

    for clause in query.filter.clauses() {
        params.push((clause.field.clone(), clause.value.clone()));
    }
    if let Some(search) = query.filter.text_search() {
        params.push(("q".to_string(), search.term.clone()));
    }

    params
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Page, AppError> {
        let envelope = self
            .request(Method::GET, collection, &list_params(query), None)
            .await?
            .ok_or_else(|| {
                AppError::Upstream(format!("Upstream returned 404 listing {}", collection))
            })?;

        let items: Vec<Value> = match envelope.data {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                return Err(AppError::Upstream(format!(
                    "Upstream list response was not an array: {}",
                    other
                )))
            }
        };

        // Synthesize metadata when the upstream omits the pagination block.
        let meta = envelope.pagination.unwrap_or(PageMeta {
            page: query.page,
            limit: query.limit,
            total: items.len() as u64,
            total_pages: 1,
        });

        Ok(Page {
            items,
            total: meta.total,
            page: meta.page,
            limit: meta.limit,
            total_pages: meta.total_pages,
        })
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, AppError> {
        let path = format!("{}/{}", collection, id);
        Ok(self
            .request(Method::GET, &path, &[], None)
            .await?
            .map(|envelope| envelope.data))
    }

    async fn create(&self, collection: &str, record: Value) -> Result<Value, AppError> {
        match self
            .request(Method::POST, collection, &[], Some(&record))
            .await?
        {
            Some(envelope) => Ok(envelope.data),
            None => Err(AppError::Upstream(format!(
                "Upstream rejected create on {}",
                collection
            ))),
        }
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        record: Value,
    ) -> Result<Option<Value>, AppError> {
        let path = format!("{}/{}", collection, id);
        Ok(self
            .request(Method::PUT, &path, &[], Some(&record))
            .await?
            .map(|envelope| envelope.data))
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<Value>, AppError> {
        let path = format!("{}/{}", collection, id);
        Ok(self
            .request(Method::PATCH, &path, &[], Some(&patch))
            .await?
            .map(|envelope| envelope.data))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let path = format!("{}/{}", collection, id);
        Ok(self.request(Method::DELETE, &path, &[], None).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::FilterSpec;

    #[test]
    fn test_list_params_maps_the_full_query() {
        let query = ListQuery {
            filter: FilterSpec::new()
                .exact("status", Some("published"))
                .exact("category", Some("career"))
                .search(&["title", "description"], Some("gala")),
            sort: Some(("date".to_string(), Direction::Desc)),
            page: 3,
            limit: 25,
        };

        let params = list_params(&query);

        assert_eq!(params[0], ("page".to_string(), "3".to_string()));
        assert_eq!(params[1], ("limit".to_string(), "25".to_string()));
        assert!(params.contains(&("sort".to_string(), "date".to_string())));
        assert!(params.contains(&("order".to_string(), "desc".to_string())));
        assert!(params.contains(&("status".to_string(), "published".to_string())));
        assert!(params.contains(&("category".to_string(), "career".to_string())));
        assert!(params.contains(&("q".to_string(), "gala".to_string())));
    }

    #[test]
    fn test_list_params_omits_absent_sort_and_search() {
        let params = list_params(&ListQuery::default());

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].0, "page");
        assert_eq!(params[1].0, "limit");
    }

    fn envelope(code: &str, message: &str) -> Envelope {
        Envelope {
            success: false,
            message: Some(message.to_string()),
            error: Some(ErrorDetails {
                code: code.to_string(),
                message: message.to_string(),
            }),
            data: Value::Null,
            pagination: None,
        }
    }

    #[test]
    fn test_upstream_validation_error_keeps_its_class() {
        let err = upstream_error(
            StatusCode::BAD_REQUEST,
            envelope(codes::VALIDATION_ERROR, "Title is required"),
        );
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_server_error_maps_to_upstream() {
        let err = upstream_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            envelope(codes::STORE_ERROR, "disk full"),
        );
        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
