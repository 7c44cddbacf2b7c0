//! Absolute URLs for pagination and the API root.

use axum::http::{HeaderMap, Uri, header};
use url::Url;

use crate::application::dto::pagination::{InvalidPage, Page, PageNumber, PageRequest};
use crate::bootstrap::config::Config;

/// Scheme and authority clients used to reach us: `PUBLIC_BASE_URL` when
/// configured, otherwise `http://<Host>`.
pub fn base_url(cfg: &Config, headers: &HeaderMap) -> String {
    if let Some(base) = &cfg.public_base_url {
        return base.clone();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost");
    format!("http://{}", host)
}

pub fn request_url(cfg: &Config, headers: &HeaderMap, uri: &Uri) -> Option<Url> {
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    Url::parse(&format!("{}{}", base_url(cfg, headers), path)).ok()
}

/// Sets (or with `None`, removes) a query parameter, keeping the remaining
/// parameters sorted by name.
pub fn with_query_param(url: &Url, key: &str, value: Option<&str>) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    let mut out = url.clone();
    if pairs.is_empty() {
        out.set_query(None);
    } else {
        out.query_pairs_mut().clear().extend_pairs(pairs);
    }
    out.to_string()
}

/// `next`/`previous` links for page `number` of `num_pages`. The link back to
/// the first page carries no `page` parameter.
pub fn page_links(url: Option<&Url>, number: u64, num_pages: u64) -> (Option<String>, Option<String>) {
    let Some(url) = url else {
        return (None, None);
    };
    let next = (number < num_pages)
        .then(|| with_query_param(url, "page", Some(&(number + 1).to_string())));
    let previous = (number > 1).then(|| {
        if number == 2 {
            with_query_param(url, "page", None)
        } else {
            with_query_param(url, "page", Some(&(number - 1).to_string()))
        }
    });
    (next, previous)
}

/// Reads the `page` query parameter; absent means the first page.
pub fn page_request(cfg: &Config, page: Option<&str>) -> Result<PageRequest, InvalidPage> {
    let page = match page {
        None => PageNumber::Number(1),
        Some(raw) => raw.parse()?,
    };
    Ok(PageRequest {
        page,
        page_size: cfg.page_size,
    })
}

/// `count`, `next` and `previous` of a paginated response body.
pub struct PageMeta {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

pub fn page_meta<T>(cfg: &Config, headers: &HeaderMap, uri: &Uri, page: &Page<T>) -> PageMeta {
    let url = request_url(cfg, headers, uri);
    let (next, previous) = page_links(url.as_ref(), page.number, page.num_pages);
    PageMeta {
        count: page.total,
        next,
        previous,
    }
}
