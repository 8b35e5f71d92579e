//! Where assets come from when the cache misses: a local directory or an
//! HTTP server.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use reqwest::Url;

use crate::error::{CacheError, Result};

/// A fetched or cached response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    pub path: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Asset {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Origin {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    /// Whether a request targets this origin. Relative paths always do.
    fn is_same_origin(&self, request: &str) -> bool {
        !is_absolute_url(request)
    }

    /// Fetch a request. Non-2xx answers are `Ok` with their status; only a
    /// failure to get any answer is an error.
    fn fetch(&self, request: &str) -> impl Future<Output = Result<Asset>> + Send;
}

pub fn is_absolute_url(request: &str) -> bool {
    request.starts_with("http://") || request.starts_with("https://")
}

/// Canonical cache key for a relative request: `./css/a.css` → `/css/a.css`,
/// `./` and `` → `/`. Absolute URLs pass through unchanged.
pub fn normalize_path(request: &str) -> String {
    if is_absolute_url(request) {
        return request.to_string();
    }
    let trimmed = request.trim();
    let trimmed = if trimmed == "." {
        ""
    } else {
        trimmed.strip_prefix("./").unwrap_or(trimmed)
    };
    let trimmed = trimmed.trim_start_matches('/');
    format!("/{trimmed}")
}

/// Best-effort content type from a file extension.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" | "webmanifest" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// Local directory
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct DirOrigin {
    root: PathBuf,
}

impl DirOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a normalized request onto a file under the root. Directory
    /// requests resolve to their `index.html`; `..` is refused.
    fn resolve(&self, request: &str) -> Result<PathBuf> {
        let normalized = normalize_path(request);
        let relative = Path::new(normalized.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(CacheError::Origin(format!("refusing path {request:?}")));
        }
        let mut file = self.root.join(relative);
        if normalized.ends_with('/') {
            file.push("index.html");
        }
        Ok(file)
    }
}

impl Origin for DirOrigin {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, request: &str) -> Result<Asset> {
        let path = normalize_path(request);
        if is_absolute_url(request) {
            return Err(CacheError::Origin(format!(
                "{request} is not served by {}",
                self.describe()
            )));
        }
        let file = self.resolve(request)?;
        match tokio::fs::read(&file).await {
            Ok(body) => Ok(Asset {
                content_type: Some(content_type_for(&file.to_string_lossy()).to_string()),
                path,
                status: 200,
                body,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Asset {
                path,
                status: 404,
                content_type: None,
                body: Vec::new(),
            }),
            Err(e) => Err(CacheError::Origin(format!("{}: {e}", file.display()))),
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct HttpOrigin {
    base: Url,
    client: reqwest::Client,
}

impl HttpOrigin {
    pub fn new(base: &str) -> Result<Self> {
        let mut base =
            Url::parse(base).map_err(|e| CacheError::Config(format!("bad origin {base:?}: {e}")))?;
        // Url::join replaces the last segment unless the base ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            client: reqwest::Client::new(),
        })
    }

    fn url_for(&self, request: &str) -> Result<Url> {
        if is_absolute_url(request) {
            return Url::parse(request)
                .map_err(|e| CacheError::Origin(format!("bad URL {request:?}: {e}")));
        }
        let relative = normalize_path(request);
        self.base
            .join(relative.trim_start_matches('/'))
            .map_err(|e| CacheError::Origin(format!("bad path {request:?}: {e}")))
    }
}

impl Origin for HttpOrigin {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    fn is_same_origin(&self, request: &str) -> bool {
        if !is_absolute_url(request) {
            return true;
        }
        Url::parse(request)
            .map(|url| url.origin() == self.base.origin())
            .unwrap_or(false)
    }

    async fn fetch(&self, request: &str) -> Result<Asset> {
        let url = self.url_for(request)?;
        tracing::debug!("fetching {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();
        Ok(Asset {
            path: normalize_path(request),
            status,
            content_type,
            body,
        })
    }
}

// ---------------------------------------------------------------------------
// Either, chosen from a config string
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub enum SourceOrigin {
    Dir(DirOrigin),
    Http(HttpOrigin),
}

impl SourceOrigin {
    /// `http(s)://...` selects HTTP, anything else is a directory path.
    pub fn parse(location: &str) -> Result<Self> {
        if is_absolute_url(location) {
            Ok(SourceOrigin::Http(HttpOrigin::new(location)?))
        } else {
            Ok(SourceOrigin::Dir(DirOrigin::new(location)))
        }
    }
}

impl Origin for SourceOrigin {
    fn describe(&self) -> String {
        match self {
            SourceOrigin::Dir(o) => o.describe(),
            SourceOrigin::Http(o) => o.describe(),
        }
    }

    fn is_same_origin(&self, request: &str) -> bool {
        match self {
            SourceOrigin::Dir(o) => o.is_same_origin(request),
            SourceOrigin::Http(o) => o.is_same_origin(request),
        }
    }

    async fn fetch(&self, request: &str) -> Result<Asset> {
        match self {
            SourceOrigin::Dir(o) => o.fetch(request).await,
            SourceOrigin::Http(o) => o.fetch(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("./index.html"), "/index.html");
        assert_eq!(normalize_path("/css/style.css"), "/css/style.css");
        assert_eq!(normalize_path("js/app.js"), "/js/app.js");
        assert_eq!(
            normalize_path("https://cdn.example.com/x.js"),
            "https://cdn.example.com/x.js"
        );
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for("/a/b.CSS"), "text/css; charset=utf-8");
        assert_eq!(content_type_for("/images/galaxy.jpg"), "image/jpeg");
        assert_eq!(content_type_for("/noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_dir_origin_reads_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
        std::fs::create_dir(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css/style.css"), "body{}").unwrap();

        let origin = DirOrigin::new(dir.path());
        let root = origin.fetch("./").await.unwrap();
        assert_eq!(root.status, 200);
        assert_eq!(root.path, "/");
        assert_eq!(root.body, b"<h1>hi</h1>");
        assert_eq!(root.content_type.as_deref(), Some("text/html; charset=utf-8"));

        let css = origin.fetch("./css/style.css").await.unwrap();
        assert!(css.is_ok());
        assert_eq!(css.body, b"body{}");
    }

    #[tokio::test]
    async fn test_dir_origin_missing_is_404() {
        let dir = TempDir::new().unwrap();
        let origin = DirOrigin::new(dir.path());
        let missing = origin.fetch("/nope.js").await.unwrap();
        assert_eq!(missing.status, 404);
        assert!(!missing.is_ok());
    }

    #[tokio::test]
    async fn test_dir_origin_refuses_traversal() {
        let dir = TempDir::new().unwrap();
        let origin = DirOrigin::new(dir.path());
        assert!(matches!(
            origin.fetch("/../secret").await,
            Err(CacheError::Origin(_))
        ));
    }

    #[tokio::test]
    async fn test_dir_origin_rejects_absolute_urls() {
        let dir = TempDir::new().unwrap();
        let origin = DirOrigin::new(dir.path());
        assert!(!origin.is_same_origin("https://cdn.example.com/lib.js"));
        assert!(origin.fetch("https://cdn.example.com/lib.js").await.is_err());
    }

    #[test]
    fn test_http_origin_same_origin() {
        let origin = HttpOrigin::new("https://example.com/app").unwrap();
        assert_eq!(origin.describe(), "https://example.com/app/");
        assert!(origin.is_same_origin("./index.html"));
        assert!(origin.is_same_origin("https://example.com/other.js"));
        assert!(!origin.is_same_origin("https://cdn.example.com/lib.js"));
        assert_eq!(
            origin.url_for("./js/app.js").unwrap().as_str(),
            "https://example.com/app/js/app.js"
        );
    }

    #[test]
    fn test_source_origin_parse() {
        assert!(matches!(
            SourceOrigin::parse("http://localhost:8000").unwrap(),
            SourceOrigin::Http(_)
        ));
        assert!(matches!(
            SourceOrigin::parse("./public").unwrap(),
            SourceOrigin::Dir(_)
        ));
        assert!(SourceOrigin::parse("http://").is_err());
    }
}
