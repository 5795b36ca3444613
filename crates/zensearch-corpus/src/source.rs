//! Corpus sources.

use crate::error::LoadError;
use crate::sample::sample_corpus;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use zensearch_core::config::CorpusConfig;
use zensearch_core::Corpus;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the primary corpus lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// A JSON file on the local filesystem.
    File(PathBuf),
    /// A JSON document served over plain HTTP.
    Http(String),
    /// The catalog compiled into the binary.
    Sample,
}

impl CorpusSource {
    /// A configured `url` wins over `path`.
    pub fn from_config(cfg: &CorpusConfig) -> Self {
        match &cfg.url {
            Some(url) => CorpusSource::Http(url.clone()),
            None => CorpusSource::File(cfg.path.clone()),
        }
    }

    pub async fn load(&self) -> Result<Corpus, LoadError> {
        match self {
            CorpusSource::File(path) => read_file(path).await,
            CorpusSource::Http(url) => fetch_http(url).await,
            CorpusSource::Sample => Ok(sample_corpus().as_ref().clone()),
        }
    }

    /// The file to watch for changes, if any.
    pub fn watch_path(&self) -> Option<&Path> {
        match self {
            CorpusSource::File(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusSource::File(path) => write!(f, "{}", path.display()),
            CorpusSource::Http(url) => f.write_str(url),
            CorpusSource::Sample => f.write_str("built-in sample"),
        }
    }
}

pub async fn read_file(path: &Path) -> Result<Corpus, LoadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let corpus = Corpus::from_json_slice(&bytes)?;
    tracing::debug!(path = %path.display(), courses = corpus.len(), "corpus file read");
    Ok(corpus)
}

/// Fetch a corpus over plain HTTP. TLS is not supported.
pub async fn fetch_http(url: &str) -> Result<Corpus, LoadError> {
    let uri = url.parse::<hyper::Uri>().map_err(|e| LoadError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if uri.scheme_str() != Some("http") {
        return Err(LoadError::InvalidUrl {
            url: url.to_string(),
            reason: "only http:// urls are supported".to_string(),
        });
    }

    let client: Client<_, Empty<Bytes>> = Client::builder(TokioExecutor::new()).build_http();
    let http_err = |reason: String| LoadError::Http { url: url.to_string(), reason };

    let response = tokio::time::timeout(HTTP_TIMEOUT, client.get(uri))
        .await
        .map_err(|_| http_err(format!("timed out after {}s", HTTP_TIMEOUT.as_secs())))?
        .map_err(|e| http_err(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status { url: url.to_string(), status: status.as_u16() });
    }

    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| http_err(e.to_string()))?
        .to_bytes();
    let corpus = Corpus::from_json_slice(&body)?;
    tracing::debug!(url, courses = corpus.len(), "corpus fetched");
    Ok(corpus)
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Which source a loaded corpus actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Primary,
    Sample,
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub corpus: Arc<Corpus>,
    pub origin: Origin,
}

/// Load `primary`, substituting the sample catalog on failure when
/// `fallback_to_sample` is set.
pub async fn load_with_fallback(
    primary: &CorpusSource,
    fallback_to_sample: bool,
) -> Result<Loaded, LoadError> {
    match primary.load().await {
        Ok(corpus) => {
            tracing::info!(source = %primary, courses = corpus.len(), "corpus loaded");
            Ok(Loaded { corpus: Arc::new(corpus), origin: Origin::Primary })
        }
        Err(err) if fallback_to_sample => {
            tracing::warn!(source = %primary, error = %err, "corpus unavailable, using built-in sample");
            Ok(Loaded { corpus: sample_corpus(), origin: Origin::Sample })
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[tokio::test]
    async fn file_source_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "title": "冥想", "keywords": "", "description": ""}}]"#
        )
        .unwrap();
        let corpus = CorpusSource::File(file.path().to_path_buf()).load().await.unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = read_file(Path::new("/definitely/not/here.json")).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn https_is_rejected_up_front() {
        let err = fetch_http("https://example.com/courses.json").await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn fallback_substitutes_sample() {
        let missing = CorpusSource::File(PathBuf::from("/definitely/not/here.json"));
        let loaded = load_with_fallback(&missing, true).await.unwrap();
        assert_eq!(loaded.origin, Origin::Sample);
        assert_eq!(loaded.corpus.len(), sample_corpus().len());

        assert!(load_with_fallback(&missing, false).await.is_err());
    }

    #[test]
    fn url_wins_over_path() {
        let mut cfg = CorpusConfig::default();
        assert_eq!(CorpusSource::from_config(&cfg), CorpusSource::File(cfg.path.clone()));
        cfg.url = Some("http://127.0.0.1:9/courses.json".into());
        assert_eq!(
            CorpusSource::from_config(&cfg),
            CorpusSource::Http("http://127.0.0.1:9/courses.json".into())
        );
    }
}
