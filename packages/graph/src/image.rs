use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};
use url::Url;

use crate::address::ObjectKind;
use crate::config::RepositoryConfig;
use crate::error::GraphError;
use crate::resolver::ObjectResolver;

/// Content type used when the image host does not declare one.
pub const DEFAULT_IMAGE_TYPE: &str = "image/png";

/// Which object an image request is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    BadgeClass(String),
    Assertion(String),
}

impl ImageSource {
    /// Pick the image source from the optional route parameters.
    ///
    /// An assertion id wins when both are supplied.
    pub fn from_params(badge: Option<&str>, assertion: Option<&str>) -> Result<Self, GraphError> {
        match (badge, assertion) {
            (_, Some(uid)) => Ok(ImageSource::Assertion(uid.to_string())),
            (Some(badge), None) => Ok(ImageSource::BadgeClass(badge.to_string())),
            (None, None) => Err(GraphError::InvalidRequest(
                "either a badge name or an assertion id is required".into(),
            )),
        }
    }
}

/// An image fetched from its host, body not yet read.
pub struct FetchedImage {
    pub content_type: String,
    pub response: reqwest::Response,
}

/// Drop the last path segment of a URL, clearing query and fragment.
pub fn parent_url(raw: &str) -> Result<Url, GraphError> {
    let mut url = Url::parse(raw)
        .map_err(|e| GraphError::MalformedPayload(format!("invalid object URI '{raw}': {e}")))?;
    url.path_segments_mut()
        .map_err(|_| GraphError::ImageNotFound(format!("'{raw}' has no path")))?
        .pop();
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Locates badge images and proxies them from their host.
pub struct ImageResolver {
    objects: Arc<ObjectResolver>,
    client: reqwest::Client,
}

impl ImageResolver {
    pub fn new(objects: Arc<ObjectResolver>, config: &RepositoryConfig) -> Result<Self, GraphError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GraphError::Transport(e.to_string()))?;
        Ok(Self { objects, client })
    }

    /// Find the URL an image should be fetched from.
    #[instrument(skip(self))]
    pub async fn locate(&self, source: &ImageSource) -> Result<Url, GraphError> {
        match source {
            ImageSource::BadgeClass(slug) => {
                let resolved = self.objects.fetch(ObjectKind::BadgeClass, slug).await?;
                let uri = resolved.uri.ok_or_else(|| {
                    GraphError::MalformedPayload(format!("BadgeClass {slug} has no URI"))
                })?;
                parent_url(&uri)
            }
            ImageSource::Assertion(uid) => {
                let raw = self.objects.assertion_image_url(uid).await?;
                Url::parse(&raw).map_err(|e| {
                    GraphError::MalformedPayload(format!("invalid image URL '{raw}': {e}"))
                })
            }
        }
    }

    /// Fetch an image without touching its bytes.
    #[instrument(skip(self, url), fields(url = %url))]
    pub async fn fetch(&self, url: Url) -> Result<FetchedImage, GraphError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Image request failed: {}", e);
            GraphError::ImageFetchFailed(e.to_string())
        })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            warn!(status = status.as_u16(), "Image host returned an error");
            return Err(GraphError::ImageFetchFailed(format!(
                "image host responded with status {status}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or(DEFAULT_IMAGE_TYPE)
            .to_string();

        info!(%content_type, "Proxying image");
        Ok(FetchedImage {
            content_type,
            response,
        })
    }

    pub async fn resolve(&self, source: &ImageSource) -> Result<FetchedImage, GraphError> {
        let url = self.locate(source).await?;
        self.fetch(url).await
    }
}
