//! Content negotiation for resolved badge objects.

use askama::Template;
use axum::{
    http::header,
    response::{Html, IntoResponse, Response},
};
use graph::{ObjectKind, ResolvedObject};
use mime::Mime;
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use crate::config::OrganizationConfig;
use crate::error::AppError;

pub const APPLICATION_RDF_XML: &str = "application/rdf+xml";

/// A representation the service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Json,
    RdfXml,
    Html,
}

/// Turns a resolved object into a response body of one representation.
pub type Serializer = fn(&ResolvedObject, &OrganizationConfig) -> Result<Response, AppError>;

impl Representation {
    fn from_media_type(media: &Mime) -> Option<Self> {
        match media.essence_str().to_ascii_lowercase().as_str() {
            "application/json" | "application/*" | "*/*" => Some(Representation::Json),
            APPLICATION_RDF_XML => Some(Representation::RdfXml),
            "text/html" | "text/*" => Some(Representation::Html),
            _ => None,
        }
    }

    pub fn serializer(self) -> Serializer {
        match self {
            Representation::Json => render_json,
            Representation::RdfXml => render_rdf_xml,
            Representation::Html => render_html,
        }
    }

    fn essence(self) -> &'static str {
        match self {
            Representation::Json => "application/json",
            Representation::RdfXml => APPLICATION_RDF_XML,
            Representation::Html => "text/html",
        }
    }

    pub fn render(
        self,
        resolved: &ResolvedObject,
        organization: &OrganizationConfig,
    ) -> Result<Response, AppError> {
        (self.serializer())(resolved, organization)
    }
}

/// Pick a representation from an `Accept` header value.
///
/// A missing or blank header means JSON. Entries are tried by descending
/// `q`, keeping header order on ties. `q=0` excludes a media type, also
/// when a wildcard range would otherwise map back to it.
pub fn negotiate(accept: Option<&str>) -> Result<Representation, AppError> {
    let Some(accept) = accept.map(str::trim).filter(|a| !a.is_empty()) else {
        return Ok(Representation::Json);
    };

    let (mut ranges, refused): (Vec<(f32, Mime)>, Vec<(f32, Mime)>) = accept
        .split(',')
        .filter_map(|entry| entry.trim().parse::<Mime>().ok())
        .map(|media| (quality(&media), media))
        .partition(|(q, _)| *q > 0.0);
    let refused: Vec<String> = refused
        .iter()
        .map(|(_, media)| media.essence_str().to_ascii_lowercase())
        .collect();
    ranges.sort_by(|a, b| b.0.total_cmp(&a.0));

    ranges
        .iter()
        .filter_map(|(_, media)| Representation::from_media_type(media))
        .find(|representation| !refused.iter().any(|r| r == representation.essence()))
        .ok_or_else(|| AppError::UnsupportedRepresentation(accept.to_string()))
}

fn quality(media: &Mime) -> f32 {
    media
        .get_param("q")
        .and_then(|q| q.as_str().parse::<f32>().ok())
        .map(|q| q.clamp(0.0, 1.0))
        .unwrap_or(1.0)
}

/// Rebuild a value with every object's keys in sorted order.
///
/// `Map` keeps insertion order once serde_json's `preserve_order` is enabled
/// anywhere in the build.
fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            Value::Object(
                keys.into_iter()
                    .map(|k| (k.clone(), sorted(&map[k])))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Key-sorted JSON indented by four spaces.
pub fn to_pretty_json(object: &Map<String, Value>) -> Result<String, AppError> {
    let value = sorted(&Value::Object(object.clone()));
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| AppError::Internal(format!("Failed to serialize object: {e}")))?;
    String::from_utf8(buf).map_err(|e| AppError::Internal(e.to_string()))
}

fn render_json(resolved: &ResolvedObject, _: &OrganizationConfig) -> Result<Response, AppError> {
    let body = to_pretty_json(&resolved.object)?;
    Ok(([(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())], body).into_response())
}

// No RDF/XML writer yet; the JSON form is served in its place.
fn render_rdf_xml(
    resolved: &ResolvedObject,
    organization: &OrganizationConfig,
) -> Result<Response, AppError> {
    tracing::debug!(kind = %resolved.kind, "RDF/XML requested, serving JSON");
    render_json(resolved, organization)
}

fn render_html(
    resolved: &ResolvedObject,
    organization: &OrganizationConfig,
) -> Result<Response, AppError> {
    let json = to_pretty_json(&resolved.object)?;
    let html = match resolved.kind {
        ObjectKind::BadgeClass => BadgeClassPage { json }.render(),
        ObjectKind::Assertion => AssertionPage::new(resolved, organization, json).render(),
    }
    .map_err(|e| AppError::Internal(format!("Template rendering error: {e}")))?;
    Ok(Html(html).into_response())
}

#[derive(Template)]
#[template(path = "badge_class.html")]
struct BadgeClassPage {
    json: String,
}

#[derive(Template)]
#[template(path = "assertion.html")]
struct AssertionPage {
    uid: String,
    badge: String,
    recipient: String,
    issued_on: String,
    image_url: String,
    json: String,
}

impl AssertionPage {
    fn new(resolved: &ResolvedObject, organization: &OrganizationConfig, json: String) -> Self {
        let object = &resolved.object;
        Self {
            uid: resolved.identifier.clone(),
            badge: text_at(object, &["badge", "name"])
                .or_else(|| text_at(object, &["badge"]))
                .unwrap_or_default(),
            recipient: text_at(object, &["recipient", "identity"]).unwrap_or_default(),
            issued_on: text_at(object, &["issuedOn"]).unwrap_or_default(),
            image_url: format!(
                "{}/AssertionImage/{}.png",
                organization.base_url(),
                resolved.identifier
            ),
            json,
        }
    }
}

/// Follow `path` through nested objects to a string leaf.
fn text_at(object: &Map<String, Value>, path: &[&str]) -> Option<String> {
    let (last, parents) = path.split_last()?;
    let mut current = object;
    for key in parents {
        current = current.get(*key)?.as_object()?;
    }
    current.get(*last)?.as_str().map(str::to_string)
}
