//! Navigable addresses for notification targets.

use crate::model::change::ChangeSummary;
use url::Url;

/// Marker appended to change URLs so the remote can attribute the visit.
pub const NOTIFICATION_USP: &str = "service-worker-notification";

/// Builds absolute target URLs for notifications.
pub trait UrlBuilder: Send + Sync {
    fn change_url(&self, change: &ChangeSummary) -> String;
    fn dashboard_url(&self) -> String;
}

/// Change detail view at `/c/<project>/+/<number>`, dashboard at a fixed path.
#[derive(Debug, Clone)]
pub struct GerritUrlBuilder {
    origin: String,
    dashboard_path: String,
}

impl GerritUrlBuilder {
    /// Keeps any base path on `origin`; query and fragment are dropped.
    pub fn new(origin: &Url, dashboard_path: impl Into<String>) -> Self {
        let mut base = origin.clone();
        base.set_query(None);
        base.set_fragment(None);
        Self {
            origin: base.as_str().trim_end_matches('/').to_string(),
            dashboard_path: dashboard_path.into(),
        }
    }
}

impl UrlBuilder for GerritUrlBuilder {
    fn change_url(&self, change: &ChangeSummary) -> String {
        match (change.project.as_deref(), change.number) {
            (Some(project), Some(number)) => format!(
                "{}/c/{}/+/{}?usp={}",
                self.origin,
                encode_project(project),
                number,
                NOTIFICATION_USP
            ),
            _ => format!("{}/q/{}", self.origin, encode_segment(&change.id)),
        }
    }

    fn dashboard_url(&self) -> String {
        format!("{}{}", self.origin, self.dashboard_path)
    }
}

/// Keeps `/` between project path components, escapes everything else.
fn encode_project(project: &str) -> String {
    project
        .split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn encode_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
