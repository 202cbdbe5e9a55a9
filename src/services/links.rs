use serde::Serialize;
use url::Url;
use uuid::Uuid;

/// The two URLs an organizer hands out for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub attend_url: String,
    pub view_url: String,
}

impl ShareLinks {
    pub fn for_event(base_url: &Url, event_id: Uuid) -> Self {
        Self {
            attend_url: page_url(base_url, "event", event_id),
            view_url: page_url(base_url, "view", event_id),
        }
    }
}

fn page_url(base_url: &Url, page: &str, event_id: Uuid) -> String {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("page", page)
        .append_pair("event_id", &event_id.to_string());
    url.into()
}

/// Relative link to a page on this server, used by the rendered views.
pub fn page_href(page: &str, event_id: Uuid) -> String {
    format!("/?page={}&event_id={}", page, event_id)
}
