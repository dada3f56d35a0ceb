//! HAL representations of events.
//!
//! Links are computed from the entity at serialization time; entities never
//! carry link state themselves.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Event;
use crate::repository::{Page, PageRequest};

pub const EVENTS_PATH: &str = "/api/events";
const PROFILE_BASE: &str = "/docs/index.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

pub type Links = BTreeMap<&'static str, Link>;

/// Documentation anchor for the operation that produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Create,
    Get,
    Update,
    List,
}

impl Profile {
    fn anchor(&self) -> &'static str {
        match self {
            Profile::Create => "resources-events-create",
            Profile::Get => "resources-events-get",
            Profile::Update => "resources-events-update",
            Profile::List => "resources-events-list",
        }
    }

    pub fn link(&self) -> Link {
        Link::new(format!("{}#{}", PROFILE_BASE, self.anchor()))
    }
}

pub fn collection_uri(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), EVENTS_PATH)
}

pub fn event_uri(base_url: &str, id: i64) -> String {
    format!("{}/{}", collection_uri(base_url), id)
}

pub fn event_links(base_url: &str, event: &Event, profile: Profile) -> Links {
    let self_uri = event_uri(base_url, event.id);
    let mut links = Links::new();
    links.insert("self", Link::new(self_uri.clone()));
    links.insert("events", Link::new(collection_uri(base_url)));
    links.insert("update", Link::new(self_uri));
    links.insert("profile", profile.link());
    links
}

#[derive(Debug, Clone, Serialize)]
pub struct EventResource {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl EventResource {
    pub fn new(base_url: &str, event: Event, profile: Profile) -> Self {
        let links = event_links(base_url, &event, profile);
        Self { event, links }
    }

    /// Entry inside a collection page, which only links to itself.
    pub fn item(base_url: &str, event: Event) -> Self {
        let mut links = Links::new();
        links.insert("self", Link::new(event_uri(base_url, event.id)));
        Self { event, links }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedEvents {
    pub event_list: Vec<EventResource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedEventResources {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedEvents>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub page: PageMetadata,
}

impl PagedEventResources {
    pub fn new(base_url: &str, page: Page<Event>, request: &PageRequest) -> Self {
        let links = page_links(base_url, &page, request);
        let metadata = PageMetadata {
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
            number: page.number,
        };

        let items: Vec<EventResource> = page
            .content
            .into_iter()
            .map(|event| EventResource::item(base_url, event))
            .collect();
        let embedded = if items.is_empty() {
            None
        } else {
            Some(EmbeddedEvents { event_list: items })
        };

        Self {
            embedded,
            links,
            page: metadata,
        }
    }
}

fn page_uri(base_url: &str, request: &PageRequest) -> String {
    let mut uri = format!(
        "{}?page={}&size={}",
        collection_uri(base_url),
        request.page,
        request.size
    );
    if let Some(sort) = request.sort {
        uri.push_str("&sort=");
        uri.push_str(&sort.to_query_value());
    }
    uri
}

/// Navigation links for a page: `self` and `profile` always, `first`/`last`
/// when there is more than one page, `prev`/`next` where they exist.
pub fn page_links<T>(base_url: &str, page: &Page<T>, request: &PageRequest) -> Links {
    let total_pages = page.total_pages();
    let mut links = Links::new();

    links.insert("self", Link::new(page_uri(base_url, request)));
    if total_pages > 1 {
        links.insert("first", Link::new(page_uri(base_url, &request.with_page(0))));
        links.insert(
            "last",
            Link::new(page_uri(base_url, &request.with_page(total_pages - 1))),
        );
    }
    if page.has_previous() {
        // Past the end, "prev" points back at the last real page
        let previous = (page.number - 1).min(total_pages.saturating_sub(1));
        links.insert("prev", Link::new(page_uri(base_url, &request.with_page(previous))));
    }
    if page.has_next() {
        links.insert(
            "next",
            Link::new(page_uri(base_url, &request.with_page(page.number + 1))),
        );
    }
    links.insert("profile", Profile::List.link());
    links
}
