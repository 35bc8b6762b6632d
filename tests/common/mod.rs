//! Test utilities shared by the placescrape integration tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use placescrape::config::GridPoint;
use placescrape::document::{Document, DocumentError, DocumentResult, HtmlDocument, HtmlNode, Locator};
use placescrape::driver::Navigator;
use placescrape::places::{
    AddressComponent, ApiStatus, NearbyRequest, NearbySearchResponse, PlaceDetails, PlaceSummary,
    PlacesApi, PlacesError, PlacesResult,
};

pub const CITY_HALL_URL: &str =
    "https://www.google.com/maps/place/Kyiv+City+Hall/@50.4501,30.5234,17z/data=!3m1!4b1";

/// A review card as it appears in the reviews panel
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CardFixture {
    pub author: Option<&'static str>,
    pub rating_label: Option<&'static str>,
    pub date: Option<&'static str>,
    pub content: Option<&'static str>,
    pub read_more: bool,
}

#[allow(dead_code)]
impl CardFixture {
    pub fn new(author: &'static str, content: &'static str) -> Self {
        Self {
            author: Some(author),
            rating_label: Some("5 stars"),
            date: Some("a week ago"),
            content: Some(content),
            read_more: false,
        }
    }

    fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="jftiEf">"#);
        if let Some(author) = self.author {
            html.push_str(&format!(r#"<div class="d4r55">{author}</div>"#));
        }
        if let Some(label) = self.rating_label {
            html.push_str(&format!(r#"<span class="kvMYJc" aria-label="{label}"></span>"#));
        }
        if let Some(date) = self.date {
            html.push_str(&format!(r#"<span class="rsqaWe">{date}</span>"#));
        }
        if self.read_more {
            html.push_str(r#"<button class="LkLjZd ScJHi OzU4dc">More</button>"#);
        }
        if let Some(content) = self.content {
            html.push_str(&format!(r#"<span class="wiI7pd">{content}</span>"#));
        }
        html.push_str("</div>");
        html
    }
}

/// Builder for a maps place page
#[allow(dead_code)]
#[derive(Clone)]
pub struct PlacePage {
    pub heading: Option<&'static str>,
    pub heading_label: Option<&'static str>,
    pub og_title: Option<&'static str>,
    pub og_image: Option<&'static str>,
    pub canonical: Option<&'static str>,
    pub title: &'static str,
    pub category: &'static str,
    pub address: Option<&'static str>,
    pub reviews_tab: bool,
    pub cards: Vec<CardFixture>,
}

#[allow(dead_code)]
impl PlacePage {
    pub fn city_hall() -> Self {
        Self {
            heading: Some("Київська міська рада"),
            heading_label: None,
            og_title: Some("Київська міська рада · вул. Хрещатик, 36"),
            og_image: Some(
                "https://maps.google.com/maps/api/staticmap?center=50.45%2C30.52&amp;zoom=15&amp;size=900x900",
            ),
            canonical: None,
            title: "Київська міська рада - Google Maps",
            category: "Міська рада",
            address: Some("вул. Хрещатик, 36, Київ, Україна, 02000"),
            reviews_tab: true,
            cards: vec![
                CardFixture::new("Олена", "Швидко прийняли документи, дякую"),
                CardFixture::new("Andrii", "Long queue but friendly staff"),
            ],
        }
    }

    pub fn to_html(&self) -> String {
        let mut head = format!("<title>{}</title>", self.title);
        if let Some(og) = self.og_title {
            head.push_str(&format!(r#"<meta property="og:title" content="{og}">"#));
        }
        if let Some(image) = self.og_image {
            head.push_str(&format!(r#"<meta property="og:image" content="{image}">"#));
        }
        if let Some(canonical) = self.canonical {
            head.push_str(&format!(r#"<link rel="canonical" href="{canonical}">"#));
        }

        let mut body = String::new();
        if let Some(heading) = self.heading {
            match self.heading_label {
                Some(label) => body.push_str(&format!(
                    r#"<h1 class="DUwDvf" aria-label="{label}">{heading}</h1>"#
                )),
                None => body.push_str(&format!(r#"<h1 class="DUwDvf">{heading}</h1>"#)),
            }
        }
        body.push_str(&format!(r#"<button class="DkEaL">{}</button>"#, self.category));
        if let Some(address) = self.address {
            body.push_str(&format!(
                r#"<button data-item-id="address">{address}</button>"#
            ));
        }
        if self.reviews_tab {
            body.push_str(r#"<button aria-label="Reviews for this place">Reviews</button>"#);
            body.push_str(r#"<div class="m6QErb DxyBCb kA9KIf dS8AEf XiKgde">"#);
            for card in &self.cards {
                body.push_str(&card.to_html());
            }
            body.push_str("</div>");
        }

        format!("<!DOCTYPE html><html><head>{head}</head><body>{body}</body></html>")
    }

    pub fn document(&self, url: &str) -> HtmlDocument {
        HtmlDocument::parse(&self.to_html(), Some(url))
    }
}

/// In-memory `Navigator` serving fixture pages by URL
#[allow(dead_code)]
#[derive(Default)]
pub struct FixtureBrowser {
    pages: HashMap<String, String>,
    current: RefCell<Option<HtmlDocument>>,
    pub opened: RefCell<Vec<String>>,
    pub consent_checks: Cell<usize>,
}

#[allow(dead_code)]
impl FixtureBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: &PlacePage) -> Self {
        self.pages.insert(url.to_string(), page.to_html());
        self
    }

    fn current(&self) -> Option<HtmlDocument> {
        self.current.borrow().clone()
    }
}

impl Document for FixtureBrowser {
    type Node = HtmlNode;

    async fn current_url(&self) -> DocumentResult<Option<String>> {
        match self.current() {
            Some(doc) => doc.current_url().await,
            None => Ok(None),
        }
    }

    async fn title(&self) -> DocumentResult<Option<String>> {
        match self.current() {
            Some(doc) => doc.title().await,
            None => Ok(None),
        }
    }

    async fn find_all(&self, locator: &Locator) -> DocumentResult<Vec<HtmlNode>> {
        match self.current() {
            Some(doc) => doc.find_all(locator).await,
            None => Ok(Vec::new()),
        }
    }
}

impl Navigator for FixtureBrowser {
    async fn open(&self, url: &str) -> DocumentResult<()> {
        self.opened.borrow_mut().push(url.to_string());
        let source = self
            .pages
            .get(url)
            .ok_or_else(|| DocumentError::Browser(format!("net::ERR_NAME_NOT_RESOLVED at {url}")))?;
        *self.current.borrow_mut() = Some(HtmlDocument::parse(source, Some(url)));
        Ok(())
    }

    async fn dismiss_consent(&self) {
        self.consent_checks.set(self.consent_checks.get() + 1);
    }
}

/// Nearby-search result entry
#[allow(dead_code)]
pub fn summary(place_id: &str, name: &str) -> PlaceSummary {
    PlaceSummary {
        place_id: Some(place_id.to_string()),
        name: Some(name.to_string()),
    }
}

#[allow(dead_code)]
pub fn page(
    status: ApiStatus,
    results: Vec<PlaceSummary>,
    next_page_token: Option<&str>,
) -> NearbySearchResponse {
    NearbySearchResponse {
        status,
        results,
        next_page_token: next_page_token.map(str::to_string),
        error_message: None,
    }
}

#[allow(dead_code)]
pub fn kyiv_details() -> PlaceDetails {
    details_in("Київ", &["locality", "political"])
}

#[allow(dead_code)]
pub fn details_in(name: &str, types: &[&str]) -> PlaceDetails {
    PlaceDetails {
        name: None,
        address_components: vec![AddressComponent {
            long_name: name.to_string(),
            short_name: name.to_string(),
            types: types.iter().map(|t| (*t).to_string()).collect(),
        }],
        url: None,
    }
}

/// Scripted `PlacesApi`.
///
/// Initial searches are keyed by `"<type>@<lat,lng>"`, follow-up pages by
/// token. Each key holds a queue of responses; the last one repeats.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedPlacesApi {
    nearby: RefCell<HashMap<String, VecDeque<NearbySearchResponse>>>,
    details: HashMap<String, PlaceDetails>,
    pub nearby_calls: RefCell<Vec<String>>,
    pub details_calls: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedPlacesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_key(place_type: &str, location: &GridPoint) -> String {
        format!("{place_type}@{}", location.as_param())
    }

    pub fn with_initial(
        self,
        place_type: &str,
        location: &GridPoint,
        responses: Vec<NearbySearchResponse>,
    ) -> Self {
        self.with_key(Self::initial_key(place_type, location), responses)
    }

    pub fn with_page(self, token: &str, responses: Vec<NearbySearchResponse>) -> Self {
        self.with_key(token.to_string(), responses)
    }

    pub fn with_details(mut self, place_id: &str, details: PlaceDetails) -> Self {
        self.details.insert(place_id.to_string(), details);
        self
    }

    fn with_key(self, key: String, responses: Vec<NearbySearchResponse>) -> Self {
        self.nearby.borrow_mut().insert(key, responses.into());
        self
    }

    pub fn calls_for(&self, key: &str) -> usize {
        self.nearby_calls
            .borrow()
            .iter()
            .filter(|k| k.as_str() == key)
            .count()
    }
}

impl PlacesApi for ScriptedPlacesApi {
    async fn nearby_search(&self, request: &NearbyRequest<'_>) -> PlacesResult<NearbySearchResponse> {
        let key = match *request {
            NearbyRequest::Initial {
                location,
                place_type,
                ..
            } => Self::initial_key(place_type, location),
            NearbyRequest::Page { token } => token.to_string(),
        };
        self.nearby_calls.borrow_mut().push(key.clone());

        let mut nearby = self.nearby.borrow_mut();
        let Some(queue) = nearby.get_mut(&key) else {
            return Ok(page(ApiStatus::ZeroResults, Vec::new(), None));
        };
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        Ok(response.unwrap_or_default())
    }

    async fn place_details(&self, place_id: &str) -> PlacesResult<PlaceDetails> {
        self.details_calls.borrow_mut().push(place_id.to_string());
        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| PlacesError::Status {
                endpoint: "details",
                status: ApiStatus::NotFound,
                message: String::new(),
            })
    }
}
