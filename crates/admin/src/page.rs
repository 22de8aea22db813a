//! Server-held product pages.
//!
//! Each embedded page view keeps one [`ProductPage`] on the server, keyed by
//! its session. The browser posts [`PageEventForm`]s; the page controller
//! decides what to submit, submissions run in-process through
//! [`actions::perform`], and the caller renders the resulting view.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

use product_desk_core::ProductId;
use product_desk_core::page::{Notifier, PageEffect, PageEvent, ProductPage};

use crate::{actions, shopify::AdminClient};

/// Most page views kept at once.
const MAX_PAGES: u64 = 10_000;

/// Page views untouched for this long start over empty.
const PAGE_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One page controller per session.
///
/// Cloning is cheap; clones share the cache.
#[derive(Clone)]
pub struct PageSessions {
    cache: Cache<String, Arc<Mutex<ProductPage>>>,
}

impl PageSessions {
    #[must_use]
    pub fn new() -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_PAGES)
            .time_to_idle(PAGE_IDLE_TIMEOUT)
            .build();
        Self { cache }
    }

    /// Page for `key`, created empty on first use.
    pub async fn get(&self, key: &str) -> Arc<Mutex<ProductPage>> {
        self.cache
            .get_with(key.to_string(), async {
                Arc::new(Mutex::new(ProductPage::new()))
            })
            .await
    }
}

impl Default for PageSessions {
    fn default() -> Self {
        Self::new()
    }
}

/// Page event form rejected before reaching the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageEventError {
    #[error("Unknown page event: {0}")]
    Unknown(String),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// One user intent posted by the page markup.
///
/// `event` names the button pressed. `search_term` travels with the toolbar
/// form; `title` and `price` with the update modal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageEventForm {
    pub event: String,
    pub search_term: Option<String>,
    pub product_id: Option<String>,
    pub title: Option<String>,
    pub price: Option<String>,
}

impl PageEventForm {
    /// Controller events for this submission, in the order to apply them.
    ///
    /// # Errors
    ///
    /// Returns [`PageEventError`] for an unknown event name or a product
    /// event without a product id.
    pub fn into_events(self) -> Result<Vec<PageEvent>, PageEventError> {
        let mut events = Vec::new();
        if let Some(term) = self.search_term {
            events.push(PageEvent::SearchTermChanged(term));
        }

        match self.event.as_str() {
            "fetch" => events.push(PageEvent::FetchProducts),
            "search" => events.push(PageEvent::Search),
            "open_update" => events.push(PageEvent::OpenUpdate(required_product(
                self.product_id,
            )?)),
            "save_update" => {
                if let Some(title) = self.title {
                    events.push(PageEvent::TitleChanged(title));
                }
                if let Some(price) = self.price {
                    events.push(PageEvent::PriceChanged(price));
                }
                events.push(PageEvent::SaveUpdate);
            }
            "cancel_update" => events.push(PageEvent::CancelUpdate),
            "open_delete" => events.push(PageEvent::OpenDelete(required_product(
                self.product_id,
            )?)),
            "confirm_delete" => events.push(PageEvent::ConfirmDelete),
            "cancel_delete" => events.push(PageEvent::CancelDelete),
            other => return Err(PageEventError::Unknown(other.to_string())),
        }

        Ok(events)
    }
}

fn required_product(product_id: Option<String>) -> Result<ProductId, PageEventError> {
    product_id
        .filter(|id| !id.trim().is_empty())
        .map(ProductId::new)
        .ok_or(PageEventError::MissingField("product_id"))
}

/// Apply `events` to `page`, performing every submission it asks for until
/// the controller settles.
///
/// Each response is fed back before the next queued event, so a successful
/// save or delete also runs the refresh that follows it. Failed submissions
/// come back to the controller as `{error}` responses.
pub async fn run(
    shopify: &AdminClient,
    page: &mut ProductPage,
    events: Vec<PageEvent>,
    notifier: &mut impl Notifier,
) {
    let mut queue = VecDeque::from(events);

    while let Some(event) = queue.pop_front() {
        let mut responses = Vec::new();
        for effect in page.handle(event) {
            match effect {
                PageEffect::Notify(notification) => notifier.notify(notification),
                PageEffect::Submit { id, request } => {
                    let response = actions::perform(shopify, request)
                        .await
                        .unwrap_or_else(crate::error::AppError::into_failure);
                    responses.push(PageEvent::Response { id, response });
                }
            }
        }
        for response in responses.into_iter().rev() {
            queue.push_front(response);
        }
    }
}
