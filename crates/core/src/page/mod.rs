//! Product page controller.
//!
//! The page is an explicit state machine: [`ProductPage::handle`] takes one
//! [`PageEvent`] (a user intent or a completed response) and returns the
//! [`PageEffect`]s the caller must perform, in order. The controller never
//! performs I/O itself.
//!
//! ```text
//!            FetchProducts / Search (from any mode)
//!   Idle ─────────────────────────────▶ Loading ──response──▶ Idle
//!    │ ▲                                  ▲  │
//!    │ │ Cancel                     Save  │  │ update failed
//!    │ └──────── UpdateModal ─────────────┘  └──────▶ UpdateModal
//!    │ OpenUpdate ▲
//!    │            └──────────────────────────────────
//!    │ OpenDelete          Confirm (modal closes at once)
//!    └────────▶ DeleteModal ─────────────────────────▶ Loading
//!                    │ Cancel
//!                    └───────▶ Idle
//! ```
//!
//! Successful updates and deletions are followed by a fresh, unfiltered fetch.

mod notification;
mod view;

pub use notification::{ERROR_TOAST_DURATION_MS, Notification, NotificationLevel, Notifier};
pub use view::{EMPTY_LIST_MESSAGE, PageView, ProductCard, UpdateModalView, VariantLine};

use crate::action::{ActionRequest, ActionResponse, GENERIC_FAILURE_MESSAGE, ProductEdit};
use crate::types::{Product, ProductId, VariantId, parse_user_price};

/// Message shown when searching with a blank term.
pub const EMPTY_SEARCH_MESSAGE: &str = "Search field cannot be empty.";

/// Identifies one submission so late responses can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Title/price being edited in the update modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub product_id: ProductId,
    /// `None` when the product has no variants; saving is then a no-op.
    pub variant_id: Option<VariantId>,
    pub title: String,
    pub price: String,
}

/// Product awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub product_id: ProductId,
}

/// What the in-flight submission is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Purpose {
    Fetch,
    Update(PendingEdit),
    Delete(ProductId),
}

/// The single submission currently awaited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    pub id: RequestId,
    pub purpose: Purpose,
}

/// Page mode. At most one modal can be open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageMode {
    #[default]
    Idle,
    Loading(InFlight),
    UpdateModal(PendingEdit),
    DeleteModal(PendingDelete),
}

/// Inputs to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SearchTermChanged(String),
    /// "Display Products" / "Fetch Products".
    FetchProducts,
    Search,
    OpenUpdate(ProductId),
    TitleChanged(String),
    PriceChanged(String),
    SaveUpdate,
    CancelUpdate,
    OpenDelete(ProductId),
    ConfirmDelete,
    CancelDelete,
    /// The action endpoint answered submission `id`.
    Response {
        id: RequestId,
        response: ActionResponse,
    },
}

/// Work the caller performs on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    /// Post `request` to the action endpoint and feed the answer back as
    /// [`PageEvent::Response`] with the same `id`.
    Submit { id: RequestId, request: ActionRequest },
    Notify(Notification),
}

/// State of one product page view.
#[derive(Debug, Clone, Default)]
pub struct ProductPage {
    search_term: String,
    products: Vec<Product>,
    mode: PageMode,
    last_request: u64,
}

impl ProductPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn mode(&self) -> &PageMode {
        &self.mode
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.mode, PageMode::Loading(_))
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> PageView {
        PageView::from(self)
    }

    /// Apply one event. Events that make no sense in the current mode are
    /// ignored and produce no effects.
    pub fn handle(&mut self, event: PageEvent) -> Vec<PageEffect> {
        match event {
            PageEvent::SearchTermChanged(term) => {
                self.search_term = term;
                Vec::new()
            }
            PageEvent::FetchProducts => self.start_fetch(None),
            PageEvent::Search => self.search(),
            PageEvent::OpenUpdate(product_id) => {
                self.open_update(&product_id);
                Vec::new()
            }
            PageEvent::TitleChanged(title) => {
                if let PageMode::UpdateModal(edit) = &mut self.mode {
                    edit.title = title;
                }
                Vec::new()
            }
            PageEvent::PriceChanged(price) => {
                if let PageMode::UpdateModal(edit) = &mut self.mode {
                    edit.price = price;
                }
                Vec::new()
            }
            PageEvent::SaveUpdate => self.save_update(),
            PageEvent::CancelUpdate => {
                if matches!(self.mode, PageMode::UpdateModal(_)) {
                    self.mode = PageMode::Idle;
                }
                Vec::new()
            }
            PageEvent::OpenDelete(product_id) => {
                if matches!(self.mode, PageMode::Idle)
                    && self.products.iter().any(|p| p.id == product_id)
                {
                    self.mode = PageMode::DeleteModal(PendingDelete { product_id });
                }
                Vec::new()
            }
            PageEvent::ConfirmDelete => self.confirm_delete(),
            PageEvent::CancelDelete => {
                if matches!(self.mode, PageMode::DeleteModal(_)) {
                    self.mode = PageMode::Idle;
                }
                Vec::new()
            }
            PageEvent::Response { id, response } => self.receive(id, response),
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request += 1;
        RequestId(self.last_request)
    }

    fn submit(&mut self, purpose: Purpose, request: ActionRequest) -> PageEffect {
        let id = self.next_request_id();
        self.mode = PageMode::Loading(InFlight { id, purpose });
        PageEffect::Submit { id, request }
    }

    /// Fetching works from any mode: an open modal is discarded and an
    /// in-flight request is superseded.
    fn start_fetch(&mut self, search_term: Option<String>) -> Vec<PageEffect> {
        vec![self.submit(Purpose::Fetch, ActionRequest::FetchProducts { search_term })]
    }

    fn search(&mut self) -> Vec<PageEffect> {
        let term = self.search_term.trim();
        if term.is_empty() {
            return vec![PageEffect::Notify(Notification::error(EMPTY_SEARCH_MESSAGE))];
        }

        let term = term.to_string();
        self.start_fetch(Some(term))
    }

    fn open_update(&mut self, product_id: &ProductId) {
        if !matches!(self.mode, PageMode::Idle) {
            return;
        }
        let Some(product) = self.products.iter().find(|p| &p.id == product_id) else {
            return;
        };

        self.mode = PageMode::UpdateModal(PendingEdit {
            product_id: product.id.clone(),
            variant_id: product.primary_variant().map(|v| v.id.clone()),
            title: product.title.clone(),
            price: product.price.amount_text(),
        });
    }

    fn save_update(&mut self) -> Vec<PageEffect> {
        let PageMode::UpdateModal(edit) = &self.mode else {
            return Vec::new();
        };
        let Some(variant_id) = edit.variant_id.clone() else {
            return Vec::new();
        };

        let price = match parse_user_price(&edit.price) {
            Ok(price) => price,
            Err(_) => {
                return vec![PageEffect::Notify(Notification::error(
                    "Error: Invalid price",
                ))];
            }
        };

        let edit = edit.clone();
        let request = ActionRequest::UpdateProduct(ProductEdit {
            product_id: edit.product_id.clone(),
            variant_id,
            title: edit.title.clone(),
            price,
        });
        vec![self.submit(Purpose::Update(edit), request)]
    }

    fn confirm_delete(&mut self) -> Vec<PageEffect> {
        let PageMode::DeleteModal(pending) = &self.mode else {
            return Vec::new();
        };

        let product_id = pending.product_id.clone();
        let request = ActionRequest::DeleteProduct {
            product_id: product_id.clone(),
        };
        vec![self.submit(Purpose::Delete(product_id), request)]
    }

    fn receive(&mut self, id: RequestId, response: ActionResponse) -> Vec<PageEffect> {
        let purpose = match std::mem::take(&mut self.mode) {
            PageMode::Loading(in_flight) if in_flight.id == id => in_flight.purpose,
            other => {
                // Superseded or unexpected response.
                self.mode = other;
                return Vec::new();
            }
        };

        match response {
            ActionResponse::Products { products } => {
                self.products = products;
                vec![PageEffect::Notify(Notification::info("Products fetched"))]
            }
            ActionResponse::Message { message } => {
                let mut effects = vec![PageEffect::Notify(Notification::info(message))];
                effects.extend(self.start_fetch(None));
                effects
            }
            ActionResponse::Updated {
                updated_product,
                errors,
            } => {
                if !errors.is_empty() {
                    let detail = serde_json::to_string(&errors)
                        .unwrap_or_else(|_| GENERIC_FAILURE_MESSAGE.to_string());
                    self.return_to_edit(purpose);
                    return vec![PageEffect::Notify(Notification::error(format!(
                        "GraphQL Errors: {detail}"
                    )))];
                }

                match updated_product {
                    Some(product) => {
                        let mut effects = vec![PageEffect::Notify(Notification::info(format!(
                            "Product updated: {}",
                            product.title
                        )))];
                        effects.extend(self.start_fetch(None));
                        effects
                    }
                    None => {
                        self.return_to_edit(purpose);
                        vec![PageEffect::Notify(Notification::error(format!(
                            "Error: {GENERIC_FAILURE_MESSAGE}"
                        )))]
                    }
                }
            }
            ActionResponse::Failure { error } => {
                self.return_to_edit(purpose);
                vec![PageEffect::Notify(Notification::error(format!(
                    "Error: {error}"
                )))]
            }
        }
    }

    /// A failed save keeps the update modal open with the user's input.
    fn return_to_edit(&mut self, purpose: Purpose) {
        if let Purpose::Update(edit) = purpose {
            self.mode = PageMode::UpdateModal(edit);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::action::{DELETE_SUCCESS_MESSAGE, RemoteError, UpdatedProduct};
    use crate::types::{Price, ProductStatus, Variant};

    fn product(n: u32, with_variant: bool) -> Product {
        Product {
            id: ProductId::new(format!("gid://shopify/Product/{n}")),
            title: format!("Product {n}"),
            status: ProductStatus::Active,
            vendor: "Acme".to_string(),
            price: Price::new(Decimal::new(1999, 2), "USD"),
            image_url: None,
            variants: if with_variant {
                vec![Variant {
                    id: VariantId::new(format!("gid://shopify/ProductVariant/{n}")),
                    inventory_quantity: -2,
                }]
            } else {
                vec![]
            },
        }
    }

    fn submitted(effects: &[PageEffect]) -> Vec<(RequestId, ActionRequest)> {
        effects
            .iter()
            .filter_map(|e| match e {
                PageEffect::Submit { id, request } => Some((*id, request.clone())),
                PageEffect::Notify(_) => None,
            })
            .collect()
    }

    fn notifications(effects: &[PageEffect]) -> Vec<Notification> {
        effects
            .iter()
            .filter_map(|e| match e {
                PageEffect::Notify(n) => Some(n.clone()),
                PageEffect::Submit { .. } => None,
            })
            .collect()
    }

    /// Page with `products` loaded and idle.
    fn loaded_page(products: Vec<Product>) -> ProductPage {
        let mut page = ProductPage::new();
        let effects = page.handle(PageEvent::FetchProducts);
        let (id, _) = submitted(&effects)[0].clone();
        page.handle(PageEvent::Response {
            id,
            response: ActionResponse::Products { products },
        });
        assert_eq!(page.mode(), &PageMode::Idle);
        page
    }

    #[test]
    fn test_fetch_transitions_to_loading_then_idle_with_products() {
        let mut page = ProductPage::new();
        assert!(page.products().is_empty());

        let effects = page.handle(PageEvent::FetchProducts);
        let sent = submitted(&effects);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, ActionRequest::FetchProducts { search_term: None });
        assert!(page.is_loading());

        let effects = page.handle(PageEvent::Response {
            id: sent[0].0,
            response: ActionResponse::Products {
                products: vec![product(1, true), product(2, false), product(3, true)],
            },
        });
        assert_eq!(page.mode(), &PageMode::Idle);
        assert_eq!(page.products().len(), 3);
        assert_eq!(notifications(&effects), vec![Notification::info("Products fetched")]);
    }

    #[test]
    fn test_fetch_failure_keeps_list_and_notifies_once() {
        let mut page = loaded_page(vec![product(1, true)]);
        let effects = page.handle(PageEvent::FetchProducts);
        let (id, _) = submitted(&effects)[0].clone();

        let effects = page.handle(PageEvent::Response {
            id,
            response: ActionResponse::Failure {
                error: GENERIC_FAILURE_MESSAGE.to_string(),
            },
        });
        assert_eq!(page.products().len(), 1);
        assert_eq!(page.mode(), &PageMode::Idle);
        let notes = notifications(&effects);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Error: Failed to process request");
    }

    #[test]
    fn test_blank_search_is_rejected_locally() {
        let mut page = ProductPage::new();
        page.handle(PageEvent::SearchTermChanged("   ".to_string()));
        let effects = page.handle(PageEvent::Search);

        assert!(submitted(&effects).is_empty());
        let notes = notifications(&effects);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, EMPTY_SEARCH_MESSAGE);
        assert_eq!(notes[0].duration_ms, Some(ERROR_TOAST_DURATION_MS));
        assert_eq!(page.mode(), &PageMode::Idle);
    }

    #[test]
    fn test_search_sends_trimmed_term() {
        let mut page = ProductPage::new();
        page.handle(PageEvent::SearchTermChanged("  hat ".to_string()));
        let effects = page.handle(PageEvent::Search);
        assert_eq!(
            submitted(&effects)[0].1,
            ActionRequest::FetchProducts {
                search_term: Some("hat".to_string())
            }
        );
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let mut page = ProductPage::new();
        let first = submitted(&page.handle(PageEvent::FetchProducts))[0].0;
        let second = submitted(&page.handle(PageEvent::FetchProducts))[0].0;
        assert_ne!(first, second);

        let effects = page.handle(PageEvent::Response {
            id: first,
            response: ActionResponse::Products {
                products: vec![product(1, true)],
            },
        });
        assert!(effects.is_empty());
        assert!(page.products().is_empty());
        assert!(page.is_loading());
    }

    #[test]
    fn test_open_update_copies_current_values() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));

        let PageMode::UpdateModal(edit) = page.mode() else {
            panic!("update modal should be open");
        };
        assert_eq!(edit.title, "Product 1");
        assert_eq!(edit.price, "19.99");
        assert_eq!(
            edit.variant_id,
            Some(VariantId::new("gid://shopify/ProductVariant/1"))
        );

        let view = page.view();
        assert!(view.update_modal.is_some());
        assert!(!view.delete_modal_open);
    }

    #[test]
    fn test_save_without_variant_is_noop() {
        let mut page = loaded_page(vec![product(1, false)]);
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));
        let effects = page.handle(PageEvent::SaveUpdate);
        assert!(effects.is_empty());
        assert!(matches!(page.mode(), PageMode::UpdateModal(_)));
    }

    #[test]
    fn test_save_with_invalid_price_sends_nothing() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));
        page.handle(PageEvent::PriceChanged(String::new()));
        let effects = page.handle(PageEvent::SaveUpdate);

        assert!(submitted(&effects).is_empty());
        assert_eq!(notifications(&effects).len(), 1);
        assert!(matches!(page.mode(), PageMode::UpdateModal(_)));
    }

    #[test]
    fn test_successful_update_closes_modal_and_refetches() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));
        page.handle(PageEvent::TitleChanged("Renamed".to_string()));
        page.handle(PageEvent::PriceChanged("5".to_string()));

        let effects = page.handle(PageEvent::SaveUpdate);
        let sent = submitted(&effects);
        let ActionRequest::UpdateProduct(edit) = &sent[0].1 else {
            panic!("expected update request");
        };
        assert_eq!(edit.title, "Renamed");
        assert_eq!(edit.price.to_string(), "5.00");
        assert!(page.is_loading());

        let effects = page.handle(PageEvent::Response {
            id: sent[0].0,
            response: ActionResponse::Updated {
                updated_product: Some(UpdatedProduct {
                    id: ProductId::new("gid://shopify/Product/1"),
                    title: "Renamed".to_string(),
                }),
                errors: vec![],
            },
        });
        assert_eq!(
            notifications(&effects),
            vec![Notification::info("Product updated: Renamed")]
        );
        let refetch = submitted(&effects);
        assert_eq!(refetch.len(), 1);
        assert_eq!(refetch[0].1, ActionRequest::FetchProducts { search_term: None });
        assert!(page.view().update_modal.is_none());
    }

    #[test]
    fn test_update_with_remote_errors_stays_in_modal() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));
        page.handle(PageEvent::TitleChanged(String::new()));
        let sent = submitted(&page.handle(PageEvent::SaveUpdate));

        let effects = page.handle(PageEvent::Response {
            id: sent[0].0,
            response: ActionResponse::Updated {
                updated_product: None,
                errors: vec![RemoteError {
                    message: "Title can't be blank".to_string(),
                    field: vec!["title".to_string()],
                }],
            },
        });

        assert!(submitted(&effects).is_empty());
        let notes = notifications(&effects);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.starts_with("GraphQL Errors: "));
        assert!(notes[0].message.contains("Title can't be blank"));
        let PageMode::UpdateModal(edit) = page.mode() else {
            panic!("modal should stay open");
        };
        assert_eq!(edit.title, "");
    }

    #[test]
    fn test_cancel_update_discards_edit() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));
        page.handle(PageEvent::TitleChanged("Draft title".to_string()));
        let effects = page.handle(PageEvent::CancelUpdate);

        assert!(effects.is_empty());
        assert_eq!(page.mode(), &PageMode::Idle);
        assert_eq!(page.products()[0].title, "Product 1");
    }

    #[test]
    fn test_modals_are_mutually_exclusive() {
        let mut page = loaded_page(vec![product(1, true), product(2, true)]);
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));
        page.handle(PageEvent::OpenDelete(ProductId::new("gid://shopify/Product/2")));
        assert!(matches!(page.mode(), PageMode::UpdateModal(_)));

        page.handle(PageEvent::CancelUpdate);
        page.handle(PageEvent::OpenDelete(ProductId::new("gid://shopify/Product/2")));
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));
        assert!(matches!(page.mode(), PageMode::DeleteModal(_)));
        assert!(page.view().update_modal.is_none());
    }

    #[test]
    fn test_fetch_over_open_modal_discards_it() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenUpdate(ProductId::new("gid://shopify/Product/1")));
        page.handle(PageEvent::TitleChanged("Half typed".to_string()));

        let effects = page.handle(PageEvent::FetchProducts);
        assert_eq!(submitted(&effects).len(), 1);
        assert!(page.is_loading());
        assert!(page.view().update_modal.is_none());

        page.handle(PageEvent::OpenDelete(ProductId::new("gid://shopify/Product/1")));
        assert!(page.is_loading(), "modals stay closed while loading");
    }

    #[test]
    fn test_search_over_delete_modal_submits() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenDelete(ProductId::new("gid://shopify/Product/1")));
        page.handle(PageEvent::SearchTermChanged("lamp".to_string()));

        let effects = page.handle(PageEvent::Search);
        assert_eq!(
            submitted(&effects)[0].1,
            ActionRequest::FetchProducts {
                search_term: Some("lamp".to_string())
            }
        );
        assert!(!page.view().delete_modal_open);

        page.handle(PageEvent::SearchTermChanged("  ".to_string()));
        let effects = page.handle(PageEvent::Search);
        assert!(submitted(&effects).is_empty());
        assert_eq!(notifications(&effects).len(), 1);
    }

    #[test]
    fn test_delete_cancel_changes_nothing() {
        let mut page = loaded_page(vec![product(1, true)]);
        let before = page.products().to_vec();

        let opened = page.handle(PageEvent::OpenDelete(ProductId::new("gid://shopify/Product/1")));
        assert!(page.view().delete_modal_open);
        let cancelled = page.handle(PageEvent::CancelDelete);

        assert!(opened.is_empty());
        assert!(cancelled.is_empty());
        assert_eq!(page.products(), before.as_slice());
        assert_eq!(page.mode(), &PageMode::Idle);
    }

    #[test]
    fn test_delete_success_refetches_once() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenDelete(ProductId::new("gid://shopify/Product/1")));
        let effects = page.handle(PageEvent::ConfirmDelete);

        // The modal closes before the response arrives.
        assert!(!page.view().delete_modal_open);
        assert!(page.is_loading());
        let sent = submitted(&effects);
        assert_eq!(
            sent[0].1,
            ActionRequest::DeleteProduct {
                product_id: ProductId::new("gid://shopify/Product/1")
            }
        );

        let effects = page.handle(PageEvent::Response {
            id: sent[0].0,
            response: ActionResponse::Message {
                message: DELETE_SUCCESS_MESSAGE.to_string(),
            },
        });
        assert_eq!(
            notifications(&effects),
            vec![Notification::info(DELETE_SUCCESS_MESSAGE)]
        );
        let refetch = submitted(&effects);
        assert_eq!(refetch.len(), 1);
        assert_eq!(refetch[0].1, ActionRequest::FetchProducts { search_term: None });
    }

    #[test]
    fn test_delete_failure_notifies_without_refresh() {
        let mut page = loaded_page(vec![product(1, true)]);
        page.handle(PageEvent::OpenDelete(ProductId::new("gid://shopify/Product/1")));
        let sent = submitted(&page.handle(PageEvent::ConfirmDelete));

        let effects = page.handle(PageEvent::Response {
            id: sent[0].0,
            response: ActionResponse::Failure {
                error: GENERIC_FAILURE_MESSAGE.to_string(),
            },
        });
        assert!(submitted(&effects).is_empty());
        assert_eq!(notifications(&effects).len(), 1);
        assert_eq!(page.mode(), &PageMode::Idle);
        assert_eq!(page.products().len(), 1);
    }

    #[test]
    fn test_view_renders_cards() {
        let page = loaded_page(vec![product(1, true), product(2, false)]);
        let view = page.view();

        assert_eq!(view.products.len(), 2);
        assert_eq!(view.products[0].price, "$19.99");
        assert_eq!(view.products[0].variants[0].inventory, -2);
        assert!(view.products[1].variants.is_empty());
        assert_eq!(view.products[1].image_url, crate::PLACEHOLDER_IMAGE_URL);
        assert_eq!(view.empty_message(), None);
        assert_eq!(ProductPage::new().view().empty_message(), Some(EMPTY_LIST_MESSAGE));
    }
}
