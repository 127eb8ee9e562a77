//! Application state management for the terminal storefront.
//!
//! This module contains the single controller that owns the cart, the order
//! form and every piece of UI state, together with the mode machine that
//! decides how key presses are interpreted.

use crate::domain::{
    AcknowledgeOnly, Cart, CartPricer, Catalog, DomainError, DomainResult, Order, OrderField,
    OrderForm, OrderSink, OrderSummary, Product, Receipt,
};

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and which popups are
/// drawn on top of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Product list has focus - arrows move the selection, +/- change the cart
    Browsing,
    /// Order form has focus - typing edits the focused field
    Form,
    /// Help screen is displayed
    Help,
    /// Order acknowledgment popup is displayed until any key is pressed
    Acknowledgment,
}

/// Visibility of the order panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderPanel {
    Hidden,
    Visible,
}

/// Main application state: the cart, the order form and UI state.
///
/// All mutations happen through methods on this struct, called from the
/// key handlers of the event loop.
///
/// # Examples
///
/// ```
/// use farmstand::application::{App, OrderPanel};
///
/// let mut app = App::default();
/// app.add_to_cart("chicken-eggs");
/// app.add_to_cart("chicken-eggs");
/// app.add_to_cart("duck-meat");
/// assert_eq!(app.cart_items_count(), 3);
/// assert_eq!(app.total_price(), 610);
/// assert_eq!(app.order_panel, OrderPanel::Hidden);
/// ```
#[derive(Debug)]
pub struct App {
    /// Static product and review tables
    pub catalog: Catalog,
    /// Selected quantities per product
    pub cart: Cart,
    /// Customer contact and delivery details
    pub order_form: OrderForm,
    /// Whether the order panel is open
    pub order_panel: OrderPanel,
    /// Current application mode
    pub mode: AppMode,
    /// Index of the highlighted product row
    pub selected_product: usize,
    /// Form field receiving keystrokes in form mode
    pub focused_field: OrderField,
    /// Cursor position within the focused field, in characters
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Terminal height in rows (for help scrolling limits)
    pub viewport_height: u16,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Receipt of the last accepted order while its popup is shown
    pub acknowledgment: Option<Receipt>,
    sink: Box<dyn OrderSink>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Catalog::default(), Box::new(AcknowledgeOnly::default()))
    }
}

impl App {
    /// Creates an application with an empty cart and form.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Products offered in the storefront
    /// * `sink` - Collaborator receiving submitted orders
    pub fn new(catalog: Catalog, sink: Box<dyn OrderSink>) -> Self {
        Self {
            catalog,
            cart: Cart::default(),
            order_form: OrderForm::default(),
            order_panel: OrderPanel::Hidden,
            mode: AppMode::Browsing,
            selected_product: 0,
            focused_field: OrderField::Name,
            cursor_position: 0,
            help_scroll: 0,
            viewport_height: 24,
            status_message: None,
            acknowledgment: None,
            sink,
        }
    }

    /// Returns the highlighted product, if the catalog is not empty.
    pub fn selected_product(&self) -> Option<&'static Product> {
        self.catalog.products().get(self.selected_product)
    }

    pub fn select_next_product(&mut self) {
        if self.selected_product + 1 < self.catalog.len() {
            self.selected_product += 1;
        }
    }

    pub fn select_previous_product(&mut self) {
        self.selected_product = self.selected_product.saturating_sub(1);
    }

    /// Adds one unit of a product to the cart.
    pub fn add_to_cart(&mut self, product_id: &str) {
        self.cart.add(product_id);
        tracing::debug!(
            product_id,
            quantity = self.cart.quantity(product_id),
            "added to cart"
        );
    }

    /// Removes one unit of a product from the cart.
    ///
    /// Dropping the last unit removes the product from the cart entirely.
    /// Removing a product that is not in the cart does nothing.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove(product_id);
        tracing::debug!(
            product_id,
            quantity = self.cart.quantity(product_id),
            "removed from cart"
        );
    }

    pub fn add_selected_to_cart(&mut self) {
        if let Some(product) = self.selected_product() {
            self.add_to_cart(product.id);
        }
    }

    pub fn remove_selected_from_cart(&mut self) {
        if let Some(product) = self.selected_product() {
            self.remove_from_cart(product.id);
        }
    }

    /// Total price of the cart; unknown products count as zero.
    pub fn total_price(&self) -> u64 {
        CartPricer::new(&self.catalog).total_price(&self.cart)
    }

    /// Total number of units in the cart.
    pub fn cart_items_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn order_summary(&self) -> OrderSummary {
        CartPricer::new(&self.catalog).summarize(&self.cart)
    }

    /// Whether the order panel has anything to show.
    ///
    /// A visible panel over an empty cart renders no content.
    pub fn shows_order_details(&self) -> bool {
        self.order_panel == OrderPanel::Visible && self.cart_items_count() > 0
    }

    /// Opens or closes the order panel.
    pub fn toggle_order_panel(&mut self) {
        self.order_panel = match self.order_panel {
            OrderPanel::Hidden => OrderPanel::Visible,
            OrderPanel::Visible => OrderPanel::Hidden,
        };
        if self.mode == AppMode::Form {
            self.mode = AppMode::Browsing;
        }
    }

    /// Moves keyboard focus into the order form.
    ///
    /// Only possible while the panel shows order details.
    pub fn start_form(&mut self) {
        if !self.shows_order_details() {
            self.status_message = Some("Корзина пуста или закрыта".to_string());
            return;
        }
        self.mode = AppMode::Form;
        self.focus_field(self.focused_field);
        self.status_message = None;
    }

    /// Hides the order panel and returns to the product list.
    ///
    /// Entered form values are kept.
    pub fn cancel_order(&mut self) {
        self.order_panel = OrderPanel::Hidden;
        self.mode = AppMode::Browsing;
        self.cursor_position = 0;
    }

    /// Replaces one form field, leaving the others untouched.
    pub fn set_field(&mut self, field: OrderField, value: impl Into<String>) {
        self.order_form.set(field, value);
        if field == self.focused_field {
            self.cursor_position = self.cursor_position.min(self.field_len());
        }
    }

    pub fn focus_field(&mut self, field: OrderField) {
        self.focused_field = field;
        self.cursor_position = self.field_len();
    }

    pub fn focus_next_field(&mut self) {
        self.focus_field(self.focused_field.next());
    }

    pub fn focus_previous_field(&mut self) {
        self.focus_field(self.focused_field.previous());
    }

    fn field_len(&self) -> usize {
        self.order_form.get(self.focused_field).chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        let value = self.order_form.get(self.focused_field);
        value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index(self.cursor_position);
        self.order_form.get_mut(self.focused_field).insert(index, c);
        self.cursor_position += 1;
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let index = self.byte_index(self.cursor_position - 1);
        self.order_form.get_mut(self.focused_field).remove(index);
        self.cursor_position -= 1;
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor_position >= self.field_len() {
            return;
        }
        let index = self.byte_index(self.cursor_position);
        self.order_form.get_mut(self.focused_field).remove(index);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.field_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.field_len();
    }

    /// Submits the current cart and form to the order sink.
    ///
    /// On success the acknowledgment popup is shown, the cart and form are
    /// reset to empty and the order panel is hidden. When a required field is
    /// empty, focus moves to it and nothing else changes. When the sink
    /// fails, the cart and form are kept so the order can be resent.
    pub fn submit_order(&mut self) -> DomainResult<Receipt> {
        let result = Order::new(self.order_summary(), self.order_form.clone())
            .and_then(|order| self.sink.submit(&order));

        match &result {
            Ok(receipt) => {
                tracing::info!(order_number = receipt.order_number, "order accepted");
                self.cart.clear();
                self.order_form.clear();
                self.order_panel = OrderPanel::Hidden;
                self.focused_field = OrderField::Name;
                self.cursor_position = 0;
                self.status_message = None;
                self.acknowledgment = Some(receipt.clone());
                self.mode = AppMode::Acknowledgment;
            }
            Err(DomainError::MissingField(field)) => {
                self.focus_field(*field);
                self.status_message = Some(format!("Заполните поле «{field}»"));
            }
            Err(error) => {
                tracing::warn!(%error, "order submission failed");
                self.status_message = Some(error.to_string());
            }
        }

        result
    }

    pub fn dismiss_acknowledgment(&mut self) {
        self.acknowledgment = None;
        self.mode = AppMode::Browsing;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Browsing;
    }

    /// Scrolls help text down, never past `max_scroll`.
    pub fn scroll_help_down(&mut self, lines: usize, max_scroll: usize) {
        self.help_scroll = (self.help_scroll + lines).min(max_scroll);
    }

    pub fn scroll_help_up(&mut self, lines: usize) {
        self.help_scroll = self.help_scroll.saturating_sub(lines);
    }

    pub fn update_viewport_size(&mut self, height: u16) {
        self.viewport_height = height;
    }
}
