use crate::application::{App, AppMode};
use crate::domain::OrderField;
use super::ui::help_max_scroll;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Browsing => Self::handle_browsing_mode(app, key),
            AppMode::Form => Self::handle_form_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::Acknowledgment => app.dismiss_acknowledgment(),
        }
    }

    fn handle_browsing_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous_product();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next_product();
            }
            KeyCode::Enter | KeyCode::Char('+') | KeyCode::Char('a') => {
                app.add_selected_to_cart();
            }
            KeyCode::Char('-') | KeyCode::Char('x') => {
                app.remove_selected_from_cart();
            }
            KeyCode::Char('c') => {
                app.toggle_order_panel();
            }
            KeyCode::Tab => {
                app.start_form();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
            }
            KeyCode::Esc => {
                app.cancel_order();
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('s') = key {
                Self::submit(app);
            }
            return;
        }

        match key {
            KeyCode::Enter => {
                if app.focused_field.next() == OrderField::Name {
                    Self::submit(app);
                } else {
                    app.focus_next_field();
                }
            }
            KeyCode::Esc => {
                app.cancel_order();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_previous_field();
            }
            KeyCode::Backspace => {
                app.backspace();
            }
            KeyCode::Delete => {
                app.delete();
            }
            KeyCode::Left => {
                app.move_cursor_left();
            }
            KeyCode::Right => {
                app.move_cursor_right();
            }
            KeyCode::Home => {
                app.move_cursor_home();
            }
            KeyCode::End => {
                app.move_cursor_end();
            }
            KeyCode::Char(c) => {
                app.insert_char(c);
            }
            _ => {}
        }
    }

    fn submit(app: &mut App) {
        // The status bar already shows why an order was not accepted.
        if let Err(error) = app.submit_order() {
            tracing::debug!(%error, "order not submitted");
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.scroll_help_up(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.scroll_help_down(1, help_max_scroll(app.viewport_height));
            }
            KeyCode::PageUp => {
                app.scroll_help_up(5);
            }
            KeyCode::PageDown => {
                app.scroll_help_down(5, help_max_scroll(app.viewport_height));
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::OrderPanel;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_browse_add_and_remove_keys() {
        let mut app = App::default();

        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.cart.quantity("chicken-eggs"), 2);
        assert_eq!(app.cart.quantity("duck-meat"), 1);
        assert_eq!(app.total_price(), 610);

        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.cart.quantity("duck-meat"), 0);
        assert_eq!(app.cart_items_count(), 2);
    }

    #[test]
    fn test_toggle_cart_key() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.order_panel, OrderPanel::Visible);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.order_panel, OrderPanel::Hidden);
    }

    #[test]
    fn test_tab_into_form_requires_items() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.mode, AppMode::Browsing);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.focused_field, OrderField::Name);
    }

    #[test]
    fn test_form_typing_goes_to_focused_field() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Tab);

        // Keys bound in browsing mode are plain text here
        type_text(&mut app, "qa+c");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "123");
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.order_form.name, "qa+");
        assert_eq!(app.order_form.phone, "123");
        assert_eq!(app.cart.quantity("chicken-eggs"), 1);
    }

    #[test]
    fn test_enter_walks_fields_then_submits() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Tab);

        type_text(&mut app, "Мария");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "+7 900");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Деревня Традиции");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focused_field, OrderField::Comment);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Acknowledgment);
        assert!(app.cart.is_empty());
        assert_eq!(app.order_panel, OrderPanel::Hidden);
        assert!(app.order_form.name.is_empty());

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.mode, AppMode::Browsing);
        assert!(app.cart.is_empty());
    }

    #[test]
    fn test_ctrl_s_with_missing_fields_stays_in_form() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Елена");

        InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.focused_field, OrderField::Phone);
        assert_eq!(app.order_form.name, "Елена");
        assert_eq!(app.cart_items_count(), 1);
    }

    #[test]
    fn test_escape_cancels_form() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, AppMode::Browsing);
        assert_eq!(app.order_panel, OrderPanel::Hidden);
    }

    #[test]
    fn test_help_scrolling() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);

        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 4);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.help_scroll, 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Browsing);
    }

    #[test]
    fn test_help_scroll_stops_at_last_page() {
        let mut app = App::default();
        app.update_viewport_size(24);
        press(&mut app, KeyCode::F(1));

        for _ in 0..100 {
            press(&mut app, KeyCode::Down);
        }
        let max = help_max_scroll(24);
        assert_eq!(app.help_scroll, max);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, max - 1);

        for _ in 0..10 {
            press(&mut app, KeyCode::PageDown);
        }
        assert_eq!(app.help_scroll, max);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.help_scroll, max.saturating_sub(5));
    }
}
