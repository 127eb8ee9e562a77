use crate::application::{App, AppMode};
use crate::domain::{OrderField, FARM};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Acknowledgment => render_acknowledgment_popup(f, app),
        _ => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            FARM.title,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(FARM.tagline),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let total = app.total_price();
    let mut cart_button = vec![Span::styled(
        format!("🛒 Корзина ({})", app.cart_items_count()),
        Style::default().fg(Color::Black).bg(Color::Yellow),
    )];
    if total > 0 {
        cart_button.push(Span::raw(" "));
        cart_button.push(Span::styled(
            format!("{total}₽"),
            Style::default().fg(Color::White).bg(Color::Rgb(120, 72, 36)),
        ));
    }
    let button = Paragraph::new(vec![Line::from(cart_button), Line::from("c: открыть корзину")])
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(button, chunks[1]);
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    let columns = if app.shows_order_details() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),
            Constraint::Length(8),
            Constraint::Length(4),
        ])
        .split(columns[0]);

    render_products(f, app, left[0]);
    render_reviews(f, app, left[1]);
    render_footer(f, left[2]);

    if let Some(panel_area) = columns.get(1) {
        render_order_panel(f, app, *panel_area);
    }
}

fn render_products(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["", "Товар", "Цена", "Описание", "В корзине"])
        .style(Style::default().fg(Color::Yellow))
        .height(1);

    let rows: Vec<Row> = app
        .catalog
        .products()
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let quantity = app.cart.quantity(product.id);
            let cart_cell = if quantity > 0 {
                format!("[-] {quantity} [+]")
            } else {
                "В корзину".to_string()
            };
            let style = if index == app.selected_product && app.mode == AppMode::Browsing {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else if index == app.selected_product {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(product.icon.glyph()),
                Cell::from(product.name),
                Cell::from(format!("{}₽/{}", product.price, product.unit)),
                Cell::from(product.description),
                Cell::from(cart_cell),
            ])
            .style(style)
            .height(1)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Наша продукция"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_reviews(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Отзывы наших покупателей");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let reviews = app.catalog.reviews();
    if reviews.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = reviews
        .iter()
        .map(|_| Constraint::Ratio(1, reviews.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (review, cell) in reviews.iter().zip(cells.iter()) {
        let text = vec![
            Line::from(Span::styled(review.stars(), Style::default().fg(Color::Yellow))),
            Line::from(Span::styled(
                format!("\"{}\"", review.text),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                review.author,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
        ];
        let widget = Paragraph::new(text).wrap(Wrap { trim: true });
        f.render_widget(widget, *cell);
    }
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(vec![
        Line::from(format!(
            "Телефон: {} | Адрес: {} | Время работы: {}",
            FARM.phone, FARM.address, FARM.hours
        )),
        Line::from(format!("© 2024 {}", FARM.title)),
    ])
    .block(Block::default().borders(Borders::ALL).title("Свяжитесь с нами"))
    .style(Style::default().fg(Color::Gray));
    f.render_widget(footer, area);
}

fn render_order_panel(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Оформить заказ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut rows = vec![Constraint::Min(0)];
    rows.extend(OrderField::ALL.iter().map(|_| Constraint::Length(1)));
    rows.extend([Constraint::Length(1), Constraint::Length(1)]);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows)
        .split(inner);

    render_order_summary(f, app, chunks[0]);

    for (field, field_area) in OrderField::ALL.into_iter().zip(chunks[1..].iter()) {
        render_form_field(f, app, field, *field_area);
    }

    let hint = Paragraph::new(Span::styled(
        "Ctrl+S: Оформить заказ | Esc: Отмена",
        Style::default().fg(Color::Green),
    ));
    f.render_widget(hint, chunks[chunks.len() - 1]);
}

fn render_order_summary(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.order_summary();
    let mut lines = vec![Line::from(Span::styled(
        "Ваш заказ:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for line in &summary.lines {
        lines.push(Line::from(vec![
            Span::raw(format!("{} × {}", line.name, line.quantity)),
            Span::raw("  "),
            Span::styled(
                format!("{}₽", line.line_total),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    lines.push(Line::from("─".repeat(area.width as usize)));
    lines.push(Line::from(Span::styled(
        format!("Итого: {}₽", summary.total),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// Draws one form field on a single row.
///
/// Long values scroll horizontally so the cursor stays inside the row.
fn render_form_field(f: &mut Frame, app: &App, field: OrderField, area: Rect) {
    let marker = if field.is_required() { " *" } else { "" };
    let focused = app.mode == AppMode::Form && app.focused_field == field;
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let label = format!("{}{}: ", field.label(), marker);
    let value = app.order_form.get(field);

    let mut offset = 0u16;
    let mut cursor_x = None;
    if focused && area.width > 0 {
        let before_cursor: String = value.chars().take(app.cursor_position).collect();
        let width = Span::raw(label.as_str()).width() + Span::raw(before_cursor).width();
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        if width >= area.width {
            offset = width - area.width + 1;
        }
        cursor_x = Some(area.x + width - offset);
    }

    let value_span = if value.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };
    let line = Paragraph::new(Line::from(vec![Span::styled(label, label_style), value_span]))
        .scroll((0, offset));
    f.render_widget(line, area);

    if let Some(x) = cursor_x {
        f.set_cursor_position((x, area.y));
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Browsing => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "↑↓/jk: выбор | +/a/Enter: добавить | -/x: убрать | c: корзина | Tab: оформить | ?: помощь | q: выход".to_string()
            }
        }
        AppMode::Form => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Tab/↓: следующее поле | Shift+Tab/↑: предыдущее | Enter: далее | Ctrl+S: заказать | Esc: отмена".to_string()
            }
        }
        AppMode::Help => "↑↓/jk: прокрутка | PgUp/PgDn: быстро | Home: в начало | Esc/q: закрыть".to_string(),
        AppMode::Acknowledgment => "Нажмите любую клавишу".to_string(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Статус"))
        .style(match app.mode {
            AppMode::Browsing => Style::default(),
            AppMode::Form => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::Acknowledgment => Style::default().fg(Color::Yellow),
        });
    f.render_widget(status, area);
}

fn centered_popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_acknowledgment_popup(f: &mut Frame, app: &App) {
    let Some(receipt) = app.acknowledgment.as_ref() else {
        return;
    };
    let popup_area = centered_popup(f.area(), 60, 7);
    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            receipt.message.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Номер заказа: {}", receipt.order_number)),
        Line::from(""),
        Line::from(Span::styled("OK", Style::default().fg(Color::Black).bg(Color::Green))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Заказ оформлен")
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(popup, popup_area);
}

fn help_popup_area(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: (u32::from(area.width) * 4 / 5) as u16,
        height: (u32::from(area.height) * 4 / 5) as u16,
    }
}

/// Largest help scroll offset that still changes the view on a terminal
/// of the given height.
pub fn help_max_scroll(terminal_height: u16) -> usize {
    let popup = help_popup_area(Rect::new(0, 0, 0, terminal_height));
    let visible_height = popup.height.saturating_sub(2) as usize;
    get_help_text().lines().count().saturating_sub(visible_height)
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = help_popup_area(f.area());

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Помощь (строка {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"FARMSTAND: ФЕРМЕРСКИЙ МАГАЗИН В ТЕРМИНАЛЕ

=== КАТАЛОГ ===
↑↓ или k/j      Выбрать товар
+ / a / Enter   Добавить единицу выбранного товара в корзину
- / x           Убрать единицу товара из корзины
                Последняя единица убирает товар из корзины полностью

=== КОРЗИНА ===
c               Показать или скрыть корзину
                Корзина показывает состав заказа, только если в ней есть товары
Tab             Перейти к форме заказа

=== ФОРМА ЗАКАЗА ===
Tab / ↓         Следующее поле
Shift+Tab / ↑   Предыдущее поле
Enter           Следующее поле; на последнем поле отправляет заказ
Ctrl+S          Отправить заказ
Esc             Отмена: скрыть корзину, введённые данные сохраняются

Поля Имя, Телефон и Адрес доставки обязательны.
Комментарий можно оставить пустым.

После отправки заказа корзина и форма очищаются.

=== ПОМОЩЬ ===
↑↓ или j/k      Прокрутка на одну строку
Page Up/Down    Прокрутка на 5 строк
Home            В начало
Esc/F1/?/q      Закрыть помощь

q               Выйти из программы"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::OrderPanel;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(160, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<String>>()
            .join("\n")
    }

    #[test]
    fn test_render_catalog_and_reviews() {
        let app = App::default();
        let screen = render_to_text(&app);

        assert!(screen.contains("Корзина (0)"));
        assert!(screen.contains("Мясо уток"));
        assert!(screen.contains("450₽/кг"));
        assert!(screen.contains("В корзину"));
        assert!(screen.contains("★★★★★"));
        assert!(screen.contains("Елена С."));
        assert!(!screen.contains("Ваш заказ:"));
    }

    #[test]
    fn test_render_cart_badge_and_quantities() {
        let mut app = App::default();
        app.add_to_cart("chicken-eggs");
        app.add_to_cart("chicken-eggs");
        app.add_to_cart("duck-meat");

        let screen = render_to_text(&app);

        assert!(screen.contains("Корзина (3)"));
        assert!(screen.contains("610₽"));
        assert!(screen.contains("[-] 2 [+]"));
    }

    #[test]
    fn test_render_visible_panel_with_empty_cart_shows_nothing() {
        let mut app = App::default();
        app.toggle_order_panel();
        assert_eq!(app.order_panel, OrderPanel::Visible);

        let screen = render_to_text(&app);

        assert!(!screen.contains("Ваш заказ:"));
        assert!(!screen.contains("Итого"));
    }

    #[test]
    fn test_render_order_panel_lines() {
        let mut app = App::default();
        app.add_to_cart("chicken-eggs");
        app.add_to_cart("chicken-eggs");
        app.add_to_cart("duck-meat");
        app.toggle_order_panel();
        app.start_form();
        app.set_field(OrderField::Name, "Мария");

        let screen = render_to_text(&app);

        assert!(screen.contains("Ваш заказ:"));
        assert!(screen.contains("Яйцо куриное × 2"));
        assert!(screen.contains("160₽"));
        assert!(screen.contains("Итого: 610₽"));
        assert!(screen.contains("Имя *: Мария"));
        assert!(screen.contains("Адрес для доставки"));
    }

    #[test]
    fn test_form_cursor_stays_on_focused_field_after_long_value() {
        let mut app = App::default();
        app.add_to_cart("duck-meat");
        app.toggle_order_panel();
        app.start_form();
        app.set_field(
            OrderField::Name,
            "Мария Ивановна Петрова-Сидорова из деревни Традиции",
        );
        app.focus_field(OrderField::Phone);

        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();

        let buffer = terminal.backend().buffer().clone();
        let width = buffer.area.width as usize;
        let phone_row = buffer
            .content()
            .chunks(width)
            .position(|row| {
                row.iter()
                    .map(|cell| cell.symbol())
                    .collect::<String>()
                    .contains("Телефон *:")
            })
            .unwrap();

        assert_eq!(cursor.y as usize, phone_row);
    }

    #[test]
    fn test_form_cursor_scrolls_with_long_value() {
        let mut app = App::default();
        app.add_to_cart("duck-meat");
        app.toggle_order_panel();
        app.start_form();
        app.set_field(OrderField::Address, "улица ".repeat(20));
        app.focus_field(OrderField::Address);

        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();

        assert!(cursor.x > 40 && cursor.x < 79);
    }

    #[test]
    fn test_render_acknowledgment_popup() {
        let mut app = App::default();
        app.add_to_cart("mushrooms");
        app.set_field(OrderField::Name, "Алексей");
        app.set_field(OrderField::Phone, "123");
        app.set_field(OrderField::Address, "Деревня");
        app.submit_order().unwrap();

        let screen = render_to_text(&app);

        assert!(screen.contains("Заказ оформлен"));
        assert!(screen.contains("Номер заказа: 1"));
        assert!(screen.contains("Корзина (0)"));
    }

    #[test]
    fn test_help_max_scroll_matches_view() {
        let total = get_help_text().lines().count();
        assert_eq!(help_max_scroll(0), total);
        assert_eq!(help_max_scroll(1000), 0);
        assert!(help_max_scroll(24) > 0);
        assert!(help_max_scroll(24) < total);
    }

    #[test]
    fn test_render_help_popup() {
        let mut app = App::default();
        app.show_help();

        let screen = render_to_text(&app);

        assert!(screen.contains("Помощь (строка 1/"));
    }
}
