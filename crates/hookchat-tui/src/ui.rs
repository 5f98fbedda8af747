use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use hookchat_core::Sender;
use crate::app::App;

const EMPTY_CHAT_HINT: &str = "Send a message to start chatting with the AI agent.";

/// Wrap text to fit within a given width, returning multiple lines.
/// Breaks on word boundaries; words longer than the width are split.
/// Leading indentation is kept on the first line.
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut current_line: String = text.chars().take_while(|c| c.is_whitespace()).collect();
    let mut current_len = current_line.chars().count();
    if current_len >= width {
        current_line.clear();
        current_len = 0;
    }

    let mut lines = Vec::new();
    let mut has_word = false;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // Oversized words start a fresh line and are chopped at the width
        if word.len() > width {
            if has_word {
                lines.push(std::mem::take(&mut current_line));
                current_len = 0;
                has_word = false;
            }
            while current_len + word.len() > width {
                let room = width - current_len;
                current_line.extend(word.drain(..room));
                lines.push(std::mem::take(&mut current_line));
                current_len = 0;
            }
            if word.is_empty() {
                continue;
            }
        }

        let sep = usize::from(has_word);
        if current_len + sep + word.len() > width {
            // Word doesn't fit, start new line (an indent alone is dropped)
            if has_word {
                lines.push(std::mem::take(&mut current_line));
            } else {
                current_line.clear();
            }
            current_len = 0;
            has_word = false;
        }

        if has_word {
            current_line.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current_line.extend(word);
        has_word = true;
    }

    // Don't forget the last line
    if has_word {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

fn sender_style(sender: Sender) -> Style {
    let color = match sender {
        Sender::User => Color::Cyan,
        Sender::Agent => Color::Yellow,
        Sender::System => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Lay out the conversation as already-wrapped lines so the line count is
/// exact and scrolling can land on the last one.
fn chat_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let conversation = app.session.conversation();
    let mut lines: Vec<Line> = Vec::new();

    if conversation.is_empty() && !app.session.is_busy() {
        for line in wrap_text_to_width(EMPTY_CHAT_HINT, width) {
            lines.push(Line::from(Span::styled(line, Style::default().fg(Color::DarkGray))));
        }
        return lines;
    }

    for msg in conversation.iter() {
        lines.push(Line::from(Span::styled(
            format!("{}:", msg.sender.label()),
            sender_style(msg.sender),
        )));

        let body_style = match msg.sender {
            Sender::System => Style::default().fg(Color::Red),
            _ => Style::default(),
        };
        for line in msg.text.lines() {
            for wrapped in wrap_text_to_width(line, width) {
                lines.push(Line::from(Span::styled(wrapped, body_style)));
            }
        }
        lines.push(Line::default());
    }

    if app.session.is_busy() {
        lines.push(Line::from(Span::styled(
            format!("{}:", Sender::Agent.label()),
            sender_style(Sender::Agent),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("AI is thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, chat, input, footer
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_footer(frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", app.title), Style::default().fg(Color::Cyan).bold()),
        Span::styled(app.session.webhook_url().to_string(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store area for mouse hit-testing
    app.chat_area = Some(area);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Conversation ");

    // Inner size minus borders
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2);

    let lines = chat_lines(app, inner_width);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    app.update_chat_layout(total, inner_height);

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let draft = app.session.draft();

    let send_style = if app.session.can_submit() {
        Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Type a message... ")
        .title(Line::from(Span::styled(" Send ", send_style)).alignment(Alignment::Right));

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = draft.cursor();

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    // Get the visible slice of the input
    let visible_text: String = draft
        .as_str()
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, area);

    let cursor_x = (cursor_pos - scroll_offset) as u16;
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}

fn render_footer(frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = [
        ("Enter", "send"),
        ("PgUp/PgDn", "scroll"),
        ("Esc", "quit"),
    ];

    let mut spans = vec![Span::styled(
        " CHAT ",
        Style::default().bg(Color::Blue).fg(Color::White),
    )];
    for (key, label) in hints {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
