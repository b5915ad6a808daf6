use crate::core::{ContentLoader, ModelProvider, SourceType};
use crate::error::ErrorKind;
use crate::tui::app::{App, AppState, FormField};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw<L, P>(f: &mut Frame, app: &mut App<L, P>)
where
    L: ContentLoader + 'static,
    P: ModelProvider + 'static,
{
    match &app.state {
        AppState::Form => draw_form(f, app),
        AppState::Processing { target } => {
            let target = target.clone();
            draw_processing(f, app, &target)
        }
        AppState::Summary => draw_summary(f, app),
    }
}

fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn help(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn draw_form<L, P>(f: &mut Frame, app: &App<L, P>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // API key
            Constraint::Length(3), // Source type
            Constraint::Length(3), // URL
            Constraint::Length(3), // Submit
            Constraint::Min(1),    // Error
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    f.render_widget(title("YouTube & Website Text Summarizer"), chunks[0]);

    app.credential_input.render(f, chunks[1]);
    draw_source_choice(f, chunks[2], app.source_type, app.focus == FormField::Source);
    app.url_input.render(f, chunks[3]);

    let submit_style = if app.focus == FormField::Submit {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let submit = Paragraph::new(Span::styled(" Summarize ", submit_style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(submit, chunks[4]);

    if let Some((kind, message)) = &app.error {
        let error = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(error_title(*kind)),
            );
        f.render_widget(error, chunks[5]);
    }

    f.render_widget(
        help("[Tab] Next  [Space] Toggle  [Enter] Summarize  [Esc] Clear error  [Ctrl-C] Quit"),
        chunks[6],
    );
}

fn draw_source_choice(f: &mut Frame, area: Rect, selected: SourceType, focused: bool) {
    let spans: Vec<Span> = SourceType::ALL
        .iter()
        .flat_map(|option| {
            let is_selected = *option == selected;
            let marker = if is_selected { "●" } else { "○" };
            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            [
                Span::styled(format!("{marker} {}", option.label()), style),
                Span::raw("    "),
            ]
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Choose Input Type")
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        });

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_processing<L, P>(f: &mut Frame, app: &App<L, P>, target: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Status area
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    f.render_widget(title("Processing..."), chunks[0]);

    let inner = Block::default().borders(Borders::ALL);
    let status_area = inner.inner(chunks[1]);
    f.render_widget(inner, chunks[1]);
    app.status.render(f, status_area, target);

    f.render_widget(help("[Ctrl-C] Quit"), chunks[2]);
}

fn draw_summary<L, P>(f: &mut Frame, app: &mut App<L, P>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Banner
            Constraint::Min(1),    // Summary
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let banner = Paragraph::new(format!("✅ {}", app.banner))
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(banner, chunks[0]);

    if let Some(viewer) = &mut app.viewer {
        app.viewer_height = chunks[1].height;
        viewer.render(f, chunks[1]);
    }

    f.render_widget(
        help("[↑↓] Scroll  [PgUp/PgDn] Page  [Home/End] Top/Bottom  [Esc] Back  [q] Quit"),
        chunks[2],
    );
}

fn error_title(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "Invalid input",
        ErrorKind::Load => "Failed to load content",
        ErrorKind::Inference => "Error while summarizing",
        ErrorKind::Internal => "Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pipeline;
    use crate::core::testing::{MockLoader, MockModelProvider};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn form_masks_the_credential_and_shows_errors() {
        let mut app = App::new(Pipeline::new(
            MockLoader::new(),
            MockModelProvider::default(),
        ));
        app.credential_input.value = "sk-secret".to_string();
        app.credential_input.cursor = 9;
        app.error = Some((ErrorKind::Validation, "please enter a valid URL".to_string()));

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(!text.contains("sk-secret"));
        assert!(text.contains("•••••••••"));
        assert!(text.contains("please enter a valid URL"));
        assert!(text.contains("YouTube URL"));
        assert!(text.contains("Website URL"));
    }
}
