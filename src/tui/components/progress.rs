use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Status line with a spinner plus a short timestamped activity log.
pub struct StatusPanel {
    pub message: String,
    pub logs: Vec<String>,
    pub max_logs: usize,
    frame: usize,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            logs: Vec::new(),
            max_logs: 10,
            frame: 0,
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn add_log(&mut self, log: impl AsRef<str>) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push(format!("[{timestamp}] {}", log.as_ref()));

        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER.len();
    }

    pub fn render(&self, f: &mut Frame, area: Rect, target: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Target
                Constraint::Length(2), // Status
                Constraint::Min(1),    // Logs
            ])
            .split(area);

        let target_paragraph =
            Paragraph::new(format!("Source: {target}")).style(Style::default().fg(Color::White));
        f.render_widget(target_paragraph, chunks[0]);

        let status = Line::from(vec![
            Span::styled(
                format!("{} ", SPINNER[self.frame]),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                self.message.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        f.render_widget(Paragraph::new(status), chunks[1]);

        let log_lines: Vec<Line> = self
            .logs
            .iter()
            .map(|log| Line::from(Span::raw(log.as_str())))
            .collect();

        let logs_paragraph =
            Paragraph::new(log_lines).block(Block::default().borders(Borders::ALL).title("Log"));
        f.render_widget(logs_paragraph, chunks[2]);
    }

    pub fn reset(&mut self) {
        self.message.clear();
        self.logs.clear();
        self.frame = 0;
    }
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self::new()
    }
}
