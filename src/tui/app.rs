use crate::core::{
    ContentLoader, HostedModelProvider, ModelProvider, Pipeline, SourceLoader, SourceType, Stage,
    SummarizationOutcome, SummaryRequest,
};
use crate::error::{ErrorKind, Result};
use crate::tui::components::{InputField, StatusPanel, SummaryViewer};
use crate::tui::events::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Form,
    Processing { target: String },
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Credential,
    Source,
    Url,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Credential,
        FormField::Source,
        FormField::Url,
        FormField::Submit,
    ];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Messages from the background summarization task.
#[derive(Debug)]
pub enum AppMessage {
    Stage(Stage),
    Finished(SummarizationOutcome),
}

pub struct App<L = SourceLoader, P = HostedModelProvider> {
    pub state: AppState,
    pub should_quit: bool,

    // Form screen
    pub credential_input: InputField,
    pub source_type: SourceType,
    pub url_input: InputField,
    pub focus: FormField,
    pub error: Option<(ErrorKind, String)>,

    // Processing screen
    pub status: StatusPanel,

    // Summary screen
    pub banner: String,
    pub viewer: Option<SummaryViewer>,
    pub viewer_height: u16,

    pipeline: Arc<Pipeline<L, P>>,
    processing_tx: mpsc::UnboundedSender<AppMessage>,
    processing_rx: mpsc::UnboundedReceiver<AppMessage>,
}

impl<L, P> App<L, P>
where
    L: ContentLoader + 'static,
    P: ModelProvider + 'static,
{
    pub fn new(pipeline: Pipeline<L, P>) -> Self {
        let (processing_tx, processing_rx) = mpsc::unbounded_channel();

        let mut credential_input = InputField::secret("API Key", "gsk_...");
        credential_input.focused = true;

        Self {
            state: AppState::Form,
            should_quit: false,

            credential_input,
            source_type: SourceType::default(),
            url_input: InputField::new("URL", "https://..."),
            focus: FormField::Credential,
            error: None,

            status: StatusPanel::new(),

            banner: String::new(),
            viewer: None,
            viewer_height: 0,

            pipeline: Arc::new(pipeline),
            processing_tx,
            processing_rx,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            AppEvent::Tick => self.handle_tick(),
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match &self.state {
            AppState::Form => self.handle_form_key(key),
            // One request at a time; input waits for the result.
            AppState::Processing { .. } => {}
            AppState::Summary => self.handle_summary_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.error = None,
            KeyCode::Tab | KeyCode::Down => self.set_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.set_focus(self.focus.previous()),
            KeyCode::Enter => match self.focus {
                FormField::Credential | FormField::Source => self.set_focus(self.focus.next()),
                FormField::Url | FormField::Submit => self.submit(),
            },
            _ => match self.focus {
                FormField::Credential => {
                    self.credential_input.handle_key(key);
                }
                FormField::Url => {
                    self.url_input.handle_key(key);
                }
                FormField::Source => match key.code {
                    KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                        self.source_type = self.source_type.toggle();
                    }
                    KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                },
                FormField::Submit => match key.code {
                    KeyCode::Char(' ') => self.submit(),
                    KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                },
            },
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                self.state = AppState::Form;
                self.viewer = None;
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {
                if let Some(viewer) = &mut self.viewer {
                    viewer.handle_key(key, self.viewer_height as usize);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state == AppState::Summary
            && let Some(viewer) = &mut self.viewer
        {
            viewer.handle_mouse(mouse, self.viewer_height as usize);
        }
    }

    fn handle_tick(&mut self) {
        if matches!(self.state, AppState::Processing { .. }) {
            self.status.tick();
        }

        let mut messages = Vec::new();
        while let Ok(message) = self.processing_rx.try_recv() {
            messages.push(message);
        }

        for message in messages {
            match message {
                AppMessage::Stage(stage) => self.apply_stage(stage),
                AppMessage::Finished(outcome) => self.apply_outcome(outcome),
            }
        }
    }

    fn set_focus(&mut self, focus: FormField) {
        self.focus = focus;
        self.credential_input.focused = focus == FormField::Credential;
        self.url_input.focused = focus == FormField::Url;
    }

    fn submit(&mut self) {
        let request = SummaryRequest::new(
            self.url_input.value.trim(),
            self.source_type,
            self.credential_input.value.clone(),
        );

        // Rejected input never reaches a collaborator.
        if let Err(e) = request.validate() {
            self.error = Some((e.kind(), e.message()));
            return;
        }

        self.error = None;
        self.state = AppState::Processing {
            target: request.url.clone(),
        };
        self.status.reset();
        self.status
            .set_message("Fetching and summarizing content...");
        self.status.add_log(format!("Submitted {} URL", request.source_type));
        info!(source_type = %request.source_type, "form submitted");

        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.processing_tx.clone();

        tokio::spawn(async move {
            let stages = tx.clone();
            let outcome = pipeline
                .run(&request, move |stage| {
                    let _ = stages.send(AppMessage::Stage(stage));
                })
                .await;
            let _ = tx.send(AppMessage::Finished(outcome));
        });
    }

    fn apply_stage(&mut self, stage: Stage) {
        match stage {
            Stage::Loading(source_type) => {
                self.status
                    .set_message(format!("Loading {source_type} content..."));
                self.status.add_log(format!("Loading {source_type} content"));
            }
            Stage::Loaded { documents, words } => {
                self.status
                    .add_log(format!("Loaded {documents} document(s), {words} words"));
            }
            Stage::Summarizing { strategy, words } => {
                self.status
                    .set_message(format!("Using {strategy} method ({words} words)"));
                self.status.add_log(format!("Summarizing with {strategy}"));
            }
        }
    }

    fn apply_outcome(&mut self, outcome: SummarizationOutcome) {
        self.status.reset();
        info!(success = outcome.is_success(), "request finished");

        if let SummarizationOutcome::Success {
            strategy,
            total_words,
            ..
        } = &outcome
        {
            self.banner = format!("Summary ({strategy}, {total_words} words)");
        }

        if let Some(summary) = outcome.summary_text() {
            self.viewer = Some(SummaryViewer::new(summary, "Summary".to_string()));
            self.state = AppState::Summary;
        }

        if let (Some(kind), Some(message)) = (outcome.error_kind(), outcome.error_message()) {
            self.error = Some((kind, message.to_string()));
            self.state = AppState::Form;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::Document;
    use crate::core::testing::{MockLoader, MockModelClient, MockModelProvider, words};

    type TestApp = App<MockLoader, MockModelProvider>;

    fn app_with(loader: &MockLoader, provider: &MockModelProvider) -> TestApp {
        App::new(Pipeline::new(loader.clone(), provider.clone()))
    }

    fn press(app: &mut TestApp, code: KeyCode) {
        app.handle_event(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap();
    }

    fn type_str(app: &mut TestApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn fill_form(app: &mut TestApp, credential: &str, url: &str) {
        type_str(app, credential);
        press(app, KeyCode::Tab);
        press(app, KeyCode::Char(' ')); // Website
        press(app, KeyCode::Tab);
        type_str(app, url);
    }

    async fn wait_for_result(app: &mut TestApp) {
        for _ in 0..200 {
            tokio::task::yield_now().await;
            app.handle_event(AppEvent::Tick).unwrap();
            if !matches!(app.state, AppState::Processing { .. }) {
                return;
            }
        }
        panic!("pipeline did not finish");
    }

    #[test]
    fn focus_cycles_and_space_toggles_source() {
        let mut app = app_with(&MockLoader::new(), &MockModelProvider::default());
        assert_eq!(app.focus, FormField::Credential);
        assert!(app.credential_input.focused);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FormField::Source);
        assert!(!app.credential_input.focused);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.source_type, SourceType::Website);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.source_type, SourceType::YouTube);

        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, FormField::Submit);
    }

    #[test]
    fn invalid_submission_stays_on_form() {
        let loader = MockLoader::new();
        let mut app = app_with(&loader, &MockModelProvider::default());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "https://youtu.be/dQw4w9WgXcQ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::Form);
        assert_eq!(
            app.error,
            Some((ErrorKind::Validation, "missing credential".to_string()))
        );
        assert!(loader.calls().is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.error, None);
    }

    #[tokio::test]
    async fn successful_run_shows_summary_then_returns_to_form() {
        let loader =
            MockLoader::new().with_documents(vec![Document::new(words(400), "https://example.com")]);
        let provider = MockModelProvider::new(MockModelClient::new().with_reply("# Gist\n\nAll good."));
        let mut app = app_with(&loader, &provider);

        fill_form(&mut app, "sk-123", "https://example.com/post");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.state, AppState::Processing { .. }));

        wait_for_result(&mut app).await;

        assert_eq!(app.state, AppState::Summary);
        assert_eq!(app.banner, "Summary (STUFF, 400 words)");
        assert!(app.viewer.is_some());
        assert_eq!(provider.connections(), vec!["sk-123".to_string()]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Form);
        assert_eq!(app.url_input.value, "https://example.com/post");
        assert_eq!(app.credential_input.value, "sk-123");
    }

    #[tokio::test]
    async fn submissions_are_ignored_while_processing() {
        let loader = MockLoader::new().with_documents(vec![Document::new(words(10), "page")]);
        let mut app = app_with(&loader, &MockModelProvider::default());

        fill_form(&mut app, "sk-123", "https://example.com");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        wait_for_result(&mut app).await;

        assert_eq!(loader.calls().len(), 1);
    }

    #[tokio::test]
    async fn load_failure_is_shown_on_the_form() {
        let loader = MockLoader::new().with_failure("network unreachable");
        let provider = MockModelProvider::default();
        let mut app = app_with(&loader, &provider);

        fill_form(&mut app, "sk-123", "https://example.com");
        press(&mut app, KeyCode::Enter);
        wait_for_result(&mut app).await;

        assert_eq!(app.state, AppState::Form);
        assert_eq!(
            app.error,
            Some((ErrorKind::Load, "network unreachable".to_string()))
        );
        assert!(provider.client.prompts().is_empty());
    }
}
