use crate::api::{ApiClient, ApiError, Transport};
use crate::config::{ClientConfig, Variant};
use crate::dto::{PredictionKind, ResourceDto, User};
use crate::form::FormFields;
use crate::render::{DashboardSummary, HistoryView, ResultView};
use crate::view::{Page, PageLoad};

pub const PREDICTION_FAILED: &str = "Error making prediction. Please try again.";
pub const ASSISTANT_FAILED: &str = "Error getting AI response. Please try again.";
pub const RESOURCES_FAILED: &str = "Error loading educational resources.";
pub const HISTORY_FAILED: &str = "Error loading prediction history.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const LOGOUT_FAILED: &str = "Logout failed. Please try again.";
pub const REGISTERED: &str = "Registration successful! Please log in.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Everything a handler is allowed to change on screen.
pub trait Screen {
    fn alert(&self, message: &str);
    /// Activates `page` and returns the data it wants loaded.
    fn navigate(&self, page: Page) -> Option<PageLoad>;
    fn show_result(&self, view: ResultView);
    fn push_chat(&self, message: ChatMessage);
    fn show_resources(&self, resources: Vec<ResourceDto>);
    fn show_history(&self, history: HistoryView);
    fn show_summary(&self, summary: DashboardSummary);
    fn set_user(&self, user: Option<User>);
    fn is_signed_in(&self) -> bool;
    /// Drops every panel that holds per-user data: result, chat, history
    /// and summary.
    fn reset(&self);
}

/// Event handlers. Each one runs to completion or suspends on its single
/// network call; nothing is retried or cancelled.
#[derive(Clone, Debug)]
pub struct Controller<T> {
    api: ApiClient<T>,
}

impl<T: Transport> Controller<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            api: ApiClient::new(config, transport),
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn variant(&self) -> Variant {
        self.api.config().variant
    }

    /// First thing run after mount.
    pub async fn start<S: Screen>(&self, screen: &S) {
        match self.variant() {
            Variant::SessionAware => self.restore_session(screen).await,
            Variant::Guest => screen.show_summary(DashboardSummary::default()),
        }
    }

    pub async fn open_page<S: Screen>(&self, screen: &S, page: Page) {
        if let Some(load) = screen.navigate(page) {
            self.load(screen, load).await;
        }
    }

    pub async fn load<S: Screen>(&self, screen: &S, load: PageLoad) {
        match load {
            PageLoad::Resources => match self.api.educational_resources().await {
                Ok(resources) => screen.show_resources(resources),
                Err(e) => self.fail(screen, &e, RESOURCES_FAILED),
            },
            PageLoad::History => match self.api.prediction_history().await {
                Ok(entries) => screen.show_history(HistoryView::from_entries(&entries)),
                Err(e) => self.fail(screen, &e, HISTORY_FAILED),
            },
            PageLoad::Summary => self.refresh_summary(screen).await,
        }
    }

    /// Guests always see the zero state. Signed-in users get a count and
    /// latest timestamp derived from the full history.
    pub async fn refresh_summary<S: Screen>(&self, screen: &S) {
        if self.variant() == Variant::Guest || !screen.is_signed_in() {
            screen.show_summary(DashboardSummary::default());
            return;
        }
        match self.api.prediction_history().await {
            Ok(entries) => screen.show_summary(DashboardSummary::from_history(&entries)),
            Err(e) => {
                tracing::warn!("dashboard summary unavailable: {e}");
                screen.show_summary(DashboardSummary::default());
            }
        }
    }

    pub async fn submit_prediction<S: Screen>(
        &self,
        screen: &S,
        kind: PredictionKind,
        fields: FormFields,
    ) {
        if let Err(e) = fields.validate_prediction(kind) {
            screen.alert(&e.to_string());
            return;
        }
        match self.api.predict(kind, &fields).await {
            Ok(result) => {
                tracing::info!(kind = kind.as_str(), outcome = %result.outcome, "prediction received");
                screen.show_result(ResultView::from(&result));
            }
            Err(e) => self.fail(screen, &e, PREDICTION_FAILED),
        }
    }

    pub async fn ask<S: Screen>(&self, screen: &S, question: &str) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }
        screen.push_chat(ChatMessage {
            role: ChatRole::User,
            text: question.to_string(),
        });
        match self.api.ask(question).await {
            Ok(reply) => screen.push_chat(ChatMessage {
                role: ChatRole::Assistant,
                text: reply.response,
            }),
            Err(e) => self.fail(screen, &e, ASSISTANT_FAILED),
        }
    }

    pub async fn register<S: Screen>(&self, screen: &S, fields: FormFields) {
        let body = match fields.to_registration() {
            Ok(b) => b,
            Err(e) => {
                screen.alert(&e.to_string());
                return;
            }
        };
        match self.api.register(&body).await {
            Ok(_) => {
                screen.alert(REGISTERED);
                self.open_page(screen, Page::Login).await;
            }
            Err(e) => self.fail(screen, &e, REGISTER_FAILED),
        }
    }

    pub async fn login<S: Screen>(&self, screen: &S, fields: FormFields) {
        let body = match fields.to_login() {
            Ok(b) => b,
            Err(e) => {
                screen.alert(&e.to_string());
                return;
            }
        };
        match self.api.login(&body).await {
            Ok(resp) => {
                screen.set_user(Some(resp.user));
                self.open_page(screen, Page::Dashboard).await;
            }
            Err(e) => self.fail(screen, &e, LOGIN_FAILED),
        }
    }

    /// The local session is dropped whether or not the server call succeeds.
    pub async fn logout<S: Screen>(&self, screen: &S) {
        let result = self.api.logout().await;
        screen.set_user(None);
        screen.reset();
        if let Err(e) = result {
            self.fail(screen, &e, LOGOUT_FAILED);
        }
        self.open_page(screen, Page::Login).await;
    }

    pub async fn restore_session<S: Screen>(&self, screen: &S) {
        match self.api.check_auth().await {
            Ok(status) if status.authenticated => {
                if let Some(user) = status.user {
                    screen.set_user(Some(user));
                    self.open_page(screen, Page::Dashboard).await;
                }
            }
            Ok(_) => {}
            Err(e) => tracing::debug!("no existing session: {e}"),
        }
    }

    fn fail<S: Screen>(&self, screen: &S, error: &ApiError, fallback: &str) {
        screen.alert(&error.alert_message(fallback));
    }
}
