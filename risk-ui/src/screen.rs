use crate::bridge;
use leptos::*;
use risk_core::dto::{ResourceDto, User};
use risk_core::render::{DashboardSummary, HistoryView, ResultView};
use risk_core::{ChatMessage, Page, PageLoad, Screen, Session, Variant, ViewState};

/// All reactive UI state. Every field is a signal, so the whole thing is
/// `Copy` and can move into any event handler.
#[derive(Clone, Copy)]
pub struct SignalScreen {
    pub view: RwSignal<ViewState>,
    pub session: RwSignal<Session>,
    pub result: RwSignal<Option<ResultView>>,
    pub chat: RwSignal<Vec<ChatMessage>>,
    pub resources: RwSignal<Vec<ResourceDto>>,
    pub history: RwSignal<Option<HistoryView>>,
    pub summary: RwSignal<DashboardSummary>,
}

impl SignalScreen {
    pub fn new(variant: Variant) -> Self {
        Self {
            view: create_rw_signal(ViewState::new(variant)),
            session: create_rw_signal(Session::default()),
            result: create_rw_signal(None),
            chat: create_rw_signal(Vec::new()),
            resources: create_rw_signal(Vec::new()),
            history: create_rw_signal(None),
            summary: create_rw_signal(DashboardSummary::default()),
        }
    }
}

impl Screen for SignalScreen {
    fn alert(&self, message: &str) {
        bridge::alert(message);
    }

    fn navigate(&self, page: Page) -> Option<PageLoad> {
        self.view.try_update(|v| v.navigate(page)).flatten()
    }

    fn show_result(&self, view: ResultView) {
        self.result.set(Some(view));
    }

    fn push_chat(&self, message: ChatMessage) {
        self.chat.update(|c| c.push(message));
    }

    fn show_resources(&self, resources: Vec<ResourceDto>) {
        self.resources.set(resources);
    }

    fn show_history(&self, history: HistoryView) {
        self.history.set(Some(history));
    }

    fn show_summary(&self, summary: DashboardSummary) {
        self.summary.set(summary);
    }

    fn set_user(&self, user: Option<User>) {
        self.session.update(|s| s.set(user));
    }

    fn is_signed_in(&self) -> bool {
        self.session.with_untracked(Session::is_authenticated)
    }

    fn reset(&self) {
        self.result.set(None);
        self.chat.set(Vec::new());
        self.history.set(None);
        self.summary.set(DashboardSummary::default());
    }
}
