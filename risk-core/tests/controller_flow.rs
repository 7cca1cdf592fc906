use futures::executor::block_on;
use risk_core::dto::{PredictionKind, ResourceDto, User};
use risk_core::render::{DashboardSummary, HistoryView, ResultView, Tone};
use risk_core::{
    ApiError, ApiRequest, ChatMessage, ChatRole, ClientConfig, Controller, FormFields, Method, Page,
    PageLoad, RawResponse, Screen, Session, Transport, Variant, ViewState,
};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Default)]
struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<RawResponse, ApiError>>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    fn reject(self, reason: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(ApiError::Transport(reason.to_string())));
        self
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".into())))
    }
}

struct RecordingScreen {
    view: RefCell<ViewState>,
    session: RefCell<Session>,
    alerts: RefCell<Vec<String>>,
    result: RefCell<Option<ResultView>>,
    chat: RefCell<Vec<ChatMessage>>,
    resources: RefCell<Vec<ResourceDto>>,
    history: RefCell<Option<HistoryView>>,
    summary: RefCell<Option<DashboardSummary>>,
}

impl RecordingScreen {
    fn new(variant: Variant) -> Self {
        Self {
            view: RefCell::new(ViewState::new(variant)),
            session: RefCell::new(Session::default()),
            alerts: RefCell::new(Vec::new()),
            result: RefCell::new(None),
            chat: RefCell::new(Vec::new()),
            resources: RefCell::new(Vec::new()),
            history: RefCell::new(None),
            summary: RefCell::new(None),
        }
    }

    fn page(&self) -> Page {
        self.view.borrow().page()
    }
}

impl Screen for RecordingScreen {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn navigate(&self, page: Page) -> Option<PageLoad> {
        self.view.borrow_mut().navigate(page)
    }

    fn show_result(&self, view: ResultView) {
        *self.result.borrow_mut() = Some(view);
    }

    fn push_chat(&self, message: ChatMessage) {
        self.chat.borrow_mut().push(message);
    }

    fn show_resources(&self, resources: Vec<ResourceDto>) {
        *self.resources.borrow_mut() = resources;
    }

    fn show_history(&self, history: HistoryView) {
        *self.history.borrow_mut() = Some(history);
    }

    fn show_summary(&self, summary: DashboardSummary) {
        *self.summary.borrow_mut() = Some(summary);
    }

    fn set_user(&self, user: Option<User>) {
        self.session.borrow_mut().set(user);
    }

    fn is_signed_in(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    fn reset(&self) {
        *self.result.borrow_mut() = None;
        self.chat.borrow_mut().clear();
        *self.history.borrow_mut() = None;
        *self.summary.borrow_mut() = Some(DashboardSummary::default());
    }
}

fn controller(variant: Variant, transport: ScriptedTransport) -> Controller<ScriptedTransport> {
    Controller::new(
        ClientConfig {
            api_base: "http://api.test/api".into(),
            variant,
        },
        transport,
    )
}

fn symptom_form() -> FormFields {
    FormFields::from_pairs([
        ("age", "55"),
        ("familyHistory", "yes"),
        ("previousConditions", "no"),
        ("lumpPresent", "yes"),
        ("nippleDischarge", "no"),
        ("skinChanges", "no"),
        ("breastPain", "no"),
        ("armpitSwelling", "no"),
        ("asymmetry", "no"),
    ])
}

const HIGH_RISK: &str = r#"{
  "type": "symptom-based",
  "risk_percentage": 75.0,
  "outcome": "High Risk",
  "preventions": [
    {"category": "Urgent", "recommendation": "Schedule comprehensive medical evaluation", "priority": "Urgent", "details": "High risk requires immediate attention."},
    {"category": "Lifestyle", "recommendation": "Maintain healthy weight", "priority": "Medium", "details": "Weight matters."}
  ]
}"#;

#[test]
fn symptom_submit_posts_form_once() {
    let c = controller(Variant::Guest, ScriptedTransport::default().reply(200, HIGH_RISK));
    let screen = RecordingScreen::new(Variant::Guest);
    let form = symptom_form();

    block_on(c.submit_prediction(&screen, PredictionKind::SymptomBased, form.clone()));

    let sent = c.api().transport().sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "http://api.test/api/predict/symptom-based");
    let body: serde_json::Value =
        serde_json::from_str(sent[0].body.as_deref().expect("body")).expect("json body");
    let mut body_keys: Vec<_> = body
        .as_object()
        .expect("object body")
        .keys()
        .cloned()
        .collect();
    body_keys.sort();
    let mut form_keys: Vec<_> = form.keys().map(ToString::to_string).collect();
    form_keys.sort();
    assert_eq!(body_keys, form_keys);

    let result = screen.result.borrow();
    let view = result.as_ref().expect("result rendered");
    assert_eq!(view.headline.tone(), Tone::Red);
    assert_eq!(view.preventions[0].header_color(), Tone::Red.color());
    assert!(screen.alerts.borrow().is_empty());
}

#[test]
fn network_failure_alerts_once_and_keeps_result_panel() {
    let c = controller(
        Variant::Guest,
        ScriptedTransport::default().reject("connection refused"),
    );
    let screen = RecordingScreen::new(Variant::Guest);

    block_on(c.submit_prediction(&screen, PredictionKind::SymptomBased, symptom_form()));

    assert_eq!(screen.alerts.borrow().len(), 1);
    assert_eq!(
        screen.alerts.borrow()[0],
        risk_core::controller::PREDICTION_FAILED
    );
    assert!(screen.result.borrow().is_none());
}

#[test]
fn server_error_message_is_shown_verbatim() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default().reply(400, r#"{"error":"Model unavailable"}"#),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);
    let form = FormFields::from_pairs([
        ("radiusMean", "17.99"),
        ("textureMean", "10.38"),
        ("perimeterMean", "122.8"),
        ("areaMean", "1001"),
        ("smoothnessMean", "0.1184"),
        ("compactnessMean", "0.2776"),
    ]);

    block_on(c.submit_prediction(&screen, PredictionKind::Technical, form));

    assert_eq!(*screen.alerts.borrow(), vec!["Model unavailable".to_string()]);
    assert!(screen.result.borrow().is_none());
}

#[test]
fn invalid_technical_form_never_reaches_network() {
    let c = controller(Variant::Guest, ScriptedTransport::default());
    let screen = RecordingScreen::new(Variant::Guest);

    block_on(c.submit_prediction(
        &screen,
        PredictionKind::Technical,
        FormFields::from_pairs([("radiusMean", "12")]),
    ));

    assert!(c.api().transport().sent.borrow().is_empty());
    assert_eq!(
        *screen.alerts.borrow(),
        vec!["Missing required field: textureMean".to_string()]
    );
}

#[test]
fn educational_page_fetches_resources() {
    let c = controller(
        Variant::Guest,
        ScriptedTransport::default().reply(
            200,
            r##"[{"id":1,"title":"Understanding Breast Cancer","description":"Types and stages.","category":"basics","url":"#"}]"##,
        ),
    );
    let screen = RecordingScreen::new(Variant::Guest);

    block_on(c.open_page(&screen, Page::Educational));

    assert_eq!(screen.page(), Page::Educational);
    let resources = screen.resources.borrow();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].category, "basics");
    assert_eq!(
        c.api().transport().sent.borrow()[0].url,
        "http://api.test/api/educational-resources"
    );
}

#[test]
fn history_page_renders_newest_first() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default().reply(
            200,
            r#"[
              {"timestamp":"2024-01-10T08:00:00","type":"symptom-based","outcome":"Low Risk","risk_percentage":12.0},
              {"timestamp":"2024-02-10T08:00:00","type":"technical","outcome":"Malignant","malignant_probability":81.5}
            ]"#,
        ),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);

    block_on(c.open_page(&screen, Page::History));

    let history = screen.history.borrow();
    let Some(HistoryView::Entries(rows)) = history.as_ref() else {
        panic!("expected history rows");
    };
    assert_eq!(rows[0].outcome, "Malignant");
    assert_eq!(rows[1].outcome, "Low Risk");
}

#[test]
fn chat_appends_question_and_answer() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default().reply(200, r#"{"response":"Mammograms are recommended annually."}"#),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);

    block_on(c.ask(&screen, "  How often should I get screening?  "));
    block_on(c.ask(&screen, "   "));

    let chat = screen.chat.borrow();
    assert_eq!(chat.len(), 2);
    assert_eq!(chat[0].role, ChatRole::User);
    assert_eq!(chat[0].text, "How often should I get screening?");
    assert_eq!(chat[1].role, ChatRole::Assistant);
    assert_eq!(c.api().transport().sent.borrow().len(), 1);
}

#[test]
fn login_sets_user_and_derives_summary_from_history() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default()
            .reply(
                200,
                r#"{"message":"Login successful","user":{"name":"Ada","email":"ada@example.org"}}"#,
            )
            .reply(
                200,
                r#"[
                  {"timestamp":"2024-01-10T08:00:00","type":"technical","outcome":"Benign","malignant_probability":10.0},
                  {"timestamp":"2024-03-05T14:45:00","type":"technical","outcome":"Benign","malignant_probability":20.0}
                ]"#,
            ),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);
    assert_eq!(screen.page(), Page::Login);

    block_on(c.login(
        &screen,
        FormFields::from_pairs([("email", "ada@example.org"), ("password", "correct-horse")]),
    ));

    assert!(screen.is_signed_in());
    assert_eq!(screen.page(), Page::Dashboard);
    assert_eq!(
        *screen.summary.borrow(),
        Some(DashboardSummary {
            total_predictions: 2,
            last_prediction: Some("2024-03-05 14:45".into()),
        })
    );
    let sent = c.api().transport().sent.borrow();
    assert!(sent.iter().all(|r| r.with_credentials));
    assert_eq!(sent[1].url, "http://api.test/api/prediction-history");
}

#[test]
fn logout_clears_session_even_when_server_fails() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default().reject("offline"),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);
    screen.set_user(Some(User {
        name: "Ada".into(),
        email: "ada@example.org".into(),
    }));

    block_on(c.logout(&screen));

    assert!(!screen.is_signed_in());
    assert_eq!(screen.page(), Page::Login);
    assert_eq!(screen.alerts.borrow().len(), 1);
}

#[test]
fn logout_drops_previous_user_panels() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default()
            .reply(200, HIGH_RISK)
            .reply(200, r#"{"response":"Annual mammograms."}"#)
            .reply(200, r#"{"message":"Logout successful"}"#),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);
    screen.set_user(Some(User {
        name: "Ada".into(),
        email: "ada@example.org".into(),
    }));
    block_on(c.submit_prediction(&screen, PredictionKind::SymptomBased, symptom_form()));
    block_on(c.ask(&screen, "How often?"));
    assert!(screen.result.borrow().is_some());
    assert_eq!(screen.chat.borrow().len(), 2);

    block_on(c.logout(&screen));

    assert!(screen.alerts.borrow().is_empty());
    assert!(screen.result.borrow().is_none());
    assert!(screen.chat.borrow().is_empty());
    assert!(screen.history.borrow().is_none());
    assert_eq!(*screen.summary.borrow(), Some(DashboardSummary::default()));
    assert_eq!(screen.page(), Page::Login);
}

#[test]
fn register_moves_to_login() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default().reply(201, r#"{"message":"Registration successful"}"#),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);
    block_on(c.open_page(&screen, Page::Register));

    block_on(c.register(
        &screen,
        FormFields::from_pairs([
            ("name", "Ada"),
            ("email", "ada@example.org"),
            ("password", "correct-horse"),
        ]),
    ));

    assert_eq!(screen.page(), Page::Login);
    assert_eq!(
        *screen.alerts.borrow(),
        vec![risk_core::controller::REGISTERED.to_string()]
    );
}

#[test]
fn session_restore_and_guest_start() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default()
            .reply(401, r#"{"authenticated":false}"#),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);
    block_on(c.start(&screen));
    assert_eq!(screen.page(), Page::Login);
    assert!(screen.alerts.borrow().is_empty());

    let guest = controller(Variant::Guest, ScriptedTransport::default());
    let guest_screen = RecordingScreen::new(Variant::Guest);
    block_on(guest.start(&guest_screen));
    assert_eq!(*guest_screen.summary.borrow(), Some(DashboardSummary::default()));
    assert!(guest.api().transport().sent.borrow().is_empty());
}

#[test]
fn resource_failure_alerts_and_keeps_list() {
    let c = controller(
        Variant::Guest,
        ScriptedTransport::default().reject("connection refused"),
    );
    let screen = RecordingScreen::new(Variant::Guest);
    screen.show_resources(vec![ResourceDto {
        id: None,
        title: "Screening".into(),
        description: "When to start.".into(),
        category: "screening".into(),
    }]);

    block_on(c.load(&screen, PageLoad::Resources));

    assert_eq!(
        *screen.alerts.borrow(),
        vec![risk_core::controller::RESOURCES_FAILED.to_string()]
    );
    assert_eq!(screen.resources.borrow().len(), 1);
    assert_eq!(screen.resources.borrow()[0].title, "Screening");
}

#[test]
fn history_failure_alerts_and_leaves_history_unset() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default().reply(500, "Internal Server Error"),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);

    block_on(c.load(&screen, PageLoad::History));

    assert_eq!(
        *screen.alerts.borrow(),
        vec![risk_core::controller::HISTORY_FAILED.to_string()]
    );
    assert!(screen.history.borrow().is_none());
}

#[test]
fn assistant_error_keeps_question_without_reply() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default().reply(503, r#"{"error":"Assistant is offline"}"#),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);

    block_on(c.ask(&screen, "Is a lump always cancer?"));

    assert_eq!(
        *screen.alerts.borrow(),
        vec!["Assistant is offline".to_string()]
    );
    let chat = screen.chat.borrow();
    assert_eq!(chat.len(), 1);
    assert_eq!(chat[0].role, ChatRole::User);
    assert!(chat.iter().all(|m| m.role != ChatRole::Assistant));
}

#[test]
fn rejected_login_stays_signed_out() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default().reply(401, r#"{"error":"Invalid credentials"}"#),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);

    block_on(c.login(
        &screen,
        FormFields::from_pairs([("email", "ada@example.org"), ("password", "wrong-horse")]),
    ));

    assert_eq!(
        *screen.alerts.borrow(),
        vec!["Invalid credentials".to_string()]
    );
    assert!(!screen.is_signed_in());
    assert_eq!(screen.page(), Page::Login);
    assert!(screen.summary.borrow().is_none());
    assert_eq!(c.api().transport().sent.borrow().len(), 1);
}

#[test]
fn summary_falls_back_to_zero_without_alert() {
    let c = controller(
        Variant::SessionAware,
        ScriptedTransport::default()
            .reply(
                200,
                r#"{"message":"Login successful","user":{"name":"Ada","email":"ada@example.org"}}"#,
            )
            .reject("history timed out"),
    );
    let screen = RecordingScreen::new(Variant::SessionAware);

    block_on(c.login(
        &screen,
        FormFields::from_pairs([("email", "ada@example.org"), ("password", "correct-horse")]),
    ));

    assert!(screen.is_signed_in());
    assert_eq!(screen.page(), Page::Dashboard);
    assert!(screen.alerts.borrow().is_empty());
    assert_eq!(*screen.summary.borrow(), Some(DashboardSummary::default()));
}
