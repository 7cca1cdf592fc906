use crate::app::AppController;
use crate::bridge;
use crate::screen::SignalScreen;
use leptos::*;
use risk_core::api::GENERIC_FAILURE;
use risk_core::dto::PredictionKind;
use risk_core::render::{format_percent, Headline, HistoryView, ResultView, EMPTY_HISTORY};
use risk_core::{ChatRole, FormFields, Page, PredictTab};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlFormElement;

const SYMPTOM_QUESTIONS: [(&str, &str); 8] = [
    ("familyHistory", "Family history of breast cancer?"),
    ("previousConditions", "Previous breast conditions?"),
    ("lumpPresent", "Lump in breast or underarm?"),
    ("nippleDischarge", "Nipple discharge?"),
    ("skinChanges", "Skin dimpling, redness or texture change?"),
    ("breastPain", "Persistent breast pain?"),
    ("armpitSwelling", "Swelling in armpit or near collarbone?"),
    ("asymmetry", "Sudden change in breast size or shape?"),
];

const TECHNICAL_INPUTS: [(&str, &str); 6] = [
    ("radiusMean", "Radius (mean)"),
    ("textureMean", "Texture (mean)"),
    ("perimeterMean", "Perimeter (mean)"),
    ("areaMean", "Area (mean)"),
    ("smoothnessMean", "Smoothness (mean)"),
    ("compactnessMean", "Compactness (mean)"),
];

fn submitted_fields(ev: &ev::SubmitEvent) -> Option<FormFields> {
    ev.prevent_default();
    let form: HtmlFormElement = event_target(ev);
    match bridge::form_fields(&form) {
        Ok(fields) => Some(fields),
        Err(e) => {
            tracing::error!("could not read form: {e}");
            bridge::alert(GENERIC_FAILURE);
            None
        }
    }
}

#[component]
pub fn DashboardPage(screen: SignalScreen, go: Callback<Page>) -> impl IntoView {
    let total = move || screen.summary.with(|s| s.total_predictions);
    let last = move || screen.summary.with(|s| s.last_label());

    view! {
      <section id=Page::Dashboard.id() class="page active">
        <h2>"Dashboard"</h2>
        <p class="meta">{move || screen.session.with(|s| s.greeting())}</p>
        <div class="row">
          <div class="stat">
            <div class="stat-value">{total}</div>
            <div class="meta">"Predictions made"</div>
          </div>
          <div class="stat">
            <div class="stat-value">{last}</div>
            <div class="meta">"Last prediction"</div>
          </div>
        </div>
        <div class="row">
          <button on:click=move |_| go.call(Page::Predict)>"Start a risk assessment"</button>
          <button on:click=move |_| go.call(Page::Educational)>"Learn about breast health"</button>
        </div>
      </section>
    }
}

#[component]
pub fn PredictPage(screen: SignalScreen, controller: StoredValue<AppController>) -> impl IntoView {
    let tabs = PredictTab::ALL
        .into_iter()
        .map(|tab| {
            view! {
              <button
                class="tab"
                class:active=move || screen.view.with(|v| v.is_tab_visible(tab))
                on:click=move |_| screen.view.update(|v| v.select_tab(tab))
              >
                {tab.label()}
              </button>
            }
        })
        .collect_view();

    let current = create_memo(move |_| screen.view.with(|v| v.tab()));
    let body = move || match current.get() {
        PredictTab::Symptom => view! { <SymptomForm screen=screen controller=controller/> }.into_view(),
        PredictTab::Technical => {
            view! { <TechnicalForm screen=screen controller=controller/> }.into_view()
        }
        PredictTab::Assistant => {
            view! { <AssistantChat screen=screen controller=controller/> }.into_view()
        }
    };

    view! {
      <section id=Page::Predict.id() class="page active">
        <h2>"Risk Prediction"</h2>
        <div class="tabs">{tabs}</div>
        <div id=move || current.get().id() class="tab-content active">{body}</div>
        <ResultPanel screen=screen/>
      </section>
    }
}

#[component]
fn SymptomForm(screen: SignalScreen, controller: StoredValue<AppController>) -> impl IntoView {
    let on_submit = move |ev: ev::SubmitEvent| {
        if let Some(fields) = submitted_fields(&ev) {
            let c = controller.get_value();
            spawn_local(async move {
                c.submit_prediction(&screen, PredictionKind::SymptomBased, fields)
                    .await;
            });
        }
    };

    let questions = SYMPTOM_QUESTIONS
        .into_iter()
        .map(|(name, label)| {
            view! {
              <label>
                {label}
                <select name=name>
                  <option value="no">"No"</option>
                  <option value="yes">"Yes"</option>
                </select>
              </label>
            }
        })
        .collect_view();

    view! {
      <form class="stack" on:submit=on_submit>
        <label>
          "Age"
          <input type="number" name="age" min="0" max="120" required/>
        </label>
        {questions}
        <button type="submit">"Assess Risk"</button>
      </form>
    }
}

#[component]
fn TechnicalForm(screen: SignalScreen, controller: StoredValue<AppController>) -> impl IntoView {
    let on_submit = move |ev: ev::SubmitEvent| {
        if let Some(fields) = submitted_fields(&ev) {
            let c = controller.get_value();
            spawn_local(async move {
                c.submit_prediction(&screen, PredictionKind::Technical, fields)
                    .await;
            });
        }
    };

    let inputs = TECHNICAL_INPUTS
        .into_iter()
        .map(|(name, label)| {
            view! {
              <label>
                {label}
                <input type="number" name=name step="any" min="0" required/>
              </label>
            }
        })
        .collect_view();

    view! {
      <form class="stack" on:submit=on_submit>
        {inputs}
        <button type="submit">"Analyze"</button>
      </form>
    }
}

#[component]
fn AssistantChat(screen: SignalScreen, controller: StoredValue<AppController>) -> impl IntoView {
    let question = create_rw_signal(String::new());
    let log_ref = create_node_ref::<html::Div>();

    create_effect(move |_| {
        screen.chat.with(Vec::len);
        request_animation_frame(move || {
            if let Some(el) = log_ref.get_untracked() {
                el.set_scroll_top(el.scroll_height());
            }
        });
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let q = question.get_untracked();
        question.set(String::new());
        let c = controller.get_value();
        spawn_local(async move {
            c.ask(&screen, &q).await;
        });
    };

    view! {
      <div class="chat">
        <div class="chat-log" node_ref=log_ref>
          <For
            each=move || screen.chat.get().into_iter().enumerate()
            key=|(i, _)| *i
            children=move |(_, m)| {
              let class = match m.role {
                ChatRole::User => "message user",
                ChatRole::Assistant => "message assistant",
              };
              view! { <div class=class>{m.text}</div> }
            }
          />
        </div>
        <form class="row" on:submit=on_submit>
          <input
            prop:value=move || question.get()
            on:input=move |ev| question.set(event_target_value(&ev))
            placeholder="Ask about symptoms, screening, prevention..."
          />
          <button type="submit">"Send"</button>
        </form>
      </div>
    }
}

#[component]
fn ResultPanel(screen: SignalScreen) -> impl IntoView {
    view! {
      <div id="result" class="panel">
        {move || screen.result.get().map(|r| view! { <ResultCard result=r/> })}
      </div>
    }
}

#[component]
fn ResultCard(result: ResultView) -> impl IntoView {
    let headline = match result.headline {
        Headline::Risk {
            percentage,
            outcome,
            tone,
        } => view! {
          <div class="headline" style=format!("border-color: {}", tone.color())>
            <h3>"Risk Assessment"</h3>
            <div class="big" style=format!("color: {}", tone.color())>{format_percent(percentage)}</div>
            <div>{outcome}</div>
          </div>
        },
        Headline::Classification {
            outcome,
            malignant_probability,
            benign_probability,
            tone,
        } => view! {
          <div class="headline" style=format!("border-color: {}", tone.color())>
            <h3>"Classification"</h3>
            <div class="big" style=format!("color: {}", tone.color())>{outcome}</div>
            <div class="meta">{format!("Malignant: {}", format_percent(malignant_probability))}</div>
            <div class="meta">{format!("Benign: {}", format_percent(benign_probability))}</div>
          </div>
        },
    };

    let preventions = (!result.preventions.is_empty()).then(|| {
        let cards = result
            .preventions
            .into_iter()
            .map(|card| {
                view! {
                  <div class="prevention-card">
                    <div class="prevention-header" style=format!("background-color: {}", card.header_color())>
                      <span>{card.category}</span>
                      <span class="badge">{card.priority}</span>
                    </div>
                    <div class="prevention-body">
                      <b>{card.recommendation}</b>
                      <p>{card.details}</p>
                    </div>
                  </div>
                }
            })
            .collect_view();
        view! {
          <h3>"Prevention Recommendations"</h3>
          <div class="stack">{cards}</div>
        }
    });

    view! {
      {headline}
      {preventions}
    }
}

#[component]
pub fn EducationalPage(screen: SignalScreen) -> impl IntoView {
    view! {
      <section id=Page::Educational.id() class="page active">
        <h2>"Educational Resources"</h2>
        <ul>
          <For
            each=move || screen.resources.get().into_iter().enumerate()
            key=|(i, r)| (*i, r.id, r.title.clone())
            children=move |(_, r)| view! {
              <li class="resource">
                <span class="badge">{r.category}</span>
                <h3>{r.title}</h3>
                <p>{r.description}</p>
              </li>
            }
          />
        </ul>
      </section>
    }
}

#[component]
pub fn HistoryPage(screen: SignalScreen) -> impl IntoView {
    let rows = move || match screen.history.get() {
        None => ().into_view(),
        Some(HistoryView::Empty) => view! { <p class="meta">{EMPTY_HISTORY}</p> }.into_view(),
        Some(HistoryView::Entries(rows)) => rows
            .into_iter()
            .map(|row| {
                view! {
                  <li>
                    <div><b>{row.kind}</b> <span class="meta">{row.when}</span></div>
                    <div style=format!("color: {}", row.tone.color())>{row.outcome}</div>
                    <div class="meta">{row.metric}</div>
                  </li>
                }
            })
            .collect_view(),
    };

    view! {
      <section id=Page::History.id() class="page active">
        <h2>"Prediction History"</h2>
        <ul>{rows}</ul>
      </section>
    }
}

#[component]
pub fn LoginPage(
    screen: SignalScreen,
    controller: StoredValue<AppController>,
    go: Callback<Page>,
) -> impl IntoView {
    let on_submit = move |ev: ev::SubmitEvent| {
        if let Some(fields) = submitted_fields(&ev) {
            let c = controller.get_value();
            spawn_local(async move {
                c.login(&screen, fields).await;
            });
        }
    };

    view! {
      <section id=Page::Login.id() class="page active">
        <h2>"Login"</h2>
        <form class="stack" on:submit=on_submit>
          <input type="email" name="email" placeholder="Email" required/>
          <input type="password" name="password" placeholder="Password" required/>
          <button type="submit">"Login"</button>
        </form>
        <p class="meta">
          "No account yet? "
          <a on:click=move |_| go.call(Page::Register)>"Register"</a>
        </p>
      </section>
    }
}

#[component]
pub fn RegisterPage(
    screen: SignalScreen,
    controller: StoredValue<AppController>,
    go: Callback<Page>,
) -> impl IntoView {
    let on_submit = move |ev: ev::SubmitEvent| {
        if let Some(fields) = submitted_fields(&ev) {
            let c = controller.get_value();
            spawn_local(async move {
                c.register(&screen, fields).await;
            });
        }
    };

    view! {
      <section id=Page::Register.id() class="page active">
        <h2>"Register"</h2>
        <form class="stack" on:submit=on_submit>
          <input type="text" name="name" placeholder="Full name" required/>
          <input type="email" name="email" placeholder="Email" required/>
          <input type="password" name="password" placeholder="Password (8+ characters)" required/>
          <button type="submit">"Create account"</button>
        </form>
        <p class="meta">
          "Already registered? "
          <a on:click=move |_| go.call(Page::Login)>"Login"</a>
        </p>
      </section>
    }
}
