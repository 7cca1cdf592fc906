use crate::bridge::FetchTransport;
use crate::pages::{
    DashboardPage, EducationalPage, HistoryPage, LoginPage, PredictPage, RegisterPage,
};
use crate::screen::SignalScreen;
use leptos::*;
use risk_core::{ClientConfig, Controller, Page};
use wasm_bindgen_futures::spawn_local;

pub type AppController = Controller<FetchTransport>;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_build_env();
    let variant = config.variant;
    tracing::info!(api_base = %config.api_base, ?variant, "starting dashboard");

    let screen = SignalScreen::new(variant);
    let controller = store_value(Controller::new(config, FetchTransport));

    let go = Callback::new(move |page: Page| {
        let c = controller.get_value();
        spawn_local(async move {
            c.open_page(&screen, page).await;
        });
    });

    let logout = move || {
        let c = controller.get_value();
        spawn_local(async move {
            c.logout(&screen).await;
        });
    };

    {
        let c = controller.get_value();
        spawn_local(async move {
            c.start(&screen).await;
        });
    }

    let nav = Page::navigable(variant)
        .into_iter()
        .map(|page| {
            view! {
              <a
                id=page.nav_id()
                class="nav-item"
                class:active=move || screen.view.with(|v| v.is_nav_active(page))
                on:click=move |_| go.call(page)
              >
                {page.title()}
              </a>
            }
        })
        .collect_view();

    let account = move || {
        if !variant.has_accounts() {
            return None;
        }
        let greeting = screen.session.with(|s| s.greeting());
        let signed_in = screen.session.with(|s| s.is_authenticated());
        Some(view! {
          <div class="account">
            <span class="meta">{greeting}</span>
            {signed_in.then(|| view! { <button on:click=move |_| logout()>"Logout"</button> })}
          </div>
        })
    };

    let current = create_memo(move |_| screen.view.with(|v| v.page()));
    let content = move || match current.get() {
        Page::Dashboard => view! { <DashboardPage screen=screen go=go/> }.into_view(),
        Page::Predict => view! { <PredictPage screen=screen controller=controller/> }.into_view(),
        Page::Educational => view! { <EducationalPage screen=screen/> }.into_view(),
        Page::History => view! { <HistoryPage screen=screen/> }.into_view(),
        Page::Login => view! { <LoginPage screen=screen controller=controller go=go/> }.into_view(),
        Page::Register => {
            view! { <RegisterPage screen=screen controller=controller go=go/> }.into_view()
        }
    };

    view! {
      <header class="topbar">
        <h1>"Breast Health Risk Dashboard"</h1>
        {account}
      </header>
      <nav class="nav">{nav}</nav>
      <main class="layout">{content}</main>
    }
}
