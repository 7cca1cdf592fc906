use crate::config::Variant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Predict,
    Educational,
    History,
    Login,
    Register,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Dashboard,
        Page::Predict,
        Page::Educational,
        Page::History,
        Page::Login,
        Page::Register,
    ];

    /// DOM id of the page section.
    pub fn id(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Predict => "predict",
            Page::Educational => "educational",
            Page::History => "history",
            Page::Login => "login",
            Page::Register => "register",
        }
    }

    /// DOM id of the matching navigation item.
    pub fn nav_id(self) -> String {
        format!("nav-{}", self.id())
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Predict => "Risk Prediction",
            Page::Educational => "Learn",
            Page::History => "History",
            Page::Login => "Login",
            Page::Register => "Register",
        }
    }

    pub fn from_id(id: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Pages that get a navigation item in the given variant.
    pub fn navigable(variant: Variant) -> Vec<Page> {
        match variant {
            Variant::SessionAware => Page::ALL.to_vec(),
            Variant::Guest => vec![Page::Dashboard, Page::Predict, Page::Educational],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PredictTab {
    #[default]
    Symptom,
    Technical,
    Assistant,
}

impl PredictTab {
    pub const ALL: [PredictTab; 3] = [PredictTab::Symptom, PredictTab::Technical, PredictTab::Assistant];

    pub fn id(self) -> &'static str {
        match self {
            PredictTab::Symptom => "symptom-tab",
            PredictTab::Technical => "technical-tab",
            PredictTab::Assistant => "assistant-tab",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PredictTab::Symptom => "Symptom Check",
            PredictTab::Technical => "Clinical Measurements",
            PredictTab::Assistant => "Ask the Assistant",
        }
    }
}

/// Remote data a page needs once it becomes active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLoad {
    Resources,
    History,
    Summary,
}

/// The single active page and prediction tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    page: Page,
    tab: PredictTab,
    variant: Variant,
}

impl ViewState {
    pub fn new(variant: Variant) -> Self {
        let page = if variant.has_accounts() {
            Page::Login
        } else {
            Page::Dashboard
        };
        Self {
            page,
            tab: PredictTab::default(),
            variant,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn tab(&self) -> PredictTab {
        self.tab
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Activates `page` and reports what it needs fetched. Any page is
    /// reachable from any other.
    pub fn navigate(&mut self, page: Page) -> Option<PageLoad> {
        self.page = page;
        match (page, self.variant) {
            (Page::Educational, _) => Some(PageLoad::Resources),
            (Page::History, Variant::SessionAware) => Some(PageLoad::History),
            (Page::Dashboard, Variant::SessionAware) => Some(PageLoad::Summary),
            _ => None,
        }
    }

    pub fn select_tab(&mut self, tab: PredictTab) {
        self.tab = tab;
    }

    pub fn is_visible(&self, page: Page) -> bool {
        self.page == page
    }

    pub fn is_nav_active(&self, page: Page) -> bool {
        self.page == page
    }

    pub fn is_tab_visible(&self, tab: PredictTab) -> bool {
        self.tab == tab
    }
}
