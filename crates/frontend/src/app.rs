use crate::domain::guide_home::ui::GuideHomePage;
use crate::domain::taxonomy_admin::ui::TaxonomyAdmin;
use leptos::prelude::*;

/// Страницы приложения: публичный гид и консоль таксономии
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Admin,
}

#[component]
pub fn App() -> impl IntoView {
    let page = RwSignal::new(Page::Home);

    let tab_class = move |p: Page| {
        move || {
            if page.get() == p {
                "app-nav__tab app-nav__tab--active"
            } else {
                "app-nav__tab"
            }
        }
    };

    view! {
        <nav class="app-nav">
            <button class=tab_class(Page::Home) on:click=move |_| page.set(Page::Home)>
                "Гид"
            </button>
            <button class=tab_class(Page::Admin) on:click=move |_| page.set(Page::Admin)>
                "Таксономия"
            </button>
        </nav>
        <main class="app-main">
            {move || match page.get() {
                Page::Home => view! { <GuideHomePage /> }.into_any(),
                Page::Admin => view! { <TaxonomyAdmin /> }.into_any(),
            }}
        </main>
    }
}
