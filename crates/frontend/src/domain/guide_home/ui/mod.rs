pub mod state;

use self::state::{create_state, toggle_category, toggle_location, toggle_subcategory, RATING_OPTIONS};
use crate::domain::guide_home::api;
use contracts::domain::a004_business::aggregate::Business;
use contracts::shared::search::BusinessFilter;
use contracts::shared::taxonomy_filter::recompute;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance};

fn chip_class(active: bool) -> &'static str {
    if active {
        "chip chip--active"
    } else {
        "chip"
    }
}

/// Класс чипа узла `id` при выбранном на уровне `selected`
fn node_chip_class<Id: PartialEq>(selected: Option<Id>, id: Id) -> &'static str {
    chip_class(selected == Some(id))
}

/// Главная страница гида: чипы категорий, подкатегорий и локаций, поиск, рейтинг
#[component]
#[allow(non_snake_case)]
pub fn GuideHomePage() -> impl IntoView {
    let state = create_state();
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);

    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_snapshot().await {
            Ok(snapshot) => {
                log::debug!(
                    "Guide snapshot: {} categories, {} businesses",
                    snapshot.categories.len(),
                    snapshot.businesses.len()
                );
                state.snapshot.set(snapshot);
                set_error.set(None);
            }
            Err(e) => set_error.set(Some(e)),
        }
        set_loading.set(false);
    });

    // Видимые списки пересчитываются при любом изменении снимка или выбора
    let taxonomy = Memo::new(move |_| {
        let selection = state.selection.get();
        state.snapshot.with(|s| recompute(s, selection))
    });

    // Устаревший выбор чинится сразу: записанный обратно выбор дает Unchanged
    Effect::new(move |_| {
        let view = taxonomy.get();
        if view.outcome.is_changed() {
            log::info!("Selection repaired: {:?}", view.outcome);
            state.selection.set(view.selection);
        }
    });

    let businesses = Memo::new(move |_| {
        let filter = BusinessFilter::new(
            state.search.get(),
            taxonomy.with(|t| t.selection),
            state.rating_min.get(),
        );
        state.snapshot.with(|s| filter.apply(&s.businesses))
    });

    // Активность чипов берется из исправленного выбора
    let category_chips = move || {
        taxonomy
            .get()
            .categories
            .into_iter()
            .map(|c| {
                let id = c.id;
                view! {
                    <button
                        class=move || node_chip_class(taxonomy.with(|t| t.selection.category_id), id)
                        on:click=move |_| state.selection.update(|s| toggle_category(s, id))
                    >
                        {c.name}
                    </button>
                }
            })
            .collect_view()
    };

    let subcategory_chips = move || {
        taxonomy
            .get()
            .subcategories
            .into_iter()
            .map(|sc| {
                let id = sc.id;
                view! {
                    <button
                        class=move || node_chip_class(taxonomy.with(|t| t.selection.subcategory_id), id)
                        on:click=move |_| state.selection.update(|s| toggle_subcategory(s, id))
                    >
                        {sc.name}
                    </button>
                }
            })
            .collect_view()
    };

    let location_chips = move || {
        taxonomy
            .get()
            .locations
            .into_iter()
            .map(|l| {
                let id = l.id;
                view! {
                    <button
                        class=move || node_chip_class(taxonomy.with(|t| t.selection.location_id), id)
                        on:click=move |_| state.selection.update(|s| toggle_location(s, id))
                    >
                        {l.name}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="guide-home">
            <div class="guide-home__filters">
                <input
                    type="search"
                    class="guide-home__search"
                    placeholder="Buscar / Поиск"
                    prop:value=move || state.search.get()
                    on:input=move |ev| state.search.set(event_target_value(&ev))
                />
                <select
                    class="guide-home__rating"
                    on:change=move |ev| {
                        let value = event_target_value(&ev).parse::<f64>().unwrap_or(0.0);
                        state.rating_min.set(value);
                    }
                >
                    {RATING_OPTIONS
                        .into_iter()
                        .map(|(value, label)| {
                            view! {
                                <option
                                    value=value.to_string()
                                    selected=move || state.rating_min.get() == value
                                >
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <Show when=move || !state.selection.get().is_empty()>
                    <Button
                        class="guide-home__reset"
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| state.selection.update(|s| s.clear_category())
                    >
                        "Сбросить фильтры"
                    </Button>
                </Show>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="chip-row">
                <button
                    class=move || chip_class(taxonomy.with(|t| t.selection.category_id.is_none()))
                    on:click=move |_| state.selection.update(|s| s.clear_category())
                >
                    "Todos"
                </button>
                {category_chips}
            </div>
            <Show when=move || state.selection.get().category_id.is_some()>
                <div class="chip-row chip-row--sub">{subcategory_chips}</div>
            </Show>
            <div class="chip-row chip-row--location">{location_chips}</div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="guide-home__loading">"Загрузка..."</div> }
            >
                <div class="guide-home__count">
                    {move || format!("Найдено: {}", businesses.with(|b| b.len()))}
                </div>
                <div class="business-grid">
                    {move || {
                        businesses
                            .get()
                            .into_iter()
                            .map(|b| view! { <BusinessCard business=b /> })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn BusinessCard(business: Business) -> impl IntoView {
    let tags = business.tags.join(" · ");
    let rating = format!("★ {:.1} ({})", business.rating, business.review_count);
    let card_class = if business.is_premium {
        "business-card business-card--premium"
    } else {
        "business-card"
    };

    view! {
        <div class=card_class>
            <div class="business-card__header">
                <span class="business-card__name">{business.name}</span>
                <span class="business-card__rating">{rating}</span>
            </div>
            <div class="business-card__category">{business.category}</div>
            <div class="business-card__description">{business.description}</div>
            <div class="business-card__address">{business.address}</div>
            <div class="business-card__tags">{tags}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_class() {
        assert_eq!(chip_class(true), "chip chip--active");
        assert_eq!(chip_class(false), "chip");
    }

    #[test]
    fn test_stale_category_chip_not_highlighted() {
        use contracts::domain::a001_category::aggregate::Category;
        use contracts::shared::taxonomy_filter::{Selection, TaxonomySnapshot};

        let hidden = Category::new_for_insert("Comida".into(), 0, true);
        let mut business = Business::new_for_insert("Bar".into());
        business.category_id = Some(hidden.id);
        let snapshot = TaxonomySnapshot {
            categories: vec![hidden.clone()],
            businesses: vec![business],
            ..Default::default()
        };

        let mut raw = Selection::default();
        raw.select_category(hidden.id);
        let view = recompute(&snapshot, raw);

        assert_eq!(node_chip_class(raw.category_id, hidden.id), "chip chip--active");
        assert_eq!(node_chip_class(view.selection.category_id, hidden.id), "chip");
    }
}
