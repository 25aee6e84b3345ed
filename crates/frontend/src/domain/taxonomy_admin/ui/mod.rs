pub mod state;

use self::state::{create_state, selected_category_id, to_rows, NodeRow};
use crate::domain::taxonomy_admin::api::{self, NodeKind};
use contracts::shared::reorder::move_by_one;
use leptos::prelude::*;
use thaw::{
    Button, ButtonAppearance, ButtonSize, Select, Table, TableBody, TableCell, TableCellLayout,
    TableHeader, TableHeaderCell, TableRow,
};

/// Консоль таксономии: скрытие узлов и порядок показа
#[component]
#[allow(non_snake_case)]
pub fn TaxonomyAdmin() -> impl IntoView {
    let state = create_state();
    let (error, set_error) = signal::<Option<String>>(None);

    let load_categories = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_categories().await {
                Ok(v) => state.categories.set(to_rows(&v)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let load_locations = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_locations().await {
                Ok(v) => state.locations.set(to_rows(&v)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    load_categories();
    load_locations();

    let load_subcategories = move || {
        let Some(category_id) = selected_category_id(&state.current_category.get_untracked()) else {
            state.subcategories.set(Vec::new());
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_subcategories(&category_id).await {
                Ok(v) => state.subcategories.set(to_rows(&v)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    // Подкатегории показываются для категории, выбранной над списком
    Effect::new(move |_| {
        state.current_category.track();
        load_subcategories();
    });

    let reload = move |kind: NodeKind| match kind {
        NodeKind::Category => load_categories(),
        NodeKind::Subcategory => load_subcategories(),
        NodeKind::Location => load_locations(),
    };

    let on_error = Callback::new(move |e: String| set_error.set(Some(e)));
    let on_changed = Callback::new(reload);

    let insert_test_data = move |_: leptos::ev::MouseEvent| {
        wasm_bindgen_futures::spawn_local(async move {
            match api::insert_test_data().await {
                Ok(()) => {
                    load_categories();
                    load_locations();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let category_options = move || {
        state
            .categories
            .get()
            .into_iter()
            .map(|row| view! { <option value=row.id>{row.name}</option> })
            .collect_view()
    };

    view! {
        <div class="taxonomy-admin">
            <div class="taxonomy-admin__toolbar">
                <Button appearance=ButtonAppearance::Primary on_click=insert_test_data>
                    "Заполнить тестовыми данными"
                </Button>
            </div>
            {move || {
                error
                    .get()
                    .map(|e| {
                        view! {
                            <div class="error" on:click=move |_| set_error.set(None)>
                                {e}
                            </div>
                        }
                    })
            }}
            <div class="taxonomy-admin__columns">
                <NodeList
                    kind=NodeKind::Category
                    rows=state.categories
                    on_changed=on_changed
                    on_error=on_error
                />
                <div class="taxonomy-admin__column">
                    <Select value=state.current_category>
                        <option value="">"Выберите категорию"</option>
                        {category_options}
                    </Select>
                    <NodeList
                        kind=NodeKind::Subcategory
                        rows=state.subcategories
                        on_changed=on_changed
                        on_error=on_error
                    />
                </div>
                <NodeList
                    kind=NodeKind::Location
                    rows=state.locations
                    on_changed=on_changed
                    on_error=on_error
                />
            </div>
        </div>
    }
}

/// Список узлов одного уровня: скрыть/показать и сдвиг на одну позицию
#[component]
#[allow(non_snake_case)]
fn NodeList(
    kind: NodeKind,
    rows: RwSignal<Vec<NodeRow>>,
    on_changed: Callback<NodeKind>,
    on_error: Callback<String>,
) -> impl IntoView {
    let toggle_hidden = move |row: NodeRow| {
        wasm_bindgen_futures::spawn_local(async move {
            match api::set_hidden(kind, &row.id, !row.hidden).await {
                Ok(()) => on_changed.run(kind),
                Err(e) => on_error.run(e),
            }
        });
    };

    let move_row = move |index: usize, up: bool| {
        let Some(reordered) = move_by_one(&rows.get_untracked(), index, up) else {
            return;
        };
        let ids: Vec<String> = reordered.iter().map(|r| r.id.clone()).collect();
        // Оптимистично показываем новый порядок, затем перечитываем с сервера
        rows.set(reordered);
        wasm_bindgen_futures::spawn_local(async move {
            match api::reorder(kind, ids).await {
                Ok(()) => on_changed.run(kind),
                Err(e) => {
                    on_error.run(e);
                    on_changed.run(kind);
                }
            }
        });
    };

    view! {
        <div class="taxonomy-admin__column">
            <h3>{kind.title()}</h3>
            <div class="node-list">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=200.0>"Название"</TableHeaderCell>
                            <TableHeaderCell min_width=180.0>"Действия"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let items = rows.get();
                            let last = items.len().saturating_sub(1);
                            items
                                .into_iter()
                                .enumerate()
                                .map(|(index, row)| {
                                    let row_for_toggle = row.clone();
                                    view! {
                                        <TableRow class:node-list__item--hidden=row.hidden>
                                            <TableCell>
                                                <TableCellLayout>{row.name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Secondary
                                                    disabled=index == 0
                                                    on_click=move |_| move_row(index, true)
                                                >
                                                    "↑"
                                                </Button>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Secondary
                                                    disabled=index == last
                                                    on_click=move |_| move_row(index, false)
                                                >
                                                    "↓"
                                                </Button>
                                                <Button
                                                    size=ButtonSize::Small
                                                    on_click=move |_| toggle_hidden(row_for_toggle.clone())
                                                >
                                                    {if row.hidden { "Показать" } else { "Скрыть" }}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}
