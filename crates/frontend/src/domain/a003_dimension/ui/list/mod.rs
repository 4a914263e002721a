use crate::domain::a003_dimension::api::use_dimension;
use crate::shared::components::{EmptyState, PageHeader, QueryStatus};
use crate::shared::date_utils::EMPTY;
use contracts::domain::a003_dimension::aggregate::{Channel, Combo, Company, DimensionKind, Product};
use leptos::prelude::*;
use thaw::*;

fn kind_from_tab(value: &str) -> DimensionKind {
    DimensionKind::ALL
        .into_iter()
        .find(|k| k.path_segment() == value)
        .unwrap_or(DimensionKind::Company)
}

fn text(value: &Option<String>) -> String {
    value
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| EMPTY.to_string())
}

fn number<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

/// Four read-only dimension tables sharing one keyword filter.
#[component]
#[allow(non_snake_case)]
pub fn DimensionBrowser() -> impl IntoView {
    let keyword = RwSignal::new(String::new());
    let selected_tab = RwSignal::new(DimensionKind::Company.path_segment().to_string());
    let active = Memo::new(move |_| kind_from_tab(&selected_tab.get()));

    view! {
        <div class="page">
            <PageHeader title="Dimensions" subtitle="Companies, products, channels and their combinations.".to_string()>
                <Input value=keyword placeholder="Keyword (name / code)" />
            </PageHeader>
            <div class="details-card">
                <TabList selected_value=selected_tab>
                    {DimensionKind::ALL
                        .into_iter()
                        .map(|k| view! { <Tab value=k.path_segment()>{k.display_name()}</Tab> })
                        .collect_view()}
                </TabList>
                {move || match active.get() {
                    DimensionKind::Company => view! { <CompanyTable keyword=keyword /> }.into_any(),
                    DimensionKind::Product => view! { <ProductTable keyword=keyword /> }.into_any(),
                    DimensionKind::Channel => view! { <ChannelTable keyword=keyword /> }.into_any(),
                    DimensionKind::Combo => view! { <ComboTable keyword=keyword /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn CompanyTable(#[prop(into)] keyword: Signal<String>) -> impl IntoView {
    let rows = use_dimension::<Company>(DimensionKind::Company, keyword);
    view! {
        <QueryStatus is_loading=rows.is_loading error=rows.error />
        <Show
            when=move || !rows.data.get().unwrap_or_default().is_empty()
            fallback=|| view! { <EmptyState text="No companies" /> }
        >
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"ID"</TableHeaderCell>
                        <TableHeaderCell>"Code"</TableHeaderCell>
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell>"Level"</TableHeaderCell>
                        <TableHeaderCell>"Parent"</TableHeaderCell>
                        <TableHeaderCell>"Status"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.data.get().unwrap_or_default()
                        key=|c| c.company_id
                        children=move |c: Company| {
                            let active = c.is_active.unwrap_or(false);
                            view! {
                                <TableRow>
                                    <TableCell>{c.company_id}</TableCell>
                                    <TableCell>{text(&c.company_code)}</TableCell>
                                    <TableCell>{text(&c.company_name)}</TableCell>
                                    <TableCell>{number(c.level)}</TableCell>
                                    <TableCell>{number(c.parent_company_id)}</TableCell>
                                    <TableCell>
                                        <Badge
                                            appearance=BadgeAppearance::Tint
                                            color=if active { BadgeColor::Success } else { BadgeColor::Subtle }
                                        >
                                            {if active { "enabled" } else { "disabled" }}
                                        </Badge>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </Show>
    }
}

#[component]
fn ProductTable(#[prop(into)] keyword: Signal<String>) -> impl IntoView {
    let rows = use_dimension::<Product>(DimensionKind::Product, keyword);
    view! {
        <QueryStatus is_loading=rows.is_loading error=rows.error />
        <Show
            when=move || !rows.data.get().unwrap_or_default().is_empty()
            fallback=|| view! { <EmptyState text="No products" /> }
        >
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"ID"</TableHeaderCell>
                        <TableHeaderCell>"Code"</TableHeaderCell>
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell>"Type"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.data.get().unwrap_or_default()
                        key=|p| p.product_id
                        children=move |p: Product| view! {
                            <TableRow>
                                <TableCell>{p.product_id}</TableCell>
                                <TableCell>{text(&p.product_code)}</TableCell>
                                <TableCell>{text(&p.product_name)}</TableCell>
                                <TableCell>{text(&p.product_type)}</TableCell>
                            </TableRow>
                        }
                    />
                </TableBody>
            </Table>
        </Show>
    }
}

#[component]
fn ChannelTable(#[prop(into)] keyword: Signal<String>) -> impl IntoView {
    let rows = use_dimension::<Channel>(DimensionKind::Channel, keyword);
    view! {
        <QueryStatus is_loading=rows.is_loading error=rows.error />
        <Show
            when=move || !rows.data.get().unwrap_or_default().is_empty()
            fallback=|| view! { <EmptyState text="No channels" /> }
        >
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"ID"</TableHeaderCell>
                        <TableHeaderCell>"Code"</TableHeaderCell>
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell>"Type"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.data.get().unwrap_or_default()
                        key=|c| c.channel_id
                        children=move |c: Channel| view! {
                            <TableRow>
                                <TableCell>{c.channel_id}</TableCell>
                                <TableCell>{text(&c.channel_code)}</TableCell>
                                <TableCell>{text(&c.channel_name)}</TableCell>
                                <TableCell>{text(&c.channel_type)}</TableCell>
                            </TableRow>
                        }
                    />
                </TableBody>
            </Table>
        </Show>
    }
}

#[component]
fn ComboTable(#[prop(into)] keyword: Signal<String>) -> impl IntoView {
    let rows = use_dimension::<Combo>(DimensionKind::Combo, keyword);
    view! {
        <QueryStatus is_loading=rows.is_loading error=rows.error />
        <Show
            when=move || !rows.data.get().unwrap_or_default().is_empty()
            fallback=|| view! { <EmptyState text="No combinations" /> }
        >
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"ID"</TableHeaderCell>
                        <TableHeaderCell>"Company"</TableHeaderCell>
                        <TableHeaderCell>"Core company"</TableHeaderCell>
                        <TableHeaderCell>"Product"</TableHeaderCell>
                        <TableHeaderCell>"Channel"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.data.get().unwrap_or_default()
                        key=|c| c.combo_id
                        children=move |c: Combo| view! {
                            <TableRow>
                                <TableCell>{c.combo_id}</TableCell>
                                <TableCell>{text(&c.company_name)}</TableCell>
                                <TableCell>{text(&c.core_company_name)}</TableCell>
                                <TableCell>{text(&c.product_name)}</TableCell>
                                <TableCell>{text(&c.channel_name)}</TableCell>
                            </TableRow>
                        }
                    />
                </TableBody>
            </Table>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tab() {
        assert_eq!(kind_from_tab("channels"), DimensionKind::Channel);
        assert_eq!(kind_from_tab("combos"), DimensionKind::Combo);
        assert_eq!(kind_from_tab("unknown"), DimensionKind::Company);
    }

    #[test]
    fn test_empty_cells() {
        assert_eq!(text(&Some(String::new())), "—");
        assert_eq!(text(&Some("East".into())), "East");
        assert_eq!(number::<i32>(None), "—");
        assert_eq!(number(Some(2)), "2");
    }
}
