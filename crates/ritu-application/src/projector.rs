//! Pure projection of application state into renderable structures.
//!
//! No hidden state and no mutation: every function maps
//! (catalog, selection, locale, filter) to a view value the rendering surface
//! can display. Selection membership is always reconstructed from the
//! selection set itself, never inferred from previously rendered output.

use ritu_core::catalog::{Catalog, CatalogFilter, Product};
use ritu_core::error::{Result, RituError};
use ritu_core::locale::Locale;
use ritu_core::selection::SelectionSet;

/// One product card in the browsing grid.
#[derive(Debug, Clone)]
pub struct CardView {
    pub product: Product,
    /// Localized category label (dictionary or capitalization fallback).
    pub category_label: String,
    pub selected: bool,
}

/// The browsing grid.
#[derive(Debug, Clone)]
pub struct CatalogView {
    pub cards: Vec<CardView>,
    /// Localized placeholder shown instead of cards when the grid is empty:
    /// the "select a category" hint for an unfiltered view, otherwise the
    /// "no products found" message.
    pub placeholder: Option<String>,
}

/// One row of the selection panel.
#[derive(Debug, Clone)]
pub struct PanelRow {
    pub product: Product,
    /// Localized remove affordance label.
    pub remove_label: String,
}

/// The selection panel.
#[derive(Debug, Clone)]
pub struct PanelView {
    pub title: String,
    pub rows: Vec<PanelRow>,
    /// Localized empty-state message, present only when nothing is selected.
    pub empty_message: Option<String>,
    /// The generate action is disabled while the selection is empty.
    pub generate_enabled: bool,
    pub generate_label: String,
    pub clear_label: String,
}

/// The product detail view.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub product: Product,
    pub category_label: String,
    pub selected: bool,
    /// Localized add/added affordance matching the selection state.
    pub select_label: String,
}

/// Projects the filtered catalog with selection markers.
pub fn project_catalog(
    catalog: &Catalog,
    selection: &SelectionSet,
    filter: &CatalogFilter,
    locale: Locale,
) -> CatalogView {
    let t = locale.translations();
    let cards: Vec<CardView> = catalog
        .filter(filter)
        .into_iter()
        .map(|product| CardView {
            category_label: locale.category_label(&product.category),
            selected: selection.contains(product.id),
            product: product.clone(),
        })
        .collect();

    let placeholder = if cards.is_empty() {
        if filter.is_empty() {
            Some(t.select_category.to_string())
        } else {
            Some(t.no_products_found.to_string())
        }
    } else {
        None
    };

    CatalogView { cards, placeholder }
}

/// Projects the selection panel in insertion order.
pub fn project_selection_panel(selection: &SelectionSet, locale: Locale) -> PanelView {
    let t = locale.translations();

    if selection.is_empty() {
        return PanelView {
            title: t.selected_products_title.to_string(),
            rows: Vec::new(),
            empty_message: Some(t.no_products_selected.to_string()),
            generate_enabled: false,
            generate_label: t.generate_routine.to_string(),
            clear_label: t.clear_all.to_string(),
        };
    }

    PanelView {
        title: t.selected_products_title.to_string(),
        rows: selection
            .products()
            .iter()
            .map(|product| PanelRow {
                product: product.clone(),
                remove_label: t.remove_from_routine.to_string(),
            })
            .collect(),
        empty_message: None,
        generate_enabled: true,
        generate_label: t.generate_routine.to_string(),
        clear_label: t.clear_all.to_string(),
    }
}

/// Projects the detail view for one product.
///
/// Fails with `UnknownProduct` when the id does not resolve in the catalog.
pub fn project_product_detail(
    catalog: &Catalog,
    selection: &SelectionSet,
    id: u32,
    locale: Locale,
) -> Result<DetailView> {
    let product = catalog.get(id).ok_or(RituError::UnknownProduct { id })?;
    let t = locale.translations();
    let selected = selection.contains(id);

    Ok(DetailView {
        product: product.clone(),
        category_label: locale.category_label(&product.category),
        selected,
        select_label: if selected {
            t.added_to_routine.to_string()
        } else {
            t.add_to_routine.to_string()
        },
    })
}
