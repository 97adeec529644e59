use egui_extras::{Column, TableBuilder};

use crate::catalog::Product;

#[derive(Default)]
pub struct ProductListState {
    selected_index: usize,
}

impl ProductListState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    /// Draws the table. Returns the name of a product picked by click or Enter.
    pub fn show(&mut self, ui: &mut egui::Ui, products: &[Product]) -> Option<String> {
        let mut picked = None;
        self.clamp_selection(products.len());

        let table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .sense(egui::Sense::click())
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(180.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder())
            .min_scrolled_height(300.0);

        table
            .header(20.0, |mut header| {
                header.col(|ui| { ui.strong("Product"); });
                header.col(|ui| { ui.strong("Brand"); });
                header.col(|ui| { ui.strong("Category"); });
                header.col(|ui| { ui.strong("Ingredients"); });
            })
            .body(|body| {
                body.rows(25.0, products.len(), |mut row| {
                    let list_index = row.index();
                    let Some(product) = products.get(list_index) else {
                        return;
                    };

                    row.set_selected(list_index == self.selected_index);

                    row.col(|ui| { ui.label(product.name.as_str()); });
                    row.col(|ui| { ui.label(product.brand.as_deref().unwrap_or("-")); });
                    row.col(|ui| { ui.label(product.category.as_str()); });
                    row.col(|ui| { ui.label(product.ingredients_preview()); });

                    if row.response().clicked() {
                        self.selected_index = list_index;
                        picked = Some(product.name.clone());
                    }
                });
            });

        ui.ctx().input(|i| {
            if i.key_pressed(egui::Key::ArrowUp) {
                self.move_selection(-1, products.len());
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                self.move_selection(1, products.len());
            }
            if i.key_pressed(egui::Key::Enter) {
                if let Some(product) = products.get(self.selected_index) {
                    picked = Some(product.name.clone());
                }
            }
        });

        picked
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn reset(&mut self) {
        self.selected_index = 0;
    }

    fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        self.selected_index = self
            .selected_index
            .saturating_add_signed(delta)
            .min(len - 1);
    }

    fn clamp_selection(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }
}
