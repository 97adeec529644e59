use std::time::Instant;

use crate::catalog::Resolver;
use crate::search::{no_results_message, SearchController, SearchView};

use super::product_list::ProductListState;

pub struct SearchWindowState {
    placeholder: String,
    product_list: ProductListState,
    first_frame: bool,
}

impl SearchWindowState {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            product_list: ProductListState::new(),
            first_frame: true,
        }
    }

    /// Draws the search input and whatever the current state calls for.
    /// Returns a product name the user picked from the list.
    pub fn show<R: Resolver>(
        &mut self,
        ctx: &egui::Context,
        controller: &mut SearchController<R>,
        now: Instant,
    ) -> Option<String> {
        let mut picked = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut input = controller.state().search_value.clone();
                let search_response = ui.add(
                    egui::TextEdit::singleline(&mut input)
                        .hint_text(self.placeholder.as_str())
                        .desired_width(f32::INFINITY),
                );

                if self.first_frame {
                    search_response.request_focus();
                    self.first_frame = false;
                }

                if search_response.changed() {
                    controller.handle_input(&input, now);
                    self.product_list.reset();
                }
            });

            ui.separator();

            match controller.state().view() {
                SearchView::Loading => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                }
                SearchView::NoResults { query } => {
                    let (lead, quoted) = no_results_message(query);
                    ui.vertical_centered(|ui| {
                        ui.label(lead);
                        ui.label(egui::RichText::new(quoted).italics());
                    });
                }
                SearchView::Products(products) => {
                    picked = self.product_list.show(ui, products);
                }
            }
        });

        picked
    }
}
