use eframe::egui;
use std::time::Instant;

use crate::catalog::{Catalog, CatalogEvent, CatalogWatcher};
use crate::clipboard::copy_to_clipboard;
use crate::config::AppConfig;
use crate::search::SearchController;
use crate::ui::SearchWindowState;

pub struct IngredientSearchApp {
    search_window: SearchWindowState,
    controller: SearchController<Catalog>,
    catalog_watcher: Option<CatalogWatcher>,
}

impl IngredientSearchApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path).unwrap_or_else(|e| {
                log::error!("Failed to load catalog {}: {}", path.display(), e);
                Catalog::builtin()
            }),
            None => Catalog::builtin(),
        };
        log::info!("Searching {} products", catalog.len());

        let catalog_watcher = config.catalog_path.clone().and_then(|path| {
            let ctx = cc.egui_ctx.clone();
            CatalogWatcher::spawn(path, move || ctx.request_repaint())
                .map_err(|e| log::warn!("Catalog changes will not be picked up: {}", e))
                .ok()
        });

        Self {
            search_window: SearchWindowState::new(config.placeholder.as_str()),
            controller: SearchController::new(catalog, config.timing(), &config.default_query),
            catalog_watcher,
        }
    }

    fn drain_catalog_events(&mut self, now: Instant) {
        let Some(watcher) = &self.catalog_watcher else {
            return;
        };
        while let Some(event) = watcher.try_recv() {
            match event {
                CatalogEvent::Reloaded(catalog) => {
                    self.controller.replace_resolver(catalog);
                    self.controller.resubmit(now);
                }
                CatalogEvent::Failed(message) => {
                    log::warn!("Keeping previous catalog: {}", message);
                }
            }
        }
    }
}

impl eframe::App for IngredientSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drain_catalog_events(now);
        self.controller.poll(now);

        if let Some(name) = self.search_window.show(ctx, &mut self.controller, now) {
            if let Err(e) = copy_to_clipboard(&name) {
                log::error!("Failed to copy to clipboard: {}", e);
            } else {
                log::info!("Copied {:?} to clipboard", name);
            }
        }

        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}
