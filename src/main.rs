use eframe::egui;

use ingredient_search::{AppConfig, IngredientSearchApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load_or_default();
    log::debug!("Starting with {:?}", config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Ingredient Search")
            .with_resizable(true)
            .with_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ingredient Search",
        options,
        Box::new(|cc| Ok(Box::new(IngredientSearchApp::new(cc, config)))),
    )?;

    Ok(())
}
