//! # Fence Calculator GUI
//!
//! Desktop form for pricing a metal fence. Built with Iced; price tables are
//! opened and results saved through native file dialogs (rfd).
//!
//! The form holds raw text; `fence_core` does the parsing, price lookup and
//! arithmetic. Every action either updates the session or reports its error
//! and leaves the previous table and result in place.

mod ui;

use std::path::Path;

use iced::widget::{column, container, row, rule};
use iced::{Element, Length, Size, Task};
use tracing::{info, warn};

use fence_core::logging::init_tracing;
use fence_core::{AppConfig, CalcError, CalculatorSession, FormInput};

const APP_TITLE: &str = "Metal Fence Calculator";

fn main() -> iced::Result {
    let config = match AppConfig::load(None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring settings: {}", e);
            AppConfig::default()
        }
    };
    init_tracing(&config.log_level);

    iced::application(move || App::new(config.clone()), App::update, App::view)
        .title(App::title)
        .window_size(Size::new(820.0, 720.0))
        .run()
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Form fields
    LengthChanged(String),
    HeightChanged(String),
    PostsChanged(String),
    PostDepthChanged(String),
    GatesChanged(String),
    DoorsChanged(String),
    DeliveryDistanceChanged(String),
    MetalTypeSelected(String),
    ProfileHeightSelected(f64),
    ThicknessSelected(f64),
    FoundationToggled(bool),
    CoatingToggled(bool),

    // Actions
    LoadPrices,
    Calculate,
    SaveResults,
}

/// Application state
pub struct App {
    config: AppConfig,
    session: CalculatorSession,
    form: FormInput,

    // Dependent selections, repopulated from the loaded price table
    metal_types: Vec<String>,
    profile_heights: Vec<f64>,
    thicknesses: Vec<f64>,
    selected_metal: Option<String>,
    selected_profile_height: Option<f64>,
    selected_thickness: Option<f64>,

    /// Error from the last failed action, shown in the results panel
    error_message: Option<String>,
    status: String,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let form = config.defaults.to_form();
        let mut app = App {
            config,
            session: CalculatorSession::new(),
            form,
            metal_types: Vec::new(),
            profile_heights: Vec::new(),
            thicknesses: Vec::new(),
            selected_metal: None,
            selected_profile_height: None,
            selected_thickness: None,
            error_message: None,
            status: "Load a price table to begin".to_string(),
        };

        let startup_prices = app.config.prices_file.clone();
        if startup_prices.is_file() {
            app.load_prices_from(&startup_prices);
        }

        app
    }

    fn title(&self) -> String {
        match self.session.price_table().and_then(|t| t.source_name()) {
            Some(name) => format!("{} - {}", APP_TITLE, name),
            None => APP_TITLE.to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LengthChanged(value) => self.form.length = value,
            Message::HeightChanged(value) => self.form.height = value,
            Message::PostsChanged(value) => self.form.posts = value,
            Message::PostDepthChanged(value) => self.form.post_depth = value,
            Message::GatesChanged(value) => self.form.gates = value,
            Message::DoorsChanged(value) => self.form.doors = value,
            Message::DeliveryDistanceChanged(value) => self.form.delivery_distance = value,
            Message::MetalTypeSelected(metal) => self.select_metal(Some(metal)),
            Message::ProfileHeightSelected(height) => {
                self.selected_profile_height = Some(height);
                self.form.profile_height = height.to_string();
            }
            Message::ThicknessSelected(thickness) => {
                self.selected_thickness = Some(thickness);
                self.form.thickness = thickness.to_string();
            }
            Message::FoundationToggled(checked) => self.form.foundation = checked,
            Message::CoatingToggled(checked) => self.form.coating = checked,

            Message::LoadPrices => {
                let initial_name = self
                    .config
                    .prices_file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let picked = rfd::FileDialog::new()
                    .set_title("Select price table")
                    .add_filter("Price tables", &["xlsx", "xls", "ods", "csv"])
                    .set_file_name(initial_name)
                    .pick_file();

                if let Some(path) = picked {
                    self.load_prices_from(&path);
                }
            }

            Message::Calculate => self.calculate(),

            Message::SaveResults => {
                if self.session.last_calculation().is_none() {
                    self.report_error("Save failed", &CalcError::NoResult);
                    return Task::none();
                }

                let initial_name = self
                    .config
                    .output_file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "result.xlsx".to_string());
                let picked = rfd::FileDialog::new()
                    .set_title("Save results")
                    .add_filter("Excel workbook", &["xlsx"])
                    .set_file_name(initial_name)
                    .save_file();

                if let Some(mut path) = picked {
                    if path.extension().is_none() {
                        path.set_extension("xlsx");
                    }
                    self.save_results_to(&path);
                }
            }
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let source_name = self.session.price_table().and_then(|t| t.source_name());

        let content = column![
            ui::toolbar::view_header(APP_TITLE),
            ui::toolbar::view_toolbar(),
            rule::horizontal(1),
            row![
                ui::input_panel::view_input_panel(self, 0.55),
                ui::results_panel::view_results_panel(self, 0.55),
            ]
            .spacing(8)
            .height(Length::Fill),
            rule::horizontal(1),
            ui::status_bar::view_status_bar(source_name, &self.status),
        ]
        .spacing(6)
        .padding(10);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn load_prices_from(&mut self, path: &Path) {
        match self.session.load_prices(path) {
            Ok(table) => {
                let name = table.source_name().unwrap_or_else(|| path.display().to_string());
                self.status = format!("Loaded prices from: {}", name);
                self.error_message = None;
                self.refresh_options();
            }
            Err(e) if e.is_data_error() => self.report_error("Price table has invalid data", &e),
            Err(e) => self.report_error("Failed to load prices", &e),
        }
    }

    /// Repopulate every dependent list from the loaded table and preselect the first metal type
    fn refresh_options(&mut self) {
        self.metal_types = self
            .session
            .price_table()
            .map(|t| t.metal_types())
            .unwrap_or_default();
        let first = self.metal_types.first().cloned();
        self.select_metal(first);
    }

    /// Select a metal type and preselect its first profile height and thickness
    fn select_metal(&mut self, metal: Option<String>) {
        let options = match (&metal, self.session.price_table()) {
            (Some(metal), Some(table)) => table.options(metal),
            _ => Default::default(),
        };

        self.form.metal_type = metal.clone().unwrap_or_default();
        self.selected_metal = metal;

        self.selected_profile_height = options.profile_heights.first().copied();
        self.selected_thickness = options.thicknesses.first().copied();
        self.form.profile_height = self
            .selected_profile_height
            .map(|v| v.to_string())
            .unwrap_or_default();
        self.form.thickness = self
            .selected_thickness
            .map(|v| v.to_string())
            .unwrap_or_default();

        self.profile_heights = options.profile_heights;
        self.thicknesses = options.thicknesses;
    }

    fn calculate(&mut self) {
        match self.session.calculate(&self.form) {
            Ok(_) => {
                self.status = "Calculation complete".to_string();
                self.error_message = None;
            }
            Err(e) => self.report_error("Calculation error", &e),
        }
    }

    fn save_results_to(&mut self, path: &Path) {
        match self.session.save_results(path, &self.config.currency) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                info!(path = %path.display(), "Results saved from form");
                self.status = format!("Saved: {}", name);
                self.error_message = None;
            }
            Err(e) => self.report_error("Save failed", &e),
        }
    }

    fn report_error(&mut self, status: &str, error: &CalcError) {
        warn!(code = error.error_code(), error = %error, "{}", status);
        self.status = status.to_string();
        self.error_message = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fence_core::pricing::{LineItemKind, PriceField, PriceRow, PriceTable};
    use std::path::PathBuf;

    fn test_app() -> App {
        let config = AppConfig {
            prices_file: PathBuf::from("fence_gui_test_no_such_prices.xlsx"),
            ..AppConfig::default()
        };
        let mut app = App::new(config);
        app.session.set_price_table(PriceTable::from_rows(vec![
            PriceRow::new("Zinc", 8.0, 0.4, 420.0),
            PriceRow::new("Steel", 20.0, 0.5, 560.0),
            PriceRow::new("Steel", 20.0, 0.45, 500.0).with_price(PriceField::Post, 300.0),
        ]));
        app.refresh_options();
        app
    }

    #[test]
    fn test_startup_without_price_file() {
        let app = App::new(AppConfig {
            prices_file: PathBuf::from("fence_gui_test_no_such_prices.xlsx"),
            ..AppConfig::default()
        });
        assert!(app.metal_types.is_empty());
        assert_eq!(app.form.length, "10");
        assert_eq!(app.title(), APP_TITLE);
    }

    #[test]
    fn test_loading_preselects_first_options() {
        let app = test_app();
        assert_eq!(app.metal_types, vec!["Zinc", "Steel"]);
        assert_eq!(app.selected_metal.as_deref(), Some("Zinc"));
        assert_eq!(app.selected_profile_height, Some(8.0));
        assert_eq!(app.form.thickness, "0.4");
    }

    #[test]
    fn test_metal_selection_filters_options() {
        let mut app = test_app();
        let _ = app.update(Message::MetalTypeSelected("Steel".to_string()));

        assert_eq!(app.profile_heights, vec![20.0]);
        assert_eq!(app.thicknesses, vec![0.45, 0.5]);
        assert_eq!(app.selected_thickness, Some(0.45));
        assert_eq!(app.form.metal_type, "Steel");
    }

    #[test]
    fn test_calculate_and_error_reporting() {
        let mut app = test_app();
        let _ = app.update(Message::MetalTypeSelected("Steel".to_string()));
        let _ = app.update(Message::CoatingToggled(false));
        let _ = app.update(Message::FoundationToggled(false));
        let _ = app.update(Message::Calculate);

        assert!(app.error_message.is_none());
        let calculation = app.session.last_calculation().unwrap();
        assert_eq!(calculation.breakdown.total, 12000.0);
        assert_eq!(calculation.breakdown.cost_of(LineItemKind::Posts), Some(3000.0));

        let _ = app.update(Message::LengthChanged("ten".to_string()));
        let _ = app.update(Message::Calculate);
        assert!(app.error_message.as_deref().unwrap_or_default().contains("Fence length"));
        assert_eq!(app.status, "Calculation error");
        assert_eq!(app.session.last_calculation().unwrap().breakdown.total, 12000.0);
    }

    #[test]
    fn test_invalid_price_file_keeps_loaded_options() {
        let mut app = test_app();
        let path = std::env::temp_dir().join("fence_gui_test_bad_prices.csv");
        std::fs::write(&path, "metal_type,profile_height,thickness\nSteel,20,0.45\n").unwrap();

        app.load_prices_from(&path);
        assert_eq!(app.status, "Price table has invalid data");
        assert!(app.error_message.as_deref().unwrap_or_default().contains("base_price"));
        assert_eq!(app.metal_types, vec!["Zinc", "Steel"]);

        let missing = std::env::temp_dir().join("fence_gui_test_no_such_prices.csv");
        app.load_prices_from(&missing);
        assert_eq!(app.status, "Failed to load prices");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_before_calculate_reports_error() {
        let mut app = test_app();
        let _ = app.update(Message::SaveResults);
        assert_eq!(app.error_message, Some(CalcError::NoResult.to_string()));
    }
}
