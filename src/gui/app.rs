//! The `eframe::App` implementation.
//!
//! Drains service events, renders the converter form and forwards user
//! actions to the service task. No network access happens here.

use egui::{Align2, Color32, ComboBox, RichText, Ui, vec2};
use tokio::sync::mpsc;

use super::events::{ServiceEvent, UiEvent};
use super::flags::flag_icon;
use super::state::AppState;
use crate::core::Currency;

const ACCENT: Color32 = Color32::from_rgb(25, 118, 210);
const PANEL_BG: Color32 = Color32::from_rgb(245, 245, 245);
const SWAP_BG: Color32 = Color32::from_rgb(230, 230, 230);

pub struct App {
    pub state: AppState,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    svc_rx: mpsc::UnboundedReceiver<ServiceEvent>,
}

impl App {
    pub fn new(
        state: AppState,
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        svc_rx: mpsc::UnboundedReceiver<ServiceEvent>,
    ) -> Self {
        Self {
            state,
            ui_tx,
            svc_rx,
        }
    }

    fn convert(&mut self) {
        if let Some(event) = self.state.request_conversion() {
            if self.ui_tx.send(event).is_err() {
                self.state.busy = false;
                self.state.dialog = Some("The conversion service has stopped.".to_string());
            }
        }
    }

    fn form(&mut self, ui: &mut Ui) {
        egui::Grid::new("converter_form")
            .num_columns(4)
            .spacing(vec2(12.0, 12.0))
            .show(ui, |ui| {
                ui.label("From Currency:");
                currency_selector(ui, "from_currency", &mut self.state.from);
                let swap = egui::Button::new(RichText::new("⇄").size(20.0))
                    .fill(SWAP_BG)
                    .min_size(vec2(55.0, 40.0));
                if ui.add(swap).on_hover_text("Swap currencies").clicked() {
                    self.state.swap();
                }
                currency_selector(ui, "to_currency", &mut self.state.to);
                ui.end_row();

                ui.label("Amount:");
                let field = egui::TextEdit::singleline(&mut self.state.amount)
                    .hint_text("0.00")
                    .desired_width(250.0)
                    .font(egui::TextStyle::Heading);
                let response = ui.add(field);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.end_row();

                ui.label("");
                let convert = egui::Button::new(
                    RichText::new("Convert")
                        .size(18.0)
                        .strong()
                        .color(Color32::WHITE),
                )
                .fill(ACCENT)
                .min_size(vec2(140.0, 45.0));
                let clicked = ui.add_enabled(!self.state.busy, convert).clicked();
                if self.state.busy {
                    ui.spinner();
                }
                ui.end_row();

                if clicked || (submitted && !self.state.busy) {
                    self.convert();
                }
            });

        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&self.state.result).size(18.0).strong());
            if let Some(at) = self.state.rates_updated_at {
                let updated = format!("Rates updated {}", at.format("%Y-%m-%d %H:%M UTC"));
                ui.label(RichText::new(updated).small().weak());
            }
        });
    }

    fn dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.dialog.clone() else {
            return;
        };
        let mut open = true;
        egui::Window::new("Message")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    open = false;
                }
            });
        if !open {
            self.state.dismiss_dialog();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(event) = self.svc_rx.try_recv() {
            self.state.apply(event);
        }

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(ACCENT).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Currency Converter")
                            .size(24.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(PANEL_BG).inner_margin(12.0))
            .show(ctx, |ui| {
                // Dialogs block the form like a modal.
                ui.add_enabled_ui(self.state.dialog.is_none(), |ui| self.form(ui));
            });

        self.dialog(ctx);
    }
}

/// A combo box listing every supported currency with its flag.
fn currency_selector(ui: &mut Ui, id: &str, selected: &mut usize) {
    ui.horizontal(|ui| {
        let current = Currency::from_index(*selected).unwrap_or(Currency::Usd);
        flag_icon(ui, current);
        ComboBox::from_id_salt(id)
            .selected_text(current.code())
            .width(80.0)
            .show_ui(ui, |ui| {
                for (index, currency) in Currency::ALL.iter().enumerate() {
                    ui.horizontal(|ui| {
                        flag_icon(ui, *currency);
                        ui.selectable_value(selected, index, currency.code())
                            .on_hover_text(currency.name());
                    });
                }
            });
    });
}
