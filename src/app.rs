// src/app.rs
//
// Fenêtre RoboBob : état (etat.rs), dessin (vue.rs), boucle eframe ici.

pub mod etat;
pub mod vue;

pub use etat::AppRobo;

use eframe::egui;

impl eframe::App for AppRobo {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Échap vide la question, comme "C"
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
