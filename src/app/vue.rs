// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppRobo (etat.rs) pour natif + wasm
// - Clavier : Enter demande (quand le champ est focus)
// - Tactile : pavé + opérateurs, focus redonné après clic (focus_entree)
// - Questions connues cliquables
//
// Journalisation ici (et pas dans le noyau) : une ligne par question traitée.

use eframe::egui;
use log::{error, info, warn};

use robobob::noyau::{ArithmeticError, ResolutionError};

use super::etat::AppRobo;

impl AppRobo {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("RoboBob");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_reponse(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
                self.ui_questions_connues(ui);
                self.ui_historique(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Question :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: What is your name, (5 + 3) * 2, 0.1 + 0.2")
                .id_source("entree_edit"),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter demande (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.demander_via_noyau();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement la question", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface réponse + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
            self.bouton_action(ui, "DEL", "Efface le dernier caractère", Action::Backspace);

            ui.add_space(10.0);

            let demander = ui.add_sized([96.0, 30.0], egui::Button::new("Demander"));
            if demander.clicked() {
                self.demander_via_noyau();
                self.focus_entree = true;
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_robobob")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", InsertKind::Digit);
                self.bouton_insert(ui, "/", InsertKind::Op);
                self.bouton_insert(ui, "(", InsertKind::OpenParen);
                ui.end_row();

                self.bouton_insert(ui, "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", InsertKind::Digit);
                self.bouton_insert(ui, "*", InsertKind::Op);
                self.bouton_insert(ui, ")", InsertKind::CloseParen);
                ui.end_row();

                self.bouton_insert(ui, "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", InsertKind::Digit);
                self.bouton_insert(ui, "-", InsertKind::Op);
                ui.label("");
                ui.end_row();

                self.bouton_insert(ui, "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", InsertKind::Digit);
                ui.label("");
                self.bouton_insert(ui, "+", InsertKind::Op);
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_reponse(&mut self, ui: &mut egui::Ui) {
        ui.label("Réponse :");
        Self::champ_monospace(ui, "reponse_out", &self.reponse, 2);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| match &self.demarche {
                Some(d) => {
                    Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                    Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
                }
                None => {
                    ui.monospace("indisponible");
                }
            });
    }

    fn ui_questions_connues(&mut self, ui: &mut egui::Ui) {
        let mut choisie: Option<String> = None;

        egui::CollapsingHeader::new(format!(
            "Questions connues ({})",
            self.questions_connues.len()
        ))
        .default_open(false)
        .show(ui, |ui| {
            for q in &self.questions_connues {
                if ui.button(q).clicked() {
                    choisie = Some(q.clone());
                }
            }
        });

        if let Some(q) = choisie {
            self.entree = q;
            self.demander_via_noyau();
            self.focus_entree = true;
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique")
            .default_open(false)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.monospace("vide");
                    return;
                }
                for e in self.historique.iter().rev() {
                    match &e.reponse {
                        Ok(r) => {
                            ui.monospace(format!("{} → {}", e.question, r));
                        }
                        Err(msg) => {
                            ui.colored_label(
                                ui.visuals().error_fg_color,
                                format!("{} → {}", e.question, msg),
                            );
                        }
                    }
                }
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => {
                    self.entree.pop();
                }
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, texte: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(texte));
        if !resp.clicked() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(texte);
            }
            InsertKind::OpenParen => {
                let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                if let Some(c) = last {
                    if c.is_ascii_digit() || c == ')' {
                        self.entree.push(' ');
                    }
                }
                self.entree.push_str(texte);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(texte);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                // chiffres: pas d’espaces auto
                self.entree.push_str(texte);
            }
        }

        self.focus_entree = true;
    }

    /// Résout la question via le noyau, puis dépose réponse/erreur/démarche dans l’état UI.
    fn demander_via_noyau(&mut self) {
        let question = self.entree.trim().to_string();
        info!("question reçue : '{question}'");

        match self.resolver.resolve(&question) {
            Ok(reponse) => {
                info!("réponse : '{reponse}'");
                // démarche seulement si c’est un calcul (la table ne se démontre pas)
                let demarche = if robobob::noyau::detection::is_candidate_expression(&question)
                {
                    self.resolver.explain(&question).ok()
                } else {
                    None
                };
                self.set_reponse(&question, reponse, demarche);
            }
            Err(e) => {
                match &e {
                    ResolutionError::NotFound(_) | ResolutionError::EmptyInput => {
                        warn!("{e}")
                    }
                    ResolutionError::InputTooLong { .. } => warn!("{e}"),
                    ResolutionError::Arithmetic(ArithmeticError::Eval(_)) => {
                        error!("calcul impossible pour '{question}' : {e}")
                    }
                    ResolutionError::Arithmetic(_) => {
                        error!("expression invalide '{question}' : {e}")
                    }
                }
                self.set_erreur(&question, e.to_string());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Op,
    OpenParen,
    CloseParen,
}
