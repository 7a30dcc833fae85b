// src/main.rs
//
// RoboBob — point d’entrée NATIF + WEB (WASM)
// -------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : env_logger + robobob.toml + eframe::run_native
// - WEB  (wasm32)              : table embarquée + config par défaut + eframe::WebRunner
//
// Côté WEB (WASM) : ton index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// La table des questions est chargée UNE fois ici, puis partagée en lecture seule (Arc).

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use std::sync::Arc;

use eframe::egui;

use robobob::config::Config;
use robobob::noyau::Resolver;
use robobob::questions::QuestionTable;

mod app;

use app::AppRobo;

/// Titre unique (natif + web).
const TITRE_APP: &str = "RoboBob";

/// Construit l’état de l’app à partir d’une table déjà chargée.
fn preparer_app(config: &Config, table: QuestionTable) -> AppRobo {
    let questions = table.questions();
    let resolver = Resolver::with_limits(Arc::new(table), config.limites());
    AppRobo::new(Arc::new(resolver), questions)
}

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Config ou table illisible : erreur côté serveur, on ne démarre pas.
    let config = match Config::charger_active() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    let table = match config.table() {
        Ok(t) => t,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let app = preparer_app(&config, table);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([520.0, 740.0])
            .with_min_inner_size([420.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(TITRE_APP, options, Box::new(move |_cc| Ok(Box::new(app))))
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{preparer_app, Config, QuestionTable, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus (pas de fichier : table embarquée)
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let config = Config::default();
        let app = preparer_app(&config, QuestionTable::integree());

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |_cc| Ok(Box::new(app))),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
