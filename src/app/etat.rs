//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la fenêtre (entrée, réponse, erreur, démarche, historique)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune résolution ici : la vue appelle le noyau puis dépose le résultat.
//! - Actions déterministes, sans effet de bord caché.
//! - Historique borné (HISTORIQUE_MAX).

use std::sync::Arc;

use robobob::noyau::{Demarche, Resolver};

/// Garde-fou : nombre d’échanges conservés.
const HISTORIQUE_MAX: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Echange {
    pub question: String,
    /// Ok(réponse) ou Err(message d’erreur)
    pub reponse: Result<String, String>,
}

pub struct AppRobo {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub reponse: String,
    pub erreur: String,

    // --- démarche (calculs seulement) ---
    pub demarche: Option<Demarche>,

    // --- historique (plus récent en dernier) ---
    pub historique: Vec<Echange>,

    // --- table (lecture seule, pour le panneau “questions connues”) ---
    pub questions_connues: Vec<String>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,

    pub(crate) resolver: Arc<Resolver>,
}

impl AppRobo {
    pub fn new(resolver: Arc<Resolver>, questions_connues: Vec<String>) -> Self {
        Self {
            entree: String::new(),
            reponse: String::new(),
            erreur: String::new(),
            demarche: None,
            historique: Vec::new(),
            questions_connues,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            resolver,
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + historique).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.historique.clear();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer réponse + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.reponse.clear();
        self.erreur.clear();
        self.demarche = None;
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `reponse` (dernière réponse) pour ne pas “effacer l’écran” sur une faute.
    /// - On coupe la démarche (non fiable si la résolution échoue).
    pub fn set_erreur(&mut self, question: &str, msg: impl Into<String>) {
        let msg = msg.into();
        self.erreur = msg.clone();
        self.demarche = None;
        self.push_historique(question, Err(msg));
        self.focus_entree = true;
    }

    /// Utilitaire : déposer une réponse (+ démarche si c’était un calcul).
    pub fn set_reponse(
        &mut self,
        question: &str,
        reponse: impl Into<String>,
        demarche: Option<Demarche>,
    ) {
        let reponse = reponse.into();
        self.erreur.clear();
        self.reponse = reponse.clone();
        self.demarche = demarche;
        self.push_historique(question, Ok(reponse));
        self.focus_entree = true;
    }

    fn push_historique(&mut self, question: &str, reponse: Result<String, String>) {
        self.historique.push(Echange {
            question: question.to_string(),
            reponse,
        });
        if self.historique.len() > HISTORIQUE_MAX {
            let trop = self.historique.len() - HISTORIQUE_MAX;
            self.historique.drain(..trop);
        }
    }
}
