// src/questions.rs
//
// Table des questions connues (question=réponse, une par ligne).
//
// Contrats:
// - chargée UNE fois au démarrage, jamais modifiée ensuite (partage via Arc)
// - clé = question trim + minuscules ; réponse = trim
// - ligne sans exactement un '=' : ignorée (warn), ligne vide : ignorée
// - doublon : la dernière ligne gagne (warn)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::noyau::Lookup;

/// Table embarquée (utilisée si la config ne donne pas de fichier, et toujours en wasm).
pub const TABLE_INTEGREE: &str = include_str!("../data/questions.txt");

#[derive(Debug, Error)]
pub enum TableError {
    #[error("impossible de lire la table des questions '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionTable {
    entrees: HashMap<String, String>,
}

impl QuestionTable {
    /// Parse le contenu texte d’une table.
    pub fn parse(contenu: &str) -> Self {
        let mut entrees = HashMap::new();

        for (num, ligne) in contenu.lines().enumerate() {
            if ligne.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = ligne.split('=').collect();
            if parts.len() != 2 {
                warn!(
                    "ligne {} ignorée (format question=réponse attendu) : '{}'",
                    num + 1,
                    ligne
                );
                continue;
            }

            let question = parts[0].trim().to_lowercase();
            let reponse = parts[1].trim().to_string();
            debug!("question chargée : '{question}' = '{reponse}'");

            if let Some(ancienne) = entrees.insert(question.clone(), reponse) {
                warn!("question '{question}' en double, '{ancienne}' remplacée");
            }
        }

        Self { entrees }
    }

    pub fn integree() -> Self {
        info!("chargement de la table embarquée");
        let t = Self::parse(TABLE_INTEGREE);
        info!("{} question(s) chargée(s)", t.len());
        t
    }

    pub fn charger(path: &Path) -> Result<Self, TableError> {
        info!("chargement de la table '{}'", path.display());
        let contenu = fs::read_to_string(path).map_err(|source| TableError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let t = Self::parse(&contenu);
        info!("{} question(s) chargée(s)", t.len());
        Ok(t)
    }

    /// Réponse pour une question (insensible à la casse et aux espaces autour).
    pub fn answer(&self, question: &str) -> Option<&str> {
        self.entrees
            .get(&question.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Questions connues, triées (clés normalisées).
    pub fn questions(&self) -> Vec<String> {
        let mut qs: Vec<String> = self.entrees.keys().cloned().collect();
        qs.sort();
        qs
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }
}

impl Lookup for QuestionTable {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entrees.get(key).cloned()
    }
}
