// src/config.rs
//
// Configuration (robobob.toml). Tous les champs ont une valeur par défaut.
//
// Emplacement :
// - variable ROBOBOB_CONFIG si définie
// - sinon ./robobob.toml s’il existe
// - sinon valeurs par défaut
//
// Exemple :
//   questions_path = "data/questions.txt"
//   max_depth = 64
//   max_input_len = 1024
//   digits = 20

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::noyau::format::{DIGITS_DEFAUT, DIGITS_MAX};
use crate::noyau::resolution::{LONGUEUR_MAX, LONGUEUR_PLAFOND};
use crate::noyau::syntaxe::{HAUTEUR_MAX, PROFONDEUR_MAX};
use crate::noyau::Limites;
use crate::questions::{QuestionTable, TableError};

pub const VAR_CONFIG: &str = "ROBOBOB_CONFIG";
pub const FICHIER_CONFIG: &str = "robobob.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("impossible de lire la configuration '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration invalide : {0}")]
    Invalid(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Table externe ; absente => table embarquée.
    pub questions_path: Option<PathBuf>,
    pub max_depth: usize,
    pub max_input_len: usize,
    pub digits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_path: None,
            max_depth: PROFONDEUR_MAX,
            max_input_len: LONGUEUR_MAX,
            digits: DIGITS_DEFAUT,
        }
    }
}

impl Config {
    pub fn from_toml(texte: &str) -> Result<Self, ConfigError> {
        let mut c: Config = toml::from_str(texte)?;
        c.max_depth = c.max_depth.min(HAUTEUR_MAX);
        c.max_input_len = c.max_input_len.min(LONGUEUR_PLAFOND);
        c.digits = c.digits.min(DIGITS_MAX);
        Ok(c)
    }

    pub fn charger(path: &Path) -> Result<Self, ConfigError> {
        let texte = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&texte)
    }

    /// Config active : ROBOBOB_CONFIG, puis ./robobob.toml, puis défauts.
    pub fn charger_active() -> Result<Self, ConfigError> {
        if let Ok(p) = std::env::var(VAR_CONFIG) {
            info!("configuration : {p} (via {VAR_CONFIG})");
            return Self::charger(Path::new(&p));
        }

        let local = Path::new(FICHIER_CONFIG);
        if local.is_file() {
            info!("configuration : {}", local.display());
            return Self::charger(local);
        }

        info!("configuration par défaut");
        Ok(Self::default())
    }

    pub fn limites(&self) -> Limites {
        Limites {
            profondeur_max: self.max_depth,
            longueur_max: self.max_input_len,
            digits: self.digits,
        }
    }

    /// Charge la table désignée (ou la table embarquée).
    pub fn table(&self) -> Result<QuestionTable, TableError> {
        match &self.questions_path {
            Some(p) => QuestionTable::charger(p),
            None => Ok(QuestionTable::integree()),
        }
    }
}
