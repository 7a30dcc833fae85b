//! Noyau — résolution d’une question.
//!
//! trim -> vide ? -> table (clé en minuscules) -> détection -> trop long ?
//!      -> jetons -> arbre -> évaluation -> texte
//!
//! La table gagne toujours, même si la question ressemble à un calcul,
//! et quelle que soit sa longueur : la borne de longueur ne vise que le calcul.
//! Aucun état entre deux appels : un `Resolver` se partage entre threads tel quel.
//! Le noyau ne journalise rien : il rend des erreurs typées, l’appelant décide.

use std::collections::HashMap;
use std::sync::Arc;

use num_rational::BigRational;
use thiserror::Error;

use super::detection::is_candidate_expression;
use super::eval::{evaluate, EvalError};
use super::format::{format_number, DIGITS_DEFAUT, DIGITS_MAX};
use super::jetons::{format_tokens, tokenize, LexError};
use super::syntaxe::{parse_limite, ParseError, HAUTEUR_MAX, PROFONDEUR_MAX};

/// Longueur maximale (en caractères) d’une expression, par défaut.
pub const LONGUEUR_MAX: usize = 1024;

/// Plafond de toute limite de longueur configurée.
pub const LONGUEUR_PLAFOND: usize = 64 * 1024;

/// Capacité de recherche externe : clé déjà normalisée (trim + minuscules).
pub trait Lookup: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl Lookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("lecture : {0}")]
    Lex(#[from] LexError),

    #[error("syntaxe : {0}")]
    Parse(#[from] ParseError),

    #[error("calcul : {0}")]
    Eval(#[from] EvalError),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("question vide")]
    EmptyInput,

    #[error("question trop longue ({len} caractères, maximum {max})")]
    InputTooLong { len: usize, max: usize },

    #[error("la question '{0}' est introuvable")]
    NotFound(String),

    #[error("erreur dans l’expression : {0}")]
    Arithmetic(#[from] ArithmeticError),
}

/// Garde-fous de résolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limites {
    pub profondeur_max: usize,
    pub longueur_max: usize,
    pub digits: usize,
}

impl Default for Limites {
    fn default() -> Self {
        Self {
            profondeur_max: PROFONDEUR_MAX,
            longueur_max: LONGUEUR_MAX,
            digits: DIGITS_DEFAUT,
        }
    }
}

/// Démarche d’un calcul (panneau d’explication).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
}

pub struct Resolver {
    table: Arc<dyn Lookup>,
    limites: Limites,
}

impl Resolver {
    pub fn new(table: Arc<dyn Lookup>) -> Self {
        Self::with_limits(table, Limites::default())
    }

    pub fn with_limits(table: Arc<dyn Lookup>, limites: Limites) -> Self {
        let limites = Limites {
            profondeur_max: limites.profondeur_max.min(HAUTEUR_MAX),
            longueur_max: limites.longueur_max.min(LONGUEUR_PLAFOND),
            digits: limites.digits.min(DIGITS_MAX),
        };
        Self { table, limites }
    }

    pub fn limites(&self) -> Limites {
        self.limites
    }

    /// Point d’entrée unique : question libre -> réponse.
    pub fn resolve(&self, question: &str) -> Result<String, ResolutionError> {
        resolve_avec(question, self.table.as_ref(), &self.limites)
    }

    /// Jetons + arbre d’un calcul, sans l’évaluer. Mêmes bornes que `resolve`.
    pub fn explain(&self, expression: &str) -> Result<Demarche, ResolutionError> {
        let s = expression.trim();
        verifie_longueur(s, &self.limites)?;
        let jetons = tokenize(s).map_err(ArithmeticError::from)?;
        let arbre =
            parse_limite(&jetons, self.limites.profondeur_max).map_err(ArithmeticError::from)?;
        Ok(Demarche {
            jetons: format_tokens(&jetons),
            arbre: arbre.to_string(),
        })
    }
}

/// Variante fonctionnelle avec les limites par défaut.
pub fn resolve(question: &str, lookup: &dyn Lookup) -> Result<String, ResolutionError> {
    resolve_avec(question, lookup, &Limites::default())
}

fn resolve_avec(
    question: &str,
    lookup: &dyn Lookup,
    limites: &Limites,
) -> Result<String, ResolutionError> {
    let s = question.trim();
    if s.is_empty() {
        return Err(ResolutionError::EmptyInput);
    }

    if let Some(reponse) = lookup.lookup(&s.to_lowercase()) {
        return Ok(reponse);
    }

    if !is_candidate_expression(s) {
        return Err(ResolutionError::NotFound(s.to_string()));
    }

    verifie_longueur(s, limites)?;
    let v = calcule(s, limites.profondeur_max)?;
    Ok(format_number(&v, limites.digits))
}

fn verifie_longueur(s: &str, limites: &Limites) -> Result<(), ResolutionError> {
    let len = s.chars().count();
    if len > limites.longueur_max {
        return Err(ResolutionError::InputTooLong {
            len,
            max: limites.longueur_max,
        });
    }
    Ok(())
}

fn calcule(s: &str, profondeur_max: usize) -> Result<BigRational, ArithmeticError> {
    let jetons = tokenize(s)?;
    let arbre = parse_limite(&jetons, profondeur_max)?;
    Ok(evaluate(&arbre)?)
}
