//! Noyau RoboBob
//!
//! Organisation interne :
//! - detection.rs  : filtre rapide “ressemble à un calcul ?”
//! - jetons.rs     : tokenisation (nombres exacts, + - * / ( ))
//! - syntaxe.rs    : descente récursive + limite d’imbrication
//! - expr.rs       : AST exact
//! - eval.rs       : évaluation (division par zéro, dépassement)
//! - format.rs     : affichage décimal (entier / fini exact / infini tronqué)
//! - resolution.rs : table d’abord, calcul ensuite

pub mod detection;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod resolution;
pub mod syntaxe;

#[cfg(test)]
mod tests_resolution;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use resolution::{
    resolve, ArithmeticError, Demarche, Limites, Lookup, ResolutionError, Resolver,
};
