//! RoboBob : questions connues + calcul exact.
//!
//! - noyau     : détection, jetons, syntaxe, évaluation, résolution (pur, sans I/O)
//! - questions : table question=réponse (chargée une fois, lecture seule ensuite)
//! - config    : robobob.toml

pub mod config;
pub mod noyau;
pub mod questions;

pub use noyau::{resolve, Lookup, ResolutionError, Resolver};
