// src/noyau/syntaxe.rs
//
// Descente récursive -> Expr
//
// Grammaire:
//   expression := term (('+' | '-') term)*
//   term       := factor (('*' | '/') factor)*
//   factor     := '-' factor | '(' expression ')' | NUMBER
//
// Règles:
// - associativité à gauche à chaque niveau
// - moins unaire plus fort que * et /
// - aucune évaluation ici : "1/0" est syntaxiquement valide
// - chaque '(' et chaque '-' unaire ouvre un niveau ; au-delà de la limite => TooDeeplyNested
// - hauteur de l’arbre (chaînes "1+1+...+1" comprises) bornée par HAUTEUR_MAX :
//   evaluate, Display et Drop récursent sur cette hauteur

use thiserror::Error;

use super::expr::{BinOp, Expr};
use super::jetons::{Jeton, Tok};

/// Profondeur d’imbrication par défaut.
pub const PROFONDEUR_MAX: usize = 64;

/// Hauteur maximale de l’arbre, et plafond de toute limite d’imbrication.
pub const HAUTEUR_MAX: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{found} inattendu en position {position} (attendu : {expected})")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        position: usize,
    },

    #[error("expression vide")]
    EmptyExpression,

    #[error("expression trop imbriquée en position {position} (limite : {limit})")]
    TooDeeplyNested { limit: usize, position: usize },
}

/// Parse avec la limite d’imbrication par défaut.
pub fn parse(jetons: &[Jeton]) -> Result<Expr, ParseError> {
    parse_limite(jetons, PROFONDEUR_MAX)
}

/// Limite plafonnée à `HAUTEUR_MAX`.
pub fn parse_limite(jetons: &[Jeton], profondeur_max: usize) -> Result<Expr, ParseError> {
    let mut p = Parseur::new(jetons, profondeur_max.min(HAUTEUR_MAX));

    if p.peek().tok == Tok::End {
        return Err(ParseError::EmptyExpression);
    }

    let (e, _) = p.expression()?;

    let reste = p.peek();
    if reste.tok != Tok::End {
        return Err(p.inattendu(&reste, "opérateur ou fin d’entrée"));
    }
    Ok(e)
}

/// Sous-arbre et sa hauteur (une feuille vaut 0).
type Noeud = (Expr, usize);

struct Parseur<'a> {
    jetons: &'a [Jeton],
    i: usize,
    profondeur: usize,
    profondeur_max: usize,
    // sentinelle si la suite n’a pas de End (appel direct hors tokenize)
    fin: Jeton,
}

impl<'a> Parseur<'a> {
    fn new(jetons: &'a [Jeton], profondeur_max: usize) -> Self {
        let pos_fin = jetons.last().map_or(0, |j| j.pos);
        Self {
            jetons,
            i: 0,
            profondeur: 0,
            profondeur_max,
            fin: Jeton {
                tok: Tok::End,
                pos: pos_fin,
            },
        }
    }

    fn peek(&self) -> Jeton {
        self.jetons
            .get(self.i)
            .cloned()
            .unwrap_or_else(|| self.fin.clone())
    }

    fn avance(&mut self) {
        if self.i < self.jetons.len() {
            self.i += 1;
        }
    }

    fn inattendu(&self, j: &Jeton, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            found: j.tok.to_string(),
            expected,
            position: j.pos,
        }
    }

    fn entre(&mut self, pos: usize) -> Result<(), ParseError> {
        if self.profondeur >= self.profondeur_max {
            return Err(ParseError::TooDeeplyNested {
                limit: self.profondeur_max,
                position: pos,
            });
        }
        self.profondeur += 1;
        Ok(())
    }

    fn sort(&mut self) {
        self.profondeur -= 1;
    }

    fn monte(&self, hauteur: usize, pos: usize) -> Result<usize, ParseError> {
        if hauteur > HAUTEUR_MAX {
            return Err(ParseError::TooDeeplyNested {
                limit: HAUTEUR_MAX,
                position: pos,
            });
        }
        Ok(hauteur)
    }

    fn expression(&mut self) -> Result<Noeud, ParseError> {
        let (mut gauche, mut h) = self.term()?;
        loop {
            let j = self.peek();
            let op = match j.tok {
                Tok::Plus => BinOp::Add,
                Tok::Minus => BinOp::Sub,
                _ => return Ok((gauche, h)),
            };
            self.avance();
            let (droite, hd) = self.term()?;
            h = self.monte(h.max(hd) + 1, j.pos)?;
            gauche = Expr::binary(op, gauche, droite);
        }
    }

    fn term(&mut self) -> Result<Noeud, ParseError> {
        let (mut gauche, mut h) = self.factor()?;
        loop {
            let j = self.peek();
            let op = match j.tok {
                Tok::Star => BinOp::Mul,
                Tok::Slash => BinOp::Div,
                _ => return Ok((gauche, h)),
            };
            self.avance();
            let (droite, hd) = self.factor()?;
            h = self.monte(h.max(hd) + 1, j.pos)?;
            gauche = Expr::binary(op, gauche, droite);
        }
    }

    fn factor(&mut self) -> Result<Noeud, ParseError> {
        let j = self.peek();
        match &j.tok {
            Tok::Minus => {
                self.avance();
                self.entre(j.pos)?;
                let x = self.factor();
                self.sort();
                let (x, h) = x?;
                Ok((Expr::negate(x), self.monte(h + 1, j.pos)?))
            }
            Tok::LPar => {
                self.avance();
                self.entre(j.pos)?;
                let x = self.expression();
                self.sort();
                let x = x?;

                let fermante = self.peek();
                if fermante.tok != Tok::RPar {
                    return Err(self.inattendu(&fermante, "')'"));
                }
                self.avance();
                Ok(x)
            }
            Tok::Num(v) => {
                self.avance();
                Ok((Expr::Literal(v.clone()), 0))
            }
            _ => Err(self.inattendu(&j, "nombre, '-' ou '('")),
        }
    }
}
