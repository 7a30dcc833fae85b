// src/noyau/expr.rs
//
// AST exact (sans flottants).
// - Literal : rationnel exact, toujours >= 0 à la sortie du parseur
// - Negate  : moins unaire
// - Binary  : + - * /
//
// Arbre strict : chaque nœud possède ses enfants (Box), aucun partage.

use num_rational::BigRational;

use std::fmt;

use super::format::{format_number, DIGITS_DEFAUT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbole(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Literal(BigRational),
    Negate(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn negate(e: Expr) -> Expr {
        Expr::Negate(Box::new(e))
    }

    pub fn binary(op: BinOp, a: Expr, b: Expr) -> Expr {
        Expr::Binary(op, Box::new(a), Box::new(b))
    }
}

/// Forme totalement parenthésée : "5 + 3 * 2" -> "(5 + (3 * 2))".
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(r) => f.write_str(&format_number(r, DIGITS_DEFAUT)),
            Expr::Negate(x) => write!(f, "(-{x})"),
            Expr::Binary(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
        }
    }
}
