//! Noyau — évaluation exacte de l’arbre.
//!
//! Parcours récursif (gauche puis droite). Pas de flottants : BigRational partout,
//! donc jamais d’infini ni de NaN.
//!
//! BigRational n’a pas de borne naturelle : on en fixe une (MAX_BITS) sur le
//! numérateur et le dénominateur de chaque résultat intermédiaire.

use num_rational::BigRational;
use num_traits::Zero;
use thiserror::Error;

use super::expr::{BinOp, Expr};

/// Taille maximale (en bits) d’un numérateur ou dénominateur.
pub const MAX_BITS: u64 = 4096;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division par zéro")]
    DivisionByZero,

    #[error("dépassement de capacité (plus de {} bits)", MAX_BITS)]
    Overflow,
}

pub fn evaluate(expr: &Expr) -> Result<BigRational, EvalError> {
    let v = match expr {
        Expr::Literal(r) => r.clone(),

        Expr::Negate(x) => -evaluate(x)?,

        Expr::Binary(op, a, b) => {
            let l = evaluate(a)?;
            let r = evaluate(b)?;
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => {
                    if r.is_zero() {
                        return Err(EvalError::DivisionByZero);
                    }
                    l / r
                }
            }
        }
    };

    borne(v)
}

fn borne(v: BigRational) -> Result<BigRational, EvalError> {
    if v.numer().bits() > MAX_BITS || v.denom().bits() > MAX_BITS {
        return Err(EvalError::Overflow);
    }
    Ok(v)
}
