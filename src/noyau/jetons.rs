// src/noyau/jetons.rs
//
// Lexer : texte brut -> suite de jetons.
// - un seul passage, un caractère d’avance
// - nombres toujours positifs (le signe passe par le parseur)
// - la suite se termine TOUJOURS par un unique Tok::End

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use thiserror::Error;

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(BigRational),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,

    End,
}

/// Jeton + position (index de caractère dans l’entrée).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("caractère inattendu '{0}' en position {1}")]
    UnexpectedCharacter(char, usize),

    #[error("nombre mal formé '{text}' en position {position}")]
    MalformedNumber { text: String, position: usize },
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(r) => write!(f, "{}", format_litteral(r)),
            Tok::Plus => f.write_str("'+'"),
            Tok::Minus => f.write_str("'-'"),
            Tok::Star => f.write_str("'*'"),
            Tok::Slash => f.write_str("'/'"),
            Tok::LPar => f.write_str("'('"),
            Tok::RPar => f.write_str("')'"),
            Tok::End => f.write_str("fin d’entrée"),
        }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12)
/// - décimaux (ex: 2.5) -> Num(5/2), converti exactement
/// - opérateurs + - * /
/// - parenthèses ( )
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, LexError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(Jeton { tok, pos: i });
            i += 1;
            continue;
        }

        // Nombre : commence par un chiffre, puis la plus longue suite [0-9.] ; forme validée ensuite.
        // Un '.' isolé (".5") n’ouvre pas de nombre : caractère inattendu.
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            let valeur = lire_nombre(&texte).ok_or(LexError::MalformedNumber {
                text: texte.clone(),
                position: start,
            })?;
            out.push(Jeton {
                tok: Tok::Num(valeur),
                pos: start,
            });
            continue;
        }

        return Err(LexError::UnexpectedCharacter(c, i));
    }

    out.push(Jeton {
        tok: Tok::End,
        pos: chars.len(),
    });
    Ok(out)
}

/// "12" ou "12.05" -> rationnel exact. Toute autre forme ("1.", "1.2.3", "1..2") -> None.
fn lire_nombre(texte: &str) -> Option<BigRational> {
    let (ent, frac) = match texte.split_once('.') {
        None => (texte, ""),
        Some((e, f)) => {
            if f.is_empty() || f.contains('.') {
                return None;
            }
            (e, f)
        }
    };

    // 12.05 -> 1205 / 10^2
    let chiffres = format!("{ent}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
    let d = BigInt::from(10).pow(frac.len() as u32);
    Some(BigRational::new(n, d))
}

fn format_litteral(r: &BigRational) -> String {
    if r.denom().is_one() {
        format!("{}", r.numer())
    } else {
        super::format::format_number(r, super::format::DIGITS_DEFAUT)
    }
}

/// Format utilitaire (démarche) : liste de jetons en texte, sans le jeton de fin.
pub fn format_tokens(tokens: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in tokens {
        let s = match &j.tok {
            Tok::Num(r) => format_litteral(r),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),

            Tok::End => continue,
        };
        out.push(s);
    }
    out.join(" ")
}
