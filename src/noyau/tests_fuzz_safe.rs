//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - chaque expression générée vient avec sa valeur attendue (calculée à part)
//! - invariant clé : jamais de panique, seules les erreurs typées attendues

use std::sync::Arc;
use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::eval::{evaluate, EvalError};
use super::format::{format_number, DIGITS_DEFAUT};
use super::jetons::tokenize;
use super::syntaxe::parse;
use super::{ArithmeticError, ResolutionError, Resolver};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn aucune_table(_: &str) -> Option<String> {
    None
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Valeur attendue : None si une division par zéro apparaît quelque part.
type Attendu = Option<BigRational>;

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn gen_nombre(rng: &mut Rng) -> (String, Attendu) {
    // inclut 0 (utile pour les divisions par zéro)
    let n = rng.pick(10) as i64;
    if rng.coin() {
        // décimal à un chiffre : n.k
        let k = rng.pick(10) as i64;
        (format!("{n}.{k}"), Some(rat(n * 10 + k, 10)))
    } else {
        (format!("{n}"), Some(rat(n, 1)))
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(7) {
        0 => gen_nombre(rng),
        1 => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!("-{s}"), v.map(|x| -x))
        }
        2 => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!("({s})"), v)
        }
        k => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            let (op, v) = match k {
                3 => ('+', va.zip(vb).map(|(x, y)| x + y)),
                4 => ('-', va.zip(vb).map(|(x, y)| x - y)),
                5 => ('*', va.zip(vb).map(|(x, y)| x * y)),
                _ => (
                    '/',
                    va.zip(vb)
                        .and_then(|(x, y)| if y.is_zero() { None } else { Some(x / y) }),
                ),
            };
            // parenthèses systématiques : la valeur attendue ne dépend pas de la précédence
            (format!("({a} {op} {b})"), v)
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_valeurs_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let r = Resolver::new(Arc::new(aucune_table));

    let mut seen_ok = 0usize;
    let mut seen_div0 = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);

        let premier = r.resolve(&expr);
        assert_eq!(premier, r.resolve(&expr), "non déterministe: {expr:?}");

        match (attendu, premier) {
            (Some(v), Ok(s)) => {
                assert_eq!(s, format_number(&v, DIGITS_DEFAUT), "expr={expr:?}");
                seen_ok += 1;
            }
            (None, Err(ResolutionError::Arithmetic(ArithmeticError::Eval(
                EvalError::DivisionByZero,
            )))) => seen_div0 += 1,
            (a, p) => panic!("expr={expr:?} attendu={a:?} obtenu={p:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_div0 > 0, "aucune division par zéro vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_valeur_exacte_sans_formatage() {
    let mut rng = Rng::new(42);
    for _ in 0..200 {
        let (expr, attendu) = gen_expr(&mut rng, 4);
        let j = tokenize(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        let arbre = parse(&j).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert_eq!(evaluate(&arbre).ok(), attendu, "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    // Texte aléatoire dans l’alphabet du filtre : erreurs typées OK, panique interdite.
    const ALPHABET: &[u8] = b"0123456789.+-*/() ";

    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE);
    let r = Resolver::new(Arc::new(aucune_table));

    for _ in 0..2000 {
        budget(t0, max);

        let len = 1 + rng.pick(40) as usize;
        let s: String = (0..len)
            .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize] as char)
            .collect();

        match r.resolve(&s) {
            Ok(_) => {}
            Err(ResolutionError::Arithmetic(_))
            | Err(ResolutionError::NotFound(_))
            | Err(ResolutionError::EmptyInput) => {}
            Err(e) => panic!("erreur non attendue: s={s:?} err={e}"),
        }
    }
}

#[test]
fn fuzz_safe_longue_somme_bornee() {
    // 1 + 1 + ... : arbre penché à gauche, hauteur = nombre de '+' (< HAUTEUR_MAX)
    let r = Resolver::new(Arc::new(aucune_table));

    let n = 500;
    let s = vec!["1"; n].join("+");
    assert!(s.len() <= 1024);
    assert_eq!(r.resolve(&s), Ok(n.to_string()));
}
