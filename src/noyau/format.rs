// src/noyau/format.rs
//
// Rationnel exact -> texte décimal.
// - entier            : "4", "-2" (jamais "4.0")
// - décimal fini      : exact ("2.5", "0.3"), dénominateur = 2^a * 5^b
// - décimal infini    : tronqué à `digits` chiffres ("0.33333333333333333333")

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Chiffres après la virgule pour un décimal infini.
pub const DIGITS_DEFAUT: usize = 20;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const DIGITS_MAX: usize = 200;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier positif “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(scaled: &BigInt, digits: usize) -> String {
    let scale = pow10(digits);
    let int_part = scaled / &scale;
    let frac_part = scaled % &scale;

    if digits == 0 {
        return format!("{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }
    format!("{int_part}.{frac}")
}

/// Nombre de chiffres après la virgule si d = 2^a * 5^b (alors max(a, b)), sinon None.
fn chiffres_si_fini(d: &BigInt) -> Option<usize> {
    let deux = BigInt::from(2);
    let cinq = BigInt::from(5);

    let mut reste = d.clone();
    let mut a = 0usize;
    while (&reste % &deux).is_zero() {
        reste /= &deux;
        a += 1;
    }
    let mut b = 0usize;
    while (&reste % &cinq).is_zero() {
        reste /= &cinq;
        b += 1;
    }

    reste.is_one().then_some(a.max(b))
}

/// Affiche un résultat d’évaluation.
pub fn format_number(r: &BigRational, digits: usize) -> String {
    if r.is_integer() {
        return format!("{}", r.numer());
    }

    let abs = r.abs();
    let n = chiffres_si_fini(abs.denom()).unwrap_or(digits.min(DIGITS_MAX));

    // troncature (pas d’arrondi) : floor(|r| * 10^n)
    let scaled = (abs.numer() * pow10(n)) / abs.denom();
    let mut s = scaled_to_decimal(&scaled, n);

    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }

    if r.is_negative() && s != "0" {
        s.insert(0, '-');
    }
    s
}
