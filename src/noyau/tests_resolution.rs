//! Tests de résolution (campagne) : table d’abord, calcul ensuite.
//!
//! Table de test = table d’origine de RoboBob (3 questions).
//! On vérifie les variantes d’erreur, jamais le texte des messages.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use super::eval::EvalError;
use super::jetons::LexError;
use super::resolution::LONGUEUR_MAX;
use super::syntaxe::{ParseError, HAUTEUR_MAX, PROFONDEUR_MAX};
use super::{ArithmeticError, Limites, Lookup, ResolutionError, Resolver};

fn table() -> HashMap<String, String> {
    [
        ("what is your name", "RoboBob"),
        ("what do you do", "I help children learn math"),
        ("where are you from", "I am from the RoboWorld"),
    ]
    .into_iter()
    .map(|(q, r)| (q.to_string(), r.to_string()))
    .collect()
}

fn resolver() -> Resolver {
    Resolver::new(Arc::new(table()))
}

fn ok(question: &str) -> String {
    resolver()
        .resolve(question)
        .unwrap_or_else(|e| panic!("resolve({question:?}) erreur: {e}"))
}

fn err(question: &str) -> ResolutionError {
    match resolver().resolve(question) {
        Ok(r) => panic!("resolve({question:?}) devait échouer, obtenu {r:?}"),
        Err(e) => e,
    }
}

/* ------------------------ Table ------------------------ */

#[test]
fn questions_connues() {
    assert_eq!(ok("What is your name"), "RoboBob");
    assert_eq!(ok("What do you do"), "I help children learn math");
    assert_eq!(ok("Where are you from"), "I am from the RoboWorld");
}

#[test]
fn casse_et_espaces_ignores() {
    assert_eq!(ok("  What Is Your Name  "), ok("what is your name"));
    assert_eq!(ok("WHAT DO YOU DO"), "I help children learn math");
}

#[test]
fn la_table_gagne_sur_le_calcul() {
    let mut t = table();
    t.insert("2 + 2".into(), "cinq".into());
    t.insert("1 / 0".into(), "infini".into());
    let r = Resolver::new(Arc::new(t.clone()));

    for (q, attendu) in &t {
        assert_eq!(r.resolve(q).as_ref(), Ok(attendu), "question {q:?}");
    }
    assert_eq!(r.resolve("2 + 2"), Ok("cinq".into()));
    assert_eq!(r.resolve("1 / 0"), Ok("infini".into()));
}

#[test]
fn longue_question_de_la_table() {
    let longue = "a".repeat(1100);
    let mut t = table();
    t.insert(longue.clone(), "ok".into());
    let r = Resolver::new(Arc::new(t));

    assert!(longue.len() > LONGUEUR_MAX);
    assert_eq!(r.resolve(&longue), Ok("ok".into()));
    assert_eq!(r.resolve(&longue.to_uppercase()), Ok("ok".into()));
}

#[test]
fn question_inconnue() {
    assert_eq!(
        err("how old are you"),
        ResolutionError::NotFound("how old are you".into())
    );
    // texte d’origine conservé (trim seulement)
    assert_eq!(
        err("  Unknown question "),
        ResolutionError::NotFound("Unknown question".into())
    );
}

#[test]
fn entree_vide_politique_explicite() {
    assert_eq!(err(""), ResolutionError::EmptyInput);
    assert_eq!(err("    "), ResolutionError::EmptyInput);
}

/* ------------------------ Calcul ------------------------ */

#[test]
fn arithmetique() {
    assert_eq!(ok("2 + 2"), "4");
    assert_eq!(ok("3 * 4"), "12");
    assert_eq!(ok("5 + 3 * 2"), "11");
    assert_eq!(ok("(5 + 3) * 2"), "16");
    assert_eq!(ok("-4 + 2"), "-2");
}

#[test]
fn decimaux() {
    assert_eq!(ok("0.1 + 0.2"), "0.3");
    assert_eq!(ok("7 / 2"), "3.5");
    assert_eq!(ok("1.5 * 2"), "3");
    assert_eq!(ok("1 / 3"), "0.33333333333333333333");
    assert_eq!(ok("-1 / 8"), "-0.125");
}

#[test]
fn division_par_zero() {
    assert_eq!(
        err("1 / 0"),
        ResolutionError::Arithmetic(ArithmeticError::Eval(EvalError::DivisionByZero))
    );
    assert_eq!(
        err("5 / (3 - 3)"),
        ResolutionError::Arithmetic(ArithmeticError::Eval(EvalError::DivisionByZero))
    );
}

#[test]
fn depassement_de_capacite() {
    // 300 chiffres ~ 997 bits : 4 facteurs passent, 5 dépassent 4096 bits.
    // Sous 1024 caractères un produit de littéraux reste sous la borne : on élargit.
    let r = Resolver::with_limits(
        Arc::new(table()),
        Limites {
            longueur_max: 4096,
            ..Limites::default()
        },
    );
    let gros = "9".repeat(300);

    let quatre = vec![gros.as_str(); 4].join(" * ");
    assert!(r.resolve(&quatre).is_ok());

    let cinq = vec![gros.as_str(); 5].join(" * ");
    assert_eq!(
        r.resolve(&cinq),
        Err(ResolutionError::Arithmetic(ArithmeticError::Eval(
            EvalError::Overflow
        )))
    );
}

#[test]
fn expression_mal_formee() {
    assert!(matches!(
        err("2 + * 3"),
        ResolutionError::Arithmetic(ArithmeticError::Parse(ParseError::UnexpectedToken { .. }))
    ));
    assert!(matches!(
        err("2 + + 3"),
        ResolutionError::Arithmetic(ArithmeticError::Parse(ParseError::UnexpectedToken { .. }))
    ));
    assert!(matches!(
        err("(1 + 2"),
        ResolutionError::Arithmetic(ArithmeticError::Parse(ParseError::UnexpectedToken { .. }))
    ));
    assert_eq!(
        err("1..2"),
        ResolutionError::Arithmetic(ArithmeticError::Lex(LexError::MalformedNumber {
            text: "1..2".into(),
            position: 0
        }))
    );
}

#[test]
fn seulement_des_operateurs_introuvable() {
    // aucun chiffre : pas un candidat
    assert_eq!(err("+ - ( )"), ResolutionError::NotFound("+ - ( )".into()));
}

#[test]
fn imbrication_bornee() {
    let n = PROFONDEUR_MAX + 1;
    let q = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert!(matches!(
        err(&q),
        ResolutionError::Arithmetic(ArithmeticError::Parse(ParseError::TooDeeplyNested { .. }))
    ));

    let n = PROFONDEUR_MAX;
    let q = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(ok(&q), "1");
}

#[test]
fn longue_chaine_sans_debordement() {
    // limite de longueur relevée au maximum : c’est la hauteur d’arbre qui borne
    let r = Resolver::with_limits(
        Arc::new(table()),
        Limites {
            longueur_max: usize::MAX,
            ..Limites::default()
        },
    );

    let s = vec!["1"; HAUTEUR_MAX + 1].join("+");
    assert_eq!(r.resolve(&s), Ok((HAUTEUR_MAX + 1).to_string()));

    let s = vec!["1"; 20_000].join("+");
    assert!(matches!(
        r.resolve(&s),
        Err(ResolutionError::Arithmetic(ArithmeticError::Parse(
            ParseError::TooDeeplyNested { limit: HAUTEUR_MAX, .. }
        )))
    ));
}

#[test]
fn idempotence() {
    let r = resolver();
    for q in ["5 + 3 * 2", "1 / 3", "what is your name", "1 / 0", "nope"] {
        assert_eq!(r.resolve(q), r.resolve(q), "question {q:?}");
    }
}

/* ------------------------ Partage entre threads ------------------------ */

#[test]
fn resolver_partage_entre_threads() {
    let r = Arc::new(resolver());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let r = Arc::clone(&r);
            thread::spawn(move || {
                let calc = r.resolve(&format!("{i} * {i}"));
                let nom = r.resolve("What is your name");
                (i, calc, nom)
            })
        })
        .collect();

    for h in handles {
        let (i, calc, nom) = h.join().expect("thread");
        assert_eq!(calc, Ok((i * i).to_string()));
        assert_eq!(nom, Ok("RoboBob".into()));
    }
}

#[test]
fn table_generique() {
    struct Echo;
    impl Lookup for Echo {
        fn lookup(&self, key: &str) -> Option<String> {
            key.starts_with("echo ").then(|| key[5..].to_string())
        }
    }

    let r = Resolver::new(Arc::new(Echo));
    assert_eq!(r.resolve("ECHO Bonjour"), Ok("bonjour".into()));
    assert_eq!(r.resolve("6 / 4"), Ok("1.5".into()));
}
