// src/noyau/detection.rs
//
// Filtre rapide “est-ce que ça ressemble à un calcul ?”.
// Ne valide PAS la grammaire : "2 + + 3" passe ici et échoue au parseur.

fn caractere_autorise(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | '+' | '-' | '*' | '/' | '(' | ')')
}

/// Vrai si le texte ne contient que [0-9 . + - * / ( ) espaces] ET au moins un chiffre.
pub fn is_candidate_expression(texte: &str) -> bool {
    texte.chars().all(caractere_autorise) && texte.chars().any(|c| c.is_ascii_digit())
}
