//! Tests de session : boucle complète sur entrée / sortie en mémoire.

use std::io::{BufReader, Cursor};

use pretty_assertions::assert_eq;

use super::etat::AppCalc;
use super::vue::{lire_ligne, Lecture, INVITE};
use crate::noyau::Statut;

fn session(app: &mut AppCalc, entree: &str) -> String {
    let mut lecteur = Cursor::new(entree.as_bytes().to_vec());
    let mut sortie: Vec<u8> = Vec::new();
    app.boucle(&mut lecteur, &mut sortie)
        .unwrap_or_else(|e| panic!("io: {e}"));
    String::from_utf8(sortie).unwrap_or_else(|e| panic!("utf8: {e}"))
}

fn attendu(lignes: &[&str]) -> String {
    let mut out = String::new();
    for l in lignes {
        out.push_str(INVITE);
        out.push_str(l);
        out.push('\n');
    }
    out.push_str(INVITE);
    out
}

#[test]
fn session_resultat_puis_quitter() {
    let mut app = AppCalc::default();
    let out = session(&mut app, "2 + 3 * 4\nq\n1+1\n");
    assert_eq!(out, attendu(&["Result: 14.000000"]));
}

#[test]
fn session_fin_entree_sans_q() {
    let mut app = AppCalc::default();
    let out = session(&mut app, "(2 + 3) * 4\n-3 + 5");
    assert_eq!(out, attendu(&["Result: 20.000000", "Result: 2.000000"]));
}

#[test]
fn session_messages_erreur() {
    let mut app = AppCalc::default();
    let out = session(&mut app, "4 / 0\n(2 + 3\nln(0)\n2 3\n");
    assert_eq!(
        out,
        attendu(&[
            "n/a: math error (division by zero)",
            "n/a: invalid expression",
            "n/a: math error (logarithm of non-positive value 0)",
            "n/a: invalid expression",
        ])
    );
}

#[test]
fn session_q_strict() {
    let mut app = AppCalc::default();
    // " q" n’est pas la commande de sortie ; "q\r\n" l’est
    let out = session(&mut app, " q\nq\r\n1+1\n");
    assert_eq!(out, attendu(&["n/a: invalid expression"]));
}

#[test]
fn session_ligne_trop_longue() {
    let mut app = AppCalc::default();
    app.set_max_ligne(5);

    // petit tampon : la ligne arrive en plusieurs morceaux
    let mut lecteur = BufReader::with_capacity(4, Cursor::new(b"123456789+1\n1+1\n".to_vec()));
    let mut sortie: Vec<u8> = Vec::new();
    app.boucle(&mut lecteur, &mut sortie)
        .unwrap_or_else(|e| panic!("io: {e}"));

    let out = String::from_utf8(sortie).unwrap_or_else(|e| panic!("utf8: {e}"));
    assert_eq!(out, attendu(&["n/a", "Result: 2.000000"]));
}

#[test]
fn session_trace() {
    let mut app = AppCalc {
        trace: true,
        ..AppCalc::default()
    };
    let out = session(&mut app, "-3+5\n4/0\n");
    assert_eq!(
        out,
        attendu(&[
            "Tokens: u 3 + 5\nPostfix: 3 u 5 +\nResult: 2.000000",
            "n/a: math error (division by zero)",
        ])
    );
}

#[test]
fn session_digits() {
    let mut app = AppCalc::default();
    app.set_digits(2);
    let out = session(&mut app, "22/7\n");
    assert_eq!(out, attendu(&["Result: 3.14"]));

    app.set_digits(100);
    assert_eq!(app.digits, 17);

    app.set_max_ligne(0);
    assert_eq!(app.max_ligne, 1);
}

#[test]
fn session_erreur_efface_resultat() {
    let mut app = AppCalc::default();

    app.entree = "1+1".to_string();
    assert_eq!(app.eval_via_noyau(), Statut::Succes);
    assert_eq!(app.ligne_sortie(), "Result: 2.000000");
    assert_eq!(app.demarche.rpn, "1 1 +");

    app.entree = "sqrt(-4)".to_string();
    assert_eq!(app.eval_via_noyau(), Statut::ErreurMath);
    assert_eq!(
        app.ligne_sortie(),
        "n/a: math error (square root of negative value -4)"
    );
    assert!(app.resultat.is_empty());
    assert!(app.demarche.jetons.is_empty());

    app.entree = "1 +".to_string();
    assert_eq!(app.eval_via_noyau(), Statut::ErreurSyntaxe);
}

#[test]
fn lecture_bornee() {
    let mut c = Cursor::new(b"abc\n\nxyz".to_vec());
    assert_eq!(lire_ligne(&mut c, 3).ok(), Some(Lecture::Ligne("abc".into())));
    assert_eq!(lire_ligne(&mut c, 3).ok(), Some(Lecture::Ligne(String::new())));
    assert_eq!(lire_ligne(&mut c, 3).ok(), Some(Lecture::Ligne("xyz".into())));
    assert_eq!(lire_ligne(&mut c, 3).ok(), Some(Lecture::Fin));

    let mut long = Cursor::new(b"abcd\r\nab\r\n".to_vec());
    assert_eq!(lire_ligne(&mut long, 3).ok(), Some(Lecture::TropLongue));
    assert_eq!(lire_ligne(&mut long, 3).ok(), Some(Lecture::Ligne("ab".into())));
}
