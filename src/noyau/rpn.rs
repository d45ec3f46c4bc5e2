// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Jeton (infixe) en RPN (postfixe)
// - Puis évaluer la RPN avec une pile de valeurs f64
//
// Règles:
// - Binaire (+ - * /) : gauche-associatif, dépile tant que priorité(sommet) >= priorité(jeton)
// - Préfixe (u, fonctions) : empilé directement, il attend l’opérande qui suit
// - Adjacence interdite : nombre puis nombre, binaire puis binaire
//
// NOTE:
// - Les piles sont locales à chaque fonction : rien ne survit d’une expression à l’autre.

use num_traits::Float;
use tracing::{debug, trace};

use super::erreur::{ErreurCalcul, ErreurMath, ErreurSyntaxe};
use super::jetons::{Fonction, Jeton};

/// Rang d’ordonnancement (0 = parenthèse / inconnu).
pub fn priorite(j: &Jeton) -> u8 {
    match j {
        Jeton::Plus | Jeton::MoinsBinaire => 1,
        Jeton::Fois | Jeton::Division => 2,
        Jeton::Fonction(_) => 3,
        Jeton::MoinsUnaire => 4,
        _ => 0,
    }
}

/// Classe d’adjacence : deux jetons de même classe interdite ne se suivent pas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Classe {
    Operande,
    Binaire,
    Autre,
}

fn classe(j: &Jeton) -> Classe {
    match j {
        Jeton::Nombre(_) => Classe::Operande,
        _ if j.est_binaire() => Classe::Binaire,
        _ => Classe::Autre,
    }
}

/// Convertit une suite de jetons infixe (déjà validée) en RPN.
///
/// Exemple:
///   jetons: [u, 3, +, 5]
///   rpn:    [3, u, 5, +]
pub fn to_rpn(jetons: &[Jeton]) -> Result<Vec<Jeton>, ErreurCalcul> {
    let mut out: Vec<Jeton> = Vec::with_capacity(jetons.len());
    let mut ops: Vec<Jeton> = Vec::new();

    let mut precedent: Option<&Jeton> = None;

    for tok in jetons {
        if let Some(avant) = precedent {
            let c = classe(tok);
            if c != Classe::Autre && c == classe(avant) {
                return Err(ErreurSyntaxe::JetonsAdjacents {
                    avant: avant.to_string(),
                    apres: tok.to_string(),
                }
                .into());
            }
        }
        precedent = Some(tok);

        match tok {
            Jeton::Nombre(_) => out.push(tok.clone()),

            Jeton::ParG => ops.push(Jeton::ParG),

            Jeton::ParD => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Jeton::ParG) => break,
                        Some(op) => out.push(op),
                        None => return Err(ErreurSyntaxe::ParentheseOrpheline.into()),
                    }
                }
            }

            _ if tok.est_prefixe() => ops.push(tok.clone()),

            _ if tok.est_binaire() => {
                let p_tok = priorite(tok);
                while let Some(top) = ops.last() {
                    if priorite(top) < p_tok {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        trace!(op = %op, "dépile");
                        out.push(op);
                    }
                }
                ops.push(tok.clone());
            }

            _ => return Err(ErreurSyntaxe::SymboleInconnu(tok.to_string()).into()),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op == Jeton::ParG {
            return Err(ErreurSyntaxe::ParentheseNonFermee.into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Évalue une RPN.
///
/// - binaire : 1er dépilé = opérande droit, 2e = opérande gauche
/// - préfixe : un seul opérande
/// - fin : exactement une valeur sur la pile
pub fn eval_rpn(rpn: &[Jeton]) -> Result<f64, ErreurCalcul> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Jeton::Nombre(texte) => {
                let v = texte
                    .parse::<f64>()
                    .map_err(|_| ErreurSyntaxe::NombreInvalide(texte.clone()))?;
                st.push(v);
            }

            _ if tok.est_binaire() => {
                let b = depiler(&mut st, tok)?;
                let a = depiler(&mut st, tok)?;
                st.push(operation_binaire(tok, a, b)?);
            }

            Jeton::MoinsUnaire => {
                let x = depiler(&mut st, tok)?;
                st.push(-x);
            }

            Jeton::Fonction(f) => {
                let x = depiler(&mut st, tok)?;
                st.push(appliquer_fonction(*f, x)?);
            }

            _ => return Err(ErreurSyntaxe::SymboleInconnu(tok.to_string()).into()),
        }
        trace!(jeton = %tok, pile = st.len(), "rpn");
    }

    match st.as_slice() {
        [v] => {
            debug!(valeur = *v, "évaluation");
            Ok(*v)
        }
        [] => Err(ErreurSyntaxe::EntreeVide.into()),
        reste => Err(ErreurSyntaxe::ValeursRestantes(reste.len()).into()),
    }
}

fn depiler(st: &mut Vec<f64>, pour: &Jeton) -> Result<f64, ErreurSyntaxe> {
    st.pop().ok_or_else(|| ErreurSyntaxe::PileVide(pour.to_string()))
}

fn operation_binaire<F: Float>(op: &Jeton, a: F, b: F) -> Result<F, ErreurCalcul> {
    Ok(match op {
        Jeton::Plus => a + b,
        Jeton::MoinsBinaire => a - b,
        Jeton::Fois => a * b,
        Jeton::Division => {
            if b.is_zero() {
                return Err(ErreurMath::DivisionParZero.into());
            }
            a / b
        }
        _ => return Err(ErreurSyntaxe::SymboleInconnu(op.to_string()).into()),
    })
}

fn appliquer_fonction<F: Float>(f: Fonction, x: F) -> Result<F, ErreurMath> {
    let brut = || x.to_f64().unwrap_or(f64::NAN);

    Ok(match f {
        Fonction::Sin => x.sin(),
        Fonction::Cos => x.cos(),
        Fonction::Tan => x.tan(),
        Fonction::Ctg => {
            let t = x.tan();
            if t.is_zero() {
                return Err(ErreurMath::CotangenteIndefinie(brut()));
            }
            t.recip()
        }
        Fonction::Ln => {
            if x <= F::zero() {
                return Err(ErreurMath::LogarithmeNonPositif(brut()));
            }
            x.ln()
        }
        Fonction::Sqrt => {
            if x < F::zero() {
                return Err(ErreurMath::RacineNegative(brut()));
            }
            x.sqrt()
        }
    })
}
