//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> valider -> RPN -> évaluation
//!
//! Chaque étape renvoie un `Result` ; la première erreur court-circuite la suite.

use tracing::debug;

use super::erreur::{ErreurCalcul, ErreurSyntaxe};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};
use super::validation::valider;

/// Trace des étapes intermédiaires (forme normalisée + RPN).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Calcul {
    pub valeur: f64,
    pub demarche: DemarcheNoyau,
}

/// API publique : évalue une expression d’une ligne.
pub fn eval_expression(ligne: &str) -> Result<Calcul, ErreurCalcul> {
    if ligne.trim().is_empty() {
        return Err(ErreurSyntaxe::EntreeVide.into());
    }

    // 1) Jetons
    let jetons = tokenize(ligne)?;

    // 2) Validation structurelle
    valider(&jetons)?;

    // 3) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    debug!(rpn = %rpn_txt, "conversion postfixe");

    // 4) Valeur
    let valeur = eval_rpn(&rpn)?;

    Ok(Calcul {
        valeur,
        demarche: DemarcheNoyau {
            jetons: format_tokens(&jetons),
            rpn: rpn_txt,
        },
    })
}
