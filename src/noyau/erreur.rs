//! Noyau — erreurs typées du pipeline.
//!
//! Deux familles seulement :
//! - Syntaxe : entrée mal formée (symbole inconnu, parenthèses, pile vide, restes…)
//! - Math    : entrée bien formée mais opération indéfinie (÷0, ln ≤ 0, √ < 0, ctg)
//!
//! Chaque étape renvoie `Result<_, ErreurCalcul>` ; la première erreur coupe le pipeline.

use thiserror::Error;

/// Statut tri-état d’une étape (Succès / Syntaxe / Math).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Statut {
    Succes,
    ErreurSyntaxe,
    ErreurMath,
}

impl Statut {
    /// Statut d’un résultat quelconque du pipeline.
    pub fn de<T>(r: &Result<T, ErreurCalcul>) -> Self {
        match r {
            Ok(_) => Self::Succes,
            Err(e) => e.statut(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurSyntaxe {
    #[error("empty input")]
    EntreeVide,

    #[error("normalized buffer exceeds {max} bytes")]
    TamponPlein { max: usize },

    #[error("token `{jeton}` exceeds {max} bytes")]
    JetonTropLong { jeton: String, max: usize },

    #[error("unknown symbol `{0}`")]
    SymboleInconnu(String),

    #[error("closing bracket without opening bracket")]
    ParentheseOrpheline,

    #[error("unclosed bracket")]
    ParentheseNonFermee,

    #[error("`{avant}` followed by `{apres}`")]
    JetonsAdjacents { avant: String, apres: String },

    #[error("missing operand for `{0}`")]
    PileVide(String),

    #[error("{0} values left on the stack")]
    ValeursRestantes(usize),

    #[error("invalid number `{0}`")]
    NombreInvalide(String),
}

/// Violations de domaine : valeurs en f64 pour le message.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurMath {
    #[error("division by zero")]
    DivisionParZero,

    #[error("logarithm of non-positive value {0}")]
    LogarithmeNonPositif(f64),

    #[error("square root of negative value {0}")]
    RacineNegative(f64),

    #[error("cotangent undefined at {0}")]
    CotangenteIndefinie(f64),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("syntax error: {0}")]
    Syntaxe(#[from] ErreurSyntaxe),

    #[error("math error: {0}")]
    Math(#[from] ErreurMath),
}

impl ErreurCalcul {
    pub fn statut(&self) -> Statut {
        match self {
            Self::Syntaxe(_) => Statut::ErreurSyntaxe,
            Self::Math(_) => Statut::ErreurMath,
        }
    }
}
