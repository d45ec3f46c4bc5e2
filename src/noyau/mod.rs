//! Noyau du calcul
//!
//! Organisation interne :
//! - erreur.rs      : erreurs typées (syntaxe / math) + statut
//! - jetons.rs      : tokenisation (flux de jetons, moins unaire)
//! - validation.rs  : symboles connus + équilibre des parenthèses
//! - rpn.rs         : shunting-yard + évaluation RPN
//! - eval.rs        : pipeline complet

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod rpn;
pub mod validation;



// API publique minimale
pub use erreur::{ErreurCalcul, Statut};
pub use eval::eval_expression;
