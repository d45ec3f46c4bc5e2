//! src/app/etat.rs
//!
//! État de la session (sans entrée/sortie, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, paramètres, démarche)
//! et offrir des opérations simples sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Paramètres bornés (digits, longueur de ligne).

use crate::noyau::eval::DemarcheNoyau;
use crate::noyau::ErreurCalcul;

/// Chiffres après la virgule par défaut.
pub const DIGITS_DEFAUT: usize = 6;

/// Au-delà, f64 n’a plus rien à dire.
const DIGITS_MAX: usize = 17;

/// Longueur max d’une ligne acceptée (octets, sans le saut de ligne).
pub const MAX_LIGNE_DEFAUT: usize = 255;

const MAX_LIGNE_MAX: usize = 4096;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // "Result: …"
    pub erreur: String,   // message "n/a…" (si une étape échoue)

    // --- démarche (affichée avec --trace) ---
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub digits: usize,
    pub max_ligne: usize,
    pub trace: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: DemarcheNoyau::default(),
            digits: DIGITS_DEFAUT,
            max_ligne: MAX_LIGNE_DEFAUT,
            trace: false,
        }
    }
}

impl AppCalc {
    /// Efface résultat + erreur + démarche (l’entrée reste).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = DemarcheNoyau::default();
    }

    /// Une erreur efface le résultat précédent et la démarche.
    pub fn set_erreur(&mut self, e: &ErreurCalcul) {
        self.clear_resultats();
        self.erreur = match e {
            ErreurCalcul::Syntaxe(_) => "n/a: invalid expression".to_string(),
            ErreurCalcul::Math(m) => format!("n/a: math error ({m})"),
        };
    }

    /// Ligne refusée avant toute évaluation (trop longue).
    pub fn set_indisponible(&mut self) {
        self.clear_resultats();
        self.erreur = "n/a".to_string();
    }

    pub fn set_resultat(&mut self, valeur: f64, demarche: DemarcheNoyau) {
        self.erreur.clear();
        self.resultat = format!("Result: {:.*}", self.digits, valeur);
        self.demarche = demarche;
    }

    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
    }

    pub fn set_max_ligne(&mut self, max: usize) {
        self.max_ligne = max.clamp(1, MAX_LIGNE_MAX);
    }

    /// Ligne à afficher pour la dernière évaluation.
    pub fn ligne_sortie(&self) -> &str {
        if self.erreur.is_empty() {
            &self.resultat
        } else {
            &self.erreur
        }
    }
}
