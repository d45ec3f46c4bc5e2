// src/noyau/validation.rs
//
// Validation structurelle (avant la conversion RPN) :
// - tout opérateur doit être un symbole connu
// - compteur de parenthèses : jamais négatif, nul à la fin
//
// L’arité et l’ordre des opérandes sont vérifiés plus loin (rpn.rs).

use tracing::debug;

use super::erreur::{ErreurCalcul, ErreurSyntaxe};
use super::jetons::Jeton;

pub fn valider(jetons: &[Jeton]) -> Result<(), ErreurCalcul> {
    let mut ouvertes: usize = 0;

    for jeton in jetons {
        match jeton {
            Jeton::Inconnu(symbole) => {
                return Err(ErreurSyntaxe::SymboleInconnu(symbole.clone()).into());
            }
            Jeton::ParG => ouvertes += 1,
            Jeton::ParD => {
                ouvertes = ouvertes
                    .checked_sub(1)
                    .ok_or(ErreurSyntaxe::ParentheseOrpheline)?;
            }
            _ => {}
        }
    }

    if ouvertes != 0 {
        return Err(ErreurSyntaxe::ParentheseNonFermee.into());
    }

    debug!(jetons = jetons.len(), "validation ok");
    Ok(())
}
