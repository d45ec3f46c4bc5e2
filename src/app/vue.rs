// src/app/vue.rs
//
// Vue (terminal) — boucle lire / évaluer / afficher
// -------------------------------------------------
// Objectifs :
// - Invite, puis une ligne de l’entrée standard
// - "q" seul => fin ; fin de l’entrée => fin
// - Ligne trop longue => "n/a", le reste de la ligne physique est jeté
// - Lecteur / écrivain génériques (testables en mémoire)

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use super::etat::AppCalc;
use crate::noyau::{eval_expression, Statut};

pub const INVITE: &str = "Exit(q)\nExpression: ";

/// Résultat d’une lecture de ligne bornée.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lecture {
    Ligne(String),
    TropLongue,
    Fin,
}

/// Lit une ligne physique sans jamais garder plus de `max` octets (+ '\r').
///
/// Le saut de ligne (et un '\r' final) ne comptent pas dans la longueur.
pub fn lire_ligne<R: BufRead>(entree: &mut R, max: usize) -> io::Result<Lecture> {
    let limite = max.saturating_add(2);
    let mut octets: Vec<u8> = Vec::new();
    let mut lu = false;

    loop {
        let tampon = entree.fill_buf()?;
        if tampon.is_empty() {
            break;
        }
        lu = true;

        let fin_ligne = tampon.iter().position(|&b| b == b'\n');
        let morceau = &tampon[..fin_ligne.unwrap_or(tampon.len())];

        let place = limite.saturating_sub(octets.len());
        octets.extend_from_slice(&morceau[..morceau.len().min(place)]);

        let n = fin_ligne.map_or(tampon.len(), |i| i + 1);
        entree.consume(n);
        if fin_ligne.is_some() {
            break;
        }
    }

    if !lu {
        return Ok(Lecture::Fin);
    }
    if octets.last() == Some(&b'\r') {
        octets.pop();
    }
    if octets.len() > max {
        return Ok(Lecture::TropLongue);
    }
    Ok(Lecture::Ligne(String::from_utf8_lossy(&octets).into_owned()))
}

impl AppCalc {
    /// Boucle principale : s’arrête sur "q" ou en fin d’entrée.
    pub fn boucle<R: BufRead, W: Write>(
        &mut self,
        entree: &mut R,
        sortie: &mut W,
    ) -> io::Result<()> {
        loop {
            write!(sortie, "{INVITE}")?;
            sortie.flush()?;

            match lire_ligne(entree, self.max_ligne)? {
                Lecture::Fin => {
                    info!("fin de l’entrée");
                    return Ok(());
                }
                Lecture::TropLongue => {
                    warn!(max = self.max_ligne, "ligne trop longue, ignorée");
                    self.set_indisponible();
                    self.afficher(sortie)?;
                }
                Lecture::Ligne(ligne) => {
                    if ligne == "q" {
                        info!("quitter");
                        return Ok(());
                    }
                    self.entree = ligne;
                    self.eval_via_noyau();
                    self.afficher(sortie)?;
                }
            }
        }
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat / erreur / démarche dans l’état.
    pub fn eval_via_noyau(&mut self) -> Statut {
        let r = eval_expression(&self.entree);
        let statut = Statut::de(&r);

        match r {
            Ok(calcul) => self.set_resultat(calcul.valeur, calcul.demarche),
            Err(e) => {
                debug!(entree = %self.entree, erreur = %e, "échec");
                self.set_erreur(&e);
            }
        }
        statut
    }

    /// Affiche la dernière évaluation (démarche d’abord si demandée).
    pub fn afficher<W: Write>(&self, sortie: &mut W) -> io::Result<()> {
        if self.trace && !self.demarche.jetons.is_empty() {
            writeln!(sortie, "Tokens: {}", self.demarche.jetons)?;
            writeln!(sortie, "Postfix: {}", self.demarche.rpn)?;
        }
        writeln!(sortie, "{}", self.ligne_sortie())
    }
}
