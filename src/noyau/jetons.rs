// src/noyau/jetons.rs
//
// Tokenisation : caractères bruts -> jetons classés.
//
// Règles:
// - espaces / tabulations ignorés entre jetons
// - nombre : chiffres, puis au plus UN '.' suivi de chiffres
//   (un 2e '.' reste dans le flux et devient un symbole inconnu)
// - mot ASCII : sin/cos/tan/ctg/ln/sqrt (casse stricte) => fonction, sinon symbole inconnu
// - '-' : binaire après un nombre ou ')', unaire partout ailleurs
// - '\n' ou fin de chaîne : fin du flux
//
// Un seul caractère de recul suffit (nombres et mots lisent un caractère de trop).

use std::fmt;

use tracing::{debug, trace};

use super::erreur::{ErreurCalcul, ErreurSyntaxe};

/// Longueur max (octets) du texte d’un jeton.
pub const MAX_JETON: usize = 16;

/// Longueur max (octets) de la forme normalisée (jetons séparés par un espace).
pub const MAX_TAMPON: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Ctg,
    Ln,
    Sqrt,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "ctg" => Some(Self::Ctg),
            "ln" => Some(Self::Ln),
            "sqrt" => Some(Self::Sqrt),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ctg => "ctg",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
        }
    }
}

/// Genre d’un jeton (la fin de flux est `Fin`, jamais émise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    Nombre,
    Operateur,
    Fonction,
    ParG,
    ParD,
    Fin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    // Texte conservé tel quel jusqu’à l’évaluation
    Nombre(String),

    Plus,
    MoinsBinaire,
    Fois,
    Division,
    MoinsUnaire, // rendu "u"

    Fonction(Fonction),

    ParG,
    ParD,

    // Tout symbole non reconnu (rejeté par la validation)
    Inconnu(String),
}

impl Jeton {
    pub fn genre(&self) -> Genre {
        match self {
            Jeton::Nombre(_) => Genre::Nombre,
            Jeton::Fonction(_) => Genre::Fonction,
            Jeton::ParG => Genre::ParG,
            Jeton::ParD => Genre::ParD,
            Jeton::Plus
            | Jeton::MoinsBinaire
            | Jeton::Fois
            | Jeton::Division
            | Jeton::MoinsUnaire
            | Jeton::Inconnu(_) => Genre::Operateur,
        }
    }

    /// Texte du jeton dans la forme normalisée.
    pub fn texte(&self) -> &str {
        match self {
            Jeton::Nombre(t) | Jeton::Inconnu(t) => t,
            Jeton::Plus => "+",
            Jeton::MoinsBinaire => "-",
            Jeton::Fois => "*",
            Jeton::Division => "/",
            Jeton::MoinsUnaire => "u",
            Jeton::Fonction(f) => f.nom(),
            Jeton::ParG => "(",
            Jeton::ParD => ")",
        }
    }

    /// Opérateur binaire (+ - * /) : deux opérandes.
    pub fn est_binaire(&self) -> bool {
        matches!(
            self,
            Jeton::Plus | Jeton::MoinsBinaire | Jeton::Fois | Jeton::Division
        )
    }

    /// Opérateur préfixe (moins unaire, fonctions) : s’applique à ce qui suit.
    pub fn est_prefixe(&self) -> bool {
        matches!(self, Jeton::MoinsUnaire | Jeton::Fonction(_))
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.texte())
    }
}

/* ------------------------ Flux de jetons ------------------------ */

/// Curseur sur une ligne d’entrée : produit les jetons à la demande.
pub struct FluxJetons {
    car: Vec<char>,
    pos: usize,
    // recul d’un caractère (lookahead des nombres / mots)
    rendu: Option<char>,
    // genre du dernier jeton émis (moins unaire vs binaire)
    precedent: Genre,
}

impl FluxJetons {
    pub fn new(ligne: &str) -> Self {
        Self {
            car: ligne.chars().collect(),
            pos: 0,
            rendu: None,
            precedent: Genre::Fin,
        }
    }

    fn lire(&mut self) -> Option<char> {
        if let Some(c) = self.rendu.take() {
            return Some(c);
        }
        let c = *self.car.get(self.pos)?;
        if c == '\n' {
            return None;
        }
        self.pos += 1;
        Some(c)
    }

    fn rendre(&mut self, c: char) {
        debug_assert!(self.rendu.is_none(), "un seul caractère de recul");
        self.rendu = Some(c);
    }

    /// Jeton suivant, ou `None` en fin de flux.
    pub fn suivant(&mut self) -> Result<Option<Jeton>, ErreurSyntaxe> {
        let c = loop {
            match self.lire() {
                None => return Ok(None),
                Some(c) if c.is_whitespace() => continue,
                Some(c) => break c,
            }
        };

        let jeton = match c {
            '0'..='9' => Jeton::Nombre(self.lire_nombre(c)?),
            '(' => Jeton::ParG,
            ')' => Jeton::ParD,
            '+' => Jeton::Plus,
            '*' => Jeton::Fois,
            '/' => Jeton::Division,
            '-' => {
                if matches!(self.precedent, Genre::Nombre | Genre::ParD) {
                    Jeton::MoinsBinaire
                } else {
                    Jeton::MoinsUnaire
                }
            }
            c if c.is_ascii_alphabetic() => {
                let mot = self.lire_mot(c)?;
                match Fonction::depuis_nom(&mot) {
                    Some(f) => Jeton::Fonction(f),
                    None => Jeton::Inconnu(mot),
                }
            }
            autre => Jeton::Inconnu(autre.to_string()),
        };

        trace!(jeton = %jeton, "jeton lu");
        self.precedent = jeton.genre();
        Ok(Some(jeton))
    }

    fn lire_nombre(&mut self, premier: char) -> Result<String, ErreurSyntaxe> {
        let mut texte = String::from(premier);
        self.lire_tant_que(&mut texte, |c| c.is_ascii_digit());

        match self.lire() {
            Some('.') => {
                texte.push('.');
                self.lire_tant_que(&mut texte, |c| c.is_ascii_digit());
            }
            Some(c) => self.rendre(c),
            None => {}
        }

        borne(texte)
    }

    fn lire_mot(&mut self, premier: char) -> Result<String, ErreurSyntaxe> {
        let mut mot = String::from(premier);
        self.lire_tant_que(&mut mot, |c| c.is_ascii_alphabetic());
        borne(mot)
    }

    fn lire_tant_que(&mut self, texte: &mut String, accepte: impl Fn(char) -> bool) {
        while let Some(c) = self.lire() {
            if accepte(c) {
                texte.push(c);
            } else {
                self.rendre(c);
                break;
            }
        }
    }
}

impl Iterator for FluxJetons {
    type Item = Result<Jeton, ErreurSyntaxe>;

    fn next(&mut self) -> Option<Self::Item> {
        self.suivant().transpose()
    }
}

fn borne(texte: String) -> Result<String, ErreurSyntaxe> {
    if texte.len() > MAX_JETON {
        return Err(ErreurSyntaxe::JetonTropLong {
            jeton: texte,
            max: MAX_JETON,
        });
    }
    Ok(texte)
}

/* ------------------------ API ------------------------ */

/// Tokenize une ligne complète.
///
/// Échoue si un jeton dépasse `MAX_JETON` ou si la forme normalisée
/// dépasserait `MAX_TAMPON`.
pub fn tokenize(ligne: &str) -> Result<Vec<Jeton>, ErreurCalcul> {
    let jetons = FluxJetons::new(ligne).collect::<Result<Vec<_>, _>>()?;

    let longueur = jetons.iter().map(|j| j.texte().len()).sum::<usize>()
        + jetons.len().saturating_sub(1);
    if longueur > MAX_TAMPON {
        return Err(ErreurSyntaxe::TamponPlein { max: MAX_TAMPON }.into());
    }

    debug!(jetons = %format_tokens(&jetons), "tokenisation");
    Ok(jetons)
}

/// Forme normalisée : jetons séparés par un seul espace.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(Jeton::texte)
        .collect::<Vec<_>>()
        .join(" ")
}
