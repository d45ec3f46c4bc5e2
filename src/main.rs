// src/main.rs
//
// Calculatrice RPN — point d’entrée (terminal)
// --------------------------------------------
// - sans --expr : boucle interactive sur stdin/stdout
// - avec --expr : une seule expression, code de sortie 1 si erreur
// - journal sur stderr (filtré par cible, -v / -q)

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::prelude::*;

mod app;
mod noyau;

use app::AppCalc;
use noyau::Statut;

/// Évalue des expressions arithmétiques d’une ligne
/// (+ - * /, parenthèses, sin cos tan ctg ln sqrt, moins unaire).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Chiffres après la virgule dans le résultat.
    #[arg(short, long, default_value_t = app::etat::DIGITS_DEFAUT)]
    digits: usize,

    /// Longueur max d’une ligne (octets) ; au-delà, la ligne est refusée.
    #[arg(short, long, default_value_t = app::etat::MAX_LIGNE_DEFAUT)]
    max_line: usize,

    /// Affiche aussi les jetons normalisés et la forme postfixe.
    #[arg(short, long)]
    trace: bool,

    /// Évalue une seule expression puis quitte.
    #[arg(short, long)]
    expr: Option<String>,

    /// Plus de journal (-v info, -vv debug, -vvv trace).
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Aucun journal.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_journal(verbose: u8, quiet: bool) {
    let niveau = match (quiet, verbose) {
        (true, _) => LevelFilter::OFF,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };

    let defaut = if quiet { LevelFilter::OFF } else { LevelFilter::WARN };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(
                    Targets::new()
                        .with_default(defaut)
                        .with_target(env!("CARGO_CRATE_NAME"), niveau),
                ),
        )
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_journal(args.verbose, args.quiet);

    let mut app = AppCalc::default();
    app.set_digits(args.digits);
    app.set_max_ligne(args.max_line);
    app.trace = args.trace;

    let stdout = io::stdout();
    let mut sortie = stdout.lock();

    if let Some(expr) = args.expr {
        app.entree = expr;
        let statut = app.eval_via_noyau();
        app.afficher(&mut sortie).context("écriture du résultat")?;
        sortie.flush().context("écriture du résultat")?;
        return Ok(if statut == Statut::Succes {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    info!(digits = app.digits, max_ligne = app.max_ligne, "session");
    let stdin = io::stdin();
    app.boucle(&mut stdin.lock(), &mut sortie)
        .context("boucle interactive")?;

    Ok(ExitCode::SUCCESS)
}
