//! Noyau calcul binaire
//!
//! Organisation interne :
//! - erreurs.rs   : taxonomie d'erreurs typées du pipeline
//! - jetons.rs    : tokenisation (mode normal / mode scientifique)
//! - eval.rs      : descente récursive → Valeur (entier exact ou flottant)
//! - largeur.rs   : largeurs standard + troncature complément à deux + éditions bit
//! - format.rs    : bases 2/8/10/16, préfixes, flottants nettoyés
//! - detection.rs : détection base + largeur depuis la saisie brute
//! - boutisme.rs  : bascule petit/gros boutiste (permutation d'octets)
//! - selection.rs : extraction d'un sous-mot depuis des bits choisis

pub mod boutisme;
pub mod detection;
pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod largeur;
pub mod selection;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_robustesse;

// API publique minimale
pub use erreurs::{ErreurBoutisme, ErreurEval};
pub use eval::{evaluer_brut, evaluer_expression, Valeur};
