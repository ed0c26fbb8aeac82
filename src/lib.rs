// src/lib.rs
//
// Calculatrice binaire — noyau multi-bases / multi-largeurs
// ---------------------------------------------------------
// Rôle:
// - Exposer le noyau pur (jetons → éval → troncature → format)
// - Exposer l'état de session explicite (SessionCalc) piloté par une coquille
//   de présentation externe (hors périmètre de cette crate)
// - Exposer la persistance de l'historique (fichier texte, 1 entrée par ligne)
//
// IMPORTANT (structure projet):
// - Aucune interface graphique ici : la couche d'affichage appelle le noyau
//   via SessionCalc et les fonctions pures de `noyau`.

pub mod etat;
pub mod historique;
pub mod noyau;

// Ré-exports pratiques : `use calculatrice_binaire::SessionCalc;`
pub use etat::SessionCalc;
pub use noyau::eval::{evaluer_brut, evaluer_expression, Valeur};
pub use noyau::format::Base;
pub use noyau::largeur::LargeurBits;
