// src/noyau/detection.rs
//
// Détection base + largeur depuis la saisie brute.
//
// Règles:
// - `_` retirés avant toute inspection;
// - préfixes reconnus (insensibles à la casse) : 0x => 16, 0b => 2, 0o => 8;
//   sans préfixe, la base courante reste en vigueur;
// - le reste est parsé dans la base détectée; sur échec, AUCUN changement de
//   largeur (le texte peut être en cours d'édition) — la base détectée par
//   préfixe, elle, s'applique quand même;
// - largeur minimale alignée sur la puissance de deux standard (plancher 8),
//   et seulement RELEVÉE : jamais abaissée automatiquement.

use num_traits::Zero;

use super::format::{parse_texte, Base};
use super::largeur::LargeurBits;

/// Inspecte un texte brut et renvoie la (base, largeur) à retenir.
pub fn detecter(texte: &str, base: Base, largeur: LargeurBits) -> (Base, LargeurBits) {
    let s = texte.trim();
    if s.is_empty() {
        return (base, largeur);
    }

    let nettoye: String = s.chars().filter(|c| *c != '_').collect();
    let minuscule = nettoye.to_lowercase();

    let base_detectee = if minuscule.starts_with("0x") {
        Base::Hexadecimale
    } else if minuscule.starts_with("0b") {
        Base::Binaire
    } else if minuscule.starts_with("0o") {
        Base::Octale
    } else {
        base
    };

    let mut nouvelle_largeur = largeur;
    if let Some(v) = parse_texte(&nettoye, base_detectee) {
        let bits_minimaux = if v.is_zero() { 8 } else { v.bits() };
        let alignee = LargeurBits::minimale_pour(bits_minimaux);
        if alignee > largeur {
            nouvelle_largeur = alignee;
        }
    }

    (base_detectee, nouvelle_largeur)
}

/* ------------------------ Tests ------------------------ */
