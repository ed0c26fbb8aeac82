// src/noyau/largeur.rs
//
// Largeurs standard + troncature complément à deux + éditions bit directes.
//
// Règles:
// - Toute opération mutante (résultat arithmétique, décalage, bascule de bit,
//   inversion) passe par `tronquer` avant d'être déposée comme valeur courante.
// - Changer de largeur ne re-cadre PAS un motif existant : seuls le masque de
//   troncature et le bourrage d'affichage changent.

use std::collections::BTreeSet;
use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One;

/* ------------------------ Largeurs standard ------------------------ */

/// Les huit largeurs de mot supportées (en bits).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum LargeurBits {
    L8,
    L16,
    L32,
    #[default]
    L64,
    L128,
    L256,
    L512,
    L1024,
}

/// Ordre croissant — utilisé par l'alignement automatique.
pub const LARGEURS: [LargeurBits; 8] = [
    LargeurBits::L8,
    LargeurBits::L16,
    LargeurBits::L32,
    LargeurBits::L64,
    LargeurBits::L128,
    LargeurBits::L256,
    LargeurBits::L512,
    LargeurBits::L1024,
];

impl LargeurBits {
    pub fn bits(self) -> u32 {
        match self {
            LargeurBits::L8 => 8,
            LargeurBits::L16 => 16,
            LargeurBits::L32 => 32,
            LargeurBits::L64 => 64,
            LargeurBits::L128 => 128,
            LargeurBits::L256 => 256,
            LargeurBits::L512 => 512,
            LargeurBits::L1024 => 1024,
        }
    }

    pub fn octets(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Largeur exacte depuis un nombre de bits (8, 16, … 1024), sinon None.
    pub fn depuis_bits(bits: u32) -> Option<Self> {
        LARGEURS.into_iter().find(|l| l.bits() == bits)
    }

    /// Plus petite largeur standard contenant `min_bits` bits significatifs.
    /// Plancher 8, plafond 1024 (au-delà, on garde la plus grande largeur).
    pub fn minimale_pour(min_bits: u64) -> Self {
        LARGEURS
            .into_iter()
            .find(|l| u64::from(l.bits()) >= min_bits)
            .unwrap_or(LargeurBits::L1024)
    }

    /// Masque `2^bits - 1`.
    pub fn masque(self) -> BigUint {
        (BigUint::one() << u64::from(self.bits())) - BigUint::one()
    }
}

impl fmt::Display for LargeurBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

/* ------------------------ Troncature ------------------------ */

/// Point unique de normalisation : ramène un résultat brut (possiblement
/// négatif ou plus large que le mot) dans `[0, 2^largeur)`.
///
/// Un négatif est réinterprété en complément à deux (ajout de `2^largeur`)
/// avant le masquage; le masque s'applique dans tous les cas.
pub fn tronquer(brut: &BigInt, largeur: LargeurBits) -> BigUint {
    let mut v = brut.clone();
    if v.sign() == Sign::Minus {
        v += BigInt::from(BigUint::one() << u64::from(largeur.bits()));
    }

    // `&` sur BigInt suit la sémantique complément à deux : le résultat est
    // positif dès que le masque l'est, même si `v` est resté négatif.
    let masquee = v & BigInt::from(largeur.masque());
    masquee.to_biguint().unwrap_or_default()
}

/* ------------------------ Éditions bit directes ------------------------ */

/// Sens d'un décalage demandé par la coquille (boutons `<<` / `>>`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SensDecalage {
    Gauche,
    Droite,
}

/// Bascule le bit `index` (0 = poids faible). L'appelant garantit
/// `index < largeur` : le résultat reste alors dans le mot.
pub fn basculer_bit(valeur: &BigUint, index: u32) -> BigUint {
    valeur ^ (BigUint::one() << u64::from(index))
}

/// Inverse chaque bit listé dans `indices` (tous dans `[0, largeur)`).
pub fn inverser_bits(valeur: &BigUint, indices: &BTreeSet<u32>) -> BigUint {
    let mut masque = BigUint::default();
    for idx in indices {
        masque |= BigUint::one() << u64::from(*idx);
    }
    valeur ^ masque
}

/// Décalage logique dans le mot : les bits sortis en haut sont perdus
/// (pas de rotation), `1 << 8` sur 8 bits donne 0.
pub fn decaler(
    valeur: &BigUint,
    largeur: LargeurBits,
    quantite: u32,
    sens: SensDecalage,
) -> BigUint {
    let brut = match sens {
        SensDecalage::Gauche => BigInt::from(valeur << u64::from(quantite)),
        SensDecalage::Droite => BigInt::from(valeur >> u64::from(quantite)),
    };
    tronquer(&brut, largeur)
}

/// Complément bit-à-bit dans la largeur du mot : `~v & masque`.
pub fn complement(valeur: &BigUint, largeur: LargeurBits) -> BigUint {
    let masque = largeur.masque();
    (valeur ^ &masque) & masque
}

/* ------------------------ Tests ------------------------ */
