// src/noyau/boutisme.rs
//
// Bascule petit/gros boutiste sur la représentation tronquée.
//
// Politique (héritée, à conserver telle quelle) :
// - 8 bits : sans effet (la session remonte un avis à l'utilisateur);
// - 16/32/64 bits : renversement COMPLET des octets du mot;
// - toute autre largeur : octets gros-boutistes bourrés à un multiple de
//   4 octets, puis renversement des octets À L'INTÉRIEUR de chaque mot de
//   32 bits, ordre des mots conservé. Ce n'est PAS un renversement complet —
//   c'est la sémantique d'origine, volontairement préservée.
//
// La permutation est involutive : convertir deux fois rend la valeur
// initiale, et le sens demandé (petit vers gros ou l'inverse) ne change pas
// l'échange d'octets. Le sens courant est un état de session, pas du noyau.

use num_bigint::BigUint;

use super::erreurs::ErreurBoutisme;

/// Issue d'une bascule demandée par la session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bascule {
    /// La valeur a été convertie.
    Convertie,
    /// Le sens demandé est déjà le sens courant : rien à faire.
    DejaDansCeSens,
    /// Largeur de 8 bits : conversion sans effet, avis à afficher.
    SansEffetHuitBits,
}

/// Réordonne les octets de `valeur` pour une largeur de `bits` bits.
///
/// `Deborde` si la valeur ne tient pas dans le tampon reconstruit — ne peut
/// pas survenir après troncature, mais reste un chemin vérifié.
pub fn convertir(valeur: &BigUint, bits: u32) -> Result<BigUint, ErreurBoutisme> {
    match bits {
        8 => Ok(valeur.clone()),
        16 | 32 | 64 => renversement_complet(valeur, (bits / 8) as usize),
        _ => permutation_par_mots(valeur, bits),
    }
}

/// Octets gros-boutistes, bourrés à gauche jusqu'à `n_octets`.
fn octets_cadres(valeur: &BigUint, n_octets: usize) -> Result<Vec<u8>, ErreurBoutisme> {
    let bruts = valeur.to_bytes_be();
    if bruts.len() > n_octets {
        return Err(ErreurBoutisme::Deborde(n_octets));
    }
    let mut octets = vec![0u8; n_octets - bruts.len()];
    octets.extend_from_slice(&bruts);
    Ok(octets)
}

fn renversement_complet(valeur: &BigUint, n_octets: usize) -> Result<BigUint, ErreurBoutisme> {
    let mut octets = octets_cadres(valeur, n_octets)?;
    octets.reverse();
    Ok(BigUint::from_bytes_be(&octets))
}

/// Renversement local à chaque mot de 32 bits, ordre des mots conservé.
fn permutation_par_mots(valeur: &BigUint, bits: u32) -> Result<BigUint, ErreurBoutisme> {
    let mots = (bits as usize + 31) / 32;
    let mut octets = octets_cadres(valeur, mots * 4)?;
    for mot in octets.chunks_mut(4) {
        mot.reverse();
    }
    Ok(BigUint::from_bytes_be(&octets))
}

/* ------------------------ Tests ------------------------ */
