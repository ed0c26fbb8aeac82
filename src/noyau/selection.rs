// src/noyau/selection.rs
//
// Extraction d'un sous-mot depuis un ensemble de bits choisis.
//
// Les indices (0 = poids faible) sont consommés en ordre croissant : le bit
// sélectionné de rang k devient le bit k du sous-mot. La contiguïté de la
// sélection n'influe QUE sur l'étiquette lisible, jamais sur la valeur.

use std::collections::BTreeSet;

use num_bigint::BigUint;

/// Tasse les bits sélectionnés de `valeur` en une nouvelle valeur contiguë
/// de `indices.len()` bits.
pub fn extraire(valeur: &BigUint, indices: &BTreeSet<u32>) -> BigUint {
    let mut sortie = BigUint::default();
    for (rang, idx) in indices.iter().enumerate() {
        if valeur.bit(u64::from(*idx)) {
            sortie.set_bit(rang as u64, true);
        }
    }
    sortie
}

/// Vrai si les indices forment une plage ascendante sans trou.
pub fn est_contigue(indices: &BTreeSet<u32>) -> bool {
    match (indices.first(), indices.last()) {
        (Some(bas), Some(haut)) => (haut - bas) as usize + 1 == indices.len(),
        _ => false,
    }
}

/// Étiquette lisible de la sélection : plage "haut à bas" si contiguë
/// (lecture poids fort vers poids faible, comme l'affichage des cellules),
/// liste croissante explicite sinon.
pub fn etiquette(indices: &BTreeSet<u32>) -> String {
    if indices.is_empty() {
        return "aucun bit sélectionné".to_string();
    }

    let n = indices.len();
    if est_contigue(indices) {
        // sélection non vide : bornes présentes
        let bas = indices.first().copied().unwrap_or(0);
        let haut = indices.last().copied().unwrap_or(0);
        format!("bits {haut} à {bas} ({n} bits)")
    } else {
        let liste = indices
            .iter()
            .map(|idx| idx.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("bits {liste} ({n} bits)")
    }
}

/* ------------------------ Tests ------------------------ */
