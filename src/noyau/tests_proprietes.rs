//! Tests de propriétés transverses : pipeline complet jetons → éval →
//! troncature → format, plus les invariants qui traversent les modules
//! (aller-retour format/parse, involutions, détection monotone).

use std::collections::BTreeSet;

use num_bigint::{BigInt, BigUint};

use super::boutisme;
use super::detection::detecter;
use super::eval::{evaluer_brut, evaluer_expression, Valeur};
use super::format::{formater_entier, parse_texte, Base};
use super::largeur::{complement, tronquer, LargeurBits, LARGEURS};
use super::selection;

const BASES: [Base; 4] = [
    Base::Binaire,
    Base::Octale,
    Base::Decimale,
    Base::Hexadecimale,
];

fn u(v: u128) -> BigUint {
    BigUint::from(v)
}

/* ------------------------ Aller-retour format/parse ------------------------ */

#[test]
fn format_puis_parse_identite_sur_bases_et_largeurs() {
    let valeurs = [0i128, 1, 2, 7, 8, 127, 128, 255, 256, 65535, 1 << 40];
    for n in valeurs {
        for largeur in LARGEURS {
            let tronquee = tronquer(&BigInt::from(n), largeur);
            for base in BASES {
                let texte = formater_entier(&BigInt::from(tronquee.clone()), base);
                let relu = parse_texte(&texte, base);
                assert_eq!(
                    relu,
                    Some(BigInt::from(tronquee.clone())),
                    "{base}, {} bits, texte {texte:?}",
                    largeur.bits()
                );
            }
        }
    }
}

/* ------------------------ Troncature ------------------------ */

#[test]
fn troncature_idempotente_et_bornee() {
    let valeurs = [
        BigInt::from(0),
        BigInt::from(-1),
        BigInt::from(255),
        BigInt::from(-300),
        BigInt::from(1) << 200u32,
        -(BigInt::from(1) << 200u32),
    ];
    for v in &valeurs {
        for largeur in LARGEURS {
            let une_fois = tronquer(v, largeur);
            assert!(une_fois <= largeur.masque(), "{v} sur {} bits", largeur.bits());
            let deux_fois = tronquer(&BigInt::from(une_fois.clone()), largeur);
            assert_eq!(une_fois, deux_fois, "{v} sur {} bits", largeur.bits());
        }
    }
}

#[test]
fn complement_a_deux_exemples_canoniques() {
    assert_eq!(tronquer(&BigInt::from(-1), LargeurBits::L8), u(255));
    assert_eq!(tronquer(&BigInt::from(-44), LargeurBits::L8), u(212));
    assert_eq!(tronquer(&BigInt::from(-1), LargeurBits::L16), u(0xFFFF));
}

#[test]
fn double_complement_identite() {
    for largeur in LARGEURS {
        let v = tronquer(&BigInt::from(0xA5A5_5A5Au32), largeur);
        assert_eq!(complement(&complement(&v, largeur), largeur), v);
    }
}

/* ------------------------ Pipeline complet ------------------------ */

#[test]
fn precedence_traverse_le_pipeline() {
    // 2+(3&1) = 3 : l'échelle non standard survit à la troncature
    let v = evaluer_expression("2+3&1", LargeurBits::L64, false).unwrap();
    assert_eq!(v, Valeur::Entier(BigInt::from(3)));
}

#[test]
fn caret_change_de_sens_avec_le_mode() {
    let xor = evaluer_brut("5^2", false).unwrap();
    let puissance = evaluer_brut("5^2", true).unwrap();
    assert_eq!(xor, Valeur::Entier(BigInt::from(7)));
    assert_eq!(puissance, Valeur::Entier(BigInt::from(25)));
}

#[test]
fn decalage_sort_du_mot() {
    let v = evaluer_expression("1<<8", LargeurBits::L8, false).unwrap();
    assert_eq!(v, Valeur::Entier(BigInt::from(0)));
    // le même décalage survit sur un mot plus large
    let v = evaluer_expression("1<<8", LargeurBits::L16, false).unwrap();
    assert_eq!(v, Valeur::Entier(BigInt::from(256)));
}

#[test]
fn resultat_negatif_se_lit_en_complement_a_deux() {
    let v = evaluer_expression("1-5", LargeurBits::L8, false).unwrap();
    assert_eq!(v, Valeur::Entier(BigInt::from(252)));
}

/* ------------------------ Détection ------------------------ */

#[test]
fn detection_monotone_sur_la_largeur() {
    // la largeur monte avec le littéral, jamais ne redescend
    let (_, l) = detecter("0xFF", Base::Decimale, LargeurBits::L8);
    assert_eq!(l, LargeurBits::L8);
    let (_, l) = detecter("0x1FF", Base::Decimale, l);
    assert_eq!(l, LargeurBits::L16);
    let (_, l) = detecter("0x1", Base::Decimale, l);
    assert_eq!(l, LargeurBits::L16);
}

/* ------------------------ Boutisme ------------------------ */

#[test]
fn boutisme_involutif_sur_toutes_les_largeurs() {
    for largeur in LARGEURS {
        let v = tronquer(&BigInt::from(0x0102_0304_0506_0708u64), largeur);
        let aller = boutisme::convertir(&v, largeur.bits()).unwrap();
        let retour = boutisme::convertir(&aller, largeur.bits()).unwrap();
        assert_eq!(retour, v, "{} bits", largeur.bits());
    }
}

#[test]
fn boutisme_seize_bits_valeur_canonique() {
    assert_eq!(boutisme::convertir(&u(0x1234), 16).unwrap(), u(0x3412));
}

/* ------------------------ Extraction ------------------------ */

#[test]
fn extraction_apres_pipeline() {
    let v = match evaluer_expression("0b1010+0", LargeurBits::L8, false).unwrap() {
        Valeur::Entier(v) => tronquer(&v, LargeurBits::L8),
        autre => panic!("attendu Entier, obtenu {autre:?}"),
    };
    let indices: BTreeSet<u32> = [1u32, 3].into_iter().collect();
    assert_eq!(selection::extraire(&v, &indices), u(0b11));
}
