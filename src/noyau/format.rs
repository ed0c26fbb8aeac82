// src/noyau/format.rs

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{FromPrimitive, Num};

use super::eval::Valeur;

/* ------------------------ Bases supportées ------------------------ */

/// Base d'entrée/sortie de la session. Gouverne à la fois le parse de la
/// saisie brute et le format de la valeur courante.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Base {
    Binaire,
    Octale,
    #[default]
    Decimale,
    Hexadecimale,
}

impl Base {
    pub fn radix(self) -> u32 {
        match self {
            Base::Binaire => 2,
            Base::Octale => 8,
            Base::Decimale => 10,
            Base::Hexadecimale => 16,
        }
    }

    pub fn depuis_radix(radix: u32) -> Option<Self> {
        match radix {
            2 => Some(Base::Binaire),
            8 => Some(Base::Octale),
            10 => Some(Base::Decimale),
            16 => Some(Base::Hexadecimale),
            _ => None,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base {}", self.radix())
    }
}

/* ------------------------ Format entier ------------------------ */

/// Formes canoniques : `0b…` (binaire), `0…` (octal, sans lettre de préfixe),
/// chiffres nus (décimal), `0X…` (hexadécimal majuscule).
pub fn formater_entier(v: &BigInt, base: Base) -> String {
    let signe = if v.sign() == Sign::Minus { "-" } else { "" };
    let magnitude = v.magnitude();

    match base {
        Base::Binaire => format!("{signe}0b{}", magnitude.to_str_radix(2)),
        Base::Octale => format!("{signe}0{}", magnitude.to_str_radix(8)),
        Base::Decimale => format!("{signe}{}", magnitude.to_str_radix(10)),
        Base::Hexadecimale => {
            format!("{signe}0X{}", magnitude.to_str_radix(16).to_uppercase())
        }
    }
}

/// Rendition sans préfixe (zones de conversion en lecture seule).
pub fn sans_prefixe(v: &BigUint, base: Base) -> String {
    match base {
        Base::Hexadecimale => v.to_str_radix(16).to_uppercase(),
        autre => v.to_str_radix(autre.radix()),
    }
}

/// Chaîne binaire bourrée de zéros à gauche jusqu'à `bits` chiffres
/// (affichage des cellules de bits, extraction cadrée sur la sélection).
pub fn binaire_cadre(v: &BigUint, bits: u64) -> String {
    let brut = v.to_str_radix(2);
    let manque = (bits as usize).saturating_sub(brut.len());
    let mut s = String::with_capacity(manque + brut.len());
    s.extend(std::iter::repeat('0').take(manque));
    s.push_str(&brut);
    s
}

/* ------------------------ Format flottant ------------------------ */

/// Nettoyage de précision : plus petit nombre de décimales (0..=15) qui
/// reproduit la valeur à 1e-10 près, zéros (et point) de queue retirés.
/// Un flottant entier redescend en chiffres nus.
pub fn formater_flottant(f: f64) -> String {
    if !f.is_finite() {
        return format!("{f}");
    }
    if f.fract() == 0.0 {
        return BigInt::from_f64(f).unwrap_or_default().to_string();
    }

    for decimales in 0..=15u32 {
        let facteur = 10f64.powi(decimales as i32);
        let arrondi = (f * facteur).round() / facteur;
        if (arrondi - f).abs() < 1e-10 {
            return nettoyer_queue(&format!("{arrondi:.prec$}", prec = decimales as usize));
        }
    }
    nettoyer_queue(&format!("{f:.15}"))
}

fn nettoyer_queue(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/* ------------------------ Format de Valeur ------------------------ */

/// Point de sortie unique : correspondance exhaustive sur l'union étiquetée
/// (pas de branchement dispersé sur le genre de la valeur).
pub fn formater(valeur: &Valeur, base: Base) -> String {
    match valeur {
        Valeur::Entier(v) => formater_entier(v, base),
        Valeur::Flottant(f) => formater_flottant(*f),
    }
}

/* ------------------------ Parse (inverse du format) ------------------------ */

/// Lit un texte dans une base : signe optionnel, `_` ignorés, préfixe
/// canonique de la base toléré (`0b`, `0o`, `0x`). Renvoie None sur texte
/// illisible — l'appelant décide (dégradation à zéro côté session).
pub fn parse_texte(texte: &str, base: Base) -> Option<BigInt> {
    let nettoye: String = texte.trim().chars().filter(|c| *c != '_').collect();
    if nettoye.is_empty() {
        return None;
    }

    let (negatif, corps) = match nettoye.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, nettoye.strip_prefix('+').unwrap_or(&nettoye)),
    };

    let corps = retirer_prefixe(corps, base);
    if corps.is_empty() {
        return None;
    }

    let v = BigInt::from_str_radix(corps, base.radix()).ok()?;
    Some(if negatif { -v } else { v })
}

fn retirer_prefixe(corps: &str, base: Base) -> &str {
    let marqueur = match base {
        Base::Binaire => "0b",
        Base::Octale => "0o",
        Base::Hexadecimale => "0x",
        Base::Decimale => return corps,
    };
    if corps.len() >= 2 && corps[..2].eq_ignore_ascii_case(marqueur) {
        &corps[2..]
    } else {
        corps
    }
}

/* ------------------------ Tests ------------------------ */
