//! Noyau — évaluation (descente récursive, sans AST)
//!
//! jetons -> expression -> terme -> facteur -> atome
//!
//! L'échelle de précédence est voulue et NON standard :
//! - expression : `+ -` (liaison la plus lâche, associatif gauche)
//! - terme      : `* /`
//! - facteur    : `& | ^ << >>` (un seul palier plat, plus serré que `* /`)
//! - atome      : littéral ou sous-expression parenthésée
//!
//! Autrement dit `2+3&1` se lit `2+(3&1)` et `2*3&1` se lit `2*(3&1)`.
//! Ne pas “corriger” vers la précédence C.
//!
//! Remarque : les jetons restant après l'expression de tête sont ignorés,
//! la saisie pouvant être en cours de frappe.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{FromPrimitive, Num, Pow, ToPrimitive, Zero};

use super::erreurs::ErreurEval;
use super::jetons::{decouper, Jeton};
use super::largeur::{tronquer, LargeurBits};

/// Garde-fou : quantité de décalage maximale (anti-gel mémoire).
const DECALAGE_MAX: u64 = 1 << 20;

/* ------------------------ Valeur (union étiquetée) ------------------------ */

/// Résultat numérique : entier exact (domaine bit-à-bit) ou flottant hôte
/// (mode scientifique seulement). La troncature et les opérateurs bit-à-bit
/// ne sont définis que sur `Entier`; `Flottant` les contourne ou les refuse.
#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Entier(BigInt),
    Flottant(f64),
}

impl Valeur {
    pub fn est_entier(&self) -> bool {
        matches!(self, Valeur::Entier(_))
    }

    /// Lecture en f64 (perte de précision assumée au-delà de 2^53).
    pub fn comme_f64(&self) -> f64 {
        match self {
            Valeur::Entier(v) => en_f64(v),
            Valeur::Flottant(f) => *f,
        }
    }
}

fn en_f64(v: &BigInt) -> f64 {
    v.to_f64().unwrap_or(if v.sign() == Sign::Minus {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}

/* ------------------------ Lecture d'un littéral ------------------------ */

/// Évalue un jeton NOMBRE.
///
/// Ordre d'essai :
/// 1. marqueur nu `0x`/`0b`/`0d` => zéro
/// 2. préfixe `0x`/`0b`/`0d` => base dédiée (échec de parse => zéro,
///    comportement hérité : le littéral préfixé illisible vaut 0)
/// 3. entier décimal exact
/// 4. flottant base 10 (notation exposant admise); résultat entier SANS
///    marqueur d'exposant dans le texte source => Entier
/// 5. entier hexadécimal sans préfixe
/// 6. sinon : `FormatNombre`
fn evaluer_nombre(texte: &str) -> Result<Valeur, ErreurEval> {
    let s = texte.to_lowercase();

    if s == "0x" || s == "0b" || s == "0d" {
        return Ok(Valeur::Entier(BigInt::zero()));
    }

    if let Some(reste) = s.strip_prefix("0x") {
        let v = BigInt::from_str_radix(&sans_soulignes(reste), 16).unwrap_or_default();
        return Ok(Valeur::Entier(v));
    }
    if let Some(reste) = s.strip_prefix("0b") {
        let v = BigInt::from_str_radix(&sans_soulignes(reste), 2).unwrap_or_default();
        return Ok(Valeur::Entier(v));
    }
    if let Some(reste) = s.strip_prefix("0d") {
        let v = BigInt::from_str_radix(&sans_soulignes(reste), 10).unwrap_or_default();
        return Ok(Valeur::Entier(v));
    }

    let nettoye = sans_soulignes(&s);

    // entier décimal exact d'abord (pas de passage par f64 : précision)
    if let Ok(v) = BigInt::from_str_radix(&nettoye, 10) {
        return Ok(Valeur::Entier(v));
    }

    if let Ok(f) = nettoye.parse::<f64>() {
        if f.is_finite() && f.fract() == 0.0 && !s.contains('e') {
            // "1.0" => entier; "1e3" garde le domaine flottant
            return Ok(Valeur::Entier(BigInt::from_f64(f).unwrap_or_default()));
        }
        return Ok(Valeur::Flottant(f));
    }

    match BigInt::from_str_radix(&nettoye, 16) {
        Ok(v) => Ok(Valeur::Entier(v)),
        Err(_) => Err(ErreurEval::FormatNombre(texte.to_string())),
    }
}

fn sans_soulignes(s: &str) -> String {
    s.chars().filter(|c| *c != '_').collect()
}

/* ------------------------ Opérations sur Valeur ------------------------ */

fn additionner(a: Valeur, b: Valeur) -> Valeur {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => Valeur::Entier(x + y),
        (x, y) => Valeur::Flottant(x.comme_f64() + y.comme_f64()),
    }
}

fn soustraire(a: Valeur, b: Valeur) -> Valeur {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => Valeur::Entier(x - y),
        (x, y) => Valeur::Flottant(x.comme_f64() - y.comme_f64()),
    }
}

fn multiplier(a: Valeur, b: Valeur) -> Valeur {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => Valeur::Entier(x * y),
        (x, y) => Valeur::Flottant(x.comme_f64() * y.comme_f64()),
    }
}

/// `/` : division entière plancher hors mode scientifique, division réelle
/// en mode scientifique. Zéro au diviseur = erreur typée dans les deux cas.
fn diviser(a: Valeur, b: Valeur, mode_scientifique: bool) -> Result<Valeur, ErreurEval> {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => {
            if y.is_zero() {
                return Err(ErreurEval::DivisionParZero);
            }
            if mode_scientifique {
                Ok(Valeur::Flottant(en_f64(&x) / en_f64(&y)))
            } else {
                Ok(Valeur::Entier(x.div_floor(&y)))
            }
        }
        (x, y) => {
            let (fx, fy) = (x.comme_f64(), y.comme_f64());
            if fy == 0.0 {
                return Err(ErreurEval::DivisionParZero);
            }
            if mode_scientifique {
                Ok(Valeur::Flottant(fx / fy))
            } else {
                Ok(Valeur::Flottant((fx / fy).floor()))
            }
        }
    }
}

/// `^` en mode scientifique : puissance. Exposant entier positif tenant sur
/// u32 => calcul exact; sinon repli flottant.
fn puissance(a: Valeur, b: Valeur) -> Valeur {
    if let (Valeur::Entier(x), Valeur::Entier(y)) = (&a, &b) {
        if y.sign() != Sign::Minus {
            if let Some(exp) = y.to_u32() {
                return Valeur::Entier(Pow::pow(x, exp));
            }
        }
    }
    Valeur::Flottant(a.comme_f64().powf(b.comme_f64()))
}

/// Extrait deux opérandes entiers, ou refuse l'opération sur flottant.
fn entiers(a: Valeur, b: Valeur, op: &'static str) -> Result<(BigInt, BigInt), ErreurEval> {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => Ok((x, y)),
        _ => Err(ErreurEval::OperandeFlottant(op)),
    }
}

fn quantite_decalage(y: &BigInt) -> Result<u64, ErreurEval> {
    if y.sign() == Sign::Minus {
        return Err(ErreurEval::DecalageHorsLimites);
    }
    match y.to_u64() {
        Some(n) if n <= DECALAGE_MAX => Ok(n),
        _ => Err(ErreurEval::DecalageHorsLimites),
    }
}

/* ------------------------ Descente récursive ------------------------ */

struct Analyseur<'a> {
    jetons: &'a [Jeton],
    position: usize,
    mode_scientifique: bool,
}

impl Analyseur<'_> {
    fn courant(&self) -> Option<&Jeton> {
        self.jetons.get(self.position)
    }

    /// Palier 1 : `+ -` (associatif gauche).
    fn expression(&mut self) -> Result<Valeur, ErreurEval> {
        let mut gauche = self.terme()?;
        loop {
            match self.courant() {
                Some(Jeton::Plus) => {
                    self.position += 1;
                    let droite = self.terme()?;
                    gauche = additionner(gauche, droite);
                }
                Some(Jeton::Moins) => {
                    self.position += 1;
                    let droite = self.terme()?;
                    gauche = soustraire(gauche, droite);
                }
                _ => break,
            }
        }
        Ok(gauche)
    }

    /// Palier 2 : `* /`.
    fn terme(&mut self) -> Result<Valeur, ErreurEval> {
        let mut gauche = self.facteur()?;
        loop {
            match self.courant() {
                Some(Jeton::Etoile) => {
                    self.position += 1;
                    let droite = self.facteur()?;
                    gauche = multiplier(gauche, droite);
                }
                Some(Jeton::Barre) => {
                    self.position += 1;
                    let droite = self.facteur()?;
                    gauche = diviser(gauche, droite, self.mode_scientifique)?;
                }
                _ => break,
            }
        }
        Ok(gauche)
    }

    /// Palier 3 : `& | ^ << >>` — un seul palier plat, PLUS serré que `* /`.
    fn facteur(&mut self) -> Result<Valeur, ErreurEval> {
        let mut gauche = self.atome()?;
        loop {
            match self.courant() {
                Some(Jeton::Et) => {
                    self.position += 1;
                    let droite = self.atome()?;
                    let (x, y) = entiers(gauche, droite, "&")?;
                    gauche = Valeur::Entier(x & y);
                }
                Some(Jeton::Ou) => {
                    self.position += 1;
                    let droite = self.atome()?;
                    let (x, y) = entiers(gauche, droite, "|")?;
                    gauche = Valeur::Entier(x | y);
                }
                Some(Jeton::OuExclusif) => {
                    self.position += 1;
                    let droite = self.atome()?;
                    if self.mode_scientifique {
                        // mode scientifique : `^` devient la puissance
                        gauche = puissance(gauche, droite);
                    } else {
                        let (x, y) = entiers(gauche, droite, "^")?;
                        gauche = Valeur::Entier(x ^ y);
                    }
                }
                Some(Jeton::DecalGauche) => {
                    self.position += 1;
                    let droite = self.atome()?;
                    let (x, y) = entiers(gauche, droite, "<<")?;
                    let n = quantite_decalage(&y)?;
                    gauche = Valeur::Entier(x << n);
                }
                Some(Jeton::DecalDroite) => {
                    self.position += 1;
                    let droite = self.atome()?;
                    let (x, y) = entiers(gauche, droite, ">>")?;
                    let n = quantite_decalage(&y)?;
                    gauche = Valeur::Entier(x >> n);
                }
                _ => break,
            }
        }
        Ok(gauche)
    }

    /// Palier 4 : littéral ou sous-expression parenthésée.
    fn atome(&mut self) -> Result<Valeur, ErreurEval> {
        let jeton = self.courant().ok_or(ErreurEval::FinPrematuree)?.clone();
        self.position += 1;

        match jeton {
            Jeton::Nombre(texte) => evaluer_nombre(&texte),
            Jeton::ParG => {
                let v = self.expression()?;
                match self.courant() {
                    Some(Jeton::ParD) => {
                        self.position += 1;
                        Ok(v)
                    }
                    _ => Err(ErreurEval::ParentheseManquante),
                }
            }
            autre => Err(ErreurEval::JetonInattendu(autre.texte())),
        }
    }
}

/* ------------------------ API publique ------------------------ */

/// Évalue une expression SANS troncature : le résultat entier peut être
/// négatif ou déborder du mot (la normalisation vient après, cf. largeur.rs).
pub fn evaluer_brut(texte: &str, mode_scientifique: bool) -> Result<Valeur, ErreurEval> {
    let jetons = decouper(texte, mode_scientifique)?;
    let mut analyseur = Analyseur {
        jetons: &jetons,
        position: 0,
        mode_scientifique,
    };
    analyseur.expression()
}

/// Pipeline complet côté valeur : évalue puis tronque les résultats entiers
/// à la largeur du mot. Les flottants contournent entièrement la troncature.
pub fn evaluer_expression(
    texte: &str,
    largeur: LargeurBits,
    mode_scientifique: bool,
) -> Result<Valeur, ErreurEval> {
    match evaluer_brut(texte, mode_scientifique)? {
        Valeur::Entier(v) => Ok(Valeur::Entier(BigInt::from(tronquer(&v, largeur)))),
        flottant @ Valeur::Flottant(_) => Ok(flottant),
    }
}

/* ------------------------ Tests ------------------------ */
