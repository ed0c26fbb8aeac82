//! src/etat.rs
//!
//! État de session (sans vue).
//!
//! Rôle : contenir l'état de la calculatrice (texte courant, base, largeur,
//! boutisme, mode, sélection de bits) et offrir les opérations que la coquille
//! de présentation déclenche, sans aucune logique d'affichage.
//!
//! Contrats :
//! - La valeur courante est TOUJOURS lue tronquée à la largeur du mot : la
//!   seule vérité est `valeur_courante()`, jamais le texte brut.
//! - Texte illisible = zéro (saisie en cours d'édition, jamais une erreur).
//! - Toute dépose de texte repasse par la détection base/largeur.
//! - La sélection de bits ne contient que des indices dans `[0, largeur)`.

use std::collections::BTreeSet;

use num_bigint::{BigInt, BigUint};

use crate::noyau::boutisme::{self, Bascule};
use crate::noyau::detection::detecter;
use crate::noyau::erreurs::{ErreurBoutisme, ErreurEval};
use crate::noyau::eval::{evaluer_brut, Valeur};
use crate::noyau::format::{
    binaire_cadre, formater_entier, formater_flottant, parse_texte, sans_prefixe, Base,
};
use crate::noyau::largeur::{self, LargeurBits, SensDecalage};
use crate::noyau::selection;

/// Caractères qui font d'un texte une expression (et non un simple nombre).
const OPERATEURS: &[char] = &['+', '-', '*', '/', '&', '|', '^'];

#[derive(Clone, Debug)]
pub struct SessionCalc {
    // --- saisie ---
    pub texte: String,

    // --- paramètres de représentation ---
    pub base: Base,
    pub largeur: LargeurBits,
    pub petit_boutiste: bool,
    pub mode_scientifique: bool,

    // --- sélection de bits (indices, 0 = poids faible) ---
    pub selection: BTreeSet<u32>,
}

impl Default for SessionCalc {
    fn default() -> Self {
        Self {
            texte: "0".to_string(),
            base: Base::Decimale,
            largeur: LargeurBits::L64,
            petit_boutiste: true, // convention machine usuelle au démarrage
            mode_scientifique: false,
            selection: BTreeSet::new(),
        }
    }
}

impl SessionCalc {
    /* ------------------------ Lecture de la valeur ------------------------ */

    /// Valeur courante, tronquée à la largeur du mot. Un texte illisible
    /// (saisie en cours, expression non réduite) se lit zéro.
    pub fn valeur_courante(&self) -> BigUint {
        let brut = parse_texte(&self.texte, self.base).unwrap_or_default();
        largeur::tronquer(&brut, self.largeur)
    }

    /// Vrai si le texte contient un opérateur : la coquille gèle alors les
    /// éditions bit à bit (la valeur affichée n'est pas encore réduite).
    pub fn contient_operateur(&self) -> bool {
        self.texte.contains(OPERATEURS)
    }

    /* ------------------------ Dépose de texte / valeur ------------------------ */

    /// Remplace le texte courant et fait suivre la détection base/largeur.
    pub fn deposer_texte(&mut self, texte: impl Into<String>) {
        self.texte = texte.into();
        let (base, largeur) = detecter(&self.texte, self.base, self.largeur);
        self.base = base;
        self.set_largeur(largeur);
    }

    /// Dépose une valeur (déjà tronquée) formatée dans la base courante.
    pub fn deposer_valeur(&mut self, valeur: &BigUint) {
        let texte = formater_entier(&BigInt::from(valeur.clone()), self.base);
        self.deposer_texte(texte);
    }

    /// C : retour au texte neutre, sans toucher aux paramètres.
    pub fn effacer(&mut self) {
        self.texte = "0".to_string();
    }

    /* ------------------------ Évaluation ------------------------ */

    /// `=` : évalue le texte courant, tronque le résultat entier à la largeur
    /// du mot et redépose le tout comme nouveau texte. Les flottants (mode
    /// scientifique) échappent à la troncature.
    pub fn calculer(&mut self) -> Result<(), ErreurEval> {
        let valeur = evaluer_brut(&self.texte, self.mode_scientifique)?;
        match valeur {
            Valeur::Entier(v) => {
                let tronquee = largeur::tronquer(&v, self.largeur);
                self.deposer_valeur(&tronquee);
            }
            Valeur::Flottant(f) => {
                self.deposer_texte(formater_flottant(f));
            }
        }
        Ok(())
    }

    /* ------------------------ Éditions bit à bit ------------------------ */

    /// Bascule un bit de la valeur courante; le bit touché devient la
    /// sélection courante. Hors du mot : sans effet.
    pub fn basculer_bit(&mut self, index: u32) {
        if index >= self.largeur.bits() {
            return;
        }
        let v = largeur::basculer_bit(&self.valeur_courante(), index);
        self.deposer_valeur(&v);
        self.selection.clear();
        self.selection.insert(index);
    }

    /// Inverse chaque bit de la sélection courante. Sélection vide : sans effet.
    pub fn inverser_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let v = largeur::inverser_bits(&self.valeur_courante(), &self.selection);
        self.deposer_valeur(&v);
    }

    /// Décalage logique dans le mot (les bits sortis sont perdus).
    pub fn decaler(&mut self, quantite: u32, sens: SensDecalage) {
        let v = largeur::decaler(&self.valeur_courante(), self.largeur, quantite, sens);
        self.deposer_valeur(&v);
    }

    /// Complément bit-à-bit dans la largeur du mot.
    pub fn complement(&mut self) {
        let v = largeur::complement(&self.valeur_courante(), self.largeur);
        self.deposer_valeur(&v);
    }

    /* ------------------------ Boutisme ------------------------ */

    /// Bascule le sens de lecture des octets. Le sens demandé devient l'état
    /// de session même quand la conversion est sans effet (8 bits).
    pub fn basculer_boutisme(&mut self, petit_boutiste: bool) -> Result<Bascule, ErreurBoutisme> {
        if petit_boutiste == self.petit_boutiste {
            return Ok(Bascule::DejaDansCeSens);
        }
        self.petit_boutiste = petit_boutiste;

        if self.largeur == LargeurBits::L8 {
            return Ok(Bascule::SansEffetHuitBits);
        }

        let v = boutisme::convertir(&self.valeur_courante(), self.largeur.bits())?;
        self.deposer_valeur(&v);
        Ok(Bascule::Convertie)
    }

    /* ------------------------ Sélection de bits ------------------------ */

    /// Sélectionne un seul bit (remplace la sélection).
    pub fn selectionner_seul(&mut self, index: u32) {
        self.selection.clear();
        if index < self.largeur.bits() {
            self.selection.insert(index);
        }
    }

    /// Sélectionne la plage `[min, max]` (remplace la sélection), bornée
    /// au mot courant.
    pub fn selectionner_plage(&mut self, a: u32, b: u32) {
        let (bas, haut) = if a <= b { (a, b) } else { (b, a) };
        self.selection.clear();
        for idx in bas..=haut.min(self.largeur.bits().saturating_sub(1)) {
            self.selection.insert(idx);
        }
    }

    /// Ajoute ou retire un bit de la sélection (clic modifié).
    pub fn basculer_selection(&mut self, index: u32) {
        if index >= self.largeur.bits() {
            return;
        }
        if !self.selection.remove(&index) {
            self.selection.insert(index);
        }
    }

    pub fn vider_selection(&mut self) {
        self.selection.clear();
    }

    /// Sous-mot extrait de la sélection courante, avec son étiquette lisible.
    /// None si rien n'est sélectionné.
    pub fn extraction(&self) -> Option<(BigUint, String)> {
        if self.selection.is_empty() {
            return None;
        }
        let valeur = selection::extraire(&self.valeur_courante(), &self.selection);
        let etiquette = selection::etiquette(&self.selection);
        Some((valeur, etiquette))
    }

    /* ------------------------ Paramètres ------------------------ */

    /// Change la base d'affichage. La valeur n'est PAS reformatée ici : la
    /// coquille redépose la valeur courante si elle veut voir le texte suivre.
    pub fn set_base(&mut self, base: Base) {
        self.base = base;
    }

    /// Change la largeur du mot. Les indices sélectionnés qui sortent du
    /// nouveau mot sont abandonnés.
    pub fn set_largeur(&mut self, largeur: LargeurBits) {
        self.largeur = largeur;
        let bits = self.largeur.bits();
        self.selection.retain(|idx| *idx < bits);
    }

    /* ------------------------ Zones de conversion ------------------------ */

    /// Les quatre renditions sans préfixe (binaire, octal, décimal, hexa)
    /// de la valeur courante, pour les zones de conversion en lecture seule.
    pub fn affichages(&self) -> [String; 4] {
        let v = self.valeur_courante();
        [
            sans_prefixe(&v, Base::Binaire),
            sans_prefixe(&v, Base::Octale),
            sans_prefixe(&v, Base::Decimale),
            sans_prefixe(&v, Base::Hexadecimale),
        ]
    }

    /// Chaîne binaire cadrée sur la largeur du mot (une cellule par bit).
    pub fn bits_cadres(&self) -> String {
        binaire_cadre(&self.valeur_courante(), u64::from(self.largeur.bits()))
    }
}

/* ------------------------ Tests ------------------------ */
