//! src/historique.rs
//!
//! Historique des saisies, persistant sur disque.
//!
//! Format : fichier texte, une entrée par ligne, de la plus ancienne à la
//! plus récente. Resoumettre une entrée déjà présente la remonte en fin de
//! liste (la combobox de la coquille lit la liste à l'envers).
//!
//! Contrats :
//! - fichier absent = historique vide, jamais une erreur;
//! - au plus `MAX_ENTREES` lignes conservées (les plus récentes);
//! - pas de doublons.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Garde-fou : taille maximale de l'historique persistant.
pub const MAX_ENTREES: usize = 100;

const NOM_FICHIER: &str = ".calculatrice_binaire_historique.txt";

#[derive(Clone, Debug)]
pub struct Historique {
    chemin: PathBuf,
}

impl Historique {
    /// Historique dans le répertoire personnel (`$HOME`), ou dans le
    /// répertoire courant si la variable n'est pas posée.
    pub fn par_defaut() -> Self {
        let racine = std::env::var_os("HOME").map_or_else(PathBuf::new, PathBuf::from);
        Self {
            chemin: racine.join(NOM_FICHIER),
        }
    }

    /// Historique à un emplacement explicite (tests, configuration).
    pub fn au_chemin(chemin: impl Into<PathBuf>) -> Self {
        Self {
            chemin: chemin.into(),
        }
    }

    pub fn chemin(&self) -> &Path {
        &self.chemin
    }

    /// Charge les entrées, de la plus ancienne à la plus récente.
    pub fn charger(&self) -> io::Result<Vec<String>> {
        let contenu = match fs::read_to_string(&self.chemin) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        Ok(contenu
            .lines()
            .map(str::trim_end)
            .filter(|ligne| !ligne.is_empty())
            .map(String::from)
            .collect())
    }

    /// Réécrit le fichier entier (une entrée par ligne).
    pub fn sauvegarder(&self, entrees: &[String]) -> io::Result<()> {
        let mut contenu = String::new();
        for entree in entrees {
            contenu.push_str(entree);
            contenu.push('\n');
        }
        fs::write(&self.chemin, contenu)
    }

    /// Ajoute une entrée en fin de liste : le doublon éventuel est d'abord
    /// retiré, puis la liste est rognée aux `MAX_ENTREES` plus récentes.
    pub fn ajouter(&self, entree: &str) -> io::Result<()> {
        let mut entrees = self.charger()?;
        entrees.retain(|e| e != entree);
        entrees.push(entree.to_string());

        if entrees.len() > MAX_ENTREES {
            let debut = entrees.len() - MAX_ENTREES;
            entrees.drain(..debut);
        }

        self.sauvegarder(&entrees)
    }
}

/* ------------------------ Tests ------------------------ */
