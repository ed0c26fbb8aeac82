// src/noyau/erreurs.rs

use thiserror::Error;

/// Erreurs du pipeline jetons → évaluation.
///
/// Politique de propagation : l'évaluateur remonte une erreur typée vers
/// l'appelant; il ne décide jamais de l'affichage. Aucune erreur n'est fatale —
/// l'état précédent reste intact et une ré-édition de la saisie suffit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurEval {
    /// Caractère hors alphabet de l'expression (lexique).
    #[error("caractère invalide dans l'expression : '{0}'")]
    Lexicale(char),

    /// `(` sans `)` correspondante.
    #[error("parenthèse fermante manquante")]
    ParentheseManquante,

    /// Lecture au-delà de la fin de la suite de jetons.
    #[error("fin d'expression inattendue")]
    FinPrematuree,

    /// Jeton impossible en position d'atome.
    #[error("jeton inattendu : {0}")]
    JetonInattendu(String),

    /// Littéral illisible dans toutes les bases supportées.
    #[error("format de nombre invalide : {0}")]
    FormatNombre(String),

    #[error("division par zéro")]
    DivisionParZero,

    /// Les opérateurs bit-à-bit et les décalages n'existent que sur Entier.
    #[error("opération impossible sur un flottant ({0})")]
    OperandeFlottant(&'static str),

    /// Décalage négatif ou au-delà du garde-fou.
    #[error("décalage hors limites")]
    DecalageHorsLimites,
}

/// Erreur de bascule de boutisme.
///
/// Ne devrait pas survenir avec les largeurs standard (la valeur est toujours
/// tronquée avant), mais la reconstruction d'octets reste un chemin vérifié,
/// jamais une troncature silencieuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurBoutisme {
    #[error("valeur trop large pour une reconstruction sur {0} octets")]
    Deborde(usize),
}
