// src/noyau/jetons.rs

use super::erreurs::ErreurEval;

/// Jetons de l'expression.
///
/// `Nombre` garde le texte brut (préfixe et `_` compris) : c'est l'évaluateur
/// qui décide de la base au moment de lire le littéral.
#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Nombre(String),

    Plus,
    Moins,
    Etoile,
    Barre,

    Et,         // &
    Ou,         // |
    OuExclusif, // ^ (ou puissance en mode scientifique)

    DecalGauche, // <<
    DecalDroite, // >>

    // `<` / `>` isolés : jetons de repli mono-caractère. L'évaluateur les
    // traite comme n'importe quel jeton inattendu.
    ChevronGauche,
    ChevronDroit,

    ParG,
    ParD,
}

impl Jeton {
    /// Texte d'origine (diagnostics).
    pub fn texte(&self) -> String {
        match self {
            Jeton::Nombre(s) => s.clone(),
            Jeton::Plus => "+".into(),
            Jeton::Moins => "-".into(),
            Jeton::Etoile => "*".into(),
            Jeton::Barre => "/".into(),
            Jeton::Et => "&".into(),
            Jeton::Ou => "|".into(),
            Jeton::OuExclusif => "^".into(),
            Jeton::DecalGauche => "<<".into(),
            Jeton::DecalDroite => ">>".into(),
            Jeton::ChevronGauche => "<".into(),
            Jeton::ChevronDroit => ">".into(),
            Jeton::ParG => "(".into(),
            Jeton::ParD => ")".into(),
        }
    }
}

fn est_lettre_hex(c: char) -> bool {
    matches!(c, 'a'..='f' | 'A'..='F')
}

/// Caractères après lesquels une lettre a–f démarre un littéral hexadécimal
/// sans préfixe (contexte numérique ou ouvrant). Ailleurs, lettre = erreur.
fn contexte_hex(prec: char) -> bool {
    prec.is_ascii_digit()
        || matches!(
            prec,
            'x' | 'X' | '+' | '-' | '*' | '/' | '&' | '|' | '^' | '(' | ')'
        )
}

/// Tokenize une expression en jetons.
///
/// Règles lexicales :
/// - `0x`/`0b`/`0d` (insensible à la casse) en tête d'un littéral : le jeton
///   s'étend sur toute la suite alphanumérique/`_` (un marqueur nu vaut zéro);
/// - suite de chiffres : `_` admis; le point décimal (et un exposant `e`/`E`,
///   signe optionnel) ne sont consommés qu'en mode scientifique;
/// - `<<` / `>>` gloutons avant le repli mono-caractère;
/// - lettres a–f isolées : littéral hexadécimal sans préfixe si le caractère
///   brut précédent est un chiffre / `x` / opérateur / parenthèse, sinon
///   `ErreurEval::Lexicale`;
/// - tout autre caractère : `ErreurEval::Lexicale`.
pub fn decouper(expr: &str, mode_scientifique: bool) -> Result<Vec<Jeton>, ErreurEval> {
    let chars: Vec<char> = expr.chars().collect();
    let mut jetons = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Marqueur 0x / 0b / 0d : un seul jeton sur toute la suite alphanum.
        if c == '0'
            && i + 1 < chars.len()
            && matches!(chars[i + 1].to_ascii_lowercase(), 'x' | 'b' | 'd')
        {
            let debut = i;
            i += 2;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            jetons.push(Jeton::Nombre(chars[debut..i].iter().collect()));
            continue;
        }

        // Littéral décimal (et flottant / exposant en mode scientifique).
        if c.is_ascii_digit() || (c == '.' && mode_scientifique) {
            let debut = i;
            i += 1;
            while i < chars.len() {
                let n = chars[i];
                if n.is_ascii_digit() || n == '_' {
                    i += 1;
                    continue;
                }
                if mode_scientifique && n == '.' {
                    i += 1;
                    continue;
                }
                // exposant : `e5`, `e+5`, `e-5` (mode scientifique seulement)
                if mode_scientifique && matches!(n, 'e' | 'E') {
                    let apres = chars.get(i + 1);
                    let apres_signe = chars.get(i + 2);
                    match apres {
                        Some(d) if d.is_ascii_digit() => {
                            i += 2;
                            continue;
                        }
                        Some('+') | Some('-')
                            if apres_signe.is_some_and(|d| d.is_ascii_digit()) =>
                        {
                            i += 3;
                            continue;
                        }
                        _ => {}
                    }
                }
                break;
            }
            jetons.push(Jeton::Nombre(chars[debut..i].iter().collect()));
            continue;
        }

        // Opérateurs deux caractères d'abord, repli mono-caractère ensuite.
        if c == '<' {
            if chars.get(i + 1) == Some(&'<') {
                jetons.push(Jeton::DecalGauche);
                i += 2;
            } else {
                jetons.push(Jeton::ChevronGauche);
                i += 1;
            }
            continue;
        }
        if c == '>' {
            if chars.get(i + 1) == Some(&'>') {
                jetons.push(Jeton::DecalDroite);
                i += 2;
            } else {
                jetons.push(Jeton::ChevronDroit);
                i += 1;
            }
            continue;
        }

        let simple = match c {
            '+' => Some(Jeton::Plus),
            '-' => Some(Jeton::Moins),
            '*' => Some(Jeton::Etoile),
            '/' => Some(Jeton::Barre),
            '&' => Some(Jeton::Et),
            '|' => Some(Jeton::Ou),
            '^' => Some(Jeton::OuExclusif),
            '(' => Some(Jeton::ParG),
            ')' => Some(Jeton::ParD),
            _ => None,
        };
        if let Some(j) = simple {
            jetons.push(j);
            i += 1;
            continue;
        }

        // Lettres a–f sans préfixe : hexadécimal si le contexte s'y prête.
        if est_lettre_hex(c) {
            if i == 0 || contexte_hex(chars[i - 1]) {
                let debut = i;
                i += 1;
                while i < chars.len()
                    && (chars[i].is_ascii_digit() || est_lettre_hex(chars[i]) || chars[i] == '_')
                {
                    i += 1;
                }
                jetons.push(Jeton::Nombre(chars[debut..i].iter().collect()));
                continue;
            }
            return Err(ErreurEval::Lexicale(c));
        }

        return Err(ErreurEval::Lexicale(c));
    }

    Ok(jetons)
}

/* ------------------------ Tests ------------------------ */
