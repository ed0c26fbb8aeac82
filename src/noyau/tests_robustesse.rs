//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée, quantités de décalage bornées
//! - budget temps global
//! - sur grammaire bien formée, seules les erreurs de DOMAINE sont admises
//!   (division par zéro, opérande flottant, décalage hors limites); une
//!   erreur de syntaxe signalerait un générateur cassé
//! - sur saisie de caractères arbitraires : jamais de panique, une erreur
//!   typée ou une valeur, rien d'autre

use std::time::{Duration, Instant};

use num_bigint::BigInt;

use super::erreurs::ErreurEval;
use super::eval::{evaluer_brut, evaluer_expression, Valeur};
use super::largeur::LARGEURS;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {max:?}");
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn est_erreur_de_domaine(e: &ErreurEval) -> bool {
    // Liste blanche : erreurs *normales* sur une grammaire bien formée.
    matches!(
        e,
        ErreurEval::DivisionParZero
            | ErreurEval::OperandeFlottant(_)
            | ErreurEval::DecalageHorsLimites
    )
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 => format!("{}", rng.pick(10)),
        1 => format!("0x{:X}", rng.pick(0x1000)),
        2 => format!("0b{:b}", rng.pick(64)),
        3 => format!("0d{}", rng.pick(1000)),
        4 => "0".to_string(),
        5 => format!("{}", rng.pick(256)),
        _ => "ff".to_string(), // hexadécimal sans préfixe (repli)
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(10) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}&{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("({}|{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        7 => format!("({}^{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        // décalages : quantité bornée, côté droit atomique
        8 => format!("({}<<{})", gen_expr(rng, depth - 1), rng.pick(9)),
        _ => format!("({}>>{})", gen_expr(rng, depth - 1), rng.pick(9)),
    }
}

/// Saisie de caractères arbitraires (clavier martelé).
fn gen_junk(rng: &mut Rng) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefxXbBdD+-*/&|^<>()._ gz";
    let longueur = 1 + rng.pick(24) as usize;
    (0..longueur)
        .map(|_| CHARSET[rng.pick(CHARSET.len() as u32) as usize] as char)
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_grammaire_bien_formee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match evaluer_brut(&expr, false) {
            Ok(v) => {
                assert!(v.est_entier(), "mode normal => toujours Entier: {expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    est_erreur_de_domaine(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne balaye rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop sage");
}

#[test]
fn fuzz_safe_troncature_toujours_dans_le_mot() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let largeur = LARGEURS[rng.pick(LARGEURS.len() as u32) as usize];

        if let Ok(Valeur::Entier(v)) = evaluer_expression(&expr, largeur, false) {
            assert!(v >= BigInt::from(0), "{expr:?} sur {largeur}");
            assert!(
                v <= BigInt::from(largeur.masque()),
                "{expr:?} sur {largeur}"
            );
        }
    }
}

#[test]
fn fuzz_safe_saisie_arbitraire_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xDEAD_BEEF_u64);

    for _ in 0..300 {
        budget(t0, max);

        let mut junk = gen_junk(&mut rng);
        let mode = rng.coin();
        if mode {
            // garde-fou fuzz : en mode scientifique `^` est la puissance, un
            // exposant arbitraire pourrait faire exploser la mémoire
            junk = junk.replace('^', "|");
        }
        // n'importe quelle issue typée est acceptable, l'absence de panique
        // est l'invariant testé
        let _ = evaluer_brut(&junk, mode);
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let sorties = |seed: u64| -> Vec<String> {
        let mut rng = Rng::new(seed);
        (0..60)
            .map(|_| {
                let expr = gen_expr(&mut rng, 3);
                format!("{:?}", evaluer_brut(&expr, false))
            })
            .collect()
    };

    // Même seed => mêmes expressions => mêmes sorties.
    assert_eq!(sorties(42), sorties(42));
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("1", 800);
    budget(t0, max);

    match evaluer_brut(&expr, false) {
        Ok(Valeur::Entier(v)) => assert_eq!(v, BigInt::from(800)),
        autre => panic!("attendu 800, obtenu {autre:?}"),
    }
}
