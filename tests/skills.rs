//! Skill and routing tests

use std::collections::HashMap;

use lia_assistant::intent::RecognizedIntent;
use lia_assistant::router::UNRECOGNIZED_REPLY;
use lia_assistant::{Intent, IntentMatcher};

mod common;

use common::{FakeLauncher, FakeRates, default_router, router, skill_set};

#[tokio::test]
async fn test_all_rates_listed_in_order() {
    let skills = skill_set(
        FakeRates::quoted(Some(1025.5), Some(1210.0)),
        FakeLauncher::default(),
    );

    let reply = skills.currency_rate(None).await;
    assert_eq!(reply, "oficial: 1025.50 pesos; blue: 1210.00 pesos");
}

#[tokio::test]
async fn test_empty_snapshot_gives_empty_reply() {
    let skills = skill_set(FakeRates::quoted(None, None), FakeLauncher::default());
    assert_eq!(skills.currency_rate(None).await, "");
}

#[tokio::test]
async fn test_requested_rate_present_and_absent() {
    let skills = skill_set(FakeRates::quoted(None, Some(1210.0)), FakeLauncher::default());

    assert_eq!(
        skills.currency_rate(Some("blue")).await,
        "El dólar blue está a 1210.00 pesos."
    );
    assert_eq!(
        skills.currency_rate(Some("oficial")).await,
        "No reconozco la cotización 'oficial'."
    );
}

#[tokio::test]
async fn test_fetch_failure_is_apology() {
    let skills = skill_set(FakeRates::unavailable(), FakeLauncher::default());

    for which in [None, Some("oficial")] {
        assert_eq!(
            skills.currency_rate(which).await,
            "No pude obtener la cotización del dólar en este momento."
        );
    }
}

#[test]
fn test_open_unconfigured_app_launches_nothing() {
    let launcher = FakeLauncher::default();
    let skills = skill_set(FakeRates::unavailable(), launcher.clone());

    let (launched, reply) = skills.open_app("navegador");
    assert!(!launched);
    assert_eq!(reply, "No tengo configurado cómo abrir 'navegador'.");
    assert!(launcher.launched().is_empty());
}

#[test]
fn test_open_configured_app() {
    let launcher = FakeLauncher::default();
    let skills = skill_set(FakeRates::unavailable(), launcher.clone());

    let (launched, reply) = skills.open_app("editor");
    assert!(launched);
    assert_eq!(reply, "Abriendo editor.");
    assert_eq!(launcher.launched(), vec!["gedit"]);
}

#[test]
fn test_open_app_launch_failure() {
    let skills = skill_set(FakeRates::unavailable(), FakeLauncher::failing());

    let (launched, reply) = skills.open_app("editor");
    assert!(!launched);
    assert_eq!(reply, "Hubo un problema al intentar abrir editor.");
}

#[tokio::test]
async fn test_router_speaks_every_intent() {
    let router = default_router();
    let matcher = IntentMatcher::new();

    for text in [
        "hola",
        "qué hora es",
        "qué día es hoy",
        "dólar blue",
        "abrir editor",
        "abrir navegador",
        "chau",
        "contame un chiste",
    ] {
        let outcome = router.route(&matcher.classify(text)).await;
        assert!(outcome.should_speak, "{text}");
        assert!(!outcome.message.is_empty(), "{text}");
    }
}

#[tokio::test]
async fn test_router_replies() {
    let router = default_router();
    let matcher = IntentMatcher::new();

    let outcome = router.route(&matcher.classify("hola")).await;
    assert_eq!(outcome.message, "Hola, ¿en qué puedo ayudarte hoy?");

    let outcome = router.route(&matcher.classify("chau")).await;
    assert_eq!(outcome.message, "Hasta luego, ¡que tengas un buen día!");

    let outcome = router.route(&matcher.classify("dólar oficial")).await;
    assert_eq!(outcome.message, "El dólar oficial está a 1025.50 pesos.");

    let outcome = router.route(&RecognizedIntent::unrecognized()).await;
    assert_eq!(outcome.message, UNRECOGNIZED_REPLY);
}

#[tokio::test]
async fn test_router_open_app_without_name() {
    let launcher = FakeLauncher::default();
    let router = router(FakeRates::unavailable(), launcher.clone());

    let recognized = RecognizedIntent {
        intent: Intent::OpenApp,
        parameters: HashMap::new(),
    };
    let outcome = router.route(&recognized).await;

    assert_eq!(outcome.message, "No tengo configurado cómo abrir ''.");
    assert!(launcher.launched().is_empty());
}
