//! Shared test utilities
//!
//! Scripted stand-ins for the microphone, speech engine, rates API and
//! process launcher, so sessions run without audio hardware or network.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lia_assistant::skills::{ExchangeRateSnapshot, RateKind};
use lia_assistant::{
    Error, Launcher, RateFetcher, Result, Router, SkillSet, Speaker, Transcriber,
};

/// Replays a fixed list of transcriptions, then says goodbye
#[derive(Default)]
pub struct ScriptedTranscriber {
    turns: VecDeque<Result<String>>,
    pub calls: usize,
}

impl ScriptedTranscriber {
    pub fn new(turns: Vec<Result<String>>) -> Self {
        Self {
            turns: turns.into(),
            calls: 0,
        }
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok((*t).to_string())).collect())
    }
}

#[async_trait(?Send)]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&mut self, _max_seconds: u32) -> Result<String> {
        self.calls += 1;
        self.turns
            .pop_front()
            .unwrap_or_else(|| Ok("chau".to_string()))
    }
}

/// Records everything it is asked to say
#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Vec<String>,
    pub fail: bool,
}

impl RecordingSpeaker {
    pub fn failing() -> Self {
        Self {
            spoken: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait(?Send)]
impl Speaker for RecordingSpeaker {
    async fn speak(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Tts("no audio device".to_string()));
        }
        self.spoken.push(text.to_string());
        Ok(())
    }
}

/// Returns a fixed snapshot, or fails when none is set
pub struct FakeRates(pub Option<ExchangeRateSnapshot>);

impl FakeRates {
    pub fn quoted(oficial: Option<f64>, blue: Option<f64>) -> Self {
        let mut snapshot = ExchangeRateSnapshot::new();
        if let Some(price) = oficial {
            snapshot.insert(RateKind::Oficial, price);
        }
        if let Some(price) = blue {
            snapshot.insert(RateKind::Blue, price);
        }
        Self(Some(snapshot))
    }

    pub const fn unavailable() -> Self {
        Self(None)
    }
}

#[async_trait]
impl RateFetcher for FakeRates {
    async fn fetch_rates(&self) -> Result<ExchangeRateSnapshot> {
        self.0
            .clone()
            .ok_or_else(|| Error::Rates("connection refused".to_string()))
    }
}

/// Records launch commands instead of running them
#[derive(Clone, Default)]
pub struct FakeLauncher {
    pub launched: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl FakeLauncher {
    pub fn failing() -> Self {
        Self {
            launched: Arc::default(),
            fail: true,
        }
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, command: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Launch(format!("{command}: not found")));
        }
        self.launched.lock().unwrap().push(command.to_string());
        Ok(())
    }
}

/// Registry with a single `editor` entry
pub fn sample_apps() -> HashMap<String, String> {
    HashMap::from([("editor".to_string(), "gedit".to_string())])
}

pub fn skill_set(rates: FakeRates, launcher: FakeLauncher) -> SkillSet {
    SkillSet::new(Box::new(sample_apps()), Box::new(rates), Box::new(launcher))
}

pub fn router(rates: FakeRates, launcher: FakeLauncher) -> Router {
    Router::new(skill_set(rates, launcher))
}

/// Default collaborators: rates quoted, launches succeed
pub fn default_router() -> Router {
    router(
        FakeRates::quoted(Some(1025.5), Some(1210.0)),
        FakeLauncher::default(),
    )
}
