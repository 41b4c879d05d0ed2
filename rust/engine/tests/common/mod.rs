use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use pokermind_engine::engine::{Engine, GameConfig};
use pokermind_engine::provider::{Decision, DecisionContext, DecisionProvider};

/// Provider that plays from a fixed script, then calls (checks) forever.
pub struct Scripted {
    name: String,
    plan: Mutex<VecDeque<Decision>>,
}

impl Scripted {
    pub fn new(name: &str, plan: Vec<Decision>) -> Box<dyn DecisionProvider> {
        Box::new(Self {
            name: name.to_string(),
            plan: Mutex::new(plan.into()),
        })
    }

    pub fn calls(name: &str) -> Box<dyn DecisionProvider> {
        Self::new(name, Vec::new())
    }
}

#[async_trait]
impl DecisionProvider for Scripted {
    async fn decide(&self, _ctx: &DecisionContext) -> Decision {
        self.plan
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Decision::Call)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn config(seed: u64) -> GameConfig {
    GameConfig {
        game_id: "test".to_string(),
        seed: Some(seed),
        ..GameConfig::default()
    }
}

pub fn engine_with(seed: u64, roster: Vec<(&str, Box<dyn DecisionProvider>)>) -> Engine {
    let roster = roster
        .into_iter()
        .map(|(name, provider)| (name.to_string(), provider))
        .collect();
    Engine::new(config(seed), roster)
}

pub fn total_chips(engine: &Engine) -> u32 {
    engine.table().total_chips()
}
