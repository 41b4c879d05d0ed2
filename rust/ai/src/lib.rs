//! # pokermind-ai: Decision Providers
//!
//! Implementations of the engine's [`DecisionProvider`] seam: a deterministic
//! rule-based policy for local play and benchmarking, and a remote provider
//! that delegates each decision to an external language-model service with
//! validation, retries and a fold fallback.
//!
//! ## Core Components
//!
//! - [`baseline::RulePolicy`] - deterministic rule-based strategy
//! - [`remote::RemoteProvider`] - model-backed provider over a [`remote::ModelClient`]
//! - [`build_provider`] - factory mapping a roster entry to a provider

use pokermind_engine::provider::DecisionProvider;

pub mod baseline;
pub mod remote;

use remote::{HttpModelClient, RemoteProvider};

/// A roster entry: who sits down and what drives their decisions.
#[derive(Debug, Clone)]
pub enum SeatSpec {
    /// The built-in rule policy
    Rules { name: String },
    /// A remote model reachable at an OpenAI-style chat endpoint
    Model {
        name: String,
        endpoint: String,
        model: String,
        api_key: String,
    },
}

/// Build the decision provider for one roster entry.
pub fn build_provider(spec: &SeatSpec) -> (String, Box<dyn DecisionProvider>) {
    match spec {
        SeatSpec::Rules { name } => (
            name.clone(),
            Box::new(baseline::RulePolicy::new(name.clone())),
        ),
        SeatSpec::Model {
            name,
            endpoint,
            model,
            api_key,
        } => (
            name.clone(),
            Box::new(RemoteProvider::new(
                name.clone(),
                HttpModelClient::new(endpoint.clone(), model.clone(), api_key.clone()),
            )),
        ),
    }
}
