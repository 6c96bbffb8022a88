//! Shared application state for all routes. The store is constructed by the caller and injected.

use crate::store::TriviaStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TriviaStore>,
    /// Randomness for quiz selection. Seeded for reproducible runs, entropy otherwise.
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(store: Arc<dyn TriviaStore>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}
