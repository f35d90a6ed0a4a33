use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::catalog::AdCatalog;
use super::model::{Ad, AdRequest, AdResponse};
use super::random::{shuffle, RandomSource, XorShiftRng};

/// Cap on matches per context key, and the size of the random fallback.
pub const MAX_ADS_TO_SERVE: usize = 2;

/// How contextual matches from several keys are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Each key contributes up to [`MAX_ADS_TO_SERVE`] matches. The same ad
    /// may appear once per matching key and the total is unbounded.
    #[default]
    PerKey,
    /// Matches are deduplicated by id (first occurrence wins) and the whole
    /// result is capped at [`MAX_ADS_TO_SERVE`].
    Deduplicated,
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per_key" => Ok(Self::PerKey),
            "deduplicated" => Ok(Self::Deduplicated),
            other => Err(format!(
                "unknown selection policy '{other}' (expected per_key or deduplicated)"
            )),
        }
    }
}

/// Picks ads for a request from a shared, read-only catalog.
pub struct AdSelector {
    catalog: Arc<AdCatalog>,
    policy: SelectionPolicy,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl AdSelector {
    /// Selector over `catalog` using an entropy-seeded generator.
    pub fn new(catalog: Arc<AdCatalog>, policy: SelectionPolicy) -> Self {
        Self::with_random_source(catalog, policy, Box::new(XorShiftRng::from_entropy()))
    }

    pub fn with_random_source(
        catalog: Arc<AdCatalog>,
        policy: SelectionPolicy,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            catalog,
            policy,
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &AdCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Answer an `ads.get` request.
    pub fn get_ads(&self, request: &AdRequest) -> AdResponse {
        self.select(request.keys()).into()
    }

    /// Contextual matches for `context_keys`, or a random sample when
    /// nothing matches.
    pub fn select(&self, context_keys: &[String]) -> Vec<Ad> {
        let contextual = match self.policy {
            SelectionPolicy::PerKey => self.match_per_key(context_keys),
            SelectionPolicy::Deduplicated => self.match_deduplicated(context_keys),
        };

        if contextual.is_empty() {
            let sample = self.random_sample();
            debug!(
                keys = context_keys.len(),
                served = sample.len(),
                "no contextual match, serving random ads"
            );
            return sample;
        }

        debug!(
            keys = context_keys.len(),
            served = contextual.len(),
            "serving contextual ads"
        );
        contextual
    }

    fn match_per_key(&self, context_keys: &[String]) -> Vec<Ad> {
        let mut result = Vec::new();
        for key in context_keys {
            let key = key.to_lowercase();
            result.extend(
                self.catalog
                    .ads()
                    .iter()
                    .filter(|ad| ad.matches(&key))
                    .take(MAX_ADS_TO_SERVE)
                    .cloned(),
            );
        }
        result
    }

    fn match_deduplicated(&self, context_keys: &[String]) -> Vec<Ad> {
        let mut seen = HashSet::new();
        self.match_per_key(context_keys)
            .into_iter()
            .filter(|ad| seen.insert(ad.id.clone()))
            .take(MAX_ADS_TO_SERVE)
            .collect()
    }

    fn random_sample(&self) -> Vec<Ad> {
        // Shuffle a copy; the shared catalog keeps its order.
        let mut ads = self.catalog.ads().to_vec();
        {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            shuffle(&mut ads, &mut **rng);
        }
        ads.truncate(MAX_ADS_TO_SERVE);
        ads
    }
}
