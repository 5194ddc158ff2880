use crate::core::catalog::{
    DOMAIN_API_TYPES, FRAMEWORKS, PLACEHOLDER_API_TYPES, PLACEHOLDER_DOMAIN, RESOURCES,
    RISK_FACTORS, SUBDOMAINS,
};
use crate::core::ids::new_id;
use crate::domain::model::{Endpoint, Environment, ResultProfile};
use crate::domain::ports::RandomSource;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub profile: ResultProfile,
    pub endpoint_count: RangeInclusive<usize>,
    pub risk_factor_count: RangeInclusive<usize>,
}

impl GeneratorSettings {
    pub fn for_profile(profile: ResultProfile) -> Self {
        let endpoint_count = match profile {
            ResultProfile::Domain => 3..=10,
            ResultProfile::Placeholder => 1..=5,
        };
        Self {
            profile,
            endpoint_count,
            risk_factor_count: 1..=5,
        }
    }

    /// Apply configured bounds. Endpoint counts never drop below one and the
    /// risk-factor ceiling never exceeds the catalog.
    pub fn with_overrides(
        mut self,
        min_endpoints: Option<usize>,
        max_endpoints: Option<usize>,
        max_risk_factors: Option<usize>,
    ) -> Self {
        let min = min_endpoints
            .unwrap_or(*self.endpoint_count.start())
            .max(1);
        let max = max_endpoints.unwrap_or(*self.endpoint_count.end()).max(min);
        self.endpoint_count = min..=max;

        let risk_max = max_risk_factors
            .unwrap_or(*self.risk_factor_count.end())
            .clamp(1, RISK_FACTORS.len());
        self.risk_factor_count = 1..=risk_max;
        self
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::for_profile(ResultProfile::default())
    }
}

/// Produces synthetic endpoint findings. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct ResultGenerator {
    settings: GeneratorSettings,
}

impl ResultGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    pub fn generate(&self, domain_name: &str, random: &mut dyn RandomSource) -> Vec<Endpoint> {
        let count = pick_bounded(random, &self.settings.endpoint_count);
        (0..count)
            .map(|_| self.endpoint(domain_name, random))
            .collect()
    }

    fn endpoint(&self, domain_name: &str, random: &mut dyn RandomSource) -> Endpoint {
        let (host_domain, api_types): (&str, &[&str]) = match self.settings.profile {
            ResultProfile::Domain => (domain_name, &DOMAIN_API_TYPES[..]),
            ResultProfile::Placeholder => (PLACEHOLDER_DOMAIN, &PLACEHOLDER_API_TYPES[..]),
        };

        Endpoint {
            id: new_id(),
            path: format!("/api/v1/{}", choose(random, &RESOURCES)),
            hostname: format!("{}.{}", choose(random, &SUBDOMAINS), host_domain),
            environment: choose(random, &Environment::ALL),
            framework: choose(random, &FRAMEWORKS).to_string(),
            api_type: choose(random, api_types).to_string(),
            risk_factors: self.risk_factors(random),
        }
    }

    fn risk_factors(&self, random: &mut dyn RandomSource) -> Vec<String> {
        let amount = pick_bounded(random, &self.settings.risk_factor_count);
        sample_without_replacement(random, RISK_FACTORS.len(), amount)
            .into_iter()
            .map(|i| RISK_FACTORS[i].to_string())
            .collect()
    }
}

fn pick_bounded(random: &mut dyn RandomSource, range: &RangeInclusive<usize>) -> usize {
    random
        .pick_in_range(range.clone())
        .max(*range.start())
        .min(*range.end())
}

fn choose<T: Copy>(random: &mut dyn RandomSource, items: &[T]) -> T {
    let last = items.len() - 1;
    items[random.pick_index(items.len()).min(last)]
}

/// Partial Fisher-Yates over `0..len`, returning `amount` distinct indices.
fn sample_without_replacement(
    random: &mut dyn RandomSource,
    len: usize,
    amount: usize,
) -> Vec<usize> {
    let amount = amount.min(len);
    let mut pool: Vec<usize> = (0..len).collect();
    for i in 0..amount {
        let j = random.pick_in_range(i..=len - 1).clamp(i, len - 1);
        pool.swap(i, j);
    }
    pool.truncate(amount);
    pool
}
