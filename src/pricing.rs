//! Token pricing for known models and the cost of a completed exchange.

use crate::core::{GenerationResult, Usage};

/// USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

const PRICING: &[(&str, ModelPricing)] = &[
    (
        "claude-3-5-sonnet-20241022",
        ModelPricing {
            input_per_million: 3.0,
            output_per_million: 15.0,
        },
    ),
    (
        "claude-3-5-haiku-20241022",
        ModelPricing {
            input_per_million: 0.8,
            output_per_million: 4.0,
        },
    ),
    (
        "claude-3-opus-20240229",
        ModelPricing {
            input_per_million: 15.0,
            output_per_million: 75.0,
        },
    ),
    (
        "claude-3-sonnet-20240229",
        ModelPricing {
            input_per_million: 3.0,
            output_per_million: 15.0,
        },
    ),
    (
        "claude-3-haiku-20240307",
        ModelPricing {
            input_per_million: 0.25,
            output_per_million: 1.25,
        },
    ),
];

/// Pricing for an exact model identifier, `None` if unknown.
pub fn pricing_for(model: &str) -> Option<ModelPricing> {
    PRICING
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, pricing)| *pricing)
}

impl ModelPricing {
    /// Each figure is rounded to six decimal places.
    pub fn cost(&self, usage: &Usage) -> CostBreakdown {
        let input_cost = f64::from(usage.input_tokens) * self.input_per_million / 1_000_000.0;
        let output_cost = f64::from(usage.output_tokens) * self.output_per_million / 1_000_000.0;

        CostBreakdown {
            input_cost: round6(input_cost),
            output_cost: round6(output_cost),
            total_cost: round6(input_cost + output_cost),
        }
    }
}

impl GenerationResult {
    /// Cost of this exchange, if the serving model has known pricing.
    pub fn cost(&self) -> Option<CostBreakdown> {
        pricing_for(&self.model).map(|pricing| pricing.cost(&self.usage))
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
