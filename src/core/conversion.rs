//! Conversion engine sitting between the aggregator and a [`RateResolver`].

use crate::core::currency::RateResolver;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Outcome of converting a single amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub value: f64,
    /// Set when the rate lookup failed and `value` is the unconverted amount.
    pub degraded: bool,
}

#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Conversion;
}

/// Delegates to a resolver and falls back to the original amount when the
/// lookup fails for any reason.
pub struct FallbackConverter<R: RateResolver> {
    resolver: R,
}

impl<R: RateResolver> FallbackConverter<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl<R: RateResolver> Converter for FallbackConverter<R> {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Conversion {
        match self.resolver.resolve(amount, from, to).await {
            Ok(value) => {
                debug!("Converted {amount} from {from} to {to}: {value}");
                Conversion {
                    value,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!("Currency conversion failed from {from} to {to}, using original amount: {e}");
                Conversion {
                    value: amount,
                    degraded: true,
                }
            }
        }
    }
}
