//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use best_execution::application::services::{BestExecutionService, FanOutMode};
use best_execution::domain::value_objects::{PricePair, SourceId, Symbol, TradeAmount};
use best_execution::infrastructure::sources::{
    PriceSource, QuoteContext, SourceError, SourceResult,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory price source with a fixed answer.
#[derive(Debug)]
pub struct MockSource {
    id: SourceId,
    result: SourceResult<PricePair>,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn quoting(name: &str, ask: f64, bid: f64) -> Self {
        Self::with_result(name, Ok(PricePair::new(ask, bid).unwrap()))
    }

    pub fn failing(name: &str) -> Self {
        Self::with_result(name, Err(SourceError::connection(format!("{} error", name))))
    }

    pub fn with_result(name: &str, result: SourceResult<PricePair>) -> Self {
        Self {
            id: SourceId::new(name),
            result,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for MockSource {
    fn name(&self) -> &SourceId {
        &self.id
    }

    async fn fetch_prices(&self, ctx: &QuoteContext, _symbol: &Symbol) -> SourceResult<PricePair> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delay;
        let result = self.result.clone();
        ctx.run(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        })
        .await
    }
}

pub fn service(sources: Vec<MockSource>, fan_out: FanOutMode) -> BestExecutionService {
    let sources = sources
        .into_iter()
        .map(|source| Arc::new(source) as Arc<dyn PriceSource>)
        .collect();
    BestExecutionService::new(sources, fan_out)
}

pub fn symbol(value: &str) -> Symbol {
    Symbol::new(value).unwrap()
}

pub fn amount(value: f64) -> TradeAmount {
    TradeAmount::new(value).unwrap()
}

pub fn winner_names(winners: &[SourceId]) -> Vec<&str> {
    winners.iter().map(SourceId::as_str).collect()
}
