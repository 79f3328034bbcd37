//! Benchmarks for best price selection and source fan-out.

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use best_execution::application::services::{BestExecutionService, FanOutMode, select_best};
use best_execution::domain::value_objects::{OrderSide, PricePair, SourceId, Symbol, TradeAmount};
use best_execution::infrastructure::sources::{PriceSource, QuoteContext, SourceResult};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

#[derive(Debug)]
struct FixedSource {
    id: SourceId,
    pair: PricePair,
}

#[async_trait]
impl PriceSource for FixedSource {
    fn name(&self) -> &SourceId {
        &self.id
    }

    async fn fetch_prices(&self, ctx: &QuoteContext, _symbol: &Symbol) -> SourceResult<PricePair> {
        let pair = self.pair;
        ctx.run(async move { Ok(pair) }).await
    }
}

fn quotes(n: usize) -> Vec<(SourceId, PricePair)> {
    (0..n)
        .map(|i| {
            // Every fourth source ties at the best ask.
            let ask = if i % 4 == 0 { 100.0 } else { 100.0 + i as f64 };
            (SourceId::new(format!("s{i}")), PricePair::new(ask, ask - 1.0).unwrap())
        })
        .collect()
}

fn bench_select_best(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_best");
    for n in [2, 16, 256] {
        let quotes = quotes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &quotes, |b, quotes| {
            b.iter(|| select_best(OrderSide::Buy, black_box(quotes).iter().map(|(id, p)| (id, p))));
        });
    }
    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let symbol = Symbol::new("BTC").unwrap();
    let amount = TradeAmount::new(1.5).unwrap();

    let mut group = c.benchmark_group("execute");
    for mode in [FanOutMode::Concurrent, FanOutMode::Sequential] {
        for n in [2, 16] {
            let sources = quotes(n)
                .into_iter()
                .map(|(id, pair)| Arc::new(FixedSource { id, pair }) as Arc<dyn PriceSource>)
                .collect();
            let service = BestExecutionService::new(sources, mode);
            group.bench_function(BenchmarkId::new(mode.to_string(), n), |b| {
                b.to_async(&rt).iter(|| async {
                    service
                        .buy(&QuoteContext::background(), amount, &symbol)
                        .await
                        .unwrap()
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_select_best, bench_fan_out);
criterion_main!(benches);
