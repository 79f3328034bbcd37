//! # Best-Execution Service
//!
//! Queries every price source for a symbol and picks the best price.
//!
//! The service fans a request out to all configured [`PriceSource`]s,
//! drops the ones that fail (logging each failure), and reduces the
//! remaining quotes with [`select_best`]:
//!
//! - a **buy** takes the lowest ask, a **sell** the highest bid;
//! - every source quoting exactly the winning price is reported, in the
//!   order the sources were supplied;
//! - if nothing succeeded the request fails with
//!   [`ExecutionError::NoPriceAvailable`].

use crate::application::error::{ExecutionError, ExecutionResult};
use crate::domain::value_objects::{OrderSide, PricePair, SourceId, Symbol, TradeAmount};
use crate::infrastructure::sources::{PriceSource, QuoteContext, SourceResult};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How sources are consulted for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanOutMode {
    /// All sources are queried at once; latency is that of the slowest.
    #[default]
    Concurrent,
    /// Sources are queried one after another; latency is the sum.
    Sequential,
}

impl fmt::Display for FanOutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concurrent => write!(f, "concurrent"),
            Self::Sequential => write!(f, "sequential"),
        }
    }
}

/// Outcome of asking one source for one request.
#[derive(Debug, Clone)]
pub struct SourceQuote {
    /// The source that was asked.
    pub source: SourceId,
    /// Its prices, or why it could not provide them.
    pub result: SourceResult<PricePair>,
}

impl SourceQuote {
    /// Returns the price pair if the call succeeded.
    #[must_use]
    pub fn pair(&self) -> Option<&PricePair> {
        self.result.as_ref().ok()
    }
}

/// Winning price and every source that quoted it.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPrice {
    /// The winning unit price.
    pub price: f64,
    /// Sources quoting exactly `price`, in consultation order. Never empty.
    pub winners: Vec<SourceId>,
}

/// Reduces successful quotes to the best price for `side`.
///
/// Quotes are folded in iteration order. A strictly better price replaces
/// the winners; a bit-identical price joins them; anything else is
/// ignored. Returns `None` when there are no quotes.
///
/// # Examples
///
/// ```
/// use best_execution::application::services::best_execution::select_best;
/// use best_execution::domain::value_objects::{OrderSide, PricePair, SourceId};
///
/// let coinbase = SourceId::new("coinbase");
/// let kraken = SourceId::new("kraken");
/// let a = PricePair::new(10_000.0, 9_990.0).unwrap();
/// let b = PricePair::new(10_000.0, 9_995.0).unwrap();
///
/// let best = select_best(OrderSide::Buy, [(&coinbase, &a), (&kraken, &b)]).unwrap();
/// assert_eq!(best.price, 10_000.0);
/// assert_eq!(best.winners, vec![coinbase.clone(), kraken.clone()]);
///
/// let best = select_best(OrderSide::Sell, [(&coinbase, &a), (&kraken, &b)]).unwrap();
/// assert_eq!(best.winners, vec![kraken]);
/// ```
pub fn select_best<'a, I>(side: OrderSide, quotes: I) -> Option<BestPrice>
where
    I: IntoIterator<Item = (&'a SourceId, &'a PricePair)>,
{
    quotes
        .into_iter()
        .fold(None, |best: Option<BestPrice>, (source, pair)| {
            let price = pair.price_for(side);
            match best {
                Some(mut best) if price.to_bits() == best.price.to_bits() => {
                    best.winners.push(source.clone());
                    Some(best)
                }
                Some(best) if !side.is_better(price, best.price) => Some(best),
                _ => Some(BestPrice {
                    price,
                    winners: vec![source.clone()],
                }),
            }
        })
}

/// Result of a successful best-execution request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Execution {
    symbol: Symbol,
    side: OrderSide,
    amount: TradeAmount,
    price: f64,
    usd_amount: f64,
    winners: Vec<SourceId>,
}

impl Execution {
    fn new(symbol: Symbol, side: OrderSide, amount: TradeAmount, best: BestPrice) -> Self {
        Self {
            usd_amount: amount.notional(best.price),
            symbol,
            side,
            amount,
            price: best.price,
            winners: best.winners,
        }
    }

    /// Returns the requested symbol.
    #[inline]
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the trade direction.
    #[inline]
    #[must_use]
    pub fn side(&self) -> OrderSide {
        self.side
    }

    /// Returns the requested amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> TradeAmount {
        self.amount
    }

    /// Returns the winning unit price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns amount × winning price.
    #[inline]
    #[must_use]
    pub fn usd_amount(&self) -> f64 {
        self.usd_amount
    }

    /// Returns the winning sources in consultation order.
    #[inline]
    #[must_use]
    pub fn winners(&self) -> &[SourceId] {
        &self.winners
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.winners.iter().map(SourceId::as_str).collect();
        write!(
            f,
            "{} {} {} @ {} = {} via [{}]",
            self.side,
            self.amount,
            self.symbol,
            self.price,
            self.usd_amount,
            names.join(", ")
        )
    }
}

/// Selects the best execution price across a fixed list of sources.
#[derive(Debug, Clone)]
pub struct BestExecutionService {
    sources: Vec<Arc<dyn PriceSource>>,
    fan_out: FanOutMode,
}

impl BestExecutionService {
    /// Creates a service over `sources`, consulted in the given order.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn PriceSource>>, fan_out: FanOutMode) -> Self {
        Self { sources, fan_out }
    }

    /// Returns the sources in consultation order.
    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn PriceSource>] {
        &self.sources
    }

    /// Returns the fan-out mode.
    #[inline]
    #[must_use]
    pub fn fan_out(&self) -> FanOutMode {
        self.fan_out
    }

    /// Prices a buy of `amount` units of `symbol` at the lowest ask.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::NoPriceAvailable` if no source succeeded.
    pub async fn buy(
        &self,
        ctx: &QuoteContext,
        amount: TradeAmount,
        symbol: &Symbol,
    ) -> ExecutionResult<Execution> {
        self.execute(ctx, OrderSide::Buy, amount, symbol).await
    }

    /// Prices a sell of `amount` units of `symbol` at the highest bid.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::NoPriceAvailable` if no source succeeded.
    pub async fn sell(
        &self,
        ctx: &QuoteContext,
        amount: TradeAmount,
        symbol: &Symbol,
    ) -> ExecutionResult<Execution> {
        self.execute(ctx, OrderSide::Sell, amount, symbol).await
    }

    /// Prices a trade in either direction.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::NoPriceAvailable` if no source succeeded,
    /// including when the service has no sources at all.
    pub async fn execute(
        &self,
        ctx: &QuoteContext,
        side: OrderSide,
        amount: TradeAmount,
        symbol: &Symbol,
    ) -> ExecutionResult<Execution> {
        let quotes = self.collect_quotes(ctx, symbol).await;

        for quote in &quotes {
            if let Err(error) = &quote.result {
                tracing::warn!(
                    source = %quote.source,
                    %symbol,
                    %side,
                    kind = %error.kind(),
                    error = %error,
                    "price source failed, skipping"
                );
            }
        }

        let successes = quotes
            .iter()
            .filter_map(|quote| quote.pair().map(|pair| (&quote.source, pair)));

        let Some(best) = select_best(side, successes) else {
            tracing::warn!(%symbol, %side, sources = quotes.len(), "no price available");
            return Err(ExecutionError::no_price_available(symbol));
        };

        let execution = Execution::new(symbol.clone(), side, amount, best);
        tracing::debug!(%execution, "best execution selected");
        Ok(execution)
    }

    /// Asks every source for `symbol` and returns the outcomes in source
    /// order, regardless of the order in which they completed.
    pub async fn collect_quotes(&self, ctx: &QuoteContext, symbol: &Symbol) -> Vec<SourceQuote> {
        match self.fan_out {
            FanOutMode::Sequential => {
                let mut quotes = Vec::with_capacity(self.sources.len());
                for source in &self.sources {
                    quotes.push(fetch_one(source.as_ref(), ctx, symbol).await);
                }
                quotes
            }
            FanOutMode::Concurrent => {
                let pending: FuturesUnordered<_> = self
                    .sources
                    .iter()
                    .enumerate()
                    .map(|(index, source)| async move {
                        (index, fetch_one(source.as_ref(), ctx, symbol).await)
                    })
                    .collect();

                let mut tagged: Vec<(usize, SourceQuote)> = pending.collect().await;
                // Completion order is arbitrary; restore source order.
                tagged.sort_by_key(|(index, _)| *index);
                tagged.into_iter().map(|(_, quote)| quote).collect()
            }
        }
    }
}

async fn fetch_one(source: &dyn PriceSource, ctx: &QuoteContext, symbol: &Symbol) -> SourceQuote {
    SourceQuote {
        source: source.name().clone(),
        result: source.fetch_prices(ctx, symbol).await,
    }
}
