//! Quantitative scoring pipeline
//!
//! Pure, synchronous transformations from price series and fundamentals to
//! scores and ranks:
//!
//! - [`returns`] — trailing 1/3/6 month simple returns
//! - [`volatility`] — annualised volatility of daily returns
//! - [`technical`] — moving averages, ATR and the trailing exit level
//! - [`momentum`] — weighted momentum blend and the Sharpe-style ratio
//! - [`percentile`] — percentile normalisation and the combined score
//! - [`value`] — fund and stock value models
//! - [`rank`] — dense ranks per score column
//! - [`pipeline`] — the full pass tying the steps together
//!
//! Missing inputs degrade to `None` at every step; nothing in this module
//! returns an error or touches I/O.

pub mod momentum;
pub mod percentile;
pub mod pipeline;
pub mod rank;
pub mod returns;
pub mod technical;
pub mod value;
pub mod volatility;

pub use momentum::{momentum_score, sharpe_score};
pub use percentile::{combined_scores, percentile_ranks};
pub use pipeline::rescore;
pub use rank::{dense_ranks, RankOrder};
pub use returns::{trailing_return, trailing_returns, TrailingReturns};
pub use technical::{average_true_range, moving_average, selling_threshold, ATR_PERIOD};
pub use value::{value_scores, ValueOutcome};
pub use volatility::annualized_volatility;
