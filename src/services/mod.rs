//! External data sources and delivery channels.

pub mod market_data;
pub mod notifier;
pub mod snapshot;
pub mod yahoo;

pub use market_data::{FetchError, MarketDataProvider};
pub use notifier::{EmailContent, Notifier, NotifyError, SmtpNotifier};
pub use snapshot::{SnapshotProvider, SnapshotStore};
pub use yahoo::YahooMarketDataProvider;
