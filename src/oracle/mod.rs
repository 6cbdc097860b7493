pub mod monitor;
pub mod price_state;

pub use monitor::{GasPriceMonitor, fetch_gas_price};
pub use price_state::{PricePublisher, PriceReader, UNKNOWN_PRICE, price_channel};
