pub mod alpaca;
pub mod paper;
pub mod quotes;

pub use alpaca::{AlpacaClient, AlpacaCredentials, AlpacaExecutor, AlpacaPriceSource};
pub use paper::PaperExecutor;
pub use quotes::StooqPriceSource;
