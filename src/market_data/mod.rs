pub mod csv_loader;
pub mod price_series;

pub use csv_loader::{load_price_csv, read_price_csv};
pub use price_series::{PriceBar, PriceSeries};
