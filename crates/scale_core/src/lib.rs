//! Price and quantity conversion for goods sold per kilogram or per liter,
//! with an editable catalog and a bounded log of committed conversions.

pub mod catalog;
pub mod engine;
pub mod good;
pub mod history;
pub mod session;

pub use catalog::{Catalog, CatalogError};
pub use engine::{convert, parse_amount, ConversionResult};
pub use good::{starter_goods, Color, Good, GoodSeed, Measure, Mode, ParseError, Unit};
pub use history::{Transaction, TransactionLog, HISTORY_LIMIT};
pub use session::{Session, SessionSnapshot};
