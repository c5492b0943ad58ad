pub mod actions;
pub mod load;
mod snapshot;
mod store;

pub use snapshot::{
    country_name_id, Bounds, Configs, CountryShape, Datum, Global, GlobalData, IndicatorConfig,
    IndicatorKind, Meta, ScalarDatum, Snapshot, ValueRange,
};
pub use store::{ChangeTopic, SharedStore, Store, Subscription};
