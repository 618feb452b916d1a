pub mod model_store;
pub mod serving;
