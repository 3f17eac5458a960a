pub mod feature_store;
pub mod rating_store;
pub mod recommendation;
