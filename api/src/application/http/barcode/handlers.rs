pub mod analyze_product;
pub mod lookup_product;
