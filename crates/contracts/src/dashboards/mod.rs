pub mod common;
pub mod d402_top_products;
pub mod d403_association_rules;
pub mod d404_promo_scenarios;
