pub mod assets;
pub mod depreciation;
pub mod disposals;
pub mod health;
pub mod reports;
