//! SeaORM entity modules for the fixed-asset register.
//! The asset is the aggregate root; depreciation records, production usage
//! and disposals all belong to exactly one asset and are deleted with it.

pub mod asset;
pub mod depreciation_record;
pub mod disposal;
pub mod production_usage;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::asset::Entity as Asset;
    pub use super::depreciation_record::Entity as DepreciationRecord;
    pub use super::disposal::Entity as Disposal;
    pub use super::production_usage::Entity as ProductionUsage;
}
