//! Cloud-provider catalogue interface.
//!
//! A provider enumerates purchasable compute SKUs as `InstanceType`s, each
//! with a list of `Offering`s pinning a zone and capacity-type variant.
//! The scheduling core only reads this catalogue; it never selects or
//! reserves an offering.

pub mod instance_type;

pub use instance_type::{
    CAPACITY_TYPE_ON_DEMAND, CAPACITY_TYPE_SPOT, CatalogInstanceType, InstanceType, Offering,
};
