//! Shared data model for the NodeLift scheduling core.
//!
//! Provides the vocabulary the scheduler operates over:
//!
//! - **`requirements`**: label-key predicates and the keyed sets they form,
//!   with the compatibility and intersection operations scheduling depends on
//! - **`constraints`**: per-provisioner and per-schedule constraint values
//! - **`pod`**: pending workload units and their derived requirements
//! - **`labels`**: well-known node label keys

pub mod constraints;
pub mod labels;
pub mod pod;
pub mod requirements;

pub use constraints::{Constraints, Provisioner, ProvisionerSpec};
pub use pod::Pod;
pub use requirements::{
    Operator, Requirement, Requirements, RequirementsError, RequirementsResult,
};
