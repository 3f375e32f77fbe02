//! Instance types and their purchasable offerings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Nodes billed at the standard rate.
pub const CAPACITY_TYPE_ON_DEMAND: &str = "on-demand";
/// Preemptible, discounted nodes.
pub const CAPACITY_TYPE_SPOT: &str = "spot";

/// One purchasable variant of an instance type: a (zone, capacity-type)
/// pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub zone: String,
    pub capacity_type: String,
}

impl Offering {
    pub fn new(zone: impl Into<String>, capacity_type: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            capacity_type: capacity_type.into(),
        }
    }
}

/// A compute SKU a provider can launch nodes from.
///
/// Read-only to the scheduler; queried once per scheduling pass in the
/// order the caller supplies. Order affects which instance type is found
/// first, not the correctness of grouping.
pub trait InstanceType: Send + Sync {
    /// Stable name, unique within the provider.
    fn name(&self) -> &str;

    /// CPU architecture of nodes launched from this type.
    fn architecture(&self) -> &str;

    /// Operating systems this type can run.
    fn operating_systems(&self) -> &BTreeSet<String>;

    /// Purchasable (zone, capacity-type) variants.
    fn offerings(&self) -> &[Offering];
}

/// A plain-value `InstanceType`, the shape providers and fixtures use.
///
/// Defaults to amd64 linux with a single on-demand offering in
/// `us-east-1a`; builders override per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInstanceType {
    pub name: String,
    pub architecture: String,
    pub operating_systems: BTreeSet<String>,
    pub offerings: Vec<Offering>,
}

impl CatalogInstanceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            architecture: "amd64".to_string(),
            operating_systems: BTreeSet::from(["linux".to_string()]),
            offerings: vec![Offering::new("us-east-1a", CAPACITY_TYPE_ON_DEMAND)],
        }
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = architecture.into();
        self
    }

    pub fn with_operating_systems<I, S>(mut self, operating_systems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operating_systems = operating_systems.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_offerings(mut self, offerings: impl IntoIterator<Item = Offering>) -> Self {
        self.offerings = offerings.into_iter().collect();
        self
    }
}

impl InstanceType for CatalogInstanceType {
    fn name(&self) -> &str {
        &self.name
    }

    fn architecture(&self) -> &str {
        &self.architecture
    }

    fn operating_systems(&self) -> &BTreeSet<String> {
        &self.operating_systems
    }

    fn offerings(&self) -> &[Offering] {
        &self.offerings
    }
}
