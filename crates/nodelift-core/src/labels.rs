//! Well-known node label keys understood by the scheduling core.
//!
//! Every node carries these labels once provisioned; instance-type
//! offerings pin their values ahead of time, which is what lets the
//! scheduler test an instance type against a constraint set without
//! launching anything.

/// Topology zone a node runs in. Pinned per offering.
pub const TOPOLOGY_ZONE: &str = "topology.nodelift.io/zone";

/// Capacity type of a node (see `nodelift-cloud` for the known values).
pub const CAPACITY_TYPE: &str = "nodelift.io/capacity-type";

/// Instance type name of a node.
pub const INSTANCE_TYPE: &str = "node.nodelift.io/instance-type";

/// CPU architecture of a node.
pub const ARCHITECTURE: &str = "nodelift.io/arch";

/// Operating system of a node.
pub const OPERATING_SYSTEM: &str = "nodelift.io/os";
