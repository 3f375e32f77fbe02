//! Instance-type support test.

use nodelift_cloud::InstanceType;
use nodelift_core::{Constraints, Requirement, Requirements, labels};

/// Whether at least one offering of `instance_type` can realize
/// `constraints`.
///
/// For each offering, build the requirement set a node launched from that
/// offering would satisfy: every key the constraints already mention is
/// requalified as `Exists`, which forces it to be satisfiable under the
/// offering's concrete labels rather than silently ignored, plus the five
/// labels the offering and instance type pin (zone, capacity type,
/// instance type name, architecture, operating system). The offering
/// supports the constraints when that set is compatible with them.
///
/// Short-circuits on the first satisfying offering. Pure: nothing is
/// selected or reserved.
pub fn supports(instance_type: &dyn InstanceType, constraints: &Constraints) -> bool {
    let existing: Vec<Requirement> = constraints
        .requirements
        .keys()
        .map(Requirement::exists)
        .collect();

    instance_type.offerings().iter().any(|offering| {
        let mut offered = Requirements::new(existing.iter().cloned());
        offered.insert(Requirement::in_values(
            labels::TOPOLOGY_ZONE,
            [offering.zone.clone()],
        ));
        offered.insert(Requirement::in_values(
            labels::CAPACITY_TYPE,
            [offering.capacity_type.clone()],
        ));
        offered.insert(Requirement::in_values(
            labels::INSTANCE_TYPE,
            [instance_type.name().to_string()],
        ));
        offered.insert(Requirement::in_values(
            labels::ARCHITECTURE,
            [instance_type.architecture().to_string()],
        ));
        offered.insert(Requirement::in_values(
            labels::OPERATING_SYSTEM,
            instance_type.operating_systems().iter().cloned(),
        ));
        offered.compatible(&constraints.requirements).is_ok()
    })
}
