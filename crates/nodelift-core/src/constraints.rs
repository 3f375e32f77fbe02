//! Provisioner constraints and their tightening.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pod::Pod;
use crate::requirements::Requirements;

/// Node-selection constraints owned by a provisioner or a schedule.
///
/// `requirements` is the live constraint set, narrowed as pods join a
/// schedule. `labels` carries non-selector scheduling knobs applied
/// verbatim to provisioned nodes; the scheduling core only copies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub requirements: Requirements,
}

impl Constraints {
    /// Narrow these constraints by a pod's derived requirements.
    ///
    /// Pure: returns a new value, so a speculative tighten can be tested
    /// for instance-type support and discarded if it fails.
    pub fn tighten(&self, pod: &Pod) -> Constraints {
        Constraints {
            labels: self.labels.clone(),
            requirements: self.requirements.intersect(&pod.requirements()),
        }
    }
}

/// Desired node-provisioning behavior of a single provisioner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionerSpec {
    #[serde(default)]
    pub constraints: Constraints,
}

/// A named provisioner whose base constraints seed every schedule.
///
/// The scheduler clones `spec.constraints` at the start of each pass, so
/// tightening during grouping never leaks back into the stored spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provisioner {
    pub name: String,
    pub spec: ProvisionerSpec,
}

impl Provisioner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: ProvisionerSpec::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::Requirement;

    fn base() -> Constraints {
        Constraints {
            labels: BTreeMap::from([("team".to_string(), "platform".to_string())]),
            requirements: Requirements::new([Requirement::in_values(
                "zone",
                ["us-east-1a", "us-east-1b"],
            )]),
        }
    }

    #[test]
    fn tighten_narrows_without_mutating_source() {
        let constraints = base();
        let pod = Pod::new("default", "api-0").with_selector("zone", "us-east-1a");

        let tightened = constraints.tighten(&pod);
        assert_eq!(
            tightened.requirements.values_for("zone").unwrap().len(),
            1
        );
        // Source keeps both zones.
        assert_eq!(
            constraints.requirements.values_for("zone").unwrap().len(),
            2
        );
    }

    #[test]
    fn tighten_copies_labels() {
        let pod = Pod::new("default", "api-0");
        let tightened = base().tighten(&pod);
        assert_eq!(tightened.labels.get("team").map(String::as_str), Some("platform"));
    }

    #[test]
    fn tighten_is_idempotent_for_implied_requirements() {
        let constraints = base();
        let pod = Pod::new("default", "api-0")
            .with_selector("zone", "us-east-1a")
            .with_affinity(Requirement::exists("arch"));

        let once = constraints.tighten(&pod);
        let twice = once.tighten(&pod);
        assert_eq!(once, twice);
    }

    #[test]
    fn provisioner_spec_survives_clone() {
        let mut provisioner = Provisioner::new("default");
        provisioner.spec.constraints = base();

        let copy = provisioner.spec.constraints.clone();
        let pod = Pod::new("default", "api-0").with_selector("zone", "us-east-1a");
        let _ = copy.tighten(&pod);

        assert_eq!(provisioner.spec.constraints, base());
    }
}
