//! Schedule grouping and the scheduler façade.
//!
//! The grouping pass separates pods into schedules of compatible
//! scheduling constraints. All pods in a schedule can be deployed together
//! on one node, or several similar nodes if they exceed one node's
//! capacity.

use nodelift_cloud::InstanceType;
use nodelift_core::{Constraints, Pod, Provisioner};
use nodelift_metrics::scheduling_duration;
use tracing::{debug, info};

use crate::error::{SchedulingError, SchedulingResult};
use crate::support::supports;
use crate::topology::TopologyInjector;

/// A group of pods plus the merged constraint set they can all satisfy
/// together, candidate for co-location on one node or several homogeneous
/// nodes.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Final tightened constraints for the group.
    pub constraints: Constraints,
    /// Member pods, in discovery order.
    pub pods: Vec<Pod>,
}

impl Schedule {
    /// Member pod ids, for logs and assertions.
    pub fn pod_ids(&self) -> Vec<String> {
        self.pods.iter().map(Pod::id).collect()
    }
}

/// Groups a provisioner's pending pods into bin-packable schedules.
pub struct Scheduler<T> {
    topology: T,
}

impl<T: TopologyInjector> Scheduler<T> {
    pub fn new(topology: T) -> Self {
        Self { topology }
    }

    /// Run one scheduling pass for `provisioner`.
    ///
    /// Clones the provisioner's base constraints so tightening never leaks
    /// back into the stored spec, lets the topology collaborator rewrite
    /// pod requirements in place, then runs the grouping pass. A topology
    /// failure aborts the pass and returns no schedules; grouping itself
    /// never fails. Wall-clock duration is recorded against the
    /// provisioner's histogram series on every path, including the
    /// injection-error path.
    pub async fn solve(
        &self,
        provisioner: &Provisioner,
        instance_types: &[Box<dyn InstanceType>],
        mut pods: Vec<Pod>,
    ) -> SchedulingResult<Vec<Schedule>> {
        let _timer = scheduling_duration().start_timer(&provisioner.name);

        let constraints = provisioner.spec.constraints.clone();
        self.topology
            .inject(&constraints, &mut pods)
            .await
            .map_err(SchedulingError::InjectingTopology)?;

        let pod_count = pods.len();
        let schedules = get_schedules(&constraints, instance_types, pods);
        info!(
            provisioner = %provisioner.name,
            pods = pod_count,
            schedules = schedules.len(),
            "scheduling pass complete"
        );
        Ok(schedules)
    }
}

/// Separate pods into schedules of compatible constraints.
///
/// First-fit in input order: each pod joins the first existing schedule
/// whose constraints it is compatible with and whose tightened result at
/// least one instance type still supports; otherwise it opens a new
/// schedule seeded from the base constraints. No feasibility check is run
/// on the new-schedule path: a pod no instance type can ever serve still
/// gets its own schedule, and infeasibility surfaces downstream during
/// instance selection.
fn get_schedules(
    constraints: &Constraints,
    instance_types: &[Box<dyn InstanceType>],
    pods: Vec<Pod>,
) -> Vec<Schedule> {
    let mut schedules: Vec<Schedule> = Vec::new();
    for pod in pods {
        let pod_requirements = pod.requirements();

        let mut admitted: Option<(usize, Constraints)> = None;
        for (index, schedule) in schedules.iter().enumerate() {
            if schedule
                .constraints
                .requirements
                .compatible(&pod_requirements)
                .is_err()
            {
                continue;
            }
            // Speculative tighten: commit only if some instance type still
            // supports the combined constraints, otherwise discard.
            let candidate = schedule.constraints.tighten(&pod);
            if instance_types
                .iter()
                .any(|it| supports(it.as_ref(), &candidate))
            {
                admitted = Some((index, candidate));
                break;
            }
        }

        match admitted {
            // First admitting schedule wins; no search for a better one.
            Some((index, candidate)) => {
                debug!(pod = %pod.id(), schedule = index, "pod joined schedule");
                let schedule = &mut schedules[index];
                schedule.constraints = candidate;
                schedule.pods.push(pod);
            }
            None => {
                debug!(pod = %pod.id(), schedule = schedules.len(), "pod opened new schedule");
                schedules.push(Schedule {
                    constraints: constraints.tighten(&pod),
                    pods: vec![pod],
                });
            }
        }
    }
    schedules
}
