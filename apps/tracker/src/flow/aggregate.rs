use std::collections::HashMap;

use tracing::debug;

use crate::flow::{FlowEdge, FlowNode, StatusFlow};
use crate::models::{ApplicationRecord, TimelineEntry};

/// A flow diagram needs at least two stages to draw a single edge.
const MIN_DISTINCT_STATUSES: usize = 2;

/// Builds the status-transition graph from applications and their timelines.
///
/// Nodes are every distinct status seen, in first-seen order across
/// `applications` then `timelines`. Edges count directly adjacent status
/// changes inside each application's date-sorted timeline, in the order the
/// transitions were first observed.
///
/// Never fails: degenerate or malformed input yields `StatusFlow::empty()`.
pub fn build_status_flow(
    applications: &[ApplicationRecord],
    timelines: &[TimelineEntry],
) -> StatusFlow {
    let statuses = distinct_statuses(applications, timelines);
    if statuses.len() < MIN_DISTINCT_STATUSES {
        debug!(
            distinct = statuses.len(),
            "status flow skipped: not enough distinct statuses"
        );
        return StatusFlow::empty();
    }

    let mut counter = TransitionCounter::default();
    for mut group in partition_by_application(timelines) {
        if group.len() < 2 {
            continue;
        }
        // sort_by_key is stable, equal timestamps keep input order
        group.sort_by_key(|(ts, _)| *ts);
        for pair in group.windows(2) {
            let (source, target) = (pair[0].1, pair[1].1);
            if source != target {
                counter.record(source, target);
            }
        }
    }

    if counter.is_empty() {
        debug!("status flow skipped: no transitions observed");
        return StatusFlow::empty();
    }

    let index: HashMap<&str, usize> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| (*s, i))
        .collect();

    let edges: Vec<FlowEdge> = counter
        .into_counts()
        .into_iter()
        .filter_map(|((source, target), value)| {
            Some(FlowEdge {
                source: *index.get(source)?,
                target: *index.get(target)?,
                value,
            })
        })
        .collect();

    if edges.is_empty() {
        return StatusFlow::empty();
    }

    StatusFlow {
        nodes: statuses
            .into_iter()
            .map(|name| FlowNode {
                name: name.to_string(),
            })
            .collect(),
        edges,
        has_valid_data: true,
    }
}

fn distinct_statuses<'a>(
    applications: &'a [ApplicationRecord],
    timelines: &'a [TimelineEntry],
) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    let all = applications
        .iter()
        .filter_map(ApplicationRecord::status)
        .chain(timelines.iter().filter_map(TimelineEntry::status));
    for status in all {
        if !seen.contains(&status) {
            seen.push(status);
        }
    }
    seen
}

/// Groups valid entries by owning application, groups ordered by first
/// appearance. Each item is `(timestamp_millis, status)`. Entries without an
/// owner or a status are dropped here.
fn partition_by_application(timelines: &[TimelineEntry]) -> Vec<Vec<(i64, &str)>> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<(i64, &str)>> = Vec::new();
    for entry in timelines {
        let (Some(owner), Some(status)) = (entry.owner_key(), entry.status()) else {
            continue;
        };
        let slot = *slots.entry(owner).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push((entry.timestamp_millis(), status));
    }
    groups
}

/// Insertion-ordered transition counts.
#[derive(Default)]
struct TransitionCounter<'a> {
    slots: HashMap<(&'a str, &'a str), usize>,
    counts: Vec<((&'a str, &'a str), u64)>,
}

impl<'a> TransitionCounter<'a> {
    fn record(&mut self, source: &'a str, target: &'a str) {
        match self.slots.get(&(source, target)) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.slots.insert((source, target), self.counts.len());
                self.counts.push(((source, target), 1));
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn into_counts(self) -> Vec<((&'a str, &'a str), u64)> {
        self.counts
    }
}
