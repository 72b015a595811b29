//! Dependency-ordered pass scheduling (§4.E).
//!
//! Mirrors the wave/Kahn's-algorithm style used elsewhere in this codebase
//! for DAG execution ordering, generalized from a closed stage enum to an
//! open, descriptor-driven pass universe.

use super::catalog::PassCatalog;
use super::descriptor::{PassDescriptor, PassName};
use crate::errors::ConfigurationError;
use std::collections::{HashMap, HashSet, VecDeque};

/// An ordered list of parallel-executable groups. Passes within a group have
/// no ordering constraint between them.
pub type Schedule = Vec<Vec<PassName>>;

/// Build the execution schedule for `registered` passes, pulling in any
/// missing hard dependencies from `catalog`.
pub fn schedule(
    registered: &[PassDescriptor],
    catalog: &PassCatalog,
) -> Result<Schedule, ConfigurationError> {
    let mut descriptors: HashMap<PassName, PassDescriptor> = HashMap::new();
    for d in registered {
        if d.hard_deps.contains(&d.name) || d.soft_deps.contains(&d.name) {
            return Err(ConfigurationError::SelfDependency(d.name.0.clone()));
        }
        descriptors.insert(d.name.clone(), d.clone());
    }

    // Step 2: transitively pull in missing hard dependencies from the catalog.
    let mut frontier: VecDeque<PassName> = descriptors
        .values()
        .flat_map(|d| d.hard_deps.iter().cloned())
        .collect();
    while let Some(name) = frontier.pop_front() {
        if descriptors.contains_key(&name) {
            continue;
        }
        let pass = catalog.get(&name).ok_or_else(|| {
            // Identify which registered pass demanded it, for a useful message.
            let demander = registered
                .iter()
                .find(|d| d.hard_deps.contains(&name))
                .map(|d| d.name.0.clone())
                .unwrap_or_else(|| "<unknown>".to_string());
            ConfigurationError::UnknownHardDependency {
                pass: demander,
                dependency: name.0.clone(),
            }
        })?;
        let injected = pass.descriptor();
        for dep in &injected.hard_deps {
            frontier.push_back(dep.clone());
        }
        descriptors.insert(name, injected);
    }

    // Soft deps on passes absent from the final set are simply dropped.
    let present: HashSet<PassName> = descriptors.keys().cloned().collect();

    // executeBefore(Q) is a soft edge `this -> Q` installed on Q; fold it
    // into Q's soft_deps before building predecessor sets.
    let before_edges: Vec<(PassName, PassName)> = descriptors
        .values()
        .flat_map(|d| d.execute_before.iter().cloned().map(move |q| (d.name.clone(), q)))
        .collect();
    for (predecessor, target) in before_edges {
        if let Some(target_descriptor) = descriptors.get_mut(&target) {
            if !target_descriptor.soft_deps.contains(&predecessor) {
                target_descriptor.soft_deps.push(predecessor);
            }
        }
    }

    let first: Vec<PassName> = descriptors
        .values()
        .filter(|d| d.execute_first)
        .map(|d| d.name.clone())
        .collect();
    if first.len() > 1 {
        return Err(ConfigurationError::TooManyFirstPasses(
            first.into_iter().map(|n| n.0).collect(),
        ));
    }

    let last: Vec<PassName> = descriptors
        .values()
        .filter(|d| d.execute_last)
        .map(|d| d.name.clone())
        .collect();
    if last.len() > 1 {
        return Err(ConfigurationError::TooManyLastPasses(
            last.into_iter().map(|n| n.0).collect(),
        ));
    }

    let first = first.into_iter().next();
    let last = last.into_iter().next();

    // Predecessor sets, restricted to passes actually present.
    let mut predecessors: HashMap<PassName, HashSet<PassName>> = HashMap::new();
    for d in descriptors.values() {
        let mut preds = HashSet::new();
        for dep in d.hard_deps.iter().chain(d.soft_deps.iter()) {
            if present.contains(dep) && Some(dep) != first.as_ref() {
                preds.insert(dep.clone());
            }
        }
        predecessors.insert(d.name.clone(), preds);
    }

    let mut schedule: Schedule = Vec::new();

    if let Some(first_name) = &first {
        schedule.push(vec![first_name.clone()]);
        for preds in predecessors.values_mut() {
            preds.remove(first_name);
        }
    }

    // `not_yet_executed` drives the readiness check and must keep the
    // `executeLast` pass in it until that pass is actually appended as the
    // schedule's final group — otherwise a pass that (soft- or hard-)depends
    // on the `executeLast` pass would see its predecessor set spuriously
    // satisfied before `executeLast` has run. `to_place` is the separate
    // working set the loop drains; it excludes both `first` (already
    // scheduled above) and `last` (scheduled only after this loop ends).
    let mut not_yet_executed: HashSet<PassName> = present.clone();
    if let Some(f) = &first {
        not_yet_executed.remove(f);
    }

    let mut to_place: HashSet<PassName> = present.clone();
    if let Some(f) = &first {
        to_place.remove(f);
    }
    if let Some(l) = &last {
        to_place.remove(l);
    }

    while !to_place.is_empty() {
        let mut ready: Vec<PassName> = to_place
            .iter()
            .filter(|name| {
                predecessors
                    .get(*name)
                    .map(|preds| preds.iter().all(|p| !not_yet_executed.contains(p)))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        if ready.is_empty() {
            // Either a genuine cycle, or a pass depends on the `executeLast`
            // pass — both are unsatisfiable orderings from here.
            let mut stuck: Vec<String> = to_place.iter().map(|n| n.0.clone()).collect();
            stuck.sort();
            return Err(ConfigurationError::UnresolvableOrdering(stuck));
        }

        ready.sort();
        for name in &ready {
            to_place.remove(name);
            not_yet_executed.remove(name);
        }
        schedule.push(ready);
    }

    if let Some(last_name) = last {
        schedule.push(vec![last_name]);
    }

    Ok(schedule)
}
