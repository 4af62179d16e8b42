//! Apply command handler
//!
//! Seeds an in-memory property store, gathers property sets from files and
//! selections, runs one dispatch and reports what was written.

use super::require_file;
use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{ApplyReport, OutputWriter};
use proptransform_core::{
    load_property_file, PropertySelector, PropertySet, PropertySetSource, PropertyStore,
    TransformDispatcher, TransformRegistry,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Handle the apply command
pub fn handle_apply(
    args: ApplyArgs,
    config: &Config,
    registry: Arc<TransformRegistry>,
    output: &mut OutputWriter,
) -> Result<()> {
    let show_secrets = args.show_secrets;
    let report = apply(&args, config, registry)?;
    output.report(&report, show_secrets)
}

/// Run one dispatch as described by `args`
pub fn apply(
    args: &ApplyArgs,
    config: &Config,
    registry: Arc<TransformRegistry>,
) -> Result<ApplyReport> {
    let _timer = Timer::new("apply");

    let mut store = seed_store(args)?;
    let sets = collect_sets(args, &store)?;

    let mut dispatcher = TransformDispatcher::new(registry);
    if let Some(type_id) = args.type_id.as_ref().or(config.default_type.as_ref()) {
        dispatcher = dispatcher.type_id(type_id.as_str());
    }
    if let Some(property) = &args.property {
        dispatcher = dispatcher.property(property.as_str());
    }
    if let Some(value) = &args.value {
        dispatcher = dispatcher.value(value.as_str());
    }
    if let Some(prefix) = &args.prefix {
        dispatcher = dispatcher.prefix(prefix.as_str());
    }
    for set in sets {
        dispatcher = dispatcher.property_set(set);
    }

    let outcome = dispatcher.execute(&mut store)?;
    info!(
        strategy = %outcome.strategy,
        mode = %outcome.mode,
        applied = outcome.applied_count(),
        ignored = outcome.ignored_count(),
        "Transformation finished"
    );

    let properties = args.all.then(|| {
        store
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    });

    Ok(ApplyReport {
        outcome,
        properties,
    })
}

/// Build the starting store; `-D` definitions win over definition files
fn seed_store(args: &ApplyArgs) -> Result<PropertyStore> {
    let mut store = PropertyStore::new();

    for (key, value) in &args.defines {
        store.define(key.as_str(), value.as_str());
    }

    for path in &args.define_files {
        require_file(path)?;
        let set = load_property_file(path)?;
        for (key, value) in set.entries() {
            store.define(key, value);
        }
    }

    debug!(properties = store.len(), "Seeded property store");
    Ok(store)
}

/// Property sets in declaration order: files first, then the selection
fn collect_sets(args: &ApplyArgs, store: &PropertyStore) -> Result<Vec<Arc<dyn PropertySetSource>>> {
    let mut sets: Vec<Arc<dyn PropertySetSource>> = Vec::new();

    for path in &args.sets {
        require_file(path)?;
        let set = load_property_file(path)?;
        debug!(path = %path.display(), entries = set.len(), "Loaded property set");
        sets.push(Arc::new(set));
    }

    let mut selectors: Vec<PropertySelector> = args
        .select_prefix
        .iter()
        .map(PropertySelector::prefix)
        .collect();
    for pattern in &args.select_regex {
        selectors.push(PropertySelector::regex(pattern)?);
    }
    if !selectors.is_empty() {
        let selected = PropertySet::select(store, &selectors);
        debug!(entries = selected.len(), "Selected property set from store");
        sets.push(Arc::new(selected));
    }

    Ok(sets)
}
