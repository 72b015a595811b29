//! The Frontend Runner (§4.F): expands sources, partitions them by
//! language, drives each frontend, and merges the per-file subgraphs into
//! the `TranslationResult`.

use crate::config::TranslationConfiguration;
use crate::errors::{Severity, TranslationError};
use crate::graph::{Node, NodeKind};
use crate::language::Language;
use crate::shared::CancellationToken;
use crate::trace;
use crate::translation::{Diagnostic, TranslationContext, TranslationResult};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One input path resolved to a concrete file, tagged with its position in
/// the overall source list so the post-join merge can restore a
/// deterministic order independent of completion order (§5).
struct ResolvedFile {
    index: usize,
    path: PathBuf,
}

pub fn run(
    context: &TranslationContext,
    result: &TranslationResult,
    cancellation: &CancellationToken,
) -> Result<(), TranslationError> {
    let config = context.config();
    let files = expand_sources(config);

    let mut by_language: Vec<(&Language, Vec<ResolvedFile>)> = Vec::new();
    for resolved in files {
        let filename = resolved.path.to_string_lossy().to_string();
        if !config.is_whitelisted(&filename) || config.is_blocked(&filename) {
            continue;
        }
        match config.languages.resolve(&filename) {
            Some(language) => match by_language.iter_mut().find(|(l, _)| l.id == language.id) {
                Some((_, bucket)) => bucket.push(resolved),
                None => by_language.push((language, vec![resolved])),
            },
            None => {
                if config.flags.fail_on_error {
                    return Err(TranslationError::parse(filename, "no language matched this file"));
                }
                result.add_diagnostic(diagnostic_no_language(&filename));
            }
        }
    }

    let mut joined: Vec<(usize, crate::graph::NodeId)> = Vec::new();

    for (language, bucket) in by_language {
        if cancellation.is_cancelled() {
            return Err(TranslationError::Cancelled);
        }
        trace!(language = %language.id, files = bucket.len(), "running frontend over language bucket");

        register_builtin_types(language, result, context);

        let use_unity = config.flags.use_unity_build && language.supports_unity_build;
        let outcomes: Vec<(usize, Result<crate::graph::NodeId, TranslationError>)> = if use_unity {
            run_unity_groups(language, bucket, context, config, cancellation)?
        } else if config.flags.use_parallel_frontends {
            context.worker_pool().install(|| {
                bucket
                    .par_iter()
                    .map(|file| (file.index, parse_one(language, file, context, config)))
                    .collect()
            })
        } else {
            let mut out = Vec::with_capacity(bucket.len());
            for file in &bucket {
                if cancellation.is_cancelled() {
                    return Err(TranslationError::Cancelled);
                }
                out.push((file.index, parse_one(language, file, context, config)));
            }
            out
        };

        for (index, outcome) in outcomes {
            match outcome {
                Ok(root) => {
                    result.add_translation_unit(root);
                    joined.push((index, root));
                }
                Err(err) => {
                    if config.flags.fail_on_error {
                        return Err(err);
                    }
                    result.add_diagnostic(Diagnostic::new(Severity::Warning, "frontend_runner", err.to_string()));
                }
            }
        }
    }

    joined.sort_by_key(|(index, _)| *index);
    result.set_translation_unit_order(joined.into_iter().map(|(_, id)| id).collect());
    result.freeze_nodes();

    Ok(())
}

fn parse_one(
    language: &Language,
    file: &ResolvedFile,
    context: &TranslationContext,
    config: &TranslationConfiguration,
) -> Result<crate::graph::NodeId, TranslationError> {
    if config.flags.debug_parser {
        trace!(file = %file.path.display(), "parsing file");
    }
    let frontend = language.create_frontend();
    frontend
        .parse(&file.path, context)
        .map_err(|failure| TranslationError::parse(failure.file.to_string_lossy(), failure.reason))
}

fn diagnostic_no_language(filename: &str) -> Diagnostic {
    Diagnostic::new(
        Severity::Warning,
        "frontend_runner",
        format!("no registered language matches '{filename}'"),
    )
}

/// Pre-seed this language's built-in types into the shared `TypeManager`
/// (§3) before any of its files are parsed, so a frontend can reference
/// `int`/`bool`/... without first having to discover a declaration for
/// them. Idempotent across repeated calls, since `register_type` only ever
/// inserts the first node seen for a structural key.
fn register_builtin_types(language: &Language, result: &TranslationResult, context: &TranslationContext) {
    for name in language.built_in_types.names() {
        let structural_key = format!("{}:{name}", language.id);
        if context.types().lookup(&structural_key).is_some() {
            continue;
        }
        let id = result.allocate_node_id();
        let node = Node::new(id, NodeKind::Type)
            .with_name(name.clone())
            .with_language(language.id.clone());
        result.add_node(node);
        context.types().register_type(structural_key, id);
    }
}

/// Group a language's files sharing a parent directory into unity-build
/// groups (§4.F step 1): a proxy for "shares headers", since this crate has
/// no notion of an `#include` graph of its own. Order within and across
/// groups is preserved so the caller's `ResolvedFile::index` bookkeeping
/// still restores input order after the join.
fn group_for_unity_build(bucket: Vec<ResolvedFile>) -> Vec<Vec<ResolvedFile>> {
    let mut groups: BTreeMap<PathBuf, Vec<ResolvedFile>> = BTreeMap::new();
    let mut order: Vec<PathBuf> = Vec::new();
    for file in bucket {
        let dir = file.path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        if !groups.contains_key(&dir) {
            order.push(dir.clone());
        }
        groups.entry(dir).or_default().push(file);
    }
    order.into_iter().map(|dir| groups.remove(&dir).unwrap_or_default()).collect()
}

fn parse_unity_group(
    language: &Language,
    group: &[ResolvedFile],
    context: &TranslationContext,
    config: &TranslationConfiguration,
) -> Result<crate::graph::NodeId, TranslationError> {
    let paths: Vec<PathBuf> = group.iter().map(|f| f.path.clone()).collect();
    if config.flags.debug_parser {
        trace!(files = paths.len(), "parsing unity-build group");
    }
    let frontend = language.create_frontend();
    frontend
        .parse_unity(&paths, context)
        .map_err(|failure| TranslationError::parse(failure.file.to_string_lossy(), failure.reason))
}

fn run_unity_groups(
    language: &Language,
    bucket: Vec<ResolvedFile>,
    context: &TranslationContext,
    config: &TranslationConfiguration,
    cancellation: &CancellationToken,
) -> Result<Vec<(usize, Result<crate::graph::NodeId, TranslationError>)>, TranslationError> {
    let groups = group_for_unity_build(bucket);
    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        if cancellation.is_cancelled() {
            return Err(TranslationError::Cancelled);
        }
        // Every file in the group shares one merged outcome; the lowest
        // index in the group stands in for the group in the post-join sort
        // so the group's position in the output reflects its first file's
        // position in the input.
        let index = group.iter().map(|f| f.index).min().unwrap_or(0);
        out.push((index, parse_unity_group(language, &group, context, config)));
    }
    Ok(out)
}

/// Expand each software component's file list in insertion order, walking
/// directories. Grouping resolved files into unity-build units happens
/// later, per language, once each file's language is known (§4.F step 1).
fn expand_sources(config: &TranslationConfiguration) -> Vec<ResolvedFile> {
    let mut resolved = Vec::new();
    let mut index = 0usize;
    for (_, files) in &config.software_components {
        for path in files {
            for entry in walk(path) {
                resolved.push(ResolvedFile { index, path: entry });
                index += 1;
            }
        }
    }
    resolved
}

fn walk(path: &Path) -> Vec<PathBuf> {
    if path.is_dir() {
        WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect()
    } else {
        vec![path.to_path_buf()]
    }
}
