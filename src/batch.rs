//! Apply tag operations to many files at once.
//!
//! Files are processed in parallel with rayon. Jobs that resolve to the same
//! file (compared by canonical path, so `a.mp3` and `./a.mp3` match) are kept
//! together and run one after another in submission order, so no file ever
//! sees two writers at the same time. Links created while a batch runs are
//! not accounted for.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::common::error::Result;
use crate::id3v1::analyzer::TrailerAnalyzer;
use crate::id3v1::options::SpliceOptions;
use crate::id3v1::record::TagRecord;
use crate::id3v1::{padding, splice};

/// Result of one job in a batch.
#[derive(Debug)]
pub struct BatchOutcome<T = ()> {
    pub path: String,
    pub result: Result<T>,
}

impl<T> BatchOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Write each `(path, record)` pair. Outcomes come back in input order.
pub fn write_tags_batch(jobs: &[(String, TagRecord)], options: &SpliceOptions) -> Vec<BatchOutcome> {
    run_grouped(jobs, |(path, _)| path.as_str(), |(path, record)| {
        splice::write_trailer(path, record, options)
    })
}

/// Remove the tag from each path; the outcome says whether one was removed.
pub fn remove_tags_batch(paths: &[String], options: &SpliceOptions) -> Vec<BatchOutcome<bool>> {
    run_grouped(paths, |p| p.as_str(), |p| splice::remove_trailer(p, options))
}

/// Normalize padding for each path using the built-in analyzer.
pub fn fix_padding_batch(paths: &[String], options: &SpliceOptions) -> Vec<BatchOutcome> {
    run_grouped(paths, |p| p.as_str(), |p| padding::fix_padding(p, &TrailerAnalyzer, options))
}

fn run_grouped<J, T, P, F>(jobs: &[J], path_of: P, op: F) -> Vec<BatchOutcome<T>>
where
    J: Sync,
    T: Send,
    P: Fn(&J) -> &str,
    F: Fn(&J) -> Result<T> + Sync,
{
    if jobs.is_empty() {
        return Vec::new();
    }

    // Group job indices by file, preserving order within each group
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut by_file: HashMap<PathBuf, usize> = HashMap::with_capacity(jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        let path = path_of(job);
        let key = fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
        let g = *by_file.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[g].push(i);
    }

    let mut results: Vec<(usize, Result<T>)> = groups
        .par_iter()
        .flat_map_iter(|idxs| idxs.iter().map(|&i| (i, op(&jobs[i]))))
        .collect();
    results.sort_unstable_by_key(|(i, _)| *i);

    results
        .into_iter()
        .map(|(i, result)| BatchOutcome {
            path: path_of(&jobs[i]).to_string(),
            result,
        })
        .collect()
}
