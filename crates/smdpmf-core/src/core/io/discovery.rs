use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Failed to compile index pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Force,
    Distance,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Force => write!(f, "force"),
            SeriesKind::Distance => write!(f, "distance"),
        }
    }
}

/// What to do with files whose name carries no trajectory number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnindexedPolicy {
    #[default]
    Reject,
    Skip,
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Data directory '{dir}' does not exist", dir = .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to list '{dir}': {source}", dir = dir.display())]
    Walk {
        dir: PathBuf,
        source: walkdir::Error,
    },

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("No {kind} file found for trajectory {index} in '{dir}'", dir = dir.display())]
    MissingFile {
        kind: SeriesKind,
        index: u64,
        dir: PathBuf,
    },

    #[error("Force and distance files cannot be paired: {0}")]
    MismatchedPair(String),

    #[error("File '{path}' has no trajectory number in its name", path = path.display())]
    Unindexed { path: PathBuf },
}

/// A shell-style file name pattern supporting `*` and `?`.
#[derive(Debug, Clone)]
pub struct FilePattern {
    glob: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(glob: &str) -> Result<Self, DiscoveryError> {
        let mut translated = String::with_capacity(glob.len() + 8);
        translated.push('^');
        for c in glob.chars() {
            match c {
                '*' => translated.push_str(".*"),
                '?' => translated.push('.'),
                other => translated.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        translated.push('$');

        let regex = Regex::new(&translated).map_err(|source| DiscoveryError::InvalidPattern {
            pattern: glob.to_string(),
            source,
        })?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

/// The first run of decimal digits in a file name, e.g. `slow_pullf12.xvg` -> 12.
pub fn extract_index(file_name: &str) -> Option<u64> {
    FIRST_INTEGER
        .find(file_name)
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryFiles {
    pub index: u64,
    pub force: PathBuf,
    pub distance: PathBuf,
}

/// Regular files directly inside `dir` whose names match `pattern`, sorted by name.
pub fn list_matching(dir: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::MissingDirectory(dir.to_path_buf()));
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if pattern.matches(name) {
                matches.push(entry.into_path());
            }
        }
    }
    debug!(
        "Found {} file(s) matching '{}' in {:?}",
        matches.len(),
        pattern.as_str(),
        dir
    );
    Ok(matches)
}

fn index_files(
    files: Vec<PathBuf>,
    kind: SeriesKind,
    policy: UnindexedPolicy,
) -> Result<BTreeMap<u64, PathBuf>, DiscoveryError> {
    let mut indexed = BTreeMap::new();
    for path in files {
        let index = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(extract_index);

        let Some(index) = index else {
            match policy {
                UnindexedPolicy::Reject => return Err(DiscoveryError::Unindexed { path }),
                UnindexedPolicy::Skip => {
                    warn!("Skipping {} file without trajectory number: {:?}", kind, path);
                    continue;
                }
            }
        };

        if let Some(previous) = indexed.insert(index, path.clone()) {
            return Err(DiscoveryError::MismatchedPair(format!(
                "{} index {} is shared by {:?} and {:?}",
                kind, index, previous, path
            )));
        }
    }
    Ok(indexed)
}

/// Discovers force and distance files in `dir` and pairs them by trajectory number.
///
/// Pairs are returned in ascending index order. Every force file must have a distance
/// file with the same number and vice versa; pairing is never positional.
pub fn pair_trajectory_files(
    dir: &Path,
    force_pattern: &FilePattern,
    distance_pattern: &FilePattern,
    policy: UnindexedPolicy,
) -> Result<Vec<TrajectoryFiles>, DiscoveryError> {
    let forces = index_files(
        list_matching(dir, force_pattern)?,
        SeriesKind::Force,
        policy,
    )?;
    let mut distances = index_files(
        list_matching(dir, distance_pattern)?,
        SeriesKind::Distance,
        policy,
    )?;

    let mut pairs = Vec::with_capacity(forces.len());
    for (index, force) in forces {
        let distance = distances
            .remove(&index)
            .ok_or_else(|| DiscoveryError::MissingFile {
                kind: SeriesKind::Distance,
                index,
                dir: dir.to_path_buf(),
            })?;
        pairs.push(TrajectoryFiles {
            index,
            force,
            distance,
        });
    }

    if let Some((&index, _)) = distances.iter().next() {
        return Err(DiscoveryError::MissingFile {
            kind: SeriesKind::Force,
            index,
            dir: dir.to_path_buf(),
        });
    }
    Ok(pairs)
}
