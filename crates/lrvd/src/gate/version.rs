//! Release version parsing and ordering
//!
//! Python distributions report versions in the PEP 440 public form
//! (`1.2.3`, `0.2.0rc1`, `0.3.0.post2`, `0.4.0.dev0+g1a2b3c`). Plain
//! `MAJOR.MINOR.PATCH` strings order exactly as semantic versions. A local
//! label sorts a version after the same public version without one.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Public version grammar, matched case-insensitively against trimmed input
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^v?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_kind>alpha|beta|preview|pre|rc|a|b|c)[-_.]?(?P<pre_num>[0-9]+)?)?
        (?:-(?P<post_implicit>[0-9]+)|[-_.]?(?P<post_marker>post|rev|r)[-_.]?(?P<post_num>[0-9]+)?)?
        (?:[-_.]?(?P<dev>dev)[-_.]?(?P<dev_num>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        $",
    )
    .unwrap()
});

/// Pre-release phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreRelease {
    Alpha(u64),
    Beta(u64),
    ReleaseCandidate(u64),
}

/// Sort position of the pre-release part.
///
/// A dev build of a final release sorts before every pre-release of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    DevOnly,
    Pre(PreRelease),
    Final,
}

/// Sort position of the dev part: any dev build precedes the non-dev one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(u64),
    Release,
}

/// One dot-separated part of a local label. Numeric parts sort after
/// alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum LocalSegment {
    Alpha(String),
    Numeric(u64),
}

/// A parsed release version
#[derive(Debug, Clone)]
pub struct PackageVersion {
    pub release: Vec<u64>,
    pub pre: Option<PreRelease>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
    /// Local label (`+...`), lowercased
    pub local: Option<String>,
}

impl PackageVersion {
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let caps = VERSION_PATTERN
            .captures(input.trim())
            .ok_or_else(|| VersionParseError(input.to_string()))?;

        let release = caps["release"]
            .split('.')
            .map(|segment| segment.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionParseError(input.to_string()))?;

        let number = |name: &str| -> Result<Option<u64>, VersionParseError> {
            caps.name(name)
                .map(|m| m.as_str().parse::<u64>())
                .transpose()
                .map_err(|_| VersionParseError(input.to_string()))
        };

        let pre = match caps.name("pre_kind") {
            Some(kind) => {
                let n = number("pre_num")?.unwrap_or(0);
                Some(match kind.as_str().to_ascii_lowercase().as_str() {
                    "a" | "alpha" => PreRelease::Alpha(n),
                    "b" | "beta" => PreRelease::Beta(n),
                    _ => PreRelease::ReleaseCandidate(n),
                })
            }
            None => None,
        };

        let post = match (number("post_implicit")?, caps.name("post_marker")) {
            (Some(n), _) => Some(n),
            (None, Some(_)) => Some(number("post_num")?.unwrap_or(0)),
            (None, None) => None,
        };

        let dev = match caps.name("dev") {
            Some(_) => Some(number("dev_num")?.unwrap_or(0)),
            None => None,
        };

        Ok(Self {
            release,
            pre,
            post,
            dev,
            local: caps.name("local").map(|m| m.as_str().to_ascii_lowercase()),
        })
    }

    /// Release segments without trailing zeros, so `0.2` and `0.2.0` compare equal
    fn release_key(&self) -> &[u64] {
        let len = self
            .release
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |i| i + 1);
        &self.release[..len]
    }

    fn pre_key(&self) -> PreKey {
        match (self.pre, self.post, self.dev) {
            (Some(pre), _, _) => PreKey::Pre(pre),
            (None, None, Some(_)) => PreKey::DevOnly,
            _ => PreKey::Final,
        }
    }

    fn dev_key(&self) -> DevKey {
        self.dev.map_or(DevKey::Release, DevKey::Dev)
    }

    /// No label sorts first; labels compare segment by segment
    fn local_key(&self) -> Option<Vec<LocalSegment>> {
        self.local.as_ref().map(|local| {
            local
                .split(['.', '-', '_'])
                .map(|segment| match segment.parse::<u64>() {
                    Ok(n) => LocalSegment::Numeric(n),
                    Err(_) => LocalSegment::Alpha(segment.to_string()),
                })
                .collect()
        })
    }
}

impl FromStr for PackageVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for PackageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PackageVersion {}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release_key()
            .cmp(other.release_key())
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local_key().cmp(&other.local_key()))
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;
        match self.pre {
            Some(PreRelease::Alpha(n)) => write!(f, "a{}", n)?,
            Some(PreRelease::Beta(n)) => write!(f, "b{}", n)?,
            Some(PreRelease::ReleaseCandidate(n)) => write!(f, "rc{}", n)?,
            None => {}
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{}", local)?;
        }
        Ok(())
    }
}

/// The string is not a recognisable release version
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid version: '{0}'")]
pub struct VersionParseError(pub String);
