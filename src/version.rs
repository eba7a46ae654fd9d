//! OpenGL versions and the parsing of `GL_VERSION` strings.

use std::cmp::Ordering;
use std::fmt;

/// Describes a version.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Version(pub Api, pub u8, pub u8);

/// Describes the corresponding API.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Api {
    /// Desktop OpenGL.
    Gl,
    /// OpenGL ES.
    GlEs,
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        if self.0 != other.0 {
            return None;
        }

        match self.1.cmp(&other.1) {
            Ordering::Equal => Some(self.2.cmp(&other.2)),
            a => Some(a)
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Api::Gl => write!(fmt, "OpenGL {}.{}", self.1, self.2),
            Api::GlEs => write!(fmt, "OpenGL ES {}.{}", self.1, self.2),
        }
    }
}

/// Parses the string returned by `glGetString(GL_VERSION)`.
///
/// The string starts with `major.minor`, optionally followed by a release number and vendor
/// specific information. OpenGL ES implementations prefix it with `OpenGL ES `.
///
/// Returns `None` if the string doesn't follow this format.
pub fn parse_version(version: &str) -> Option<Version> {
    let (version, api) = match version.strip_prefix("OpenGL ES ") {
        Some(rest) => (rest, Api::GlEs),
        None => (version, Api::Gl),
    };

    let version = version.split_whitespace().next()?;

    let mut iter = version.split('.');
    let major = iter.next()?.parse().ok()?;
    let minor = iter.next()?.parse().ok()?;

    Some(Version(api, major, minor))
}

#[cfg(test)]
mod tests {
    use super::{parse_version, Api, Version};

    #[test]
    fn desktop_version_with_vendor_suffix() {
        assert_eq!(parse_version("3.3.0 NVIDIA 535.54.03"), Some(Version(Api::Gl, 3, 3)));
        assert_eq!(parse_version("4.6 (Core Profile) Mesa 23.1.4"), Some(Version(Api::Gl, 4, 6)));
    }

    #[test]
    fn es_prefix() {
        assert_eq!(parse_version("OpenGL ES 3.2 Mesa 23.1.4"), Some(Version(Api::GlEs, 3, 2)));
    }

    #[test]
    fn garbage() {
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("three.three"), None);
        assert_eq!(parse_version("4"), None);
    }

    #[test]
    fn ordering_only_within_an_api() {
        assert!(Version(Api::Gl, 4, 1) >= Version(Api::Gl, 3, 3));
        assert!(Version(Api::Gl, 3, 2) < Version(Api::Gl, 3, 3));
        assert!(Version(Api::GlEs, 3, 3).partial_cmp(&Version(Api::Gl, 3, 3)).is_none());
    }
}
