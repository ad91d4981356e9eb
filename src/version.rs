use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("version string '{0}' does not contain at least three parts")]
    TooFewParts(String),
}

/// The version number parts that increment and decrement commands can
/// target. There is no Revision member; a trailing fourth component is
/// carried through unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
}

impl VersionPart {
    /// Case-insensitive part lookup. `build` is an accepted synonym for
    /// the patch part.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "major" => Some(Self::Major),
            "minor" => Some(Self::Minor),
            "patch" | "build" => Some(Self::Patch),
            _ => None,
        }
    }
}

/// A single dotted component: either a number in [0, 65535] or a
/// literal token (`*`, an empty segment, out-of-range digit runs) that
/// arithmetic passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Component {
    Numeric(u16),
    Literal(String),
}

impl Component {
    fn parse(text: &str) -> Self {
        match text.parse::<u16>() {
            Ok(value) => Self::Numeric(value),
            Err(_) => Self::Literal(text.to_string()),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Numeric(value) => value.to_string(),
            Self::Literal(text) => text.clone(),
        }
    }

    fn reset(&mut self) {
        if let Self::Numeric(value) = self {
            *value = 0;
        }
    }

    fn increment(&mut self) -> bool {
        if let Self::Numeric(value) = self {
            if *value < u16::MAX {
                *value += 1;
                return true;
            }
        }
        false
    }

    fn decrement(&mut self) {
        if let Self::Numeric(value) = self {
            if *value > 0 {
                *value -= 1;
            }
        }
    }
}

/// A dotted 3-or-4 component version literal as found inside a marker
/// line. Constructed per match, mutated at most once, rendered back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionNumber {
    major: Component,
    minor: Component,
    patch: Component,
    revision: Option<Component>,
}

impl VersionNumber {
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() < 3 {
            return Err(VersionParseError::TooFewParts(text.to_string()));
        }
        Ok(Self {
            major: Component::parse(parts[0]),
            minor: Component::parse(parts[1]),
            patch: Component::parse(parts[2]),
            revision: parts.get(3).map(|part| Component::parse(part)),
        })
    }

    /// Bumps the given part by one, saturating silently at 65535.
    /// Incrementing major restarts minor and patch from zero, and
    /// incrementing minor restarts patch; literal components are never
    /// touched.
    pub fn increment(&mut self, part: VersionPart) {
        match part {
            VersionPart::Major => {
                if self.major.increment() {
                    self.minor.reset();
                    self.patch.reset();
                }
            }
            VersionPart::Minor => {
                if self.minor.increment() {
                    self.patch.reset();
                }
            }
            VersionPart::Patch => {
                self.patch.increment();
            }
        }
    }

    /// Lowers the given part by one, saturating silently at zero.
    /// Decrementing never resets subordinate parts.
    pub fn decrement(&mut self, part: VersionPart) {
        match part {
            VersionPart::Major => self.major.decrement(),
            VersionPart::Minor => self.minor.decrement(),
            VersionPart::Patch => self.patch.decrement(),
        }
    }

    pub fn render(&self) -> String {
        let mut rendered = format!(
            "{}.{}.{}",
            self.major.render(),
            self.minor.render(),
            self.patch.render()
        );
        if let Some(revision) = &self.revision {
            rendered.push('.');
            rendered.push_str(&revision.render());
        }
        rendered
    }
}
