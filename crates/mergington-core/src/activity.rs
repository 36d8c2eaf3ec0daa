use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// A single extracurricular offering. The name lives in the owning
/// [`Directory`], not on the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn enrolled(&self) -> usize {
        self.participants.len()
    }

    /// Remaining capacity. Saturates at zero when the roster is over capacity,
    /// which can happen because signups do not enforce the limit.
    pub fn spots_left(&self) -> usize {
        (self.max_participants as usize).saturating_sub(self.enrolled())
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// Ordered name → activity table.
///
/// Serializes as a JSON object whose keys keep insertion order, so clients
/// see activities in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<(String, Activity)>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an activity. Returns false (and leaves the table untouched)
    /// when the name is already taken.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, activity));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Activity> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Directory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
