use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a renderer, issued once at creation.
///
/// Pool timestamps and bridge registrations are keyed by this id rather
/// than by the renderer itself, so bookkeeping never holds a renderer alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RendererId(uuid::Uuid);

impl RendererId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RendererId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RendererId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_id_is_v4_uuid() {
        let id = RendererId::new();
        let parsed = uuid::Uuid::parse_str(&id.to_string()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn renderer_id_is_unique() {
        assert_ne!(RendererId::new(), RendererId::new());
    }

    #[test]
    fn renderer_id_copy_is_equal() {
        let id = RendererId::new();
        let copy = id;
        assert_eq!(id, copy);
    }

    #[test]
    fn renderer_id_serialization() {
        let id = RendererId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: RendererId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn renderer_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        let id = RendererId::new();
        set.insert(id);
        set.insert(id);
        assert_eq!(set.len(), 1);
    }
}
