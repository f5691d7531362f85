use crate::models::UserRecord;

/// Tag ids picked in the prompt, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    ids: Vec<String>,
}

impl TagSelection {
    /// Nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the tags the user already has.
    pub fn from_user(user: &UserRecord) -> Self {
        Self {
            ids: user.tag_ids(),
        }
    }

    /// Adds `tag_id` if absent, removes it otherwise. Returns whether the tag
    /// is selected afterwards.
    pub fn toggle(&mut self, tag_id: &str) -> bool {
        if let Some(position) = self.ids.iter().position(|id| id == tag_id) {
            self.ids.remove(position);
            false
        } else {
            self.ids.push(tag_id.to_string());
            true
        }
    }

    /// Whether `tag_id` is selected.
    pub fn contains(&self, tag_id: &str) -> bool {
        self.ids.iter().any(|id| id == tag_id)
    }

    /// Selected ids in pick order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Consumes the selection into its ids.
    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }

    /// Number of selected tags.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = TagSelection::new();
        assert!(selection.toggle("1"));
        assert!(selection.toggle("3"));
        assert_eq!(selection.ids(), ["1".to_string(), "3".to_string()]);
        assert!(!selection.toggle("1"));
        assert!(!selection.contains("1"));
        assert!(selection.contains("3"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_seeded_from_user_tags() {
        let user = UserRecord::new("u1").with_tags(vec![Tag::new("2", "Pets"), Tag::new("5", "Quiet")]);
        let mut selection = TagSelection::from_user(&user);
        assert!(selection.contains("2"));
        selection.toggle("2");
        selection.toggle("5");
        assert!(selection.is_empty());
        assert!(selection.into_ids().is_empty());
    }
}
