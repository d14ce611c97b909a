//! Hover and click highlighting of wires and their network interfaces.
//!
//! Wires and interface badges carry relation class names. Pointer events are
//! mapped back to these relation classes, and a small state machine decides
//! which relations are "hot". The resulting [`TagChanges`] are applied by the
//! rendering surface; the state machine itself never touches elements.

use crate::relation::is_relation_class_name;

/// How far up from an event target to look for relation classes.
pub const MAX_ANCESTOR_DEPTH: usize = 5;

/// Find the relation classes of an event target or its nearest ancestor
/// carrying any.
///
/// `ancestry` yields the class lists of the target, its parent, and so on.
/// Only the first level with matches is returned; levels are not merged.
pub fn locate_relation_classes<I, C, S>(ancestry: I, base: &str, max_depth: usize) -> Vec<String>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for classes in ancestry.into_iter().take(max_depth) {
        let relations: Vec<String> = classes
            .into_iter()
            .filter(|c| is_relation_class_name(base, c.as_ref()))
            .map(|c| c.as_ref().to_string())
            .collect();
        if !relations.is_empty() {
            return relations;
        }
    }
    Vec::new()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Hovering(Vec<String>),
    /// Pinned by a click; hovering doesn't change it.
    Selected(Vec<String>),
}

/// Relation classes to tag hot and to cool down after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagChanges {
    pub cool: Vec<String>,
    pub heat: Vec<String>,
}

impl TagChanges {
    pub fn is_empty(&self) -> bool {
        self.cool.is_empty() && self.heat.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    state: HighlightState,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    pub fn hot(&self) -> &[String] {
        match &self.state {
            HighlightState::Idle => &[],
            HighlightState::Hovering(tags) | HighlightState::Selected(tags) => tags,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.state, HighlightState::Selected(_))
    }

    /// Pointer entered an element with the given relation classes (possibly
    /// none).
    pub fn pointer_over(&mut self, tags: Vec<String>) -> TagChanges {
        if self.is_selected() {
            return TagChanges::default();
        }
        if tags.is_empty() {
            // Entering an untagged area also catches pointer-leaves that
            // never arrived.
            return self.transition(HighlightState::Idle);
        }
        if self.hot() == tags.as_slice() {
            return TagChanges::default();
        }
        self.transition(HighlightState::Hovering(tags))
    }

    /// Pointer left an element with the given relation classes.
    pub fn pointer_out(&mut self, tags: &[String]) -> TagChanges {
        let leaving = match &self.state {
            HighlightState::Hovering(hot) => !tags.is_empty() && hot.as_slice() == tags,
            _ => false,
        };
        if !leaving {
            return TagChanges::default();
        }
        self.transition(HighlightState::Idle)
    }

    /// Click on an element with the given relation classes (possibly none).
    pub fn click(&mut self, tags: Vec<String>) -> TagChanges {
        if tags.is_empty() {
            return self.transition(HighlightState::Idle);
        }
        let toggle_off = matches!(&self.state, HighlightState::Selected(selected) if *selected == tags);
        if toggle_off {
            return self.transition(HighlightState::Idle);
        }
        self.transition(HighlightState::Selected(tags))
    }

    /// Forget any highlight, such as when the wires have been re-extracted.
    pub fn reset(&mut self) -> TagChanges {
        self.transition(HighlightState::Idle)
    }

    fn transition(&mut self, next: HighlightState) -> TagChanges {
        let previous = std::mem::replace(&mut self.state, next);
        let old: &[String] = match &previous {
            HighlightState::Idle => &[],
            HighlightState::Hovering(tags) | HighlightState::Selected(tags) => tags,
        };
        let new = self.hot();
        TagChanges {
            cool: old.iter().filter(|t| !new.contains(t)).cloned().collect(),
            heat: new.iter().filter(|t| !old.contains(t)).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(t: &[&str]) -> Vec<String> {
        t.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_locate_on_target() {
        let ancestry = vec![vec!["wire", "veth", "rel-a-b"]];
        assert_eq!(
            locate_relation_classes(ancestry, "", MAX_ANCESTOR_DEPTH),
            tags(&["rel-a-b"])
        );
    }

    #[test]
    fn test_locate_first_level_only() {
        let ancestry = vec![
            vec!["icon"],
            vec!["badge", "rel-a-b", "rel-a"],
            vec!["card", "rel-c-d"],
        ];
        assert_eq!(
            locate_relation_classes(ancestry, "", MAX_ANCESTOR_DEPTH),
            tags(&["rel-a-b", "rel-a"])
        );
    }

    #[test]
    fn test_locate_depth_limit() {
        let mut ancestry: Vec<Vec<&str>> = vec![vec![]; 5];
        ancestry.push(vec!["rel-a-b"]);
        assert!(locate_relation_classes(ancestry, "", MAX_ANCESTOR_DEPTH).is_empty());
    }

    #[test]
    fn test_locate_respects_base() {
        let ancestry = vec![vec!["other-rel-a-b", "bb-rel-a-b"]];
        assert_eq!(
            locate_relation_classes(ancestry, "bb-", MAX_ANCESTOR_DEPTH),
            tags(&["bb-rel-a-b"])
        );
    }

    #[test]
    fn test_click_toggles_selection() {
        let mut h = Highlighter::new();
        let changes = h.click(tags(&["rel-A-B"]));
        assert_eq!(h.state(), &HighlightState::Selected(tags(&["rel-A-B"])));
        assert_eq!(changes.heat, tags(&["rel-A-B"]));

        let changes = h.click(tags(&["rel-A-B"]));
        assert_eq!(h.state(), &HighlightState::Idle);
        assert_eq!(changes.cool, tags(&["rel-A-B"]));
    }

    #[test]
    fn test_click_other_reselects() {
        let mut h = Highlighter::new();
        h.click(tags(&["rel-A-B"]));
        let changes = h.click(tags(&["rel-C-D"]));
        assert_eq!(h.hot(), tags(&["rel-C-D"]).as_slice());
        assert_eq!(changes.cool, tags(&["rel-A-B"]));
        assert_eq!(changes.heat, tags(&["rel-C-D"]));
    }

    #[test]
    fn test_click_elsewhere_deselects() {
        let mut h = Highlighter::new();
        h.click(tags(&["rel-A-B"]));
        h.click(Vec::new());
        assert_eq!(h.state(), &HighlightState::Idle);
    }

    #[test]
    fn test_hover_ignored_while_selected() {
        let mut h = Highlighter::new();
        h.click(tags(&["rel-A-B"]));
        assert!(h.pointer_over(tags(&["rel-C-D"])).is_empty());
        assert!(h.pointer_out(&tags(&["rel-A-B"])).is_empty());
        assert!(h.pointer_over(Vec::new()).is_empty());
        assert!(h.is_selected());
    }

    #[test]
    fn test_hover_cycle() {
        let mut h = Highlighter::new();
        let changes = h.pointer_over(tags(&["rel-A-B"]));
        assert_eq!(h.state(), &HighlightState::Hovering(tags(&["rel-A-B"])));
        assert_eq!(changes.heat, tags(&["rel-A-B"]));

        let changes = h.pointer_out(&tags(&["rel-A-B"]));
        assert_eq!(h.state(), &HighlightState::Idle);
        assert_eq!(changes.cool, tags(&["rel-A-B"]));
    }

    #[test]
    fn test_missed_pointer_out_cooled() {
        let mut h = Highlighter::new();
        h.pointer_over(tags(&["rel-A-B"]));
        let changes = h.pointer_over(tags(&["rel-C-D"]));
        assert_eq!(changes.cool, tags(&["rel-A-B"]));
        assert_eq!(changes.heat, tags(&["rel-C-D"]));

        let changes = h.pointer_over(Vec::new());
        assert_eq!(h.state(), &HighlightState::Idle);
        assert_eq!(changes.cool, tags(&["rel-C-D"]));
    }

    #[test]
    fn test_stale_pointer_out_ignored() {
        let mut h = Highlighter::new();
        h.pointer_over(tags(&["rel-C-D"]));
        assert!(h.pointer_out(&tags(&["rel-A-B"])).is_empty());
        assert_eq!(h.hot(), tags(&["rel-C-D"]).as_slice());
    }

    #[test]
    fn test_reset() {
        let mut h = Highlighter::new();
        h.click(tags(&["rel-A-B"]));
        let changes = h.reset();
        assert_eq!(h.state(), &HighlightState::Idle);
        assert!(h.hot().is_empty());
        assert_eq!(changes.cool, tags(&["rel-A-B"]));
        assert!(changes.heat.is_empty());

        assert!(h.reset().is_empty());
    }
}
