//! Section nesting levels, inferred from the order adornment styles appear.

use indextree::{Arena, NodeId};

use crate::nodes::{Ast, NodeValue};
use crate::parser::messages::{MessageKind, ParserMessage};

#[derive(Debug)]
struct SectionLevel {
    rune: char,
    overline: bool,
    level: usize,
    sections: Vec<NodeId>,
}

/// The registry of adornment styles seen so far.  Entries are only ever
/// appended.
#[derive(Debug, Default)]
pub(crate) struct SectionLevels {
    levels: Vec<SectionLevel>,
    last_section: Option<NodeId>,
}

fn style(arena: &Arena<Ast>, node: NodeId) -> Option<(char, bool, usize)> {
    match arena.get(node)?.get().value {
        NodeValue::Section(ref s) => Some((s.underline.rune, s.overline.is_some(), s.level)),
        _ => None,
    }
}

impl SectionLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `section` its level and records it, or reports that its
    /// style is inconsistent with the sections before it.  An inconsistent
    /// section is left unrecorded.
    pub fn add(&mut self, arena: &mut Arena<Ast>, section: NodeId) -> Option<ParserMessage> {
        let (rune, overline, _) = style(arena, section)?;
        let last_level = self
            .last_section
            .and_then(|id| style(arena, id))
            .map(|(_, _, level)| level);

        let found = self
            .levels
            .iter()
            .position(|l| l.rune == rune && l.overline == overline);

        let ix = match found {
            Some(ix) => {
                let level = self.levels[ix].level;
                if last_level.map_or(level > 1, |last| level > last + 1) {
                    return Some(MessageKind::TitleLevelInconsistent.into());
                }
                ix
            }
            None => {
                let level = last_level.map_or(self.levels.len() + 1, |last| last + 1);
                if self.levels.iter().any(|l| l.level == level) {
                    return Some(MessageKind::TitleLevelInconsistent.into());
                }
                self.levels.push(SectionLevel {
                    rune,
                    overline,
                    level,
                    sections: vec![],
                });
                self.levels.len() - 1
            }
        };

        let entry = &mut self.levels[ix];
        entry.sections.push(section);
        if let Some(NodeValue::Section(s)) = arena.get_mut(section).map(|n| &mut n.get_mut().value)
        {
            s.level = entry.level;
        }
        self.last_section = Some(section);
        None
    }

    /// The most recent section recorded at exactly `level`.
    pub fn last_section_by_level(&self, level: usize) -> Option<NodeId> {
        self.levels
            .iter()
            .rev()
            .filter(|l| l.level == level)
            .find_map(|l| l.sections.last().copied())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{NodeAdornment, NodeSection, NodeTitle, Sourcepos};

    fn section(arena: &mut Arena<Ast>, rune: char, overline: bool) -> NodeId {
        let adornment = NodeAdornment {
            rune,
            sourcepos: Sourcepos::default(),
        };
        arena.new_node(Ast::new(
            NodeValue::Section(NodeSection {
                level: 0,
                title: NodeTitle {
                    text: "T".into(),
                    sourcepos: Sourcepos::default(),
                },
                overline: overline.then(|| adornment.clone()),
                underline: adornment,
            }),
            Sourcepos::default(),
        ))
    }

    fn level(arena: &Arena<Ast>, node: NodeId) -> usize {
        style(arena, node).map_or(0, |(_, _, level)| level)
    }

    #[test]
    fn styles_get_levels_in_order() {
        let mut arena = Arena::new();
        let mut levels = SectionLevels::new();

        let a = section(&mut arena, '=', false);
        let b = section(&mut arena, '-', false);
        let c = section(&mut arena, '=', false);
        let d = section(&mut arena, '-', false);
        for node in [a, b, c, d] {
            assert_eq!(levels.add(&mut arena, node), None);
        }

        assert_eq!(
            [a, b, c, d].map(|n| level(&arena, n)),
            [1, 2, 1, 2]
        );
        assert_eq!(levels.len(), 2);
        assert_eq!(levels.last_section_by_level(1), Some(c));
        assert_eq!(levels.last_section_by_level(2), Some(d));
        assert_eq!(levels.last_section_by_level(3), None);
    }

    #[test]
    fn overline_makes_a_distinct_style() {
        let mut arena = Arena::new();
        let mut levels = SectionLevels::new();

        let a = section(&mut arena, '=', true);
        let b = section(&mut arena, '=', false);
        assert_eq!(levels.add(&mut arena, a), None);
        assert_eq!(levels.add(&mut arena, b), None);
        assert_eq!(level(&arena, b), 2);
    }

    #[test]
    fn new_style_at_a_used_level() {
        let mut arena = Arena::new();
        let mut levels = SectionLevels::new();

        let nodes = ['=', '-', '='].map(|r| section(&mut arena, r, false));
        for node in nodes {
            assert_eq!(levels.add(&mut arena, node), None);
        }

        // Directly under a level-1 section a new style would be level 2,
        // which '-' already holds.
        let d = section(&mut arena, '~', false);
        assert_eq!(
            levels.add(&mut arena, d),
            Some(MessageKind::TitleLevelInconsistent.into())
        );
        assert_eq!(level(&arena, d), 0);
        assert_eq!(levels.len(), 2);

        let e = section(&mut arena, '-', false);
        assert_eq!(levels.add(&mut arena, e), None);
        assert_eq!(level(&arena, e), 2);
    }

    #[test]
    fn skipping_a_level() {
        let mut arena = Arena::new();
        let mut levels = SectionLevels::new();

        let nodes = ['=', '-', '~', '='].map(|r| section(&mut arena, r, false));
        for node in nodes {
            assert_eq!(levels.add(&mut arena, node), None);
        }
        let deep = section(&mut arena, '~', false);
        assert_eq!(
            levels.add(&mut arena, deep),
            Some(MessageKind::TitleLevelInconsistent.into())
        );
    }
}
