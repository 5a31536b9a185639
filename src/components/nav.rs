//! Navigation list that collapses into a dropdown on narrow viewports. The
//! parent owns which item is active; items are plain data.

use super::Breakpoint;

const NO_ACTIVE_LABEL: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub icon: Option<String>,
    pub is_active: bool,
}

impl NavItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            is_active: false,
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

#[derive(Clone, Debug)]
struct NavSection {
    title: Option<String>,
    items: Vec<NavItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItemView {
    pub label: String,
    pub icon: Option<String>,
    pub is_active: bool,
    /// Lines of label text shown before truncation.
    pub max_lines: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavSectionView {
    pub title: Option<String>,
    pub items: Vec<NavItemView>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuGroupView {
    pub title: Option<String>,
    pub items: Vec<NavItemView>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavView {
    /// Vertical list, used at or above the breakpoint.
    List { sections: Vec<NavSectionView> },
    /// Dropdown whose trigger shows the active item.
    Menu {
        trigger_label: String,
        trigger_icon: Option<String>,
        groups: Vec<MenuGroupView>,
    },
}

#[derive(Clone, Debug)]
pub struct Nav {
    sections: Vec<NavSection>,
    breakpoint: Breakpoint,
}

impl Default for Nav {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            breakpoint: Breakpoint::Lg,
        }
    }
}

impl Nav {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Adds an item outside of any titled group.
    #[must_use]
    pub fn with_item(mut self, item: NavItem) -> Self {
        match self.sections.last_mut() {
            Some(section) if section.title.is_none() => section.items.push(item),
            _ => self.sections.push(NavSection {
                title: None,
                items: vec![item],
            }),
        }
        self
    }

    #[must_use]
    pub fn with_group(mut self, title: impl Into<String>, items: Vec<NavItem>) -> Self {
        self.sections.push(NavSection {
            title: Some(title.into()),
            items,
        });
        self
    }

    /// Marks the item with this label active and every other item inactive.
    pub fn set_active(&mut self, label: &str) {
        for item in self.sections.iter_mut().flat_map(|s| s.items.iter_mut()) {
            item.is_active = item.label == label;
        }
    }

    /// Last item flagged active, when several claim it.
    #[must_use]
    pub fn active(&self) -> Option<&NavItem> {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter())
            .filter(|item| item.is_active)
            .last()
    }

    #[must_use]
    pub fn render(&self, viewport_width: u32) -> NavView {
        if Breakpoint::from_width(viewport_width) >= self.breakpoint {
            NavView::List {
                sections: self
                    .sections
                    .iter()
                    .map(|section| NavSectionView {
                        title: section.title.clone(),
                        items: item_views(&section.items, 2),
                    })
                    .collect(),
            }
        } else {
            let active = self.active();
            NavView::Menu {
                trigger_label: active.map_or_else(
                    || NO_ACTIVE_LABEL.to_string(),
                    |item| item.label.clone(),
                ),
                trigger_icon: active.and_then(|item| item.icon.clone()),
                groups: self
                    .sections
                    .iter()
                    .map(|section| MenuGroupView {
                        title: section.title.clone(),
                        items: item_views(&section.items, 1),
                    })
                    .collect(),
            }
        }
    }
}

fn item_views(items: &[NavItem], max_lines: u8) -> Vec<NavItemView> {
    items
        .iter()
        .map(|item| NavItemView {
            label: item.label.clone(),
            icon: item.icon.clone(),
            is_active: item.is_active,
            max_lines,
        })
        .collect()
}
