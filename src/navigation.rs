use std::fmt::Display;

use clap::ValueEnum;

use crate::context::AppContext;

/// Top level pages of the admin frontend, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Page {
    Organizations,
    Courses,
    Users,
    Analytics,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Organizations,
        Page::Courses,
        Page::Users,
        Page::Analytics,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Organizations => "Organizations",
            Page::Courses => "Course Management",
            Page::Users => "Users",
            Page::Analytics => "Analytics",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Organizations => "/organizations/",
            Page::Courses => "/courses/",
            Page::Users => "/users/",
            Page::Analytics => "/analytics/",
        }
    }

    pub fn admin_only(self) -> bool {
        self == Page::Organizations
    }

    pub fn shows_organization_switcher(self) -> bool {
        self != Page::Organizations
    }

    /// Body of the pages that have no content yet.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Page::Users => Some("User Management Page"),
            Page::Analytics => Some("Analytics Page"),
            Page::Organizations | Page::Courses => None,
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub page: Page,
    pub href: String,
}

/// Menu bar entries visible in `context`.
pub fn menu(context: &AppContext) -> Vec<MenuEntry> {
    Page::ALL
        .into_iter()
        .filter(|page| context.is_platform_admin() || !page.admin_only())
        .map(|page| MenuEntry {
            page,
            href: context.page_url(page.path()),
        })
        .collect()
}
