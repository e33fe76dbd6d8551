use std::fmt::Display;

use crate::api::CourseId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Enable,
    Disable,
}

impl ToggleAction {
    /// The action a switch offers for a course in the given state.
    pub fn for_state(enabled: bool) -> Self {
        if enabled {
            ToggleAction::Disable
        } else {
            ToggleAction::Enable
        }
    }

    pub fn enables(self) -> bool {
        self == ToggleAction::Enable
    }

    pub fn verb(self) -> &'static str {
        match self {
            ToggleAction::Enable => "enable",
            ToggleAction::Disable => "disable",
        }
    }
}

impl Display for ToggleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ToggleAction::Enable => "Enable",
            ToggleAction::Disable => "Disable",
        })
    }
}

/// The single dialog slot of the courses page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    None,
    CreateCourse,
    EditCourse(CourseId),
    EnableDisable(CourseId, ToggleAction),
    Delete(CourseId),
}

impl Dialog {
    pub fn is_open(self) -> bool {
        self != Dialog::None
    }
}
