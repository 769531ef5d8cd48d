use super::classify::LineRole;

/// The most recent heading of each kind.
///
/// Values persist across lines and pages until a later heading of the same
/// kind overwrites them. There is no scoping: a new institution does not
/// clear the sub-unit read under the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingContext {
    pub category: Option<String>,
    pub institution: Option<String>,
    pub sub_unit: Option<String>,
}

impl HeadingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from a heading line. Returns `false` (and changes nothing)
    /// for data rows and ignorable lines.
    pub fn apply(&mut self, role: &LineRole) -> bool {
        match role {
            LineRole::Category(text) => self.category = Some(text.clone()),
            LineRole::Institution(text) => self.institution = Some(text.clone()),
            LineRole::SubUnit(text) => self.sub_unit = Some(text.clone()),
            LineRole::DataRow { .. } | LineRole::Ignorable => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.institution.is_none() && self.sub_unit.is_none()
    }
}
