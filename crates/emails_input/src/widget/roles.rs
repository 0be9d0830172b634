//! Role of every element a widget rendered, decided when it is rendered.
//!
//! Event handlers look the target up here instead of inspecting attributes
//! on the element.

use dom::Id;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        matches!(self, Validity::Valid)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    Container,
    Input,
    Chip {
        address: String,
        validity: Validity,
        delete_icon: Id,
    },
    DeleteIcon {
        chip: Id,
    },
}

#[derive(Debug, Default)]
pub(crate) struct RoleTable {
    roles: HashMap<Id, Role>,
}

impl RoleTable {
    pub fn assign(&mut self, id: Id, role: Role) {
        self.roles.insert(id, role);
    }

    pub fn get(&self, id: Id) -> Option<&Role> {
        self.roles.get(&id)
    }

    /// Forget a chip and its delete affordance; returns what the chip showed.
    pub fn release_chip(&mut self, chip: Id) -> Option<(String, Validity)> {
        match self.roles.remove(&chip)? {
            Role::Chip {
                address,
                validity,
                delete_icon,
            } => {
                self.roles.remove(&delete_icon);
                Some((address, validity))
            }
            other => {
                self.roles.insert(chip, other);
                None
            }
        }
    }

    pub fn chip_count(&self) -> usize {
        self.roles
            .values()
            .filter(|r| matches!(r, Role::Chip { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.roles.clear();
    }
}
