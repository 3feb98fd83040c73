//! Layout actions and their feasibility.

use std::fmt;

use cq_core::CheckoutStation;

/// A change the agent can propose.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    NoChange,
    AddRegular,
    AddKiosk,
    RemoveStation,
    ConvertToKiosk,
    ConvertToRegular,
    OptimizeLayout,
}

impl Action {
    pub const COUNT: usize = 7;

    /// Every action, in the order feasibility lists them.
    pub const ALL: [Action; Action::COUNT] = [
        Action::NoChange,
        Action::AddRegular,
        Action::AddKiosk,
        Action::RemoveStation,
        Action::ConvertToKiosk,
        Action::ConvertToRegular,
        Action::OptimizeLayout,
    ];

    /// Position in [`Action::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::NoChange         => "no_change",
            Action::AddRegular       => "add_regular",
            Action::AddKiosk         => "add_kiosk",
            Action::RemoveStation    => "remove_station",
            Action::ConvertToKiosk   => "convert_to_kiosk",
            Action::ConvertToRegular => "convert_to_regular",
            Action::OptimizeLayout   => "optimize_layout",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Station counts that decide which actions are feasible.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Layout {
    pub total:   usize,
    pub active:  usize,
    pub regular: usize,
    pub kiosk:   usize,
}

impl Layout {
    pub fn from_stations(stations: &[CheckoutStation]) -> Self {
        Self {
            total:   stations.len(),
            active:  stations.iter().filter(|s| s.is_active).count(),
            regular: stations.iter().filter(|s| s.is_regular()).count(),
            kiosk:   stations.iter().filter(|s| s.is_kiosk()).count(),
        }
    }

    /// Feasible actions in [`Action::ALL`] order.
    ///
    /// `no_change` and `optimize_layout` are always available; adding needs
    /// room under `max_stations`; removing needs more than one open station;
    /// converting needs a station of the source kind.
    pub fn feasible_actions(&self, max_stations: usize) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| match action {
                Action::NoChange | Action::OptimizeLayout => true,
                Action::AddRegular | Action::AddKiosk => self.total < max_stations,
                Action::RemoveStation => self.active > 1,
                Action::ConvertToKiosk => self.regular > 0,
                Action::ConvertToRegular => self.kiosk > 0,
            })
            .collect()
    }
}
