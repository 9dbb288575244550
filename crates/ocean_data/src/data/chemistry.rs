use serde::{Deserialize, Serialize};

/// A named scalar field stored by the grid system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridChannel {
    H2,
    Co2,
    Oxygen,
    Fe2,
    Ch4,
    H2s,
    Nh3,
    Phosphorus,
    Nitrogen,
    Light,
    Temperature,
    Uv,
    Ph,
}

impl GridChannel {
    pub const ALL: [GridChannel; 13] = [
        GridChannel::H2,
        GridChannel::Co2,
        GridChannel::Oxygen,
        GridChannel::Fe2,
        GridChannel::Ch4,
        GridChannel::H2s,
        GridChannel::Nh3,
        GridChannel::Phosphorus,
        GridChannel::Nitrogen,
        GridChannel::Light,
        GridChannel::Temperature,
        GridChannel::Uv,
        GridChannel::Ph,
    ];

    /// Chemical fields are clamped non-negative; physical fields are not.
    #[must_use]
    pub fn is_chemical(self) -> bool {
        !matches!(
            self,
            GridChannel::Light | GridChannel::Temperature | GridChannel::Uv | GridChannel::Ph
        )
    }

    /// Channels wiped outside the water band by `sanitize`.
    #[must_use]
    pub fn cleared_outside_water(self) -> bool {
        self.is_chemical() || matches!(self, GridChannel::Light | GridChannel::Uv)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GridChannel::H2 => "h2",
            GridChannel::Co2 => "co2",
            GridChannel::Oxygen => "oxygen",
            GridChannel::Fe2 => "fe2",
            GridChannel::Ch4 => "ch4",
            GridChannel::H2s => "h2s",
            GridChannel::Nh3 => "nh3",
            GridChannel::Phosphorus => "phosphorus",
            GridChannel::Nitrogen => "nitrogen",
            GridChannel::Light => "light",
            GridChannel::Temperature => "temperature",
            GridChannel::Uv => "uv",
            GridChannel::Ph => "ph",
        }
    }

    /// Looks a channel up by name, accepting the common aliases (`o2`, `p`, `n`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let channel = match lowered.as_str() {
            "h2" => GridChannel::H2,
            "co2" => GridChannel::Co2,
            "o2" | "oxygen" => GridChannel::Oxygen,
            "fe2" => GridChannel::Fe2,
            "ch4" => GridChannel::Ch4,
            "h2s" => GridChannel::H2s,
            "nh3" => GridChannel::Nh3,
            "p" | "phosphorus" => GridChannel::Phosphorus,
            "n" | "nitrogen" => GridChannel::Nitrogen,
            "light" => GridChannel::Light,
            "temperature" | "temp" => GridChannel::Temperature,
            "uv" => GridChannel::Uv,
            "ph" => GridChannel::Ph,
            _ => return None,
        };
        Some(channel)
    }
}

/// Chemicals emitted by hydrothermal vents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chemical {
    H2,
    Co2,
    Fe2,
    Ch4,
    H2s,
    Nh3,
}

impl Chemical {
    pub const ALL: [Chemical; 6] = [
        Chemical::H2,
        Chemical::Co2,
        Chemical::Fe2,
        Chemical::Ch4,
        Chemical::H2s,
        Chemical::Nh3,
    ];

    #[must_use]
    pub fn channel(self) -> GridChannel {
        match self {
            Chemical::H2 => GridChannel::H2,
            Chemical::Co2 => GridChannel::Co2,
            Chemical::Fe2 => GridChannel::Fe2,
            Chemical::Ch4 => GridChannel::Ch4,
            Chemical::H2s => GridChannel::H2s,
            Chemical::Nh3 => GridChannel::Nh3,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<Chemical> for GridChannel {
    fn from(chemical: Chemical) -> Self {
        chemical.channel()
    }
}

/// Per-chemical values, indexed by `Chemical::index`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChemicalTable(pub [f64; 6]);

impl ChemicalTable {
    #[must_use]
    pub const fn new(h2: f64, co2: f64, fe2: f64, ch4: f64, h2s: f64, nh3: f64) -> Self {
        Self([h2, co2, fe2, ch4, h2s, nh3])
    }

    #[inline]
    #[must_use]
    pub fn get(&self, chemical: Chemical) -> f64 {
        self.0[chemical.index()]
    }

    #[inline]
    pub fn set(&mut self, chemical: Chemical, value: f64) {
        self.0[chemical.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Chemical, f64)> + '_ {
        Chemical::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}
