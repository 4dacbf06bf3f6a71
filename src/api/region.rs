//! Platform and regional routing values
//!
//! Match and account endpoints are served per region cluster, while players
//! configure the platform (server) they play on.

use std::fmt;
use std::str::FromStr;

/// Regional routing cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionalRoute {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl RegionalRoute {
    /// Host label used in `https://{host}.api.riotgames.com`
    pub fn host(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }

    /// Cluster serving account-v1, which has no `sea` deployment
    pub fn account_route(&self) -> Self {
        match self {
            Self::Sea => Self::Asia,
            other => *other,
        }
    }
}

/// Game platform (server) a player account lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Br1,
    Eun1,
    Euw1,
    Jp1,
    Kr,
    La1,
    La2,
    Me1,
    Na1,
    Oc1,
    Ph2,
    Ru,
    Sg2,
    Th2,
    Tr1,
    Tw2,
    Vn2,
}

impl Platform {
    pub const ALL: [Platform; 17] = [
        Self::Br1,
        Self::Eun1,
        Self::Euw1,
        Self::Jp1,
        Self::Kr,
        Self::La1,
        Self::La2,
        Self::Me1,
        Self::Na1,
        Self::Oc1,
        Self::Ph2,
        Self::Ru,
        Self::Sg2,
        Self::Th2,
        Self::Tr1,
        Self::Tw2,
        Self::Vn2,
    ];

    /// Platform id as used by the API, e.g. `euw1`
    pub fn id(&self) -> &'static str {
        match self {
            Self::Br1 => "br1",
            Self::Eun1 => "eun1",
            Self::Euw1 => "euw1",
            Self::Jp1 => "jp1",
            Self::Kr => "kr",
            Self::La1 => "la1",
            Self::La2 => "la2",
            Self::Me1 => "me1",
            Self::Na1 => "na1",
            Self::Oc1 => "oc1",
            Self::Ph2 => "ph2",
            Self::Ru => "ru",
            Self::Sg2 => "sg2",
            Self::Th2 => "th2",
            Self::Tr1 => "tr1",
            Self::Tw2 => "tw2",
            Self::Vn2 => "vn2",
        }
    }

    /// Name players use for the server, e.g. `euw`
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Br1 => "br",
            Self::Eun1 => "eune",
            Self::Euw1 => "euw",
            Self::Jp1 => "jp",
            Self::Kr => "kr",
            Self::La1 => "lan",
            Self::La2 => "las",
            Self::Me1 => "me",
            Self::Na1 => "na",
            Self::Oc1 => "oce",
            Self::Ph2 => "ph",
            Self::Ru => "ru",
            Self::Sg2 => "sg",
            Self::Th2 => "th",
            Self::Tr1 => "tr",
            Self::Tw2 => "tw",
            Self::Vn2 => "vn",
        }
    }

    /// Regional cluster serving match-v5 for this platform
    pub fn region(&self) -> RegionalRoute {
        match self {
            Self::Br1 | Self::La1 | Self::La2 | Self::Na1 => RegionalRoute::Americas,
            Self::Jp1 | Self::Kr => RegionalRoute::Asia,
            Self::Eun1 | Self::Euw1 | Self::Me1 | Self::Ru | Self::Tr1 => RegionalRoute::Europe,
            Self::Oc1 | Self::Ph2 | Self::Sg2 | Self::Th2 | Self::Tw2 | Self::Vn2 => {
                RegionalRoute::Sea
            }
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.id() == wanted || p.short_name() == wanted)
            .ok_or_else(|| format!("unknown platform '{}'", s))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
