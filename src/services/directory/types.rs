use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Role of an empire within its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmpireType {
    Active,
    Gm,
    Npc,
    Observer,
    Inactive,
    Abandoned,
    Homeless,
}

impl EmpireType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Gm => "GM",
            Self::Npc => "NPC",
            Self::Observer => "OBSERVER",
            Self::Inactive => "INACTIVE",
            Self::Abandoned => "ABANDONED",
            Self::Homeless => "HOMELESS",
        }
    }
}

impl fmt::Display for EmpireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown empire type: {0}")]
pub struct UnknownEmpireType(pub String);

impl FromStr for EmpireType {
    type Err = UnknownEmpireType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "GM" => Ok(Self::Gm),
            "NPC" => Ok(Self::Npc),
            "OBSERVER" => Ok(Self::Observer),
            "INACTIVE" => Ok(Self::Inactive),
            "ABANDONED" => Ok(Self::Abandoned),
            "HOMELESS" => Ok(Self::Homeless),
            other => Err(UnknownEmpireType(other.to_string())),
        }
    }
}

/// An empire as the directory reports it.
///
/// Identity is the pair (`session_name`, `name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Empire {
    pub name: String,
    pub session_name: String,
    pub player_name: String,
    pub empire_type: EmpireType,
}

impl Empire {
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.player_name == username
    }

    pub fn is_game_master_of(&self, session_name: &str) -> bool {
        self.empire_type == EmpireType::Gm && self.session_name == session_name
    }
}
