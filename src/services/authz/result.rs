/*
 * Responsibility
 * - 認可判定の結果型 (Authorized | Denied { reason })
 * - reason ごとの redirect 先・表示メッセージの定義
 *
 * Notes
 * - 結果には authorized / reason / redirectTo 以外のフィールドを持たせない
 *   (empire 名・session 名・所有者などはシリアライズ結果に決して含めない)
 */
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer, ser::SerializeStruct};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    NotAuthenticated,
    NotOwner,
    // Reserved: no decision path produces it yet.
    SessionNotFound,
    EmpireNotFound,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::NotOwner => "not_owner",
            Self::SessionNotFound => "session_not_found",
            Self::EmpireNotFound => "empire_not_found",
        }
    }

    /// Fixed, user-facing message for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "You must be logged in to access this page",
            Self::NotOwner => "You do not have permission to access this empire",
            Self::SessionNotFound => "The requested session could not be found",
            Self::EmpireNotFound => "The requested empire could not be found",
        }
    }

    /// Advisory redirect target.
    pub fn redirect_to(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => LOGIN_PATH,
            _ => UNAUTHORIZED_PATH,
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown denial reason")]
pub struct UnknownReason;

impl FromStr for DenialReason {
    type Err = UnknownReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_authenticated" => Ok(Self::NotAuthenticated),
            "not_owner" => Ok(Self::NotOwner),
            "session_not_found" => Ok(Self::SessionNotFound),
            "empire_not_found" => Ok(Self::EmpireNotFound),
            _ => Err(UnknownReason),
        }
    }
}

/// Verdict of one authorization evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationResult {
    Authorized,
    Denied { reason: DenialReason },
}

impl AuthorizationResult {
    pub fn denied(reason: DenialReason) -> Self {
        Self::Denied { reason }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    pub fn reason(&self) -> Option<DenialReason> {
        match self {
            Self::Authorized => None,
            Self::Denied { reason } => Some(*reason),
        }
    }

    pub fn redirect_to(&self) -> Option<&'static str> {
        self.reason().map(|r| r.redirect_to())
    }
}

// {"authorized":true} | {"authorized":false,"reason":"..","redirectTo":".."}
impl Serialize for AuthorizationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Authorized => {
                let mut s = serializer.serialize_struct("AuthorizationResult", 1)?;
                s.serialize_field("authorized", &true)?;
                s.end()
            }
            Self::Denied { reason } => {
                let mut s = serializer.serialize_struct("AuthorizationResult", 3)?;
                s.serialize_field("authorized", &false)?;
                s.serialize_field("reason", reason)?;
                s.serialize_field("redirectTo", reason.redirect_to())?;
                s.end()
            }
        }
    }
}
