use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::EntityId;

/// Lifecycle state of a join request.
///
/// `AwaitingGroup`: the user asked to join and the group owner must
/// answer. `AwaitingUser`: the owner invited the user and the user must
/// answer. Either side closes the exchange with `Accepted` or
/// `Rejected`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    AwaitingGroup,
    AwaitingUser,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// Parse a wire/user string, failing with a descriptive error for
    /// anything outside the four valid values.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        Self::from_str(raw).map_err(|_| Error::InvalidStatus {
            value: raw.to_owned(),
        })
    }
}

/// A pending exchange between a user and a group: either a request to
/// join or an invitation to join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub user: EntityId,
    pub group: EntityId,
    pub status: RequestStatus,
}

impl Request {
    /// A new, not-yet-persisted request.
    pub fn new(user: EntityId, group: EntityId, status: RequestStatus) -> Self {
        Self {
            id: None,
            user,
            group,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_status_strings_parse() {
        assert_eq!(
            RequestStatus::parse("accepted").expect("valid"),
            RequestStatus::Accepted
        );
        assert_eq!(
            RequestStatus::parse("awaiting_group").expect("valid"),
            RequestStatus::AwaitingGroup
        );
    }

    #[test]
    fn bogus_status_fails_with_invalid_enum_error() {
        let err = RequestStatus::parse("bogus").expect_err("must fail");
        assert!(matches!(err, Error::InvalidStatus { .. }));
    }

    #[test]
    fn status_wire_form_is_snake_case() {
        let req = Request::new(1.into(), 2.into(), RequestStatus::AwaitingUser);
        let json = serde_json::to_value(&req).expect("serializable");
        assert_eq!(json["status"], "awaiting_user");

        assert!(
            serde_json::from_str::<Request>(r#"{"user":1,"group":2,"status":"bogus"}"#).is_err()
        );
    }
}
