use serde::{Deserialize, Deserializer, Serialize};

/// A service request as stored by the ticketing backend.
///
/// Missing and `null` fields both decode to the field's default, so one
/// sparse record never fails the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "isOpen", default, deserialize_with = "null_as_default")]
    pub is_open: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /tickets`.
///
/// `response` is optional so that a body without the field decodes cleanly;
/// a field of the wrong shape is a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketList {
    #[serde(default)]
    pub response: Option<Vec<Ticket>>,
}

impl TicketList {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self {
            response: Some(tickets),
        }
    }

    /// The tickets, or `None` when the list is missing or empty.
    pub fn into_non_empty(self) -> Option<Vec<Ticket>> {
        self.response.filter(|tickets| !tickets.is_empty())
    }
}
