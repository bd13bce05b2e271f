use crate::dto::{EntrantStatusDto, RegistrationDto};
use crate::query::Query;
use waitlist_domain::value_object::{EventId, UserId};

#[derive(Debug, Clone)]
pub struct GetEvent {
    pub event_id: EventId,
}

impl Query for GetEvent {
    const NAME: &'static str = "GetEvent";
    type Dto = RegistrationDto;
}

#[derive(Debug, Clone)]
pub struct GetEntrantStatus {
    pub event_id: EventId,
    pub user_id: UserId,
}

impl Query for GetEntrantStatus {
    const NAME: &'static str = "GetEntrantStatus";
    type Dto = EntrantStatusDto;
}
