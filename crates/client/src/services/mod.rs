//! One façade per backend resource.
//!
//! Services hold no state of their own beyond the shared [`ApiClient`]; only
//! [`AuthService`] touches the token slot.

pub mod auth;
pub mod categories;
pub mod contact;
pub mod dashboard;
pub mod events;
pub mod tickets;
pub mod transactions;
pub mod users;

pub use auth::{AuthOutcome, AuthService};
pub use categories::CategoryService;
pub use contact::ContactService;
pub use dashboard::DashboardService;
pub use events::{EventFilter, EventService};
pub use tickets::TicketService;
pub use transactions::TransactionService;
pub use users::UserService;

use crate::http::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    pub fn events(&self) -> EventService {
        EventService::new(self.clone())
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.clone())
    }

    pub fn tickets(&self) -> TicketService {
        TicketService::new(self.clone())
    }

    pub fn transactions(&self) -> TransactionService {
        TransactionService::new(self.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.clone())
    }

    pub fn contact(&self) -> ContactService {
        ContactService::new(self.clone())
    }
}
