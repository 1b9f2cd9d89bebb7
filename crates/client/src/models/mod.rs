//! Wire models for every backend resource (request payloads and responses).
//!
//! Field names follow the backend: snake_case, except where it speaks
//! camelCase (`emailSent`, `oldPassword`, ...). Optional response fields
//! default so a sparse body still decodes.

pub mod auth;
pub mod category;
pub mod contact;
pub mod dashboard;
pub mod event;
pub mod ticket;
pub mod transaction;
pub mod user;

pub use auth::{
    AuthPayload, ChangePasswordRequest, EmailRequest, EmailSent, GoogleAuthRequest, LoginRequest,
    OtpResent, RegisterRequest, ResetPasswordRequest, VerifyEmailPayload, VerifyEmailRequest,
};
pub use category::{Category, CategoryInput};
pub use contact::{ContactMessage, ContactRequest, ReplyRequest};
pub use dashboard::DashboardStats;
pub use event::{
    Event, EventInput, EventRegistrations, FavoriteCheck, Registration, RegistrationCheck,
    RegistrationStatus,
};
pub use ticket::{CreateTicketRequest, Ticket, TicketStatus};
pub use transaction::{
    CreateTransactionRequest, Transaction, TransactionStatus, UpdateTransactionStatusRequest,
};
pub use user::{UpdateUserRequest, UpdateUserStatusRequest, User, UserStatus};
