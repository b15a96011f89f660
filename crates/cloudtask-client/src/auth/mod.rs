/*
[INPUT]:  Credentials, issued tokens and a storage location
[OUTPUT]: Shared session context, persisted tokens, login/register flows
[POS]:    Auth layer - acquires, stores and hands out the session token
[UPDATE]: When auth flow or token storage changes
*/

pub mod claims;
pub mod gateway;
pub mod session;
pub mod token_store;

pub use claims::token_expiry;
pub use gateway::AuthGateway;
pub use session::{Session, SessionContext};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
