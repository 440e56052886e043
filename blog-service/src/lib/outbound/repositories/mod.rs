pub mod session;
pub mod user;

pub use session::PostgresSessionRepository;
pub use user::PostgresUserRepository;
