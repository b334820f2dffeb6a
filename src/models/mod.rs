pub mod commit;
pub mod pull;
pub mod user;

pub use commit::*;
pub use pull::*;
pub use user::*;
