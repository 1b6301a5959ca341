pub mod error;
pub mod traits;
pub mod trakt;

pub use error::TraktError;
pub use traits::ListSource;
pub use trakt::auth::{AuthAction, AuthCodeProvider, AuthHeaders, CredentialManager, FixedCode, TokenStore};
pub use trakt::client::{create_trakt_client, TraktClient};
pub use trakt::pagination::PageCursor;
