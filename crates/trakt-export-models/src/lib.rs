pub mod context;
pub mod credentials;
pub mod item;
pub mod removal;
pub mod row;
pub mod user_list;

pub use context::{ContextError, IdFormat, ItemKind, ListKind, RequestContext, SortOrder, PAGE_LIMIT};
pub use credentials::{Credentials, DEFAULT_BASE_URL};
pub use item::{Episode, Movie, RawItem, Show, TraktIds, EPISODE_TITLE_PLACEHOLDER};
pub use removal::{CleanupTally, RemovalOutcome, RemovalRef};
pub use row::{ExportRow, RowDetail};
pub use user_list::{ListOwner, UserList};
