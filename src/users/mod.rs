mod model;

pub use model::{NewUser, UserPatch, UserRecord, ValidationError};
